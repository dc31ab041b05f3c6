//! `qvar-qaoa` — Quantum Approximate Optimization Algorithm building blocks.
//!
//! - [`Graph`] problem graphs, from edge lists or `petgraph`
//! - cost Hamiltonians: [`maxcut`], [`min_vertex_cover`], [`max_clique`]
//! - mixers: [`x_mixer`], [`xy_mixer`]
//! - layers: [`cost_layer`], [`mixer_layer`], [`QaoaCircuit`]
//!
//! # Example
//!
//! ```rust
//! use qvar_ir::QuantumTape;
//! use qvar_qaoa::{Graph, QaoaCircuit, maxcut};
//!
//! let graph = Graph::from_edges([(0u32, 1), (1, 2), (2, 0)]).unwrap();
//! let (cost, mixer) = maxcut(&graph).unwrap();
//! let circuit = QaoaCircuit::from_hamiltonians(&cost, &mixer, 2).unwrap();
//!
//! let mut tape = QuantumTape::new();
//! for w in graph.wires() {
//!     tape.h(w).unwrap();
//! }
//! circuit.apply(&mut tape, &[1.0, 1.0], &[1.0, 1.0]).unwrap();
//! // 3 Hadamards + 2 × (3 ZZ rotations + 3 X rotations)
//! assert_eq!(tape.operations().len(), 15);
//! ```

pub mod cost;
pub mod error;
pub mod graph;
pub mod layers;
pub mod mixers;

pub use cost::{max_clique, maxcut, min_vertex_cover};
pub use error::{QaoaError, QaoaResult};
pub use graph::Graph;
pub use layers::{EvolutionLayer, QaoaCircuit, cost_layer, mixer_layer};
pub use mixers::{x_mixer, xy_mixer};
