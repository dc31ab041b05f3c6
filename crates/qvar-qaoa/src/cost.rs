//! Cost Hamiltonians for graph problems.
//!
//! Each function returns `(cost, mixer)`: the problem Hamiltonian, whose
//! ground state encodes the optimum, and the mixer recommended for it. The
//! recommended initial state for all of them is the even superposition.

use qvar_ir::{Hamiltonian, Observable, Tensor};
use tracing::debug;

use crate::error::QaoaResult;
use crate::graph::Graph;
use crate::mixers::x_mixer;

/// MaxCut: `H_C = ½ Σ_{(i,j) ∈ E} (Z_i Z_j - I)`.
///
/// ```text
/// graph [(0, 1), (1, 2)]
/// cost:  (-0.5) [I0 I1] + (0.5) [Z0 Z1] + (-0.5) [I1 I2] + (0.5) [Z1 Z2]
/// mixer: (1.0) [X0] + (1.0) [X1] + (1.0) [X2]
/// ```
pub fn maxcut(graph: &Graph) -> QaoaResult<(Hamiltonian, Hamiltonian)> {
    let mut cost = Hamiltonian::default();
    for &(a, b) in graph.edges() {
        cost.push(-0.5, Tensor::from_pauli_word("II", [a, b])?);
        cost.push(0.5, Tensor::from_pauli_word("ZZ", [a, b])?);
    }
    debug!(n_edges = graph.num_edges(), n_terms = cost.len(), "maxcut cost Hamiltonian");
    Ok((cost, x_mixer(graph.wires())))
}

/// Minimum vertex cover: `H_C = |V|/2 Σ_{(i,j) ∈ E} (Z_i Z_j - I) - Σ_j Z_j`.
pub fn min_vertex_cover(graph: &Graph) -> QaoaResult<(Hamiltonian, Hamiltonian)> {
    let (maxcut_h, mixer) = maxcut(graph)?;
    let mut cost = graph.num_nodes() as f64 * maxcut_h;
    for &w in graph.nodes() {
        cost.push(-1.0, Observable::pauli_z(w));
    }
    Ok((cost, mixer))
}

/// Maximum clique: `H_C = ½ Σ_{(i,j) ∈ E(Ḡ)} (Z_i Z_j - Z_i - Z_j) + Σ_j Z_j`,
/// where `Ḡ` is the complement graph.
pub fn max_clique(graph: &Graph) -> QaoaResult<(Hamiltonian, Hamiltonian)> {
    let mut cost = Hamiltonian::default();
    for (a, b) in graph.complement_edges() {
        cost.push(0.5, Tensor::from_pauli_word("ZZ", [a, b])?);
        cost.push(-0.5, Observable::pauli_z(a));
        cost.push(-0.5, Observable::pauli_z(b));
    }
    for &w in graph.nodes() {
        cost.push(1.0, Observable::pauli_z(w));
    }
    Ok((cost, x_mixer(graph.wires())))
}
