//! Problem graphs.
//!
//! Nodes are wire labels. A graph can be built from a plain edge list or from
//! a `petgraph` undirected graph, in which case node index `i` becomes
//! wire `i`.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use qvar_ir::{Wire, Wires};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{QaoaError, QaoaResult};

/// An undirected simple graph over wire labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Wires,
    edges: Vec<(Wire, Wire)>,
}

impl Graph {
    /// Build a graph from an edge list.
    ///
    /// Nodes are taken in order of first appearance.
    pub fn from_edges<W: Into<Wire>>(edges: impl IntoIterator<Item = (W, W)>) -> QaoaResult<Self> {
        let edges: Vec<(Wire, Wire)> = edges.into_iter().map(|(a, b)| (a.into(), b.into())).collect();
        let mut nodes = Vec::new();
        for &(a, b) in &edges {
            for w in [a, b] {
                if !nodes.contains(&w) {
                    nodes.push(w);
                }
            }
        }
        Self::with_nodes(nodes, edges)
    }

    /// Build a graph with an explicit node list, which may include isolated nodes.
    pub fn with_nodes<W: Into<Wire>>(
        nodes: impl IntoIterator<Item = W>,
        edges: impl IntoIterator<Item = (W, W)>,
    ) -> QaoaResult<Self> {
        let nodes = Wires::new(nodes)?;
        let edges: Vec<(Wire, Wire)> = edges.into_iter().map(|(a, b)| (a.into(), b.into())).collect();
        check_edges(&edges)?;
        for &(a, b) in &edges {
            for w in [a, b] {
                if !nodes.contains(w) {
                    return Err(QaoaError::UnknownNode(w));
                }
            }
        }
        Ok(Self { nodes, edges })
    }

    /// Build a graph from a `petgraph` undirected graph.
    ///
    /// Node and edge weights are ignored.
    pub fn from_petgraph<N, E>(graph: &UnGraph<N, E>) -> QaoaResult<Self> {
        let nodes: Vec<Wire> = graph.node_indices().map(|n| Wire::from(n.index())).collect();
        let edges: Vec<(Wire, Wire)> = graph
            .edge_references()
            .map(|e| (Wire::from(e.source().index()), Wire::from(e.target().index())))
            .collect();
        Self::with_nodes(nodes, edges)
    }

    /// Nodes in order.
    pub fn nodes(&self) -> &[Wire] {
        self.nodes.as_slice()
    }

    /// Edges in order.
    pub fn edges(&self) -> &[(Wire, Wire)] {
        &self.edges
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The nodes as a wire register.
    pub fn wires(&self) -> &Wires {
        &self.nodes
    }

    /// Whether `a` and `b` are joined by an edge.
    pub fn has_edge(&self, a: Wire, b: Wire) -> bool {
        self.edges
            .iter()
            .any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a))
    }

    /// Node pairs not joined by an edge, in node order.
    pub fn complement_edges(&self) -> Vec<(Wire, Wire)> {
        let mut out = Vec::new();
        let nodes = self.nodes.as_slice();
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if !self.has_edge(a, b) {
                    out.push((a, b));
                }
            }
        }
        out
    }

    /// Number of edges cut by a bipartition, `bits[i]` giving the side of node `i`.
    pub fn cut_size(&self, bits: &[u8]) -> usize {
        self.edges
            .iter()
            .filter(|(a, b)| {
                let side = |w: &Wire| {
                    self.nodes
                        .index_of(*w)
                        .and_then(|i| bits.get(i).copied())
                };
                side(a) != side(b)
            })
            .count()
    }
}

fn check_edges(edges: &[(Wire, Wire)]) -> QaoaResult<()> {
    let mut seen = FxHashSet::default();
    for &(a, b) in edges {
        if a == b {
            return Err(QaoaError::InvalidGraph(format!(
                "Edges must end in distinct nodes, got ({a}, {b})"
            )));
        }
        let key = if a.0 < b.0 { (a, b) } else { (b, a) };
        if !seen.insert(key) {
            return Err(QaoaError::InvalidGraph(
                "Nodes cannot be connected by more than one edge".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_in_first_appearance_order() {
        let g = Graph::from_edges([(2u32, 0), (0, 1)]).unwrap();
        assert_eq!(g.nodes(), &[Wire(2), Wire(0), Wire(1)]);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_self_loop_rejected() {
        let err = Graph::from_edges([(0u32, 1), (1, 1)]).unwrap_err();
        assert!(err.to_string().contains("Edges must end in distinct nodes"));
    }

    #[test]
    fn test_repeated_edge_rejected() {
        let err = Graph::from_edges([(0u32, 1), (1, 0)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nodes cannot be connected by more than one edge"
        );
    }

    #[test]
    fn test_unknown_node() {
        let err = Graph::with_nodes([0u32, 1], [(0, 2)]).unwrap_err();
        assert!(matches!(err, QaoaError::UnknownNode(Wire(2))));
    }

    #[test]
    fn test_from_petgraph() {
        let mut g = UnGraph::<(), ()>::new_undirected();
        let a = g.add_node(());
        let b = g.add_node(());
        let c = g.add_node(());
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());
        let graph = Graph::from_petgraph(&g).unwrap();
        assert_eq!(graph.nodes(), &[Wire(0), Wire(1), Wire(2)]);
        assert_eq!(graph.complement_edges(), vec![(Wire(0), Wire(2))]);
    }

    #[test]
    fn test_cut_size() {
        let g = Graph::from_edges([(0u32, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(g.cut_size(&[0, 1, 0, 1]), 3);
        assert_eq!(g.cut_size(&[0, 0, 1, 1]), 1);
    }
}
