//! Mixer Hamiltonians.

use qvar_ir::{Hamiltonian, Observable, Tensor, Wires};

use crate::error::QaoaResult;
use crate::graph::Graph;

/// The transverse-field mixer `H_M = Σ_i X_i` over `wires`.
pub fn x_mixer(wires: &Wires) -> Hamiltonian {
    wires
        .iter()
        .map(|w| Hamiltonian::term(1.0, Observable::pauli_x(w)))
        .sum()
}

/// The XY mixer `H_M = ½ Σ_{(i,j) ∈ E} (X_i X_j + Y_i Y_j)`.
///
/// Preserves Hamming weight, so it keeps the evolution inside a fixed
/// excitation subspace.
pub fn xy_mixer(graph: &Graph) -> QaoaResult<Hamiltonian> {
    let mut h = Hamiltonian::default();
    for &(a, b) in graph.edges() {
        h.push(0.5, Tensor::from_pauli_word("XX", [a, b])?);
        h.push(0.5, Tensor::from_pauli_word("YY", [a, b])?);
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_mixer() {
        let h = x_mixer(&Wires::range(3));
        assert_eq!(h.to_string(), "(1.0) [X0]\n+ (1.0) [X1]\n+ (1.0) [X2]");
    }

    #[test]
    fn test_xy_mixer_terms() {
        let g = Graph::from_edges([(0u32, 1), (1, 2)]).unwrap();
        let h = xy_mixer(&g).unwrap();
        assert_eq!(h.coeffs(), &[0.5, 0.5, 0.5, 0.5]);
        let words: Vec<String> = h.ops().iter().map(ToString::to_string).collect();
        assert_eq!(words, vec!["X0 X1", "Y0 Y1", "X1 X2", "Y1 Y2"]);
    }
}
