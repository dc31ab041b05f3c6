//! Pauli decomposition of Hermitian matrices.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::matrix;
use crate::observable::Tensor;

/// Coefficients below this magnitude are dropped from the decomposition.
pub const DECOMPOSE_TOL: f64 = 1e-12;

const PAULI_LETTERS: [char; 4] = ['I', 'X', 'Y', 'Z'];

/// Entry `(row_bit, col_bit)` of a single-qubit Pauli.
fn pauli_entry(letter: char, row: usize, col: usize) -> Complex64 {
    match (letter, row, col) {
        ('I', r, c) if r == c => Complex64::new(1.0, 0.0),
        ('X', r, c) if r != c => Complex64::new(1.0, 0.0),
        ('Y', 0, 1) => Complex64::new(0.0, -1.0),
        ('Y', 1, 0) => Complex64::new(0.0, 1.0),
        ('Z', 0, 0) => Complex64::new(1.0, 0.0),
        ('Z', 1, 1) => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, 0.0),
    }
}

/// Decompose a `2^n × 2^n` Hermitian matrix into Pauli words on wires `0..n`.
///
/// Returns `(coeffs, words)` with `coeff = Re Tr(P · M) / 2^n`, in
/// lexicographic `I < X < Y < Z` order with the first letter on wire 0.
/// Words whose coefficient vanishes are omitted.
pub fn pauli_decompose(m: &Array2<Complex64>) -> IrResult<(Vec<f64>, Vec<Tensor>)> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(IrError::InvalidMatrix(format!(
            "expected a square matrix, got {rows}x{cols}"
        )));
    }
    let n = match matrix::num_wires_for_dim(rows) {
        Some(n) if n > 0 => n,
        _ => {
            return Err(IrError::InvalidMatrix(format!(
                "dimension {rows} is not a positive power of two"
            )));
        }
    };
    if !matrix::is_hermitian(m) {
        return Err(IrError::NotHermitian);
    }

    let dim = rows;
    let norm = dim as f64;
    let mut coeffs = Vec::new();
    let mut words = Vec::new();

    for index in 0..4usize.pow(n as u32) {
        let word: Vec<char> = (0..n)
            .map(|k| PAULI_LETTERS[(index >> (2 * (n - 1 - k))) & 3])
            .collect();
        // Each Pauli word has one non-zero per row, at column row ^ flip.
        let flip: usize = word
            .iter()
            .enumerate()
            .filter(|(_, l)| matches!(l, 'X' | 'Y'))
            .map(|(k, _)| 1usize << (n - 1 - k))
            .sum();
        let trace: Complex64 = (0..dim)
            .map(|r| {
                let c = r ^ flip;
                let p = word.iter().enumerate().fold(Complex64::new(1.0, 0.0), |acc, (k, l)| {
                    let shift = n - 1 - k;
                    acc * pauli_entry(*l, (r >> shift) & 1, (c >> shift) & 1)
                });
                p * m[[c, r]]
            })
            .sum();
        let coeff = trace.re / norm;
        if coeff.abs() < DECOMPOSE_TOL {
            continue;
        }
        let word: String = word.into_iter().collect();
        coeffs.push(coeff);
        words.push(Tensor::from_pauli_word(&word, 0..n)?);
    }

    Ok((coeffs, words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::Hamiltonian;
    use crate::wires::Wires;
    use ndarray::array;

    fn real(m: Array2<f64>) -> Array2<Complex64> {
        m.mapv(|x| Complex64::new(x, 0.0))
    }

    #[test]
    fn test_ones_is_identity_plus_x() {
        let (coeffs, words) = pauli_decompose(&real(array![[1.0, 1.0], [1.0, 1.0]])).unwrap();
        assert_eq!(coeffs, vec![1.0, 1.0]);
        let names: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        assert_eq!(names, vec!["I0", "X0"]);
    }

    #[test]
    fn test_two_qubit_ordering() {
        // 0.5·X0Z1 + 0.25·Y0Y1
        let h = Hamiltonian::new(
            vec![0.25, 0.5],
            vec![
                Tensor::from_pauli_word("YY", [0, 1]).unwrap(),
                Tensor::from_pauli_word("XZ", [0, 1]).unwrap(),
            ],
        )
        .unwrap();
        let m = h.matrix(&Wires::range(2)).unwrap();
        let (coeffs, words) = pauli_decompose(&m).unwrap();
        let words: Vec<String> = words.iter().filter_map(Tensor::pauli_word).collect();
        assert_eq!(words, vec!["XZ", "YY"]);
        assert!((coeffs[0] - 0.5).abs() < 1e-12);
        assert!((coeffs[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            pauli_decompose(&real(Array2::zeros((3, 3)))),
            Err(IrError::InvalidMatrix(_))
        ));
        assert!(matches!(
            pauli_decompose(&real(array![[0.0, 1.0], [0.0, 0.0]])),
            Err(IrError::NotHermitian)
        ));
    }
}
