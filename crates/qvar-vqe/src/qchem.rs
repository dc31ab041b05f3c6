//! Fermionic observables mapped to qubits.

use std::fmt;
use std::str::FromStr;

use qvar_ir::{Hamiltonian, Observable, Tensor, Wire};
use serde::{Deserialize, Serialize};

use crate::error::{VqeError, VqeResult};

/// Fermion-to-qubit mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    /// Qubit `j` stores the occupation of spin orbital `j`.
    #[default]
    JordanWigner,
    /// Qubits store partial parity sums over a binary tree.
    BravyiKitaev,
}

impl FromStr for Mapping {
    type Err = VqeError;

    /// Case-insensitive parse of `jordan_wigner` / `bravyi_kitaev`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jordan_wigner" => Ok(Mapping::JordanWigner),
            "bravyi_kitaev" => Ok(Mapping::BravyiKitaev),
            _ => Err(VqeError::InvalidMapping(s.to_string())),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapping::JordanWigner => write!(f, "jordan_wigner"),
            Mapping::BravyiKitaev => write!(f, "bravyi_kitaev"),
        }
    }
}

impl Mapping {
    /// Qubits whose Z-parity gives the occupation of spin orbital `j`.
    fn occupation_set(self, j: u32) -> Vec<u32> {
        match self {
            Mapping::JordanWigner => vec![j],
            Mapping::BravyiKitaev => {
                // Flip set: j - 1, j - 2, j - 4, … for each trailing one bit of j.
                let mut set = vec![j];
                let mut k = 0;
                while (j >> k) & 1 == 1 {
                    set.push(j - (1 << k));
                    k += 1;
                }
                set.sort_unstable();
                set
            }
        }
    }
}

/// Total particle number `N = Σ_j n_j` over `2 · n_orbitals` spin orbitals.
///
/// Each number operator maps to `n_j = ½ (I - Z_{S(j)})`, where `S(j)` is the
/// mapping's occupation set. The identity parts are collected into a single
/// constant term `n_orbitals · I` on wire 0, followed by one `-½ Z…` term
/// per spin orbital.
pub fn particle_number(n_orbitals: usize, mapping: Mapping) -> VqeResult<Hamiltonian> {
    if n_orbitals == 0 {
        return Err(VqeError::InvalidOrbitals(n_orbitals));
    }
    let n_qubits = u32::try_from(2 * n_orbitals).map_err(|_| VqeError::InvalidOrbitals(n_orbitals))?;

    let mut h = Hamiltonian::term(n_orbitals as f64, Observable::identity(0));
    for j in 0..n_qubits {
        let set = mapping.occupation_set(j);
        let word = "Z".repeat(set.len());
        let term = Tensor::from_pauli_word(&word, set.into_iter().map(Wire))?;
        h.push(-0.5, term);
    }
    Ok(h)
}
