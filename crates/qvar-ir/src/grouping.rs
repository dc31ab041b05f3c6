//! Partitioning of observables into qubit-wise commuting groups.

use crate::observable::{Observable, Tensor};

/// True if two terms commute qubit-wise: on every shared wire the factors are
/// identical or one of them is the identity.
///
/// Multi-wire factors only commute with an identical factor on the same wires.
pub fn qubit_wise_commute(a: &Tensor, b: &Tensor) -> bool {
    a.factors().iter().all(|fa| {
        b.factors()
            .iter()
            .filter(|fb| fa.wires().overlaps(fb.wires()))
            .all(|fb| factors_commute(fa, fb))
    })
}

fn factors_commute(a: &Observable, b: &Observable) -> bool {
    a.is_identity() || b.is_identity() || a == b
}

/// Greedy first-fit partition of `ops` into qubit-wise commuting groups.
///
/// Returns the grouped terms and their coefficients. Term order within a
/// group follows the input order.
pub fn group_observables(ops: &[Tensor], coeffs: &[f64]) -> (Vec<Vec<Tensor>>, Vec<Vec<f64>>) {
    let mut groups: Vec<Vec<Tensor>> = Vec::new();
    let mut grouped_coeffs: Vec<Vec<f64>> = Vec::new();

    for (op, coeff) in ops.iter().zip(coeffs) {
        let slot = groups
            .iter()
            .position(|g| g.iter().all(|member| qubit_wise_commute(member, op)));
        match slot {
            Some(i) => {
                groups[i].push(op.clone());
                grouped_coeffs[i].push(*coeff);
            }
            None => {
                groups.push(vec![op.clone()]);
                grouped_coeffs.push(vec![*coeff]);
            }
        }
    }

    tracing::debug!(
        terms = ops.len(),
        groups = groups.len(),
        "grouped observables"
    );
    (groups, grouped_coeffs)
}
