//! Block-diagonal approximation of the Fubini-Study metric tensor.
//!
//! Parametrized gates are grouped into layers whose gates do not depend on
//! each other. For a layer with generators `Gᵢ` (gate `exp(iθ sᵢ Gᵢ)`) the
//! block is
//!
//! ```text
//! gᵢⱼ = sᵢ sⱼ (⟨Gᵢ Gⱼ⟩ − ⟨Gᵢ⟩⟨Gⱼ⟩)
//! ```
//!
//! evaluated on the state prepared by everything before the layer. Blocks of
//! different layers are not coupled.

use ndarray::Array2;
use qvar_adapter_sim::Device;
use qvar_ir::{GateKind, Measurement, Operation, QuantumTape, Tensor, Wires};
use tracing::debug;

use crate::error::{VqeError, VqeResult};

/// Pauli-word generator of a one-parameter gate and its scale.
#[derive(Debug, Clone)]
struct Generator {
    obs: Tensor,
    scale: f64,
}

/// Gates of one layer and the operations preparing its input state.
#[derive(Debug, Default)]
struct Layer {
    pre: Vec<Operation>,
    params: Vec<usize>,
    generators: Vec<Generator>,
}

/// `None` for gates without parameters.
fn generator(op: &Operation) -> VqeResult<Option<Generator>> {
    let word = match op.kind() {
        k if k.params().is_empty() => return Ok(None),
        GateKind::RX(_) => "X".to_string(),
        GateKind::RY(_) => "Y".to_string(),
        // PhaseShift generates |1⟩⟨1| = (I − Z)/2, which has the same
        // covariances as Z scaled by −1/2.
        GateKind::RZ(_) | GateKind::PhaseShift(_) => "Z".to_string(),
        GateKind::MultiRZ(_) => "Z".repeat(op.wires().len()),
        GateKind::PauliRot { word, .. } => word.clone(),
        _ => return Err(VqeError::UnsupportedGate(op.name().to_string())),
    };
    Ok(Some(Generator {
        obs: Tensor::from_pauli_word(&word, op.wires())?,
        scale: -0.5,
    }))
}

fn parametrized_layers(tape: &QuantumTape) -> VqeResult<Vec<Layer>> {
    let mut layers = Vec::new();
    let mut current: Option<(Layer, Wires)> = None;
    let mut prefix: Vec<Operation> = Vec::new();
    let mut index = 0;

    for op in tape.operations() {
        match generator(op)? {
            Some(g) => {
                let fresh = match &current {
                    Some((_, tainted)) => op.wires().overlaps(tainted),
                    None => true,
                };
                if fresh {
                    if let Some((layer, _)) = current.take() {
                        layers.push(layer);
                    }
                    let layer = Layer {
                        pre: prefix.clone(),
                        ..Layer::default()
                    };
                    current = Some((layer, Wires::empty()));
                }
                if let Some((layer, tainted)) = current.as_mut() {
                    layer.params.push(index);
                    layer.generators.push(g);
                    *tainted = tainted.union(op.wires());
                }
                index += 1;
            }
            None => {
                // Gates after a layer gate on the same wires belong to its
                // future, not to the state the layer sees.
                if let Some((layer, tainted)) = current.as_mut() {
                    if op.wires().overlaps(tainted) {
                        *tainted = tainted.union(op.wires());
                    } else {
                        layer.pre.push(op.clone());
                    }
                }
            }
        }
        prefix.push(op.clone());
    }
    if let Some((layer, _)) = current {
        layers.push(layer);
    }
    Ok(layers)
}

/// Gate parameters of `tape` in operation order.
pub fn gate_params(tape: &QuantumTape) -> Vec<f64> {
    tape.operations().iter().flat_map(|op| op.params()).collect()
}

/// Metric tensor with respect to the gate parameters of `tape`, in
/// [`gate_params`] order.
///
/// With `diag_approx` only the variances on the diagonal are computed.
/// Gates other than RX, RY, RZ, PhaseShift, PauliRot and MultiRZ are
/// rejected with [`VqeError::UnsupportedGate`].
pub fn block_diag_metric_tensor(
    tape: &QuantumTape,
    device: &dyn Device,
    diag_approx: bool,
) -> VqeResult<Array2<f64>> {
    let layers = parametrized_layers(tape)?;
    let n_params: usize = layers.iter().map(|l| l.params.len()).sum();
    let mut metric = Array2::zeros((n_params, n_params));

    for layer in &layers {
        let gens = &layer.generators;
        let m = gens.len();
        let mut measurements: Vec<Measurement> =
            gens.iter().map(|g| Measurement::Var(g.obs.clone())).collect();
        let mut pairs = Vec::new();
        if !diag_approx {
            measurements.extend(gens.iter().map(|g| Measurement::Expval(g.obs.clone())));
            for i in 0..m {
                for j in i + 1..m {
                    let product = gens[i].obs.clone().tensor(gens[j].obs.clone())?;
                    measurements.push(Measurement::Expval(product));
                    pairs.push((i, j));
                }
            }
        }

        let block_tape = QuantumTape::from_parts(layer.pre.clone(), measurements);
        let res = device.execute(&block_tape)?;

        for (i, g) in gens.iter().enumerate() {
            let p = layer.params[i];
            metric[[p, p]] = g.scale * g.scale * res[i];
        }
        for (k, &(i, j)) in pairs.iter().enumerate() {
            let cov = res[2 * m + k] - res[m + i] * res[m + j];
            let value = gens[i].scale * gens[j].scale * cov;
            let (a, b) = (layer.params[i], layer.params[j]);
            metric[[a, b]] = value;
            metric[[b, a]] = value;
        }
    }

    debug!(
        n_layers = layers.len(),
        n_params,
        diag_approx,
        "computed metric tensor"
    );
    Ok(metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_split_on_shared_wires() {
        let mut tape = QuantumTape::new();
        tape.rx(0.1, 0).unwrap().ry(0.2, 1).unwrap();
        tape.cnot(0, 1).unwrap().h(2).unwrap();
        tape.rz(0.3, 2).unwrap().rz(0.4, 0).unwrap();
        let layers = parametrized_layers(&tape).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].params, vec![0, 1, 2]);
        // H on wire 2 prepares the third gate; the CNOT comes after the first two.
        assert_eq!(layers[0].pre.len(), 1);
        assert_eq!(layers[0].pre[0].name(), "Hadamard");
        assert_eq!(layers[1].params, vec![3]);
        assert_eq!(layers[1].pre.len(), 5);
    }

    #[test]
    fn test_unsupported_gate() {
        let mut tape = QuantumTape::new();
        tape.rot(0.1, 0.2, 0.3, 0).unwrap();
        assert!(matches!(
            parametrized_layers(&tape),
            Err(VqeError::UnsupportedGate(_))
        ));
    }

    #[test]
    fn test_fixed_gates_are_skipped() {
        let mut tape = QuantumTape::new();
        tape.h(0).unwrap().basis_state(vec![1], [1]).unwrap();
        assert!(parametrized_layers(&tape).unwrap().is_empty());
    }
}
