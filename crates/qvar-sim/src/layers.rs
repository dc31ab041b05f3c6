//! Layer templates.
//!
//! [`layer`] repeats an arbitrary template closure; [`CustomEntanglerLayers`]
//! builds the common "rotations then entanglers" ansatz with a configurable
//! wiring [`Pattern`].

use std::fmt;
use std::str::FromStr;

use qvar_ir::{GateKind, QuantumTape, Wire, Wires};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// Apply `template` `depth` times, passing the repetition index.
pub fn layer<F>(tape: &mut QuantumTape, depth: usize, mut template: F) -> SimResult<()>
where
    F: FnMut(&mut QuantumTape, usize) -> SimResult<()>,
{
    for i in 0..depth {
        template(tape, i)?;
    }
    Ok(())
}

/// How two-wire gates are placed on a wire register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// One gate per wire; not valid for two-wire gates.
    Single,
    /// Pairs `(0,1), (2,3), …`.
    Double,
    /// Pairs `(1,2), (3,4), …`.
    DoubleOdd,
    /// Nearest neighbours `(0,1), (1,2), …`.
    Chain,
    /// Chain closed back onto the first wire. Two wires give a single pair.
    Ring,
    /// Shrinking brick pattern.
    Pyramid,
    /// Every pair `i < j`.
    AllToAll,
    /// Explicit wire pairs.
    Custom(Vec<(Wire, Wire)>),
}

impl Pattern {
    /// Wire pairs the pattern produces on `wires`.
    pub fn pairs(&self, wires: &Wires) -> Vec<(Wire, Wire)> {
        let w = wires.as_slice();
        let n = w.len();
        if n < 2 {
            return match self {
                Pattern::Custom(pairs) => pairs.clone(),
                _ => Vec::new(),
            };
        }
        match self {
            Pattern::Single => Vec::new(),
            Pattern::Double => (0..n - 1).step_by(2).map(|i| (w[i], w[i + 1])).collect(),
            Pattern::DoubleOdd => (1..n - 1).step_by(2).map(|i| (w[i], w[i + 1])).collect(),
            Pattern::Chain => (0..n - 1).map(|i| (w[i], w[i + 1])).collect(),
            Pattern::Ring if n == 2 => vec![(w[0], w[1])],
            Pattern::Ring => (0..n).map(|i| (w[i], w[(i + 1) % n])).collect(),
            Pattern::Pyramid => (0..n / 2)
                .flat_map(|layer| (layer..n - 1 - layer).step_by(2))
                .map(|i| (w[i], w[i + 1]))
                .collect(),
            Pattern::AllToAll => (0..n)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .map(|(i, j)| (w[i], w[j]))
                .collect(),
            Pattern::Custom(pairs) => pairs.clone(),
        }
    }

    /// Number of coupling parameters per layer on `n_wires` wires.
    pub fn n_params(&self, n_wires: usize) -> usize {
        match self {
            Pattern::Single => n_wires,
            Pattern::Custom(pairs) => pairs.len(),
            _ => self.pairs(&Wires::range(n_wires)).len(),
        }
    }
}

impl FromStr for Pattern {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Pattern::Single),
            "double" => Ok(Pattern::Double),
            "double_odd" => Ok(Pattern::DoubleOdd),
            "chain" => Ok(Pattern::Chain),
            "ring" => Ok(Pattern::Ring),
            "pyramid" => Ok(Pattern::Pyramid),
            "all_to_all" => Ok(Pattern::AllToAll),
            other => Err(SimError::InvalidTemplate(format!("unknown pattern '{other}'"))),
        }
    }
}

/// One-parameter single-wire rotation used by [`CustomEntanglerLayers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// RX.
    #[default]
    RX,
    /// RY.
    RY,
    /// RZ.
    RZ,
    /// Phase shift.
    PhaseShift,
}

impl Rotation {
    fn gate(self, theta: f64) -> GateKind {
        match self {
            Rotation::RX => GateKind::RX(theta),
            Rotation::RY => GateKind::RY(theta),
            Rotation::RZ => GateKind::RZ(theta),
            Rotation::PhaseShift => GateKind::PhaseShift(theta),
        }
    }
}

/// Two-wire gate used by [`CustomEntanglerLayers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coupling {
    /// CNOT.
    CNOT,
    /// CZ.
    CZ,
    /// SWAP.
    SWAP,
    /// Controlled RX.
    CRX,
    /// Controlled RY.
    CRY,
    /// Controlled RZ.
    CRZ,
}

impl Coupling {
    /// Number of parameters the gate takes.
    pub fn num_params(self) -> usize {
        match self {
            Coupling::CNOT | Coupling::CZ | Coupling::SWAP => 0,
            Coupling::CRX | Coupling::CRY | Coupling::CRZ => 1,
        }
    }

    fn gate(self, theta: f64) -> GateKind {
        match self {
            Coupling::CNOT => GateKind::CNOT,
            Coupling::CZ => GateKind::CZ,
            Coupling::SWAP => GateKind::SWAP,
            Coupling::CRX => GateKind::CRX(theta),
            Coupling::CRY => GateKind::CRY(theta),
            Coupling::CRZ => GateKind::CRZ(theta),
        }
    }
}

impl fmt::Display for Coupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate(0.0).name())
    }
}

/// Layers of single-wire rotations followed by two-wire couplings.
///
/// `rotation_weights` has shape `(L, len(wires))`. Without coupling weights
/// the coupling defaults to CNOT; with weights of shape
/// `(L, pattern.n_params(len(wires)))` it defaults to CRX.
#[derive(Debug, Clone)]
pub struct CustomEntanglerLayers {
    rotation_weights: Vec<Vec<f64>>,
    coupling_weights: Option<Vec<Vec<f64>>>,
    wires: Wires,
    rotation: Rotation,
    coupling: Option<Coupling>,
    pattern: Pattern,
}

impl CustomEntanglerLayers {
    /// Create the template with RX rotations and a ring of CNOTs.
    pub fn new(rotation_weights: Vec<Vec<f64>>, wires: Wires) -> Self {
        Self {
            rotation_weights,
            coupling_weights: None,
            wires,
            rotation: Rotation::RX,
            coupling: None,
            pattern: Pattern::Ring,
        }
    }

    /// Parameterise the couplings.
    #[must_use]
    pub fn with_coupling_weights(mut self, weights: Vec<Vec<f64>>) -> Self {
        self.coupling_weights = Some(weights);
        self
    }

    /// Use a different rotation gate.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Use a different coupling gate.
    #[must_use]
    pub fn with_coupling(mut self, coupling: Coupling) -> Self {
        self.coupling = Some(coupling);
        self
    }

    /// Use a different coupling pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.rotation_weights.len()
    }

    fn effective_coupling(&self) -> Coupling {
        match (self.coupling, &self.coupling_weights) {
            (Some(c), _) => c,
            (None, None) => Coupling::CNOT,
            (None, Some(_)) => Coupling::CRX,
        }
    }

    /// Check shapes and gate/weight combinations.
    pub fn validate(&self) -> SimResult<()> {
        let n = self.wires.len();
        let depth = self.depth();
        if depth == 0 {
            return Err(SimError::InvalidTemplate(
                "'rotation_weights' must contain at least one layer".into(),
            ));
        }
        if let Some(row) = self.rotation_weights.iter().find(|r| r.len() != n) {
            return Err(SimError::InvalidTemplate(format!(
                "'rotation_weights' must be of shape ({depth}, {n}); got a row of length {}",
                row.len()
            )));
        }

        if self.pattern == Pattern::Single {
            return Err(SimError::InvalidTemplate(
                "`coupling` accepts 2-wire gates, pattern 'single' places 1-wire gates".into(),
            ));
        }
        if let Pattern::Custom(pairs) = &self.pattern {
            for (a, b) in pairs {
                if a == b || !self.wires.contains(*a) || !self.wires.contains(*b) {
                    return Err(SimError::InvalidTemplate(format!(
                        "custom pattern pair ({a}, {b}) must name two distinct template wires"
                    )));
                }
            }
        }

        let coupling = self.effective_coupling();
        match (&self.coupling_weights, coupling.num_params()) {
            (Some(_), 0) => Err(SimError::InvalidTemplate(format!(
                "Gate '{coupling}' does not take parameters"
            ))),
            (None, p) if p > 0 => Err(SimError::InvalidTemplate(format!(
                "Gate '{coupling}' must take parameters"
            ))),
            (Some(weights), _) => {
                if weights.len() != depth {
                    return Err(SimError::InvalidTemplate(
                        "First dimension of `rotation_weights` and `coupling_weights` must be the same"
                            .into(),
                    ));
                }
                let expected = self.pattern.n_params(n);
                if let Some(row) = weights.iter().find(|r| r.len() != expected) {
                    return Err(SimError::InvalidTemplate(format!(
                        "'coupling_weights' must be of shape ({depth}, {expected}); got a row of length {}",
                        row.len()
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Append all layers to `tape`.
    pub fn apply(&self, tape: &mut QuantumTape) -> SimResult<()> {
        self.validate()?;
        let coupling = self.effective_coupling();
        let pairs = self.pattern.pairs(&self.wires);
        debug!(
            depth = self.depth(),
            n_wires = self.wires.len(),
            n_pairs = pairs.len(),
            "applying entangler layers"
        );

        layer(tape, self.depth(), |tape, l| {
            for (w, theta) in self.wires.iter().zip(&self.rotation_weights[l]) {
                tape.apply(self.rotation.gate(*theta), [w])?;
            }
            for (k, (a, b)) in pairs.iter().enumerate() {
                let theta = self
                    .coupling_weights
                    .as_ref()
                    .map_or(0.0, |weights| weights[l][k]);
                tape.apply(coupling.gate(theta), [*a, *b])?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(p: Pattern, n: usize) -> Vec<(u32, u32)> {
        p.pairs(&Wires::range(n))
            .into_iter()
            .map(|(a, b)| (a.0, b.0))
            .collect()
    }

    #[test]
    fn test_pattern_pairs() {
        assert_eq!(pairs(Pattern::Double, 5), vec![(0, 1), (2, 3)]);
        assert_eq!(pairs(Pattern::DoubleOdd, 5), vec![(1, 2), (3, 4)]);
        assert_eq!(pairs(Pattern::Chain, 3), vec![(0, 1), (1, 2)]);
        assert_eq!(pairs(Pattern::Ring, 2), vec![(0, 1)]);
        assert_eq!(pairs(Pattern::Ring, 3), vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(pairs(Pattern::Pyramid, 4), vec![(0, 1), (2, 3), (1, 2)]);
        assert_eq!(pairs(Pattern::AllToAll, 3), vec![(0, 1), (0, 2), (1, 2)]);
        assert!(pairs(Pattern::Chain, 1).is_empty());
    }

    #[test]
    fn test_n_params() {
        assert_eq!(Pattern::Single.n_params(4), 4);
        assert_eq!(Pattern::Ring.n_params(2), 1);
        assert_eq!(Pattern::Pyramid.n_params(6), 6);
        assert_eq!(Pattern::AllToAll.n_params(4), 6);
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!("double_odd".parse::<Pattern>().unwrap(), Pattern::DoubleOdd);
        assert!("triangle".parse::<Pattern>().is_err());
    }

    #[test]
    fn test_layer_repeats() {
        let mut tape = QuantumTape::new();
        layer(&mut tape, 3, |tape, i| {
            tape.rx(i as f64, 0)?;
            Ok(())
        })
        .unwrap();
        let params: Vec<f64> = tape.operations().iter().flat_map(|op| op.params()).collect();
        assert_eq!(params, vec![0.0, 1.0, 2.0]);
    }
}
