//! Pauli-rotation synthesis.
//!
//! Rewrites `PauliRot(θ, P)` and `MultiRZ(θ)` into one- and two-wire gates
//! using the circuit identity:
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder† · RZ(θ) · CNOT_ladder
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → RX(-π/2) · Z · RX(π/2)
//!   Z → identity
//!
//! Gate count per rotation: 2·(k-1) CNOT + 2·(#X + #Y) basis gates + 1 RZ,
//! where k = number of non-identity wires.

use std::f64::consts::FRAC_PI_2;

use qvar_ir::{GateKind, QuantumTape, Wire};
use tracing::debug;

use crate::error::SimResult;

/// Return a copy of `tape` with every Pauli rotation replaced by elementary gates.
///
/// Rotations about the identity word are global phases and disappear.
/// Measurements are carried over unchanged.
pub fn expand_pauli_rotations(tape: &QuantumTape) -> SimResult<QuantumTape> {
    let mut out = QuantumTape::from_parts(
        Vec::with_capacity(tape.operations().len()),
        tape.measurements().to_vec(),
    );
    let mut expanded = 0usize;

    for op in tape.operations() {
        match op.kind() {
            GateKind::PauliRot { theta, word } => {
                let factors: Vec<(Wire, char)> = op
                    .wires()
                    .iter()
                    .zip(word.chars())
                    .filter(|(_, c)| *c != 'I')
                    .collect();
                append_pauli_rotation(&mut out, *theta, &factors)?;
                expanded += 1;
            }
            GateKind::MultiRZ(theta) => {
                let factors: Vec<(Wire, char)> = op.wires().iter().map(|w| (w, 'Z')).collect();
                append_pauli_rotation(&mut out, *theta, &factors)?;
                expanded += 1;
            }
            _ => {
                out.push(op.clone());
            }
        }
    }

    debug!(
        n_rotations = expanded,
        n_ops = out.operations().len(),
        "expanded Pauli rotations"
    );
    Ok(out)
}

/// Append the gates for `exp(-i θ/2 · P)`, where `P` is given as its
/// non-identity `(wire, letter)` factors.
pub fn append_pauli_rotation(
    tape: &mut QuantumTape,
    theta: f64,
    factors: &[(Wire, char)],
) -> SimResult<()> {
    let Some(&(target, _)) = factors.last() else {
        // Pure global phase; nothing to do.
        return Ok(());
    };

    // --- Step 1: basis rotations (diagonalise each Pauli into Z) ---
    basis_change(tape, factors, false)?;

    // --- Step 2: CNOT ladder collapsing parity onto the last wire ---
    let wires: Vec<Wire> = factors.iter().map(|(w, _)| *w).collect();
    cnot_ladder(tape, &wires, false)?;

    // --- Step 3: RZ(θ) on the last wire ---
    tape.rz(theta, target)?;

    // --- Step 4: undo CNOT ladder ---
    cnot_ladder(tape, &wires, true)?;

    // --- Step 5: undo basis rotations ---
    basis_change(tape, factors, true)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply basis-change gates for each Pauli factor.
///
/// Forward pass (`undo = false`): X → H, Y → RX(π/2).
/// Reverse pass (`undo = true`):  X → H, Y → RX(-π/2).
fn basis_change(tape: &mut QuantumTape, factors: &[(Wire, char)], undo: bool) -> SimResult<()> {
    for &(w, letter) in factors {
        match (letter, undo) {
            ('X', _) => {
                tape.h(w)?;
            }
            ('Y', false) => {
                tape.rx(FRAC_PI_2, w)?;
            }
            ('Y', true) => {
                tape.rx(-FRAC_PI_2, w)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// CNOT(w[0], w[1]), CNOT(w[1], w[2]), …; `reverse` runs the ladder backwards.
fn cnot_ladder(tape: &mut QuantumTape, wires: &[Wire], reverse: bool) -> SimResult<()> {
    let pairs: Vec<&[Wire]> = if reverse {
        wires.windows(2).rev().collect()
    } else {
        wires.windows(2).collect()
    };
    for pair in pairs {
        tape.cnot(pair[0], pair[1])?;
    }
    Ok(())
}
