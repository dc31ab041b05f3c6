use serde::{Deserialize, Serialize};

use super::StepOptimizer;
use crate::gradient::DEFAULT_STEP;

/// Plain gradient descent, `θ ← θ - η ∇f(θ)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDescentOptimizer {
    /// Learning rate η.
    pub stepsize: f64,
    /// Finite-difference step.
    pub diff_step: f64,
}

impl Default for GradientDescentOptimizer {
    fn default() -> Self {
        Self {
            stepsize: 0.01,
            diff_step: DEFAULT_STEP,
        }
    }
}

impl GradientDescentOptimizer {
    /// Create an optimizer with learning rate `stepsize`.
    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            ..Self::default()
        }
    }

    /// Set the finite-difference step.
    #[must_use]
    pub fn with_diff_step(mut self, diff_step: f64) -> Self {
        self.diff_step = diff_step;
        self
    }
}

impl StepOptimizer for GradientDescentOptimizer {
    fn apply_grad(&mut self, grad: &[f64], params: &[f64]) -> Vec<f64> {
        params
            .iter()
            .zip(grad)
            .map(|(p, g)| p - self.stepsize * g)
            .collect()
    }

    fn diff_step(&self) -> f64 {
        self.diff_step
    }
}

/// Adam: gradient descent with bias-corrected first and second moment
/// estimates.
///
/// ```text
/// m ← β₁ m + (1 - β₁) g
/// v ← β₂ v + (1 - β₂) g²
/// η_t = η · √(1 - β₂ᵗ) / (1 - β₁ᵗ)
/// θ ← θ - η_t · m / (√v + ε)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdamOptimizer {
    /// Learning rate η.
    pub stepsize: f64,
    /// Decay of the first moment.
    pub beta1: f64,
    /// Decay of the second moment.
    pub beta2: f64,
    /// Numerical offset ε.
    pub eps: f64,
    /// Finite-difference step.
    pub diff_step: f64,
    first_moment: Vec<f64>,
    second_moment: Vec<f64>,
    t: i32,
}

impl Default for AdamOptimizer {
    fn default() -> Self {
        Self {
            stepsize: 0.01,
            beta1: 0.9,
            beta2: 0.99,
            eps: 1e-8,
            diff_step: DEFAULT_STEP,
            first_moment: Vec::new(),
            second_moment: Vec::new(),
            t: 0,
        }
    }
}

impl AdamOptimizer {
    /// Create an optimizer with learning rate `stepsize` and default decay rates.
    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            ..Self::default()
        }
    }

    /// Set the moment decay rates.
    #[must_use]
    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    /// Set the finite-difference step.
    #[must_use]
    pub fn with_diff_step(mut self, diff_step: f64) -> Self {
        self.diff_step = diff_step;
        self
    }

    /// Number of steps taken since creation or the last reset.
    pub fn steps_taken(&self) -> usize {
        self.t as usize
    }

    /// Forget the accumulated moments.
    pub fn reset(&mut self) {
        self.first_moment.clear();
        self.second_moment.clear();
        self.t = 0;
    }
}

impl StepOptimizer for AdamOptimizer {
    fn apply_grad(&mut self, grad: &[f64], params: &[f64]) -> Vec<f64> {
        if self.first_moment.len() != grad.len() {
            self.first_moment = vec![0.0; grad.len()];
            self.second_moment = vec![0.0; grad.len()];
        }
        self.t += 1;
        let lr = self.stepsize * (1.0 - self.beta2.powi(self.t)).sqrt()
            / (1.0 - self.beta1.powi(self.t));

        params
            .iter()
            .zip(grad)
            .enumerate()
            .map(|(i, (p, g))| {
                let m = self.beta1 * self.first_moment[i] + (1.0 - self.beta1) * g;
                let v = self.beta2 * self.second_moment[i] + (1.0 - self.beta2) * g * g;
                self.first_moment[i] = m;
                self.second_moment[i] = v;
                p - lr * m / (v.sqrt() + self.eps)
            })
            .collect()
    }

    fn diff_step(&self) -> f64 {
        self.diff_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parabola(p: &[f64]) -> crate::VqeResult<f64> {
        Ok((p[0] - 1.0).powi(2))
    }

    #[test]
    fn test_gradient_descent_step() {
        let mut opt = GradientDescentOptimizer::new(0.1);
        let next = opt.step(parabola, &[0.0]).unwrap();
        assert!((next[0] - 0.2).abs() < 1e-8);
    }

    #[test]
    fn test_step_and_cost_reports_previous_value() {
        let mut opt = GradientDescentOptimizer::new(0.1);
        let (next, cost) = opt.step_and_cost(parabola, &[0.0]).unwrap();
        assert!((cost - 1.0).abs() < 1e-12);
        assert!((next[0] - 0.2).abs() < 1e-8);
    }

    #[test]
    fn test_adam_first_step_is_stepsize() {
        let mut opt = AdamOptimizer::new(0.01);
        let next = opt.step(parabola, &[0.0]).unwrap();
        assert!((next[0] - 0.01).abs() < 1e-6);
        assert_eq!(opt.steps_taken(), 1);
    }

    #[test]
    fn test_adam_converges() {
        let mut opt = AdamOptimizer::new(0.1);
        let mut params = vec![0.0];
        for _ in 0..300 {
            params = opt.step(parabola, &params).unwrap();
        }
        assert!((params[0] - 1.0).abs() < 1e-2);
        opt.reset();
        assert_eq!(opt.steps_taken(), 0);
    }
}
