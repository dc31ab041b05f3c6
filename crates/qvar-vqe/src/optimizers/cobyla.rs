use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{OptimizationResult, Optimizer};
use crate::error::{VqeError, VqeResult};

/// Derivative-free simplex optimizer with a shrinking trust radius.
///
/// Steps are bounded by the trust radius `rho`, which starts at `rhobeg`
/// and is halved whenever the simplex values agree to within `tol`, until it
/// reaches `rhoend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cobyla {
    /// Maximum number of iterations.
    pub maxiter: usize,
    /// Convergence tolerance on the spread of simplex values.
    pub tol: f64,
    /// Initial trust radius.
    pub rhobeg: f64,
    /// Final trust radius.
    pub rhoend: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            maxiter: 100,
            tol: 1e-6,
            rhobeg: 0.5,
            rhoend: 1e-4,
        }
    }
}

impl Cobyla {
    /// Create an optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    #[must_use]
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set trust radius bounds.
    #[must_use]
    pub fn with_trust_region(mut self, rhobeg: f64, rhoend: f64) -> Self {
        self.rhobeg = rhobeg;
        self.rhoend = rhoend;
        self
    }
}

/// Simplex vertices with their objective values and an evaluation counter.
struct Simplex<F> {
    objective: F,
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
    evaluations: usize,
}

impl<F> Simplex<F>
where
    F: FnMut(&[f64]) -> VqeResult<f64>,
{
    fn eval(&mut self, x: &[f64]) -> VqeResult<f64> {
        self.evaluations += 1;
        let value = (self.objective)(x)?;
        if value.is_nan() {
            return Err(VqeError::NonFinite(value));
        }
        Ok(value)
    }

    /// Replace the simplex by `center` and its `n` axis neighbours at distance `rho`.
    fn reset(&mut self, center: Vec<f64>, center_value: f64, rho: f64) -> VqeResult<()> {
        self.points.clear();
        self.values.clear();
        for i in 0..center.len() {
            let mut point = center.clone();
            point[i] += rho;
            let value = self.eval(&point)?;
            self.points.push(point);
            self.values.push(value);
        }
        self.points.insert(0, center);
        self.values.insert(0, center_value);
        Ok(())
    }

    /// Vertex indices sorted from best to worst.
    fn order(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.points.len()).collect();
        idx.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        idx
    }

    fn replace(&mut self, i: usize, point: Vec<f64>, value: f64) {
        self.points[i] = point;
        self.values[i] = value;
    }
}

impl Optimizer for Cobyla {
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> VqeResult<OptimizationResult>
    where
        F: FnMut(&[f64]) -> VqeResult<f64>,
    {
        let n = initial_params.len();
        if n == 0 {
            return Err(VqeError::ParameterShape { expected: 1, got: 0 });
        }

        let mut s = Simplex {
            objective,
            points: Vec::with_capacity(n + 1),
            values: Vec::with_capacity(n + 1),
            evaluations: 0,
        };
        let f0 = s.eval(&initial_params)?;
        let mut best = f0;
        let mut history = vec![f0];
        let mut rho = self.rhobeg;
        s.reset(initial_params, f0, rho)?;

        let mut converged = false;
        let mut iterations = 0;
        while iterations < self.maxiter {
            iterations += 1;
            let order = s.order();
            let (best_idx, second_worst, worst_idx) = (order[0], order[n - 1], order[n]);

            let spread = s.values[worst_idx] - s.values[best_idx];
            if spread < self.tol {
                if rho <= self.rhoend {
                    converged = true;
                    break;
                }
                rho = (rho * 0.5).max(self.rhoend);
                let center = s.points[best_idx].clone();
                let value = s.values[best_idx];
                s.reset(center, value, rho)?;
                continue;
            }

            let mut centroid = vec![0.0; n];
            for &i in &order[..n] {
                for (c, x) in centroid.iter_mut().zip(&s.points[i]) {
                    *c += x / n as f64;
                }
            }

            // Reflection through the centroid, clipped to the trust radius.
            let reflected: Vec<f64> = centroid
                .iter()
                .zip(&s.points[worst_idx])
                .map(|(c, w)| c + (c - w).clamp(-rho, rho))
                .collect();
            let f_reflected = s.eval(&reflected)?;

            if f_reflected < s.values[best_idx] {
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + 2.0 * (r - c))
                    .collect();
                let f_expanded = s.eval(&expanded)?;
                if f_expanded < f_reflected {
                    s.replace(worst_idx, expanded, f_expanded);
                } else {
                    s.replace(worst_idx, reflected, f_reflected);
                }
            } else if f_reflected < s.values[second_worst] {
                s.replace(worst_idx, reflected, f_reflected);
            } else {
                let contracted: Vec<f64> = centroid
                    .iter()
                    .zip(&s.points[worst_idx])
                    .map(|(c, w)| 0.5 * (c + w))
                    .collect();
                let f_contracted = s.eval(&contracted)?;
                if f_contracted < s.values[worst_idx] {
                    s.replace(worst_idx, contracted, f_contracted);
                } else {
                    let anchor = s.points[best_idx].clone();
                    for i in (0..=n).filter(|&i| i != best_idx) {
                        let shrunk: Vec<f64> = anchor
                            .iter()
                            .zip(&s.points[i])
                            .map(|(a, x)| 0.5 * (a + x))
                            .collect();
                        let value = s.eval(&shrunk)?;
                        s.replace(i, shrunk, value);
                    }
                }
            }

            let current = s.values[s.order()[0]];
            if current < best {
                best = current;
                history.push(best);
            }
        }

        let best_idx = s.order()[0];
        debug!(
            evaluations = s.evaluations,
            iterations,
            value = s.values[best_idx],
            converged,
            "cobyla finished"
        );
        Ok(OptimizationResult {
            optimal_params: s.points[best_idx].clone(),
            optimal_value: s.values[best_idx],
            num_evaluations: s.evaluations,
            num_iterations: iterations,
            history,
            converged,
        })
    }
}
