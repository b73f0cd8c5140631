//! L2-regularised logistic regression fitted with Newton's method.
//!
//! Minimises `0.5 * |w|^2 + C * sum(log(1 + exp(z_i)) - y_i * z_i)` with
//! `z = X w + b`. The intercept is not penalised. Each step solves the
//! `(d + 1)`-dimensional Newton system and backtracks until the objective
//! decreases.

use crate::common::error::{SurvivalError, SurvivalResult};
use crate::features::FEATURE_COUNT;

use super::domain::{sigmoid, LogisticModel, TrainConfig, Trainer};

const DIM: usize = FEATURE_COUNT + 1;
const MAX_HALVINGS: usize = 30;

/// Newton/IRLS solver.
#[derive(Clone, Debug)]
pub struct LogisticTrainer {
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
}

impl LogisticTrainer {
    pub fn from_config(cfg: &TrainConfig) -> Self {
        Self {
            c: cfg.c,
            max_iter: cfg.max_iter,
            tol: cfg.tol,
        }
    }
}

/// Parameters laid out as `[w_0 .. w_5, b]`.
type Theta = [f64; DIM];

fn margin(theta: &Theta, row: &[f64; FEATURE_COUNT]) -> f64 {
    theta[..FEATURE_COUNT]
        .iter()
        .zip(row)
        .map(|(w, x)| w * x)
        .sum::<f64>()
        + theta[FEATURE_COUNT]
}

fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

fn objective(theta: &Theta, x: &[[f64; FEATURE_COUNT]], y: &[u8], c: f64) -> f64 {
    let penalty = 0.5 * theta[..FEATURE_COUNT].iter().map(|w| w * w).sum::<f64>();
    let loss: f64 = x
        .iter()
        .zip(y)
        .map(|(row, &label)| {
            let z = margin(theta, row);
            softplus(z) - f64::from(label) * z
        })
        .sum();
    penalty + c * loss
}

/// Gradient and Hessian of the objective at `theta`.
fn derivatives(
    theta: &Theta,
    x: &[[f64; FEATURE_COUNT]],
    y: &[u8],
    c: f64,
) -> (Theta, [[f64; DIM]; DIM]) {
    let mut grad = [0.0; DIM];
    let mut hess = [[0.0; DIM]; DIM];
    for i in 0..FEATURE_COUNT {
        grad[i] = theta[i];
        hess[i][i] = 1.0;
    }

    for (row, &label) in x.iter().zip(y) {
        let p = sigmoid(margin(theta, row));
        let residual = c * (p - f64::from(label));
        let weight = c * p * (1.0 - p);

        let mut aug = [1.0; DIM];
        aug[..FEATURE_COUNT].copy_from_slice(row);
        for i in 0..DIM {
            grad[i] += residual * aug[i];
            for j in 0..DIM {
                hess[i][j] += weight * aug[i] * aug[j];
            }
        }
    }
    (grad, hess)
}

/// Solve `a * out = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: [[f64; DIM]; DIM], mut b: Theta) -> Option<Theta> {
    for col in 0..DIM {
        let pivot = (col..DIM).max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..DIM {
            let factor = a[row][col] / a[col][col];
            for k in col..DIM {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut out = [0.0; DIM];
    for row in (0..DIM).rev() {
        let tail: f64 = (row + 1..DIM).map(|k| a[row][k] * out[k]).sum();
        out[row] = (b[row] - tail) / a[row][row];
    }
    Some(out)
}

impl Trainer for LogisticTrainer {
    fn fit(&self, x: &[[f64; FEATURE_COUNT]], y: &[u8]) -> SurvivalResult<LogisticModel> {
        if x.is_empty() || x.len() != y.len() {
            return Err(SurvivalError::Training(format!(
                "need matching non-empty inputs, got {} rows and {} labels",
                x.len(),
                y.len()
            )));
        }

        let mut theta: Theta = [0.0; DIM];
        let mut current = objective(&theta, x, y, self.c);
        let mut converged = false;
        let mut iterations = 0;

        for iter in 1..=self.max_iter {
            iterations = iter;
            let (grad, hess) = derivatives(&theta, x, y, self.c);
            let grad_max = grad.iter().fold(0.0_f64, |acc, g| acc.max(g.abs()));
            if grad_max < self.tol {
                converged = true;
                break;
            }

            let step = solve(hess, grad)
                .ok_or_else(|| SurvivalError::Training("singular Hessian".into()))?;

            let mut t = 1.0;
            let mut accepted = false;
            for _ in 0..MAX_HALVINGS {
                let mut candidate = theta;
                for (c, s) in candidate.iter_mut().zip(&step) {
                    *c -= t * s;
                }
                let value = objective(&candidate, x, y, self.c);
                if value <= current {
                    theta = candidate;
                    current = value;
                    accepted = true;
                    break;
                }
                t *= 0.5;
            }
            if !accepted {
                // No decrease along the Newton direction: at the optimum up to rounding.
                converged = true;
                break;
            }
        }

        if theta.iter().any(|v| !v.is_finite()) {
            return Err(SurvivalError::Training("fitted parameters are not finite".into()));
        }
        if converged {
            tracing::info!(iterations, objective = current, "logistic regression converged");
        } else {
            tracing::warn!(
                max_iter = self.max_iter,
                objective = current,
                "logistic regression hit the iteration cap before converging"
            );
        }

        Ok(LogisticModel {
            weights: theta[..FEATURE_COUNT].to_vec(),
            bias: theta[FEATURE_COUNT],
            n_iter: iterations,
        })
    }
}
