//! Piecewise interpolation on strictly increasing nodes
//!
//! Two kinds are supported:
//!
//! - [`InterpolationKind::Linear`]: straight lines between consecutive nodes
//! - [`InterpolationKind::Quadratic`]: an interpolating quadratic B-spline whose
//!   interior knots sit at the midpoints between nodes (the first and last
//!   midpoints are dropped, the end knots are repeated three times). This is the
//!   classic "quadratic" interpolant of scientific array libraries.
//!
//! Queries outside `[x[0], x[n-1]]` (and NaN queries) return the fill value,
//! which defaults to zero.
//!
//! # Example
//!
//! ```rust
//! use tracersol::numerics::{Interp1d, InterpolationKind};
//!
//! let x = [0.0, 1.0, 3.0, 4.0];
//! let y = [0.0, 1.0, 9.0, 16.0];
//! let f = Interp1d::new(&x, &y, InterpolationKind::Quadratic).unwrap();
//! assert!((f.eval(2.0) - 4.0).abs() < 1e-12);
//! assert_eq!(f.eval(5.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::NumericsError;

/// Spline degree of the quadratic interpolant
const DEGREE: usize = 2;

/// Interpolation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationKind {
    Linear,
    Quadratic,
}

#[derive(Debug, Clone)]
enum Interpolant {
    Linear {
        y: Vec<f64>,
    },
    Quadratic {
        knots: Vec<f64>,
        coefficients: Vec<f64>,
    },
}

/// A one-dimensional interpolant with a constant fill value outside its domain
#[derive(Debug, Clone)]
pub struct Interp1d {
    x: Vec<f64>,
    interpolant: Interpolant,
    fill_value: f64,
}

impl Interp1d {
    /// Build an interpolant through `(x[i], y[i])`
    ///
    /// `x` must be strictly increasing with at least two nodes. A quadratic
    /// interpolant needs three nodes; with only two it falls back to linear.
    pub fn new(x: &[f64], y: &[f64], kind: InterpolationKind) -> Result<Self, NumericsError> {
        if x.len() != y.len() {
            return Err(NumericsError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(NumericsError::TooFewNodes {
                n: x.len(),
                required: 2,
            });
        }
        if x.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(NumericsError::UnsortedNodes);
        }

        let interpolant = match kind {
            InterpolationKind::Quadratic if x.len() > DEGREE => {
                let knots = quadratic_knots(x);
                let coefficients = solve_collocation(x, y, &knots)?;
                Interpolant::Quadratic {
                    knots,
                    coefficients,
                }
            }
            _ => Interpolant::Linear { y: y.to_vec() },
        };

        Ok(Self {
            x: x.to_vec(),
            interpolant,
            fill_value: 0.0,
        })
    }

    /// Set the value returned for queries outside the node range
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Evaluate the interpolant at `xq`
    pub fn eval(&self, xq: f64) -> f64 {
        let first = self.x[0];
        let last = self.x[self.x.len() - 1];
        if !(xq >= first && xq <= last) {
            return self.fill_value;
        }

        match &self.interpolant {
            Interpolant::Linear { y } => {
                let i = (self.x.partition_point(|&v| v <= xq) - 1).min(self.x.len() - 2);
                let (x0, x1) = (self.x[i], self.x[i + 1]);
                y[i] + (y[i + 1] - y[i]) * (xq - x0) / (x1 - x0)
            }
            Interpolant::Quadratic {
                knots,
                coefficients,
            } => {
                let span = find_span(knots, coefficients.len(), xq);
                let basis = basis_functions(knots, span, xq);
                basis
                    .iter()
                    .enumerate()
                    .map(|(r, b)| b * coefficients[span - DEGREE + r])
                    .sum()
            }
        }
    }

    /// Evaluate the interpolant at every point of `xs`
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&xq| self.eval(xq)).collect()
    }
}

/// Knot vector of length `n + 3` for an interpolating quadratic spline
fn quadratic_knots(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend_from_slice(&[x[0]; DEGREE + 1]);
    knots.extend(x[1..n - 1].windows(2).map(|w| 0.5 * (w[0] + w[1])));
    knots.extend_from_slice(&[x[n - 1]; DEGREE + 1]);
    knots
}

/// Knot span `l` with `knots[l] <= x < knots[l + 1]`, clamped to the valid range
#[inline]
fn find_span(knots: &[f64], n_basis: usize, x: f64) -> usize {
    let upper = knots.partition_point(|&k| k <= x).saturating_sub(1);
    upper.clamp(DEGREE, n_basis - 1)
}

/// The three non-zero quadratic B-splines on `span`, evaluated at `x`
///
/// Entry `r` is the value of basis function `span - 2 + r`.
#[inline]
fn basis_functions(knots: &[f64], span: usize, x: f64) -> [f64; DEGREE + 1] {
    let mut values = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    values[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }

    values
}

/// Solve for spline coefficients that pass through every node
///
/// With midpoint knots the collocation matrix is tridiagonal and totally
/// positive, so elimination without pivoting is stable.
fn solve_collocation(x: &[f64], y: &[f64], knots: &[f64]) -> Result<Vec<f64>, NumericsError> {
    let n = x.len();
    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];

    for (i, &xi) in x.iter().enumerate() {
        let span = find_span(knots, n, xi);
        let basis = basis_functions(knots, span, xi);
        for (r, value) in basis.iter().enumerate() {
            let col = span - DEGREE + r;
            if col + 1 == i {
                lower[i] = *value;
            } else if col == i {
                diag[i] = *value;
            } else if col == i + 1 {
                upper[i] = *value;
            }
            // Remaining entries vanish at the end nodes
        }
    }

    let mut rhs = y.to_vec();
    for i in 1..n {
        if diag[i - 1] == 0.0 {
            return Err(NumericsError::SingularSystem { row: i - 1 });
        }
        let w = lower[i] / diag[i - 1];
        diag[i] -= w * upper[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    if diag[n - 1] == 0.0 {
        return Err(NumericsError::SingularSystem { row: n - 1 });
    }

    let mut coefficients = vec![0.0; n];
    coefficients[n - 1] = rhs[n - 1] / diag[n - 1];
    for i in (0..n - 1).rev() {
        coefficients[i] = (rhs[i] - upper[i] * coefficients[i + 1]) / diag[i];
    }

    Ok(coefficients)
}
