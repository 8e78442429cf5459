//! Time grid classification and resampling
//!
//! Discrete convolution assumes a constant step. [`GridSpacing::classify`]
//! decides whether a time series satisfies that, using the same relative and
//! absolute tolerances as `allclose` in array libraries, and
//! [`resampled_grid`] builds the uniform grid used when it does not.

use serde::{Deserialize, Serialize};

use crate::error::TracerError;

/// Relative tolerance for comparing consecutive steps
pub const SPACING_RTOL: f64 = 1e-5;
/// Absolute tolerance for comparing consecutive steps
pub const SPACING_ATOL: f64 = 1e-8;
/// Largest grid [`resampled_grid`] will build
pub const MAX_RESAMPLED_POINTS: usize = 1_000_000;

/// Spacing of a time grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridSpacing {
    /// Every step matches the first one within tolerance
    Uniform {
        /// First step, `t[1] - t[0]`
        dt: f64,
    },
    /// At least one step differs from the first
    NonUniform {
        /// Smallest consecutive step
        min_dt: f64,
    },
}

impl GridSpacing {
    /// Classify the spacing of `times`
    ///
    /// Requires at least two points. Ordering is not checked here.
    pub fn classify(times: &[f64]) -> Result<Self, TracerError> {
        if times.len() < 2 {
            return Err(TracerError::InsufficientData {
                n: times.len(),
                required: 2,
            });
        }

        let first = times[1] - times[0];
        let uniform = times
            .windows(2)
            .map(|w| w[1] - w[0])
            .all(|d| (d - first).abs() <= SPACING_ATOL + SPACING_RTOL * first.abs());

        if uniform {
            Ok(GridSpacing::Uniform { dt: first })
        } else {
            Ok(GridSpacing::NonUniform {
                min_dt: min_step(times),
            })
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, GridSpacing::Uniform { .. })
    }

    /// Smallest step of the grid
    pub fn min_step(&self) -> f64 {
        match self {
            GridSpacing::Uniform { dt } => *dt,
            GridSpacing::NonUniform { min_dt } => *min_dt,
        }
    }
}

fn min_step(times: &[f64]) -> f64 {
    times
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min)
}

/// `num` evenly spaced points from `start` to `stop`, both included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            grid[num - 1] = stop;
            grid
        }
    }
}

/// Uniform grid spanning `times` at (roughly) its smallest step
///
/// The point count is `floor((t[n-1] - t[0]) / min_dt)`, never less than two,
/// so the effective step is slightly coarser than `min_dt`. Grids that would
/// exceed [`MAX_RESAMPLED_POINTS`] are rejected.
pub fn resampled_grid(times: &[f64]) -> Result<Vec<f64>, TracerError> {
    if times.len() < 2 {
        return Err(TracerError::InsufficientData {
            n: times.len(),
            required: 2,
        });
    }

    let first = times[0];
    let last = times[times.len() - 1];
    let count = ((last - first) / min_step(times)).floor();
    if !count.is_finite() || count > MAX_RESAMPLED_POINTS as f64 {
        return Err(TracerError::ResampledGridTooLarge {
            points: count,
            max: MAX_RESAMPLED_POINTS,
        });
    }
    Ok(linspace(first, last, (count as usize).max(2)))
}
