//! Numerical primitives used by the discretization engine
//!
//! These are plain functions over `&[f64]` slices with no knowledge of the
//! tracer-kinetic models built on top of them:
//!
//! - [`Interp1d`]: piecewise linear or quadratic interpolation with a fixed fill
//!   value outside the sampled domain
//! - [`convolve_full`]: full discrete linear convolution of two sequences
//! - [`exp_conv`]: continuous-time convolution with a normalised decaying exponential

pub mod convolution;
pub mod interpolation;

pub use convolution::{convolve_full, exp_conv};
pub use interpolation::{Interp1d, InterpolationKind};

use thiserror::Error;

/// Errors raised by the numerical primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericsError {
    /// Not enough nodes to build the requested interpolant
    #[error("Interpolation needs at least {required} nodes, got {n}")]
    TooFewNodes { n: usize, required: usize },

    /// Node abscissae are not strictly increasing
    #[error("Interpolation nodes must be strictly increasing")]
    UnsortedNodes,

    /// Parallel input slices differ in length
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// The spline collocation system has a zero pivot
    #[error("Singular collocation system at row {row}")]
    SingularSystem { row: usize },
}
