use thiserror::Error;

use crate::numerics::NumericsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TracerError {
    /// Fewer samples than the operation needs
    #[error("Insufficient data: {n} points, need at least {required}")]
    InsufficientData { n: usize, required: usize },

    /// Time and concentration series are not aligned
    #[error("Array length mismatch: {times} time points but {concentrations} concentrations")]
    LengthMismatch { times: usize, concentrations: usize },

    /// Time values are not strictly increasing
    #[error("Invalid time sequence: times must be strictly increasing")]
    InvalidTimeSequence,

    /// A NaN or infinite value was supplied
    #[error("Non-finite value in {what}")]
    NonFinite { what: &'static str },

    /// Unknown discretization method name
    #[error("Unknown discretization method '{0}', expected 'conv' or 'exp'")]
    InvalidMethod(String),

    /// Resampling a non-uniform grid at its smallest step would need too many points
    #[error("Resampled grid would need {points} points, more than the limit of {max}")]
    ResampledGridTooLarge { points: f64, max: usize },

    #[error("Error in numerical primitive: {0}")]
    Numerics(#[from] NumericsError),
}
