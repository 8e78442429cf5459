//! Validated arterial input series

use serde::{Deserialize, Serialize};

use crate::data::grid::GridSpacing;
use crate::error::TracerError;

/// Check that `times` and `concentrations` form a usable series
///
/// Both must have the same length (at least two), contain only finite values,
/// and `times` must be strictly increasing. Returns the grid spacing.
pub fn validate_series(times: &[f64], concentrations: &[f64]) -> Result<GridSpacing, TracerError> {
    if times.len() != concentrations.len() {
        return Err(TracerError::LengthMismatch {
            times: times.len(),
            concentrations: concentrations.len(),
        });
    }
    if times.len() < 2 {
        return Err(TracerError::InsufficientData {
            n: times.len(),
            required: 2,
        });
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(TracerError::NonFinite { what: "times" });
    }
    if concentrations.iter().any(|c| !c.is_finite()) {
        return Err(TracerError::NonFinite {
            what: "concentrations",
        });
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(TracerError::InvalidTimeSequence);
    }

    GridSpacing::classify(times)
}

/// An arterial input function sampled on a time grid
///
/// Times are in seconds and concentrations in mM. The series is validated once
/// on construction, so repeated simulations against the same input skip the
/// checks.
///
/// # Example
/// ```rust
/// use tracersol::data::ArterialInput;
///
/// let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let aif = ArterialInput::new(times, vec![1.0; 10]).unwrap();
/// assert_eq!(aif.len(), 10);
/// assert!(aif.spacing().is_uniform());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawArterialInput")]
pub struct ArterialInput {
    times: Vec<f64>,
    concentrations: Vec<f64>,
    spacing: GridSpacing,
}

/// Unvalidated form used when deserializing
#[derive(Deserialize)]
struct RawArterialInput {
    times: Vec<f64>,
    concentrations: Vec<f64>,
}

impl TryFrom<RawArterialInput> for ArterialInput {
    type Error = TracerError;

    fn try_from(raw: RawArterialInput) -> Result<Self, Self::Error> {
        ArterialInput::new(raw.times, raw.concentrations)
    }
}

impl ArterialInput {
    pub fn new(times: Vec<f64>, concentrations: Vec<f64>) -> Result<Self, TracerError> {
        let spacing = validate_series(&times, &concentrations)?;
        Ok(Self {
            times,
            concentrations,
            spacing,
        })
    }

    /// Sampling times in seconds
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Arterial concentrations in mM
    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }

    pub fn spacing(&self) -> GridSpacing {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated input
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
