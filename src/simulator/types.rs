//! Simulation types: options, physiological parameters, results and warnings

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::TracerError;

/// Default arterial delay in seconds
pub const DEFAULT_ARTERIAL_DELAY: f64 = 30.0;

// ============================================================================
// Configuration Types
// ============================================================================

/// How the convolution with the impulse response is discretized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscretizationMethod {
    /// Numerical convolution on the sampling grid (resampled if non-uniform)
    #[default]
    #[serde(rename = "conv", alias = "convolution")]
    Convolution,
    /// Exact convolution of the piecewise-linear input with an exponential
    #[serde(rename = "exp", alias = "exponential")]
    Exponential,
}

impl FromStr for DiscretizationMethod {
    type Err = TracerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conv" | "convolution" => Ok(DiscretizationMethod::Convolution),
            "exp" | "exponential" => Ok(DiscretizationMethod::Exponential),
            _ => Err(TracerError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for DiscretizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscretizationMethod::Convolution => write!(f, "conv"),
            DiscretizationMethod::Exponential => write!(f, "exp"),
        }
    }
}

/// Options shared by all models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Arterial delay `Ta` in seconds (default: 30.0)
    ///
    /// Difference in onset time between the tissue curve and the arterial input.
    /// Zero disables the shift.
    pub arterial_delay: f64,

    /// Discretization method (default: Convolution)
    pub method: DiscretizationMethod,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            arterial_delay: DEFAULT_ARTERIAL_DELAY,
            method: DiscretizationMethod::Convolution,
        }
    }
}

impl SimulationOptions {
    /// Set the arterial delay in seconds
    pub fn with_arterial_delay(mut self, delay: f64) -> Self {
        self.arterial_delay = delay;
        self
    }

    /// Set the discretization method
    pub fn with_method(mut self, method: DiscretizationMethod) -> Self {
        self.method = method;
        self
    }
}

// ============================================================================
// Physiological parameters
// ============================================================================

/// Kinetic parameters in the form the engine consumes
///
/// `ktrans` is in 1/min. `vp` is present only for models with a plasma term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinetics {
    pub ktrans: f64,
    pub ve: f64,
    pub vp: Option<f64>,
}

impl Kinetics {
    /// No exchange pathway: nothing accumulates in the interstitium
    pub fn is_degenerate(&self) -> bool {
        self.ktrans <= 0.0 || self.ve <= 0.0
    }

    pub(crate) fn check_finite(&self) -> Result<(), TracerError> {
        if !self.ktrans.is_finite() {
            return Err(TracerError::NonFinite { what: "Ktrans" });
        }
        if !self.ve.is_finite() {
            return Err(TracerError::NonFinite { what: "ve" });
        }
        if self.vp.is_some_and(|vp| !vp.is_finite()) {
            return Err(TracerError::NonFinite { what: "vp" });
        }
        Ok(())
    }
}

/// Parameter sets that describe a Tofts-family model
pub trait ModelParams: Sync {
    fn kinetics(&self) -> Kinetics;
}

/// Parameters of the standard Tofts model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToftsParams {
    /// Volume transfer constant in 1/min
    pub ktrans: f64,
    /// Extravascular extracellular volume fraction
    pub ve: f64,
}

impl ToftsParams {
    pub fn new(ktrans: f64, ve: f64) -> Self {
        Self { ktrans, ve }
    }
}

impl ModelParams for ToftsParams {
    fn kinetics(&self) -> Kinetics {
        Kinetics {
            ktrans: self.ktrans,
            ve: self.ve,
            vp: None,
        }
    }
}

/// Parameters of the extended Tofts model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedToftsParams {
    /// Volume transfer constant in 1/min
    pub ktrans: f64,
    /// Extravascular extracellular volume fraction
    pub ve: f64,
    /// Plasma volume fraction
    pub vp: f64,
}

impl ExtendedToftsParams {
    pub fn new(ktrans: f64, ve: f64, vp: f64) -> Self {
        Self { ktrans, ve, vp }
    }
}

impl ModelParams for ExtendedToftsParams {
    fn kinetics(&self) -> Kinetics {
        Kinetics {
            ktrans: self.ktrans,
            ve: self.ve,
            vp: Some(self.vp),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Diagnostics raised while simulating; none of them stop the computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// The time grid is not uniform, so it may be resampled
    NonUniformGrid {
        /// Smallest step of the grid in seconds
        min_spacing: f64,
    },
    /// `Ktrans <= 0` or `ve <= 0`; only the plasma term (if any) remains
    DegenerateParameters { ktrans: f64, ve: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NonUniformGrid { min_spacing } => write!(
                f,
                "Non-uniform time spacing detected (min step {:.4} s). Time array may be resampled.",
                min_spacing
            ),
            Warning::DegenerateParameters { ktrans, ve } => write!(
                f,
                "No exchange for Ktrans = {} and ve = {}; interstitial term is zero",
                ktrans, ve
            ),
        }
    }
}

/// Simulated tissue concentrations in mM, aligned with the input times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueCurve {
    values: Vec<f64>,
    warnings: Vec<Warning>,
}

impl TissueCurve {
    pub(crate) fn new(values: Vec<f64>, warnings: Vec<Warning>) -> Self {
        Self { values, warnings }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
