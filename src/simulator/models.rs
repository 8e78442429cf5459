//! Tofts and extended Tofts models
//!
//! # Models
//!
//! | Model | Tissue concentration |
//! |-------|----------------------|
//! | Tofts | `Ktrans ∫ ca(τ) exp(-kep (t - τ)) dτ` |
//! | Extended Tofts | `vp ca(t) + Ktrans ∫ ca(τ) exp(-kep (t - τ)) dτ` |
//!
//! with `kep = Ktrans / ve`. `Ktrans` is given in 1/min, times in seconds and
//! concentrations in mM.
//!
//! # Usage
//!
//! ```rust
//! use tracersol::prelude::*;
//!
//! let times: Vec<f64> = (0..360).map(|i| i as f64).collect();
//! let ca: Vec<f64> = times
//!     .iter()
//!     .map(|&t| if t < 10.0 { 0.0 } else { 4.0 * (-(t - 10.0) / 60.0).exp() })
//!     .collect();
//!
//! let ct = tofts(&times, &ca, 0.6, 0.2, &SimulationOptions::default()).unwrap();
//! assert_eq!(ct.len(), times.len());
//! ```

use crate::data::{validate_series, ArterialInput, GridSpacing};
use crate::error::TracerError;
use crate::simulator::engine;
use crate::simulator::types::{
    ExtendedToftsParams, Kinetics, ModelParams, SimulationOptions, TissueCurve, ToftsParams,
    Warning,
};

/// Tofts model (Tofts and Kermode, 1991)
///
/// # Arguments
/// * `times` - Sampling times in seconds, strictly increasing
/// * `ca` - Arterial concentrations in mM at each time
/// * `ktrans` - Volume transfer constant in 1/min
/// * `ve` - Extravascular extracellular volume fraction
/// * `options` - Arterial delay and discretization method
///
/// `ktrans <= 0` or `ve <= 0` yields a zero curve.
pub fn tofts(
    times: &[f64],
    ca: &[f64],
    ktrans: f64,
    ve: f64,
    options: &SimulationOptions,
) -> Result<TissueCurve, TracerError> {
    simulate(times, ca, &ToftsParams::new(ktrans, ve), options)
}

/// Extended Tofts model (Tofts, 1997)
///
/// As [`tofts`] plus a plasma compartment of volume fraction `vp`. With
/// `ktrans <= 0` or `ve <= 0` the result is `vp * ca`.
pub fn extended_tofts(
    times: &[f64],
    ca: &[f64],
    ktrans: f64,
    ve: f64,
    vp: f64,
    options: &SimulationOptions,
) -> Result<TissueCurve, TracerError> {
    simulate(
        times,
        ca,
        &ExtendedToftsParams::new(ktrans, ve, vp),
        options,
    )
}

/// Simulate any Tofts-family model on raw slices
pub fn simulate<P: ModelParams>(
    times: &[f64],
    ca: &[f64],
    params: &P,
    options: &SimulationOptions,
) -> Result<TissueCurve, TracerError> {
    let spacing = validate_series(times, ca)?;
    simulate_validated(times, ca, spacing, params, options)
}

impl ArterialInput {
    /// Simulate any Tofts-family model driven by this input
    pub fn simulate<P: ModelParams>(
        &self,
        params: &P,
        options: &SimulationOptions,
    ) -> Result<TissueCurve, TracerError> {
        simulate_validated(
            self.times(),
            self.concentrations(),
            self.spacing(),
            params,
            options,
        )
    }

    pub fn tofts(
        &self,
        params: &ToftsParams,
        options: &SimulationOptions,
    ) -> Result<TissueCurve, TracerError> {
        self.simulate(params, options)
    }

    pub fn extended_tofts(
        &self,
        params: &ExtendedToftsParams,
        options: &SimulationOptions,
    ) -> Result<TissueCurve, TracerError> {
        self.simulate(params, options)
    }
}

fn simulate_validated<P: ModelParams>(
    times: &[f64],
    ca: &[f64],
    spacing: GridSpacing,
    params: &P,
    options: &SimulationOptions,
) -> Result<TissueCurve, TracerError> {
    let mut warnings = Vec::new();
    if let Some(warning) = grid_warning(spacing) {
        warnings.push(warning);
    }

    let (values, degenerate) =
        tissue_concentrations(times, ca, spacing, &params.kinetics(), options)?;
    warnings.extend(degenerate);

    Ok(TissueCurve::new(values, warnings))
}

/// Warning (and log event) for a grid that may be resampled
pub(crate) fn grid_warning(spacing: GridSpacing) -> Option<Warning> {
    match spacing {
        GridSpacing::Uniform { .. } => None,
        GridSpacing::NonUniform { min_dt } => {
            tracing::warn!(
                min_spacing = min_dt,
                "Non-uniform time spacing detected. Time array may be resampled."
            );
            Some(Warning::NonUniformGrid {
                min_spacing: min_dt,
            })
        }
    }
}

/// Model output for validated inputs, plus a warning when the parameters are degenerate
pub(crate) fn tissue_concentrations(
    times: &[f64],
    ca: &[f64],
    spacing: GridSpacing,
    kinetics: &Kinetics,
    options: &SimulationOptions,
) -> Result<(Vec<f64>, Option<Warning>), TracerError> {
    kinetics.check_finite()?;
    if !options.arterial_delay.is_finite() {
        return Err(TracerError::NonFinite {
            what: "arterial delay",
        });
    }

    if kinetics.is_degenerate() {
        tracing::debug!(
            ktrans = kinetics.ktrans,
            ve = kinetics.ve,
            "Degenerate parameters, skipping convolution"
        );
        let values = match kinetics.vp {
            Some(vp) => ca.iter().map(|c| vp * c).collect(),
            None => vec![0.0; ca.len()],
        };
        let warning = Warning::DegenerateParameters {
            ktrans: kinetics.ktrans,
            ve: kinetics.ve,
        };
        return Ok((values, Some(warning)));
    }

    let values = engine::discretize(times, ca, spacing, kinetics, options)?;
    Ok((values, None))
}
