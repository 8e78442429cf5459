//! Discretization engine shared by the Tofts model family
//!
//! Every model in this crate is `ct = vp * ca + Ktrans * exp(-kep t) ⊛ ca` with an
//! optional plasma term. The engine computes that convolution in one of two ways:
//!
//! - **Direct convolution**: sample the impulse response on the time grid,
//!   convolve it with the (delay-shifted) arterial curve and scale by the step.
//!   Non-uniform grids are first resampled at their smallest step with
//!   quadratic interpolation, and the result is interpolated back.
//! - **Exponential convolution**: exact convolution of the piecewise-linear
//!   arterial curve with `exp(-t/Tc) / Tc`, `Tc = ve / Ktrans`.
//!
//! The plasma term is added where the interstitial term lives: on the resampled
//! grid before restoring the original one, on the original grid for a uniform
//! grid, and next to the exponential convolution. These placements are not
//! numerically identical and are kept as they are.

use crate::data::{resampled_grid, GridSpacing};
use crate::error::TracerError;
use crate::numerics::{convolve_full, exp_conv, Interp1d, InterpolationKind};
use crate::simulator::types::{DiscretizationMethod, Kinetics, SimulationOptions};

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Shift the arterial curve by `delay` seconds
///
/// Evaluates a linear interpolant of the curve at `t - delay` (zero outside the
/// sampled range) and forces zero wherever `t <= delay`. A zero delay returns
/// the curve unchanged.
pub fn shift_arterial(
    times: &[f64],
    concentrations: &[f64],
    delay: f64,
) -> Result<Vec<f64>, TracerError> {
    if delay == 0.0 {
        return Ok(concentrations.to_vec());
    }

    let aif = Interp1d::new(times, concentrations, InterpolationKind::Linear)?;
    Ok(times
        .iter()
        .map(|&t| if t > delay { aif.eval(t - delay) } else { 0.0 })
        .collect())
}

/// Mono-exponential impulse response `Ktrans * exp(-Ktrans/ve * t)`
///
/// `ktrans` must already be in 1/s and `ve` must be positive.
pub fn impulse_response(ktrans: f64, ve: f64, times: &[f64]) -> Vec<f64> {
    let kep = ktrans / ve;
    times.iter().map(|&t| ktrans * (-kep * t).exp()).collect()
}

/// Riemann-sum convolution on a uniform grid with step `dt`
///
/// Keeps the first `arterial.len()` samples of the full convolution. With a
/// plasma fraction, `vp * arterial` is added to the result.
pub fn convolve_uniform(arterial: &[f64], impulse: &[f64], dt: f64, vp: Option<f64>) -> Vec<f64> {
    let mut ct = convolve_full(arterial, impulse);
    ct.truncate(arterial.len());
    ct.iter_mut().for_each(|c| *c *= dt);

    if let Some(vp) = vp {
        ct.iter_mut()
            .zip(arterial)
            .for_each(|(c, &ca)| *c += vp * ca);
    }
    ct
}

/// Direct convolution for a non-uniform grid
///
/// Both series are resampled onto [`resampled_grid`], convolved there with
/// [`convolve_uniform`] and the result is interpolated back onto `times`.
pub fn convolve_resampled(
    times: &[f64],
    arterial: &[f64],
    impulse: &[f64],
    vp: Option<f64>,
) -> Result<Vec<f64>, TracerError> {
    let grid = resampled_grid(times)?;
    let dt = grid[1] - grid[0];

    let arterial_resampled =
        Interp1d::new(times, arterial, InterpolationKind::Quadratic)?.eval_many(&grid);
    let impulse_resampled =
        Interp1d::new(times, impulse, InterpolationKind::Quadratic)?.eval_many(&grid);

    tracing::debug!(
        points = grid.len(),
        dt,
        "Resampled non-uniform grid for direct convolution"
    );

    let ct_resampled = convolve_uniform(&arterial_resampled, &impulse_resampled, dt, vp);

    let restore = Interp1d::new(&grid, &ct_resampled, InterpolationKind::Quadratic)?;
    Ok(restore.eval_many(times))
}

/// Exponential-kernel convolution, `ve * exp_conv(ve / Ktrans, t, ca)`
///
/// `ktrans` is in 1/s. With a plasma fraction, `vp * arterial` is added
/// outside the convolution.
pub fn convolve_exponential(
    times: &[f64],
    arterial: &[f64],
    ktrans: f64,
    ve: f64,
    vp: Option<f64>,
) -> Result<Vec<f64>, TracerError> {
    let tc = ve / ktrans;
    let mut ct = exp_conv(tc, times, arterial)?;
    ct.iter_mut().for_each(|c| *c *= ve);

    if let Some(vp) = vp {
        ct.iter_mut()
            .zip(arterial)
            .for_each(|(c, &ca)| *c += vp * ca);
    }
    Ok(ct)
}

/// Tissue curve for non-degenerate kinetics
///
/// `kinetics.ktrans` is in 1/min and converted here. Callers must have
/// rejected `Ktrans <= 0` and `ve <= 0`.
pub(crate) fn discretize(
    times: &[f64],
    concentrations: &[f64],
    spacing: GridSpacing,
    kinetics: &Kinetics,
    options: &SimulationOptions,
) -> Result<Vec<f64>, TracerError> {
    let ktrans = kinetics.ktrans / SECONDS_PER_MINUTE;
    let arterial = shift_arterial(times, concentrations, options.arterial_delay)?;

    match options.method {
        DiscretizationMethod::Exponential => {
            convolve_exponential(times, &arterial, ktrans, kinetics.ve, kinetics.vp)
        }
        DiscretizationMethod::Convolution => {
            // Built on the unshifted grid
            let impulse = impulse_response(ktrans, kinetics.ve, times);
            match spacing {
                GridSpacing::Uniform { dt } => {
                    Ok(convolve_uniform(&arterial, &impulse, dt, kinetics.vp))
                }
                GridSpacing::NonUniform { .. } => {
                    convolve_resampled(times, &arterial, &impulse, kinetics.vp)
                }
            }
        }
    }
}
