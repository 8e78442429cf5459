//! Parallel simulation of many voxels sharing one arterial input
//!
//! A parameter map (one parameter set per voxel) is simulated row by row on
//! rayon's global pool. Results land in a `voxels × time` matrix.

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::ArterialInput;
use crate::error::TracerError;
use crate::simulator::models::{grid_warning, tissue_concentrations};
use crate::simulator::types::{
    ExtendedToftsParams, ModelParams, SimulationOptions, ToftsParams, Warning,
};

/// Tissue curves for a batch of voxels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Concentrations in mM, one row per voxel, one column per time point
    pub concentrations: Array2<f64>,
    /// Warnings that apply to every voxel (e.g. grid resampling)
    pub warnings: Vec<Warning>,
    /// Per-voxel warnings, tagged with the voxel index
    pub voxel_warnings: Vec<(usize, Warning)>,
}

impl BatchResult {
    pub fn nvoxels(&self) -> usize {
        self.concentrations.nrows()
    }

    pub fn ntimes(&self) -> usize {
        self.concentrations.ncols()
    }
}

/// Simulate every parameter set in `params` against `input`
///
/// The first failing voxel aborts the batch.
pub fn simulate_batch<P: ModelParams>(
    input: &ArterialInput,
    params: &[P],
    options: &SimulationOptions,
) -> Result<BatchResult, TracerError> {
    let mut concentrations = Array2::<f64>::zeros((params.len(), input.len()));
    let warnings: Vec<Warning> = grid_warning(input.spacing()).into_iter().collect();

    let voxel_warnings = concentrations
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .map(|(i, mut row)| -> Result<Option<(usize, Warning)>, TracerError> {
            let (values, warning) = tissue_concentrations(
                input.times(),
                input.concentrations(),
                input.spacing(),
                &params[i].kinetics(),
                options,
            )?;
            row.iter_mut()
                .zip(values)
                .for_each(|(slot, value)| *slot = value);
            Ok(warning.map(|w| (i, w)))
        })
        .collect::<Result<Vec<_>, TracerError>>()?
        .into_iter()
        .flatten()
        .collect();

    Ok(BatchResult {
        concentrations,
        warnings,
        voxel_warnings,
    })
}

/// Batch version of [`tofts`](crate::simulator::models::tofts)
pub fn simulate_tofts_batch(
    input: &ArterialInput,
    params: &[ToftsParams],
    options: &SimulationOptions,
) -> Result<BatchResult, TracerError> {
    simulate_batch(input, params, options)
}

/// Batch version of [`extended_tofts`](crate::simulator::models::extended_tofts)
pub fn simulate_extended_tofts_batch(
    input: &ArterialInput,
    params: &[ExtendedToftsParams],
    options: &SimulationOptions,
) -> Result<BatchResult, TracerError> {
    simulate_batch(input, params, options)
}
