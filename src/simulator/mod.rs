//! Forward simulation of Tofts-family tracer-kinetic models
//!
//! - [`models`]: the Tofts and extended Tofts models
//! - [`engine`]: the shared discretization (delay shift, impulse response,
//!   direct or exponential convolution)
//! - [`batch`]: parallel simulation over parameter maps
//! - [`types`]: options, parameters, results and warnings

pub mod batch;
pub mod engine;
pub mod models;
pub mod types;

pub use batch::{simulate_batch, simulate_extended_tofts_batch, simulate_tofts_batch, BatchResult};
pub use models::{extended_tofts, simulate, tofts};
pub use types::{
    DiscretizationMethod, ExtendedToftsParams, Kinetics, ModelParams, SimulationOptions,
    TissueCurve, ToftsParams, Warning, DEFAULT_ARTERIAL_DELAY,
};
