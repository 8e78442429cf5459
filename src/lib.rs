//! Forward simulation of Tofts-type tracer-kinetic models for DCE-MRI
//!
//! Tissue concentration curves are computed from an arterial input function by
//! convolving it with the mono-exponential impulse response of the (extended)
//! Tofts model. Units follow the usual conventions: times in seconds,
//! concentrations in mM and `Ktrans` in 1/min.
//!
//! ```rust
//! use tracersol::prelude::*;
//!
//! let times: Vec<f64> = (0..300).map(|i| i as f64).collect();
//! let ca: Vec<f64> = times.iter().map(|&t| 5.0 * (-t / 90.0).exp()).collect();
//! let options = SimulationOptions::default()
//!     .with_arterial_delay(0.0)
//!     .with_method(DiscretizationMethod::Exponential);
//!
//! let ct = extended_tofts(&times, &ca, 0.6, 0.2, 0.05, &options).unwrap();
//! assert_eq!(ct.len(), times.len());
//! ```

pub mod data;
pub mod error;
pub mod numerics;
pub mod simulator;

pub use crate::data::{ArterialInput, GridSpacing};
pub use crate::simulator::{
    extended_tofts, simulate_extended_tofts_batch, simulate_tofts_batch, tofts, BatchResult,
    DiscretizationMethod, ExtendedToftsParams, SimulationOptions, TissueCurve, ToftsParams,
    Warning,
};
pub use error::TracerError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{validate_series, ArterialInput, GridSpacing};
    }
    pub mod simulator {
        pub use crate::simulator::{
            batch::{simulate_batch, BatchResult},
            engine::{impulse_response, shift_arterial},
            models::simulate,
            types::{Kinetics, ModelParams},
        };
    }

    pub use crate::data::{ArterialInput, GridSpacing};
    pub use crate::error::TracerError;
    pub use crate::simulator::{
        extended_tofts, simulate_extended_tofts_batch, simulate_tofts_batch, tofts,
        DiscretizationMethod, ExtendedToftsParams, SimulationOptions, TissueCurve, ToftsParams,
        Warning,
    };
}
