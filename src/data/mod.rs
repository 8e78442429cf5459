pub mod grid;
pub mod input;
pub use grid::{linspace, resampled_grid, GridSpacing, MAX_RESAMPLED_POINTS};
pub use input::{validate_series, ArterialInput};
