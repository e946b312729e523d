//! climatecharts - a fixed set of climate-history charts from local datasets
//!
//! The crate renders three charts: the instrumental global temperature
//! anomaly (~170 years), a multi-millennial paleo-reconstruction of the
//! temperature anomaly, and the atmospheric CO2 concentration. Each chart is
//! produced by the same pipeline:
//!
//! 1. [`reader`] loads a delimited table with a fixed, documented column
//!    layout into a Polars DataFrame.
//! 2. [`series`] normalizes the time axis, slices the requested display
//!    window and attaches the uncertainty band.
//! 3. [`datasets`] wires both together into a [`plot::Figure`] per chart.
//! 4. [`writer`] renders every figure with plotters, either into a temporary
//!    directory (show mode) or under `plots_<format>/<style>/` (save mode).
//!
//! # Example
//!
//! ```rust,ignore
//! use climatecharts::{config::Config, datasets, writer};
//!
//! let config = Config::default();
//! let figures = datasets::build_all(&config)?;
//! let written = writer::emit(&figures, &config)?;
//! ```

use thiserror::Error;

pub mod config;
pub mod datasets;
pub mod plot;
pub mod reader;
pub mod series;
pub mod style;
pub mod writer;

pub use config::Config;
pub use plot::Figure;
pub use series::TimeSeries;

/// Crate version, exposed for the CLI `--version` output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Error type
// ============================================================================

/// Error type for all fallible operations in the crate.
///
/// The variants follow the pipeline stages: configuration lookup, table
/// reading, figure construction and rendering/output. Every failure is
/// terminal; the crate never retries or recovers partially.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Unknown style or output format, or an invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing file, malformed row or unexpected table shape
    #[error("Reader error: {0}")]
    Reader(String),

    /// Inconsistent series data while assembling a figure
    #[error("Plot error: {0}")]
    Plot(String),

    /// Failure while rendering or writing an image file
    #[error("Writer error: {0}")]
    Writer(String),
}

impl From<polars::prelude::PolarsError> for ChartError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ChartError::Reader(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
