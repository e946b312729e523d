//! Dataset handlers
//!
//! One submodule per source dataset, each with the same shape: a documented
//! [`crate::reader::TableSchema`], a loader that normalizes the time axis
//! and attaches the uncertainty band, and a figure builder. The handlers are
//! the only place that knows dataset specifics; everything else operates on
//! [`crate::series::TimeSeries`] and [`crate::plot::Figure`].

use tracing::info;

use crate::config::Config;
use crate::plot::Figure;
use crate::Result;

pub mod co2;
pub mod hadcrut;
pub mod marcott;

/// Most recent year covered by the instrumental records; display windows are
/// named by their distance to this year.
pub const PRESENT_YEAR: f64 = 2020.0;

/// Build all three figures in their fixed order.
///
/// The instrumental temperature series is loaded once and reused as the
/// overlay on the paleo-reconstruction figure.
pub fn build_all(config: &Config) -> Result<Vec<Figure>> {
    let instrumental = hadcrut::load(config)?;
    let figures = vec![
        hadcrut::figure(&instrumental)?,
        marcott::figure(config, &instrumental)?,
        co2::figure(config)?,
    ];
    for figure in &figures {
        info!(figure = %figure.name, layers = figure.layers.len(), "built figure");
    }
    Ok(figures)
}
