//! Time-series operations
//!
//! Everything the dataset handlers do between loading a table and building a
//! figure lives here: the nearest-index lookup, the year-axis normalization
//! and the [`TimeSeries`] type with its windowing and uncertainty-band
//! operations.
//!
//! The band invariant `lower[i] <= value[i] <= upper[i]` is checked whenever
//! a band is attached and therefore holds for every slice taken afterwards.

use serde::Serialize;

use crate::{ChartError, Result};

/// Pivot year of the "years before present" encoding used by paleo records.
pub const BEFORE_PRESENT_PIVOT: f64 = 1950.0;

/// Convert "years before 1950" to years relative to year 1 CE.
///
/// The conversion is its own inverse: applying it twice returns the input.
pub fn years_before_1950_to_ce(years_bp: f64) -> f64 {
    BEFORE_PRESENT_PIVOT - years_bp
}

/// Return the index of the element of `seq` closest to `value`.
///
/// `seq` is expected to be monotonically in- or decreasing; ties resolve to
/// the first minimal index. An empty sequence is an explicit error.
pub fn nearest_index(value: f64, seq: &[f64]) -> Result<usize> {
    if seq.is_empty() {
        return Err(ChartError::Plot(format!(
            "Cannot locate year {} in an empty sequence",
            value
        )));
    }
    let mut best = 0;
    let mut best_dist = (seq[0] - value).abs();
    for (i, &s) in seq.iter().enumerate().skip(1) {
        let dist = (s - value).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Ok(best)
}

// ============================================================================
// TimeSeries
// ============================================================================

/// Lower/upper bounds bracketing the central values of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// An ordered sequence of (year, value) pairs with an optional uncertainty
/// band. Years are relative to year 1 CE and monotonic in either direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub years: Vec<f64>,
    pub values: Vec<f64>,
    pub band: Option<Band>,
}

impl TimeSeries {
    /// Create a series from parallel year/value columns.
    ///
    /// Fails if the lengths differ or if the year axis is not monotonic.
    pub fn new(years: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if years.len() != values.len() {
            return Err(ChartError::Plot(format!(
                "Year and value columns have different lengths ({} vs {})",
                years.len(),
                values.len()
            )));
        }
        if !is_monotonic(&years) {
            return Err(ChartError::Plot(
                "Year axis is not monotonic".to_string(),
            ));
        }
        Ok(Self {
            years,
            values,
            band: None,
        })
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Attach an uncertainty band given directly as lower/upper columns.
    ///
    /// Enforces equal lengths and `lower <= value <= upper` at every index.
    pub fn with_band(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != self.len() || upper.len() != self.len() {
            return Err(ChartError::Plot(format!(
                "Band columns have lengths {}/{} but the series has {} points",
                lower.len(),
                upper.len(),
                self.len()
            )));
        }
        for (i, ((&lo, &hi), &v)) in lower.iter().zip(&upper).zip(&self.values).enumerate() {
            if !(lo <= v && v <= hi) {
                return Err(ChartError::Plot(format!(
                    "Band violates lower <= value <= upper at index {}: {} <= {} <= {}",
                    i, lo, v, hi
                )));
            }
        }
        self.band = Some(Band { lower, upper });
        Ok(self)
    }

    /// Derive a symmetric band as `value +- scale * sigma`.
    pub fn with_sigma_band(self, sigma: &[f64], scale: f64) -> Result<Self> {
        if sigma.len() != self.len() {
            return Err(ChartError::Plot(format!(
                "Sigma column has {} entries but the series has {} points",
                sigma.len(),
                self.len()
            )));
        }
        let lower: Vec<f64> = self
            .values
            .iter()
            .zip(sigma)
            .map(|(v, s)| v - scale * s)
            .collect();
        let upper: Vec<f64> = self
            .values
            .iter()
            .zip(sigma)
            .map(|(v, s)| v + scale * s)
            .collect();
        self.with_band(lower, upper)
    }

    /// Restrict the series to the display window starting at `start_year`.
    ///
    /// The start index is located with [`nearest_index`]; everything from the
    /// start year towards the most recent end of the series is retained. All
    /// parallel columns (values and band bounds) are sliced identically, so
    /// the band invariant is preserved.
    pub fn window_from(&self, start_year: f64) -> Result<TimeSeries> {
        let i = nearest_index(start_year, &self.years)?;
        let ascending = self.years[0] <= self.years[self.len() - 1];
        let range = if ascending {
            // the start year is towards the front
            i..self.len()
        } else {
            // most recent years come first
            0..i + 1
        };
        Ok(TimeSeries {
            years: self.years[range.clone()].to_vec(),
            values: self.values[range.clone()].to_vec(),
            band: self.band.as_ref().map(|b| Band {
                lower: b.lower[range.clone()].to_vec(),
                upper: b.upper[range].to_vec(),
            }),
        })
    }
}

/// True if `seq` never changes direction (ties allowed).
fn is_monotonic(seq: &[f64]) -> bool {
    let increasing = seq.windows(2).all(|w| w[0] <= w[1]);
    let decreasing = seq.windows(2).all(|w| w[0] >= w[1]);
    increasing || decreasing
}
