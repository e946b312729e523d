//! Run configuration
//!
//! A [`Config`] value is immutable for the duration of a run. The `Default`
//! implementation reproduces the stock settings of the chart set; the CLI
//! only overrides individual fields before handing the value to
//! [`crate::datasets::build_all`] and [`crate::writer::emit`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::{ChartError, Result};

/// Common x-axis label shared by all charts.
pub const YEAR_LABEL: &str = "year relative to year 1 CE";

/// Axis-fraction coordinates of the citation text in `Inline` placement.
pub const REFERENCE_POS: (f64, f64) = (0.9, 0.1);

/// Image format for saved figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// Parse a format name as given on the command line.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(ChartError::Config(format!(
                "Unknown image format '{}'. Available formats: png, svg",
                other
            ))),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Terminal action of the output stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputMode {
    /// Render every figure into a temporary directory and report the paths
    Show,
    /// Write one image file per figure under `plots_<format>/<style>/`
    Save(ImageFormat),
}

/// Where the data citation is placed on a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferencePlacement {
    /// Appended to the title as ` (citation)`
    Title,
    /// Drawn inside the plot area at [`REFERENCE_POS`]
    Inline,
    /// Not shown
    None,
}

impl ReferencePlacement {
    /// Parse a placement name as given on the command line.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "title" => Ok(ReferencePlacement::Title),
            "plot" => Ok(ReferencePlacement::Inline),
            "none" => Ok(ReferencePlacement::None),
            other => Err(ChartError::Config(format!(
                "Unknown reference placement '{}'. Available placements: title, plot, none",
                other
            ))),
        }
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Name of a built-in style, see [`crate::style`]
    pub style: String,
    /// Citation placement on each figure
    pub reference: ReferencePlacement,
    /// Show or save
    pub output: OutputMode,
    /// Directory holding the downloaded dataset files
    pub data_dir: PathBuf,
    /// Directory under which `plots_<format>/` is created in save mode
    pub out_root: PathBuf,
    /// First year (CE) shown in the paleo-reconstruction figure
    pub paleo_start_year: f64,
    /// Most recent rows of the paleo record dropped as unreliable
    pub paleo_exclude: usize,
    /// First year (CE) shown for the long-term CO2 series
    pub co2_start_year: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: "default".to_string(),
            reference: ReferencePlacement::Title,
            output: OutputMode::Save(ImageFormat::Svg),
            data_dir: PathBuf::from("./data"),
            out_root: PathBuf::from("."),
            paleo_start_year: 0.0,
            paleo_exclude: 6,
            co2_start_year: -12000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_known() {
        assert_eq!(ImageFormat::parse("png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::parse("svg").unwrap(), ImageFormat::Svg);
    }

    #[test]
    fn test_format_parse_unknown_is_config_error() {
        let err = ImageFormat::parse("pdf").unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn test_reference_placement_parse() {
        assert_eq!(
            ReferencePlacement::parse("plot").unwrap(),
            ReferencePlacement::Inline
        );
        assert!(ReferencePlacement::parse("margin").is_err());
    }

    #[test]
    fn test_default_config_matches_stock_settings() {
        let config = Config::default();
        assert_eq!(config.style, "default");
        assert_eq!(config.output, OutputMode::Save(ImageFormat::Svg));
        assert_eq!(config.paleo_start_year, 0.0);
        assert_eq!(config.paleo_exclude, 6);
        assert_eq!(config.co2_start_year, -12000.0);
    }
}
