//! Instrumental global temperature anomaly (HadCRUT4, ~170 years)
//!
//! HadCRUT4 is a gridded dataset of global historical surface temperature
//! anomalies relative to a 1961-1990 reference period, published as a yearly
//! global mean since 1850.
//!
//! The annual time-series file has 12 whitespace-separated columns: the date,
//! the median of the 100-member ensemble, and five lower/upper pairs for the
//! 95% confidence intervals of the individual uncertainty sources. The last
//! pair is the combined effect of measurement, sampling, bias and coverage
//! uncertainties, which is what the chart shades.
//!
//! Citation: Morice, C. P., Kennedy, J. J., Rayner, N. A., and Jones, P. D.
//! (2012), Quantifying uncertainties in global and regional temperature
//! change using an ensemble of observational estimates: The HadCRUT4 data
//! set, J. Geophys. Res., 117, D08101.

use crate::config::{Config, YEAR_LABEL};
use crate::plot::Figure;
use crate::reader::{self, ColumnPick, ColumnSpec, Delimiter, TableSchema};
use crate::series::TimeSeries;
use crate::Result;

pub const FILENAME: &str = "HadCRUT.4.6.0.0.annual_ns_avg.txt";

const TITLE: &str = "Global temperature anomaly";
const YLABEL: &str = "Temperature deviation from average during 1961-1990 (°C)";
const REFERENCE: &str = "Morice et al, 2012";
const FIGURE_NAME: &str = "T_anomaly_last_170_years";

/// Yearly global means with the combined-uncertainty interval in the two
/// trailing columns.
const SCHEMA: TableSchema = TableSchema {
    name: "HadCRUT4 annual global mean",
    delimiter: Delimiter::Whitespace,
    skip_rows: 0,
    comment: None,
    columns: &[
        ColumnSpec {
            name: "year",
            pick: ColumnPick::FromStart(0),
        },
        ColumnSpec {
            name: "median",
            pick: ColumnPick::FromStart(1),
        },
        ColumnSpec {
            name: "ci_lower",
            pick: ColumnPick::FromEnd(1),
        },
        ColumnSpec {
            name: "ci_upper",
            pick: ColumnPick::FromEnd(0),
        },
    ],
};

/// Load the instrumental series with its confidence band. The full range is
/// shown, so no windowing happens here.
pub fn load(config: &Config) -> Result<TimeSeries> {
    let df = reader::read_table(&config.data_dir.join(FILENAME), &SCHEMA)?;
    TimeSeries::new(reader::column(&df, "year")?, reader::column(&df, "median")?)?
        .with_band(
            reader::column(&df, "ci_lower")?,
            reader::column(&df, "ci_upper")?,
        )
}

/// The temperature-anomaly figure: median line, uncertainty band and a
/// dashed zero-anomaly indicator.
pub fn figure(instrumental: &TimeSeries) -> Result<Figure> {
    Ok(Figure::new(FIGURE_NAME)
        .title(TITLE)
        .reference(REFERENCE)
        .xlabel(YEAR_LABEL)
        .ylabel(YLABEL)
        .series(instrumental)?
        .hline(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Layer;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(rows: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILENAME), rows).unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        (dir, config)
    }

    #[test]
    fn test_load_takes_median_and_trailing_interval() {
        // 12 columns as in the published file; inner intervals are dummies
        let row = |y: i32, m: f64, lo: f64, hi: f64| {
            format!("{y} {m} 0 0 0 0 0 0 0 0 {lo} {hi}\n")
        };
        let mut text = String::new();
        text += &row(1850, -0.3, -0.5, -0.1);
        text += &row(1851, -0.2, -0.4, 0.0);
        text += &row(2020, 0.9, 0.7, 1.1);
        let (_dir, config) = config_with(&text);

        let series = load(&config).unwrap();
        assert_eq!(series.years, vec![1850.0, 1851.0, 2020.0]);
        assert_eq!(series.values, vec![-0.3, -0.2, 0.9]);
        let band = series.band.as_ref().unwrap();
        assert_eq!(band.lower, vec![-0.5, -0.4, 0.7]);
        assert_eq!(band.upper, vec![-0.1, 0.0, 1.1]);
    }

    #[test]
    fn test_figure_plots_median_unmodified_with_band_and_zero_line() {
        let (_dir, config) = config_with("1850 -0.3 -0.5 -0.1\n2020 0.9 0.7 1.1\n");
        let series = load(&config).unwrap();
        let figure = figure(&series).unwrap();

        assert_eq!(figure.name, FIGURE_NAME);
        assert_eq!(figure.layers.len(), 3);
        match &figure.layers[0] {
            Layer::Line { x, y, .. } => {
                assert_eq!(x, &vec![1850.0, 2020.0]);
                assert_eq!(y, &vec![-0.3, 0.9]);
            }
            other => panic!("expected line layer, got {other:?}"),
        }
        match &figure.layers[1] {
            Layer::Ribbon { lower, upper, .. } => {
                assert_eq!(lower, &vec![-0.5, 0.7]);
                assert_eq!(upper, &vec![-0.1, 1.1]);
            }
            other => panic!("expected ribbon layer, got {other:?}"),
        }
        assert!(matches!(figure.layers[2], Layer::HLine { y } if y == 0.0));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let config = Config {
            data_dir: "/nonexistent".into(),
            ..Config::default()
        };
        let err = load(&config).unwrap_err();
        assert!(err.to_string().contains(FILENAME));
    }
}
