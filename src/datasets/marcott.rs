//! Paleo-reconstruction of the global temperature anomaly (Marcott 2013)
//!
//! A reconstruction of the temperature anomaly over the Holocene based on 73
//! globally distributed proxy records (alkenones, Mg/Ca ratios, ice-core
//! isotopes and others). Sampling resolution ranges from 20 to 500 years, so
//! the record resolves no variability at periods shorter than ~300 years.
//!
//! The extract used here is a tab-separated table with one header row and
//! three columns: age in years before 1950, temperature anomaly, and its 1σ
//! uncertainty. Rows are ordered oldest first; the most recent rows at the
//! end of the file are flagged as not robust by the authors and are dropped
//! before any windowing.
//!
//! Citation: Marcott, S. A. et al., A Reconstruction of Regional and Global
//! Temperature for the Past 11,300 Years, Science 339, 1198 (2013).

use crate::config::{Config, YEAR_LABEL};
use crate::datasets::PRESENT_YEAR;
use crate::plot::Figure;
use crate::reader::{self, ColumnPick, ColumnSpec, Delimiter, TableSchema};
use crate::series::{years_before_1950_to_ce, TimeSeries};
use crate::Result;

pub const FILENAME: &str = "Marcott_2013_data.tsv";

const TITLE: &str = "Reconstructed temperature anomaly";
const YLABEL: &str = "Global temperature anomaly (°C)";
const REFERENCE: &str = "Marcott et al, 2013";

/// Half-width of the shaded interval in multiples of the published 1σ
/// column.
const SIGMA_SCALE: f64 = 0.5;

const SCHEMA: TableSchema = TableSchema {
    name: "Marcott 2013 reconstruction",
    delimiter: Delimiter::Byte(b'\t'),
    skip_rows: 1,
    comment: None,
    columns: &[
        ColumnSpec {
            name: "age_bp",
            pick: ColumnPick::FromStart(0),
        },
        ColumnSpec {
            name: "anomaly",
            pick: ColumnPick::FromStart(1),
        },
        ColumnSpec {
            name: "sigma",
            pick: ColumnPick::FromStart(2),
        },
    ],
};

/// Load the reconstruction, drop the trailing non-robust rows, normalize the
/// age axis to years CE and restrict to the configured display window.
pub fn load(config: &Config) -> Result<TimeSeries> {
    let df = reader::read_table(&config.data_dir.join(FILENAME), &SCHEMA)?;
    let kept = df.height().saturating_sub(config.paleo_exclude);
    let df = df.slice(0, kept);

    let years: Vec<f64> = reader::column(&df, "age_bp")?
        .into_iter()
        .map(years_before_1950_to_ce)
        .collect();
    TimeSeries::new(years, reader::column(&df, "anomaly")?)?
        .with_sigma_band(&reader::column(&df, "sigma")?, SIGMA_SCALE)?
        .window_from(config.paleo_start_year)
}

/// The reconstruction figure, with the instrumental median overlaid for
/// visual continuity between the two records.
pub fn figure(config: &Config, instrumental: &TimeSeries) -> Result<Figure> {
    let reconstruction = load(config)?;
    let span = (PRESENT_YEAR - config.paleo_start_year).round() as i64;
    Figure::new(format!("T_anomaly_Marcott_last_{span}_years"))
        .title(TITLE)
        .reference(REFERENCE)
        .xlabel(YEAR_LABEL)
        .ylabel(YLABEL)
        .series(&reconstruction)?
        .line(instrumental.years.clone(), instrumental.values.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Layer;
    use std::fs;
    use tempfile::TempDir;

    /// Rows oldest first: ages 320, 300, ... 20 years before 1950.
    fn sample_file(n: usize) -> String {
        let mut text = String::from("Age\tAnomaly\tSigma\n");
        for i in 0..n {
            let age = 20 * (n - i);
            text += &format!("{age}\t{}\t0.2\n", i as f64 * 0.01);
        }
        text
    }

    fn config_with(text: &str, exclude: usize, start_year: f64) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILENAME), text).unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            paleo_exclude: exclude,
            paleo_start_year: start_year,
            ..Config::default()
        };
        (dir, config)
    }

    #[test]
    fn test_trailing_rows_dropped_before_windowing() {
        // 16 rows, the last 10 of which the source flags as non-robust;
        // excluding 6 must drop exactly the last 6 rows.
        let (_dir, config) = config_with(&sample_file(16), 6, f64::NEG_INFINITY);
        let series = load(&config).unwrap();
        assert_eq!(series.len(), 10);
        // oldest row survives, ages 320..=140 remain -> years 1630..=1810
        assert_eq!(series.years.first(), Some(&(1950.0 - 320.0)));
        assert_eq!(series.years.last(), Some(&(1950.0 - 140.0)));
    }

    #[test]
    fn test_age_axis_normalized_and_ascending() {
        let (_dir, config) = config_with(&sample_file(4), 0, f64::NEG_INFINITY);
        let series = load(&config).unwrap();
        assert_eq!(series.years, vec![1870.0, 1890.0, 1910.0, 1930.0]);
    }

    #[test]
    fn test_window_starts_at_configured_year() {
        let (_dir, config) = config_with(&sample_file(10), 0, 1850.0);
        let series = load(&config).unwrap();
        // ages 200..=20 -> years 1750..=1930; window from 1850 onwards
        assert_eq!(series.years.first(), Some(&1850.0));
        assert_eq!(series.years.last(), Some(&1930.0));
    }

    #[test]
    fn test_band_is_half_sigma() {
        let (_dir, config) = config_with(&sample_file(3), 0, f64::NEG_INFINITY);
        let series = load(&config).unwrap();
        let band = series.band.as_ref().unwrap();
        for ((lo, v), hi) in band.lower.iter().zip(&series.values).zip(&band.upper) {
            assert!((v - lo - 0.1).abs() < 1e-12);
            assert!((hi - v - 0.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_figure_overlays_instrumental_series() {
        let (_dir, config) = config_with(&sample_file(8), 2, f64::NEG_INFINITY);
        let instrumental = TimeSeries::new(vec![1850.0, 2020.0], vec![-0.3, 0.9]).unwrap();
        let figure = figure(&config, &instrumental).unwrap();
        // reconstruction line + band + instrumental overlay
        assert_eq!(figure.layers.len(), 3);
        match &figure.layers[2] {
            Layer::Line { x, color, .. } => {
                assert_eq!(x, &vec![1850.0, 2020.0]);
                assert!(color.is_none());
            }
            other => panic!("expected overlay line, got {other:?}"),
        }
    }

    #[test]
    fn test_figure_name_encodes_window_span() {
        let (_dir, config) = config_with(&sample_file(8), 0, 0.0);
        let instrumental = TimeSeries::new(vec![2020.0], vec![0.9]).unwrap();
        let figure = figure(&config, &instrumental).unwrap();
        assert_eq!(figure.name, "T_anomaly_Marcott_last_2020_years");
    }
}
