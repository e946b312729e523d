//! Atmospheric CO2 concentration (Mauna Loa + EPICA Dome C)
//!
//! Two sources cover the recent and the deep past:
//!
//! - Annual means measured in situ since 1959 (Scripps/NOAA, Mauna Loa).
//!   Whitespace table with `#`-prefixed comments; year and annual mean ppm
//!   in the first two columns.
//! - A long-term record compiled from the EPICA Dome C ice core, normalized
//!   to one value per year. Comma-separated with one header row; year and
//!   concentration in the first two columns.
//!
//! The two records use slightly different CO2 calibration scales; the
//! published conversion only matters in the third decimal and is not
//! applied. Both series are drawn in the same color so they read as one
//! record. The long-term series is windowed at its old end only; its recent
//! end stays unbounded and simply runs under the instrumental curve.
//!
//! Citation: Bereiter, B. et al. (2015). Revision of the EPICA Dome C CO2
//! record from 800 to 600 kyr before present. Geophys. Res. Lett., 42(2).

use crate::config::{Config, YEAR_LABEL};
use crate::datasets::PRESENT_YEAR;
use crate::plot::Figure;
use crate::reader::{self, ColumnPick, ColumnSpec, Delimiter, TableSchema};
use crate::series::TimeSeries;
use crate::Result;

pub const RECENT_FILENAME: &str = "co2_annmean_mlo.txt";
pub const LONGTERM_FILENAME: &str = "co2-concentration-long-term.csv";

const TITLE: &str = "Reconstruction of CO2 concentration";
const YLABEL: &str = "Atmospheric CO2 concentration (ppm)";
const REFERENCE: &str = "Bereiter et al, 2015";
const LINE_COLOR: &str = "black";

const RECENT_SCHEMA: TableSchema = TableSchema {
    name: "Mauna Loa annual mean CO2",
    delimiter: Delimiter::Whitespace,
    skip_rows: 0,
    comment: Some('#'),
    columns: &[
        ColumnSpec {
            name: "year",
            pick: ColumnPick::FromStart(0),
        },
        ColumnSpec {
            name: "mean",
            pick: ColumnPick::FromStart(1),
        },
    ],
};

const LONGTERM_SCHEMA: TableSchema = TableSchema {
    name: "long-term CO2 record",
    delimiter: Delimiter::Byte(b','),
    skip_rows: 1,
    comment: None,
    columns: &[
        ColumnSpec {
            name: "year",
            pick: ColumnPick::FromStart(0),
        },
        ColumnSpec {
            name: "co2",
            pick: ColumnPick::FromStart(1),
        },
    ],
};

/// The recent instrumental series, full range.
pub fn load_recent(config: &Config) -> Result<TimeSeries> {
    let df = reader::read_table(&config.data_dir.join(RECENT_FILENAME), &RECENT_SCHEMA)?;
    TimeSeries::new(reader::column(&df, "year")?, reader::column(&df, "mean")?)
}

/// The ice-core series, windowed at the old end only.
pub fn load_longterm(config: &Config) -> Result<TimeSeries> {
    let df = reader::read_table(
        &config.data_dir.join(LONGTERM_FILENAME),
        &LONGTERM_SCHEMA,
    )?;
    TimeSeries::new(reader::column(&df, "year")?, reader::column(&df, "co2")?)?
        .window_from(config.co2_start_year)
}

/// The CO2 figure: instrumental annual means plus the windowed ice-core
/// record, drawn in one color.
pub fn figure(config: &Config) -> Result<Figure> {
    let recent = load_recent(config)?;
    let longterm = load_longterm(config)?;
    let span = (PRESENT_YEAR - config.co2_start_year).round() as i64;
    Figure::new(format!("CO2_atmospheric_concentration_last_{span}_years"))
        .title(TITLE)
        .reference(REFERENCE)
        .xlabel(YEAR_LABEL)
        .ylabel(YLABEL)
        .line_colored(recent.years, recent.values, LINE_COLOR)?
        .line_colored(longterm.years, longterm.values, LINE_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::Layer;
    use std::fs;
    use tempfile::TempDir;

    const RECENT: &str = "# year mean unc\n1959 315.98 0.12\n1960 316.91 0.12\n2020 414.24 0.12\n";
    const LONGTERM: &str =
        "year,co2\n-20000,190.3\n-12000,240.0\n-5000,260.1\n1850,284.7\n2018,407.4\n";

    fn config_with(start_year: f64) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(RECENT_FILENAME), RECENT).unwrap();
        fs::write(dir.path().join(LONGTERM_FILENAME), LONGTERM).unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            co2_start_year: start_year,
            ..Config::default()
        };
        (dir, config)
    }

    #[test]
    fn test_recent_series_is_not_windowed() {
        let (_dir, config) = config_with(-12000.0);
        let recent = load_recent(&config).unwrap();
        assert_eq!(recent.years, vec![1959.0, 1960.0, 2020.0]);
        assert_eq!(recent.values, vec![315.98, 316.91, 414.24]);
    }

    #[test]
    fn test_longterm_windowed_at_old_end_only() {
        let (_dir, config) = config_with(-12000.0);
        let longterm = load_longterm(&config).unwrap();
        // -20000 falls before the window; the recent end stays unbounded
        assert_eq!(longterm.years, vec![-12000.0, -5000.0, 1850.0, 2018.0]);
    }

    #[test]
    fn test_figure_draws_both_series_in_one_color() {
        let (_dir, config) = config_with(-12000.0);
        let figure = figure(&config).unwrap();
        assert_eq!(figure.name, "CO2_atmospheric_concentration_last_14020_years");
        assert_eq!(figure.layers.len(), 2);
        for layer in &figure.layers {
            match layer {
                Layer::Line { color, .. } => {
                    assert_eq!(color.as_deref(), Some("black"));
                }
                other => panic!("expected line layer, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_longterm_file_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(RECENT_FILENAME), RECENT).unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let err = figure(&config).unwrap_err();
        assert!(err.to_string().contains(LONGTERM_FILENAME));
    }
}
