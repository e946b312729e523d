//! Output stage
//!
//! Figures leave the program through a [`Writer`]. The only implementation
//! renders with plotters into PNG or SVG files; the output stage [`emit`]
//! decides where those files go:
//!
//! - show mode renders everything into a per-run temporary directory and
//!   returns the paths for the caller to report (the crate has no
//!   interactive display surface);
//! - save mode writes one file per figure under
//!   `plots_<format>/<style-name>/`, creating the directory if absent.
//!
//! A failed write aborts the run immediately; remaining figures are not
//! written.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Config, ImageFormat, OutputMode, ReferencePlacement};
use crate::plot::Figure;
use crate::style::{self, Style};
use crate::{ChartError, Result};

mod plotters;

use self::plotters::draw_figure;

use ::plotters::prelude::{BitMapBackend, IntoDrawingArea, SVGBackend};

/// Renders a figure into some output.
pub trait Writer {
    type Output;

    fn write(&self, figure: &Figure) -> Result<Self::Output>;
}

/// File-producing writer backed by plotters.
pub struct PlottersWriter<'a> {
    style: &'a Style,
    placement: ReferencePlacement,
    format: ImageFormat,
    out_dir: PathBuf,
}

impl<'a> PlottersWriter<'a> {
    pub fn new(
        style: &'a Style,
        placement: ReferencePlacement,
        format: ImageFormat,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            style,
            placement,
            format,
            out_dir: out_dir.into(),
        }
    }

    fn target_path(&self, figure: &Figure) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", figure.name, self.format.extension()))
    }
}

impl Writer for PlottersWriter<'_> {
    type Output = PathBuf;

    /// Render one figure to its target file.
    fn write(&self, figure: &Figure) -> Result<PathBuf> {
        let path = self.target_path(figure);
        let dimensions = (self.style.width, self.style.height);
        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, dimensions).into_drawing_area();
                draw_figure(&root, figure, self.style, self.placement)?;
                root.present().map_err(|e| {
                    ChartError::Writer(format!(
                        "Cannot write '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, dimensions).into_drawing_area();
                draw_figure(&root, figure, self.style, self.placement)?;
                root.present().map_err(|e| {
                    ChartError::Writer(format!(
                        "Cannot write '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }
        info!(figure = %figure.name, path = %path.display(), "wrote figure");
        Ok(path)
    }
}

/// Render all figures according to the configured output mode and return the
/// written paths in figure order.
pub fn emit(figures: &[Figure], config: &Config) -> Result<Vec<PathBuf>> {
    let style = style::lookup(&config.style)?;
    let (out_dir, format) = match config.output {
        // Show mode has no interactive surface; render to a temporary
        // directory instead and let the caller report the locations.
        OutputMode::Show => (
            std::env::temp_dir().join(format!("climatecharts-{}", std::process::id())),
            ImageFormat::Png,
        ),
        OutputMode::Save(format) => (save_dir(config, style, format), format),
    };
    ensure_dir(&out_dir)?;

    let writer = PlottersWriter::new(style, config.reference, format, &out_dir);
    figures.iter().map(|figure| writer.write(figure)).collect()
}

/// `<out_root>/plots_<format>/<style-name>`
fn save_dir(config: &Config, style: &Style, format: ImageFormat) -> PathBuf {
    config
        .out_root
        .join(format!("plots_{}", format.extension()))
        .join(style.name)
}

/// Idempotent create-if-absent.
fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        ChartError::Writer(format!(
            "Cannot create output directory '{}': {}",
            dir.display(),
            e
        ))
    })
}
