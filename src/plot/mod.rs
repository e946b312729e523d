//! Figure specification types
//!
//! A [`Figure`] is the renderable record produced by a dataset handler: an
//! identifier (used as the output filename), title, axis labels, an optional
//! data citation and a list of layers. Layers carry their data directly;
//! rendering is the writer's job, so figures serialize cleanly to JSON for
//! inspection.
//!
//! The builder validates layer data on attachment: mismatched x/y lengths
//! are a descriptive [`ChartError::Plot`], never a cryptic downstream panic.

use serde::Serialize;

use crate::series::TimeSeries;
use crate::{ChartError, Result};

/// A single drawable layer of a figure.
#[derive(Debug, Clone, Serialize)]
pub enum Layer {
    /// A connected line through (x, y) points
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        /// CSS color override; `None` cycles the style palette
        color: Option<String>,
    },
    /// A shaded region between lower and upper bounds
    Ribbon {
        x: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    },
    /// A dashed horizontal indicator line
    HLine { y: f64 },
}

/// A named, renderable figure. Created by a dataset handler, consumed once
/// by the output stage, never mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    /// Identifier, used as the output filename
    pub name: String,
    pub title: String,
    /// Data citation, placed according to the configured reference placement
    pub reference: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub layers: Vec<Layer>,
}

impl Figure {
    /// Start a new figure with the given identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            reference: None,
            xlabel: None,
            ylabel: None,
            layers: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    /// Add a line layer, cycling the style palette.
    pub fn line(self, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        self.line_layer(x, y, None)
    }

    /// Add a line layer with an explicit CSS color.
    pub fn line_colored(
        self,
        x: Vec<f64>,
        y: Vec<f64>,
        color: impl Into<String>,
    ) -> Result<Self> {
        self.line_layer(x, y, Some(color.into()))
    }

    fn line_layer(mut self, x: Vec<f64>, y: Vec<f64>, color: Option<String>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ChartError::Plot(format!(
                "Cannot plot line on figure '{}': x has {} points but y has {}",
                self.name,
                x.len(),
                y.len()
            )));
        }
        self.layers.push(Layer::Line { x, y, color });
        Ok(self)
    }

    /// Add a shaded band between `lower` and `upper`.
    pub fn ribbon(mut self, x: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != x.len() || upper.len() != x.len() {
            return Err(ChartError::Plot(format!(
                "Cannot shade band on figure '{}': x has {} points but bounds have {}/{}",
                self.name,
                x.len(),
                lower.len(),
                upper.len()
            )));
        }
        self.layers.push(Layer::Ribbon { x, lower, upper });
        Ok(self)
    }

    /// Add a dashed horizontal indicator at `y`.
    pub fn hline(mut self, y: f64) -> Self {
        self.layers.push(Layer::HLine { y });
        self
    }

    /// Add a line layer for a whole series, plus a ribbon when it carries a
    /// band.
    pub fn series(self, ts: &TimeSeries) -> Result<Self> {
        let mut figure = self.line(ts.years.clone(), ts.values.clone())?;
        if let Some(band) = &ts.band {
            figure = figure.ribbon(ts.years.clone(), band.lower.clone(), band.upper.clone())?;
        }
        Ok(figure)
    }

    /// Data extent over all line and ribbon layers, `None` when no layer
    /// carries data. Indicator lines do not contribute, matching how the
    /// charts are framed by their data.
    pub fn data_extent(&self) -> Option<Extent> {
        let mut extent: Option<Extent> = None;
        let mut include = |x: &[f64], y: &[f64]| {
            for (&xv, &yv) in x.iter().zip(y) {
                match &mut extent {
                    Some(e) => e.include(xv, yv),
                    None => extent = Some(Extent::point(xv, yv)),
                }
            }
        };
        for layer in &self.layers {
            match layer {
                Layer::Line { x, y, .. } => include(x, y),
                Layer::Ribbon { x, lower, upper } => {
                    include(x, lower);
                    include(x, upper);
                }
                Layer::HLine { .. } => {}
            }
        }
        extent
    }
}

/// Bounding box of the plotted data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    fn point(x: f64, y: f64) -> Self {
        Self {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_layers() {
        let figure = Figure::new("demo")
            .title("Demo")
            .xlabel("x")
            .ylabel("y")
            .reference("Someone et al, 2020")
            .line(vec![0.0, 1.0], vec![1.0, 2.0])
            .unwrap()
            .ribbon(vec![0.0, 1.0], vec![0.5, 1.5], vec![1.5, 2.5])
            .unwrap()
            .hline(0.0);
        assert_eq!(figure.layers.len(), 3);
        assert_eq!(figure.reference.as_deref(), Some("Someone et al, 2020"));
    }

    #[test]
    fn test_line_length_mismatch_is_descriptive() {
        let err = Figure::new("demo")
            .line(vec![0.0, 1.0, 2.0], vec![1.0])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("demo"));
        assert!(msg.contains("3"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn test_ribbon_length_mismatch_rejected() {
        let err = Figure::new("demo")
            .ribbon(vec![0.0, 1.0], vec![0.0], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, ChartError::Plot(_)));
    }

    #[test]
    fn test_series_with_band_adds_two_layers() {
        let ts = TimeSeries::new(vec![0.0, 1.0], vec![1.0, 2.0])
            .unwrap()
            .with_sigma_band(&[0.2, 0.2], 1.0)
            .unwrap();
        let figure = Figure::new("demo").series(&ts).unwrap();
        assert_eq!(figure.layers.len(), 2);
        assert!(matches!(figure.layers[0], Layer::Line { .. }));
        assert!(matches!(figure.layers[1], Layer::Ribbon { .. }));
    }

    #[test]
    fn test_data_extent_covers_ribbon_but_not_hline() {
        let figure = Figure::new("demo")
            .line(vec![0.0, 10.0], vec![1.0, 2.0])
            .unwrap()
            .ribbon(vec![0.0, 10.0], vec![0.5, 1.5], vec![1.5, 2.5])
            .unwrap()
            .hline(-100.0);
        let extent = figure.data_extent().unwrap();
        assert_eq!(extent.x_min, 0.0);
        assert_eq!(extent.x_max, 10.0);
        assert_eq!(extent.y_min, 0.5);
        assert_eq!(extent.y_max, 2.5);
    }

    #[test]
    fn test_empty_figure_has_no_extent() {
        assert!(Figure::new("empty").data_extent().is_none());
    }

    #[test]
    fn test_figure_serializes_to_json() {
        let figure = Figure::new("demo").line(vec![0.0], vec![1.0]).unwrap();
        let json = serde_json::to_string(&figure).unwrap();
        assert!(json.contains("\"name\":\"demo\""));
        assert!(json.contains("Line"));
    }
}
