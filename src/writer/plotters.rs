//! Figure rendering via plotters
//!
//! One generic drawing routine shared by the bitmap and SVG backends. The
//! renderer walks the figure's layers in order: line layers cycle the style
//! palette unless they carry an explicit color, ribbons are drawn as filled
//! polygons at the style's band opacity, indicator lines are dashed.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::{Polygon, Text};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::{ReferencePlacement, REFERENCE_POS};
use crate::plot::{Figure, Layer};
use crate::style::{parse_color, Style};
use crate::{ChartError, Result};

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Dash length and gap of indicator lines, in pixels.
const INDICATOR_DASHES: (u32, u32) = (6, 6);

/// Widen a data range by the axis margin; degenerate ranges get a fixed pad
/// so the chart always has a drawable area.
fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= 0.0 {
        (min - 0.5, max + 0.5)
    } else {
        (min - span * AXIS_MARGIN, max + span * AXIS_MARGIN)
    }
}

/// Title text with the citation appended when the placement asks for it.
fn display_title(figure: &Figure, placement: ReferencePlacement) -> String {
    match (&figure.reference, placement) {
        (Some(reference), ReferencePlacement::Title) if !reference.is_empty() => {
            format!("{} ({})", figure.title, reference)
        }
        _ => figure.title.clone(),
    }
}

/// Draw a complete figure onto a prepared drawing area.
pub(super) fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    style: &Style,
    placement: ReferencePlacement,
) -> Result<()> {
    let werr = |e: DrawingAreaErrorKind<DB::ErrorType>| {
        ChartError::Writer(format!("Failed to render figure '{}': {}", figure.name, e))
    };

    let background = parse_color(style.background)?;
    let foreground = parse_color(style.foreground)?;
    let grid = parse_color(style.grid)?;

    root.fill(&background).map_err(werr)?;

    let extent = figure.data_extent().ok_or_else(|| {
        ChartError::Writer(format!("Figure '{}' has no data layers", figure.name))
    })?;
    let (x_min, x_max) = pad_range(extent.x_min, extent.x_max);
    let (y_min, y_max) = pad_range(extent.y_min, extent.y_max);

    let title = display_title(figure, placement);
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(12)
        .x_label_area_size(52)
        .y_label_area_size(68);
    if !title.is_empty() {
        builder.caption(
            &title,
            (style.font, style.title_size)
                .into_font()
                .color(&foreground),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(werr)?;

    chart
        .configure_mesh()
        .bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(foreground)
        .label_style(
            (style.font, style.label_size)
                .into_font()
                .color(&foreground),
        )
        .x_desc(figure.xlabel.clone().unwrap_or_default())
        .y_desc(figure.ylabel.clone().unwrap_or_default())
        .draw()
        .map_err(werr)?;

    // Palette cursor shared by lines and ribbons, so colors cycle the way
    // successive plot calls do.
    let mut slot = 0usize;
    let mut next_color = || -> Result<RGBAColor> {
        let spec = style.palette[slot % style.palette.len()];
        slot += 1;
        parse_color(spec)
    };

    for layer in &figure.layers {
        match layer {
            Layer::Line { x, y, color } => {
                let color = match color {
                    Some(spec) => parse_color(spec)?,
                    None => next_color()?,
                };
                chart
                    .draw_series(LineSeries::new(
                        x.iter().copied().zip(y.iter().copied()),
                        color.stroke_width(2),
                    ))
                    .map_err(werr)?;
            }
            Layer::Ribbon { x, lower, upper } => {
                let color = next_color()?.mix(style.band_opacity);
                let mut polygon: Vec<(f64, f64)> =
                    x.iter().copied().zip(upper.iter().copied()).collect();
                polygon.extend(x.iter().copied().zip(lower.iter().copied()).rev());
                chart
                    .draw_series(std::iter::once(Polygon::new(polygon, color.filled())))
                    .map_err(werr)?;
            }
            Layer::HLine { y } => {
                let color = parse_color(style.indicator)?;
                let (dash, gap) = INDICATOR_DASHES;
                chart
                    .draw_series(DashedLineSeries::new(
                        [(x_min, *y), (x_max, *y)].into_iter(),
                        dash,
                        gap,
                        color.stroke_width(1),
                    ))
                    .map_err(werr)?;
            }
        }
    }

    if placement == ReferencePlacement::Inline {
        if let Some(reference) = figure.reference.as_deref().filter(|r| !r.is_empty()) {
            let (fx, fy) = REFERENCE_POS;
            let at = (x_min + fx * (x_max - x_min), y_min + fy * (y_max - y_min));
            let text_style = (style.font, style.label_size)
                .into_font()
                .color(&foreground)
                .pos(Pos::new(HPos::Right, VPos::Bottom));
            chart
                .plotting_area()
                .draw(&Text::new(reference.to_string(), at, text_style))
                .map_err(werr)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_range_widens_by_margin() {
        let (lo, hi) = pad_range(0.0, 100.0);
        assert_eq!(lo, -5.0);
        assert_eq!(hi, 105.0);
    }

    #[test]
    fn test_pad_range_handles_degenerate_span() {
        let (lo, hi) = pad_range(3.0, 3.0);
        assert!(lo < 3.0 && hi > 3.0);
    }

    #[test]
    fn test_display_title_placements() {
        let figure = Figure::new("f").title("Title").reference("Ref, 2020");
        assert_eq!(
            display_title(&figure, ReferencePlacement::Title),
            "Title (Ref, 2020)"
        );
        assert_eq!(display_title(&figure, ReferencePlacement::Inline), "Title");
        assert_eq!(display_title(&figure, ReferencePlacement::None), "Title");
    }

    #[test]
    fn test_display_title_without_reference() {
        let figure = Figure::new("f").title("Title");
        assert_eq!(display_title(&figure, ReferencePlacement::Title), "Title");
    }
}
