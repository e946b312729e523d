//! Built-in visual styles
//!
//! A [`Style`] bundles everything the renderer needs to lay out a figure:
//! canvas dimensions, background/foreground colors, the categorical line
//! palette and the band opacity. Styles are looked up by name; an unknown
//! name is a configuration error listing the available styles.
//!
//! Colors are CSS color strings and are parsed with `csscolorparser`, so
//! both hex values and named colors are accepted.

use plotters::style::RGBAColor;

use crate::{ChartError, Result};

// =============================================================================
// Palettes
// =============================================================================

/// D3 Category 10 - default categorical line palette
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Lightened variant of Category 10 for dark backgrounds
pub const CATEGORY10_LIGHT: &[&str] = &[
    "#5ca9db", "#ffa94d", "#5fc96a", "#ef6b6b", "#b794d8",
    "#b08878", "#f0a3d8", "#aaaaaa", "#d6d65a", "#55d6e8",
];

// =============================================================================
// Style
// =============================================================================

/// Visual style applied to every figure of a run.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    /// Style name, also used as the output subdirectory name
    pub name: &'static str,
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,
    /// Plot background
    pub background: &'static str,
    /// Axis lines, tick labels, titles
    pub foreground: &'static str,
    /// Mesh/grid lines
    pub grid: &'static str,
    /// Categorical palette cycled over line layers
    pub palette: &'static [&'static str],
    /// Color of indicator lines (e.g. the zero-anomaly dashes)
    pub indicator: &'static str,
    /// Opacity of uncertainty bands
    pub band_opacity: f64,
    /// Font family passed to plotters
    pub font: &'static str,
    pub title_size: u32,
    pub label_size: u32,
}

/// All built-in styles.
pub const STYLES: &[Style] = &[
    Style {
        name: "default",
        width: 960,
        height: 720,
        background: "#ffffff",
        foreground: "#262626",
        grid: "#d9d9d9",
        palette: CATEGORY10,
        indicator: "black",
        band_opacity: 0.5,
        font: "sans-serif",
        title_size: 28,
        label_size: 18,
    },
    Style {
        name: "dark",
        width: 960,
        height: 720,
        background: "#11141a",
        foreground: "#e6edf7",
        grid: "#3a3f4a",
        palette: CATEGORY10_LIGHT,
        indicator: "#e6edf7",
        band_opacity: 0.4,
        font: "sans-serif",
        title_size: 28,
        label_size: 18,
    },
];

/// Look up a built-in style by name.
pub fn lookup(name: &str) -> Result<&'static Style> {
    STYLES.iter().find(|s| s.name == name).ok_or_else(|| {
        let available: Vec<&str> = STYLES.iter().map(|s| s.name).collect();
        ChartError::Config(format!(
            "Unknown style '{}'. Available styles: {}",
            name,
            available.join(", ")
        ))
    })
}

/// Parse a CSS color string into a plotters color.
pub fn parse_color(spec: &str) -> Result<RGBAColor> {
    let color = csscolorparser::parse(spec)
        .map_err(|e| ChartError::Config(format!("Invalid color '{}': {}", spec, e)))?;
    let [r, g, b, a] = color.to_rgba8();
    Ok(RGBAColor(r, g, b, a as f64 / 255.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_styles() {
        assert_eq!(lookup("default").unwrap().name, "default");
        assert_eq!(lookup("dark").unwrap().name, "dark");
    }

    #[test]
    fn test_lookup_unknown_lists_available() {
        let err = lookup("xkcd").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("xkcd"));
        assert!(msg.contains("default"));
        assert!(msg.contains("dark"));
    }

    #[test]
    fn test_parse_color_hex_and_named() {
        assert_eq!(parse_color("#ff0000").unwrap(), RGBAColor(255, 0, 0, 1.0));
        assert_eq!(parse_color("black").unwrap(), RGBAColor(0, 0, 0, 1.0));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(matches!(
            parse_color("not-a-color"),
            Err(ChartError::Config(_))
        ));
    }

    #[test]
    fn test_builtin_palette_colors_parse() {
        for style in STYLES {
            for spec in [style.background, style.foreground, style.grid, style.indicator] {
                parse_color(spec).unwrap();
            }
            for spec in style.palette {
                parse_color(spec).unwrap();
            }
        }
    }
}
