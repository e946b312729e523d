/*!
climatecharts command line interface

Renders the fixed chart set from local dataset files. Every flag only
overrides a field of the default configuration; running without arguments
reproduces the stock chart set.
*/

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use climatecharts::config::{Config, ImageFormat, OutputMode, ReferencePlacement};
use climatecharts::{datasets, style, writer, VERSION};

#[derive(Parser)]
#[command(name = "climatecharts")]
#[command(about = "Climate-history charts from local tabular datasets")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all charts to image files
    Render {
        /// Built-in style name
        #[arg(long, default_value = "default")]
        style: String,

        /// Output format (png, svg)
        #[arg(long, default_value = "svg")]
        format: String,

        /// Render into a temporary directory instead of plots_<format>/
        #[arg(long)]
        show: bool,

        /// Directory holding the dataset files
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Citation placement (title, plot, none)
        #[arg(long, default_value = "title")]
        reference: String,

        /// First year (CE) shown in the paleo reconstruction
        #[arg(long)]
        paleo_from: Option<f64>,

        /// First year (CE) shown for the long-term CO2 series
        #[arg(long)]
        co2_from: Option<f64>,
    },

    /// Print the figure specifications without rendering
    Inspect {
        /// Output format for the specifications (json, pretty)
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Directory holding the dataset files
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },

    /// List the built-in styles
    Styles,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            style,
            format,
            show,
            data_dir,
            reference,
            paleo_from,
            co2_from,
        } => {
            let output = if show {
                OutputMode::Show
            } else {
                OutputMode::Save(ImageFormat::parse(&format)?)
            };
            let defaults = Config::default();
            let config = Config {
                style,
                reference: ReferencePlacement::parse(&reference)?,
                output,
                data_dir,
                paleo_start_year: paleo_from.unwrap_or(defaults.paleo_start_year),
                co2_start_year: co2_from.unwrap_or(defaults.co2_start_year),
                ..defaults
            };

            let figures = datasets::build_all(&config)?;
            let written = writer::emit(&figures, &config)?;
            for path in written {
                println!("{}", path.display());
            }
        }

        Commands::Inspect { format, data_dir } => {
            let config = Config {
                data_dir,
                ..Config::default()
            };
            let figures = datasets::build_all(&config)?;
            match format.as_str() {
                "json" => println!(
                    "{}",
                    serde_json::to_string_pretty(&figures)
                        .context("Failed to serialize figure specifications")?
                ),
                "pretty" => {
                    println!("Figures: {} total", figures.len());
                    for (i, figure) in figures.iter().enumerate() {
                        println!("\nFigure #{}: {}", i + 1, figure.name);
                        println!("  Title: {}", figure.title);
                        if let Some(reference) = &figure.reference {
                            println!("  Reference: {}", reference);
                        }
                        println!("  Layers: {}", figure.layers.len());
                        if let Some(extent) = figure.data_extent() {
                            println!(
                                "  Extent: x [{}, {}], y [{}, {}]",
                                extent.x_min, extent.x_max, extent.y_min, extent.y_max
                            );
                        }
                    }
                }
                other => anyhow::bail!("Unknown inspect format '{}'. Available formats: json, pretty", other),
            }
        }

        Commands::Styles => {
            for s in style::STYLES {
                println!("{} ({}x{}, {} palette colors)", s.name, s.width, s.height, s.palette.len());
            }
        }
    }

    Ok(())
}
