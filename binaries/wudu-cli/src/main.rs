//! wudu CLI
//!
//! Render five-level tone diagrams from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wudu_config::PlotConfig;
use wudu_core::{tonal_to_coord, COLOR_NAMES, PALETTE, TONAL_NAMES};
use wudu_plot::{Diagram, ToneChart};

#[derive(Parser)]
#[command(name = "wudu")]
#[command(about = "Five-level tone contour diagrams (五度标记法)")]
#[command(version)]
struct Cli {
    /// Plot config file (.yaml or .json); defaults to the user config dir
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a diagram file
    Render {
        /// Diagram description (.yaml or .json)
        diagram: PathBuf,

        /// Output file (.svg or .json)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the built-in Chongqing sample
    Sample {
        /// Output file (.svg or .json)
        #[arg(short, long, default_value = "重庆.svg")]
        output: PathBuf,
    },

    /// Print plotting coordinates of tonal values
    Coord {
        /// Tonal values such as 55 or 213
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Show tone categories, color names and hex values
    Palette,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wudu_plot=info".parse()?)
                .add_directive("wudu_config=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { diagram, output } => {
            let config = load_config(cli.config.as_deref())?;
            let diagram = Diagram::load(&diagram)
                .with_context(|| format!("reading diagram {}", diagram.display()))?;
            let chart = diagram.render(config).context("drawing diagram")?;
            save(&chart, &output)
        }
        Commands::Sample { output } => {
            let config = load_config(cli.config.as_deref())?;
            let chart = Diagram::chongqing().render(config).context("drawing sample")?;
            save(&chart, &output)
        }
        Commands::Coord { values } => {
            for value in &values {
                let coord = tonal_to_coord(value)?;
                println!("{:>4}  u = {:>7.4}  v = {:>7.4}", value, coord.u, coord.v);
            }
            Ok(())
        }
        Commands::Palette => {
            for ((tone, name), hex) in TONAL_NAMES.iter().zip(COLOR_NAMES).zip(PALETTE) {
                println!("{}  {}  {}", tone, name, hex);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PlotConfig> {
    let config = match path {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PlotConfig::load_default().context("reading default config")?,
    };
    Ok(config.apply_env()?)
}

fn save(chart: &ToneChart, output: &Path) -> Result<()> {
    chart
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Saved {}", output.display());
    Ok(())
}
