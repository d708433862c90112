//! # wudu Plot
//!
//! Draws five-level tone diagrams and exports them as SVG.
//!
//! ```no_run
//! use wudu_config::PlotConfig;
//! use wudu_plot::ToneChart;
//!
//! let mut chart = ToneChart::new(PlotConfig::default())?;
//! chart.create_path("阴", &["44", "55", "45"], Some("阴平"))?;
//! chart.create_path("去", &["24", "13", "213"], Some("阴去"))?;
//! chart.save("重庆.svg")?;
//! # Ok::<(), wudu_plot::Error>(())
//! ```

pub mod chart;
pub mod diagram;
pub mod render;
pub mod scene;

pub use chart::{Format, Space, ToneChart};
pub use diagram::{Diagram, PathSpec};
pub use scene::{Item, Layer, Primitive, Scene};

/// Result type for wudu-plot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from drawing or exporting a chart
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] wudu_core::Error),

    #[error("Config error: {0}")]
    Config(#[from] wudu_config::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
