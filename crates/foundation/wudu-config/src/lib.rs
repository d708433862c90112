//! # wudu Config
//!
//! Figure and styling options for tone diagrams.
//!
//! Options come from three places, later ones winning:
//! built-in defaults, a YAML/JSON file, then `WUDU_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Result type for wudu-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Arrowhead placement and size along a connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    /// Fraction of the segment where the arrowhead shaft starts
    pub start: f64,
    /// Fraction of the segment where the arrowhead tip sits
    pub end: f64,
    /// Head length in points
    pub head_length: f64,
    /// Head width in points
    pub head_width: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            start: 0.49,
            end: 0.6,
            head_length: 20.0,
            head_width: 12.0,
        }
    }
}

/// Configuration for a tone chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Figure size in inches (width, height)
    pub figure_size: (f64, f64),
    /// Pixels per inch
    pub dpi: f64,
    /// Reference grid line color
    pub grid_color: String,
    /// Grid line width in points
    pub grid_width: f64,
    /// Figure background; `None` leaves it transparent
    pub background: Option<String>,
    /// Font family list for all text
    pub font_family: String,
    /// Text color on markers
    pub label_color: String,
    /// Connector line width in points
    pub line_width: f64,
    /// Marker area in square points
    pub marker_size: f64,
    /// Marker label font size in points
    pub label_font_size: f64,
    /// Tonal value annotation font size in points
    pub value_font_size: f64,
    /// Horizontal offset of the tonal value annotation, plotting units
    pub value_offset: f64,
    /// Padding around the grid, plotting units
    pub margin: f64,
    pub arrow: ArrowConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figure_size: (14.0, 14.0),
            dpi: 100.0,
            grid_color: "grey".to_string(),
            grid_width: 1.5,
            background: Some("white".to_string()),
            font_family: "SimHei, sans-serif".to_string(),
            label_color: "white".to_string(),
            line_width: 4.0,
            marker_size: 4000.0,
            label_font_size: 32.0,
            value_font_size: 24.0,
            value_offset: -0.5,
            margin: 0.9,
            arrow: ArrowConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Default config with a specific figure size
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            figure_size: (width, height),
            ..Default::default()
        }
    }

    /// `~/.config/wudu/config.yaml` (platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wudu").join("config.yaml"))
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config = match extension(path).as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&data)?,
            Some("json") => Self::from_json_str(&data)?,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!("Loaded plot config from {}", path.display());
        Ok(config)
    }

    /// Load the file at [`default_path`](Self::default_path) if it exists
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(data: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WUDU_*` environment overrides
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(color) = env::var("WUDU_GRID_COLOR") {
            self.grid_color = color;
        }
        if let Ok(family) = env::var("WUDU_FONT_FAMILY") {
            self.font_family = family;
        }
        if let Ok(dpi) = env::var("WUDU_DPI") {
            match dpi.parse() {
                Ok(dpi) => self.dpi = dpi,
                Err(_) => tracing::warn!("Ignoring WUDU_DPI={:?}: not a number", dpi),
            }
        }
        if let Ok(size) = env::var("WUDU_FIGURE_SIZE") {
            match parse_size(&size) {
                Some(size) => self.figure_size = size,
                None => tracing::warn!("Ignoring WUDU_FIGURE_SIZE={:?}: expected WxH", size),
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Check ranges the renderer relies on
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.figure_size;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::Invalid(format!("figure size must be positive, got {}x{}", w, h)));
        }
        positive("dpi", self.dpi)?;
        positive("grid_width", self.grid_width)?;
        positive("line_width", self.line_width)?;
        positive("marker_size", self.marker_size)?;
        positive("label_font_size", self.label_font_size)?;
        positive("value_font_size", self.value_font_size)?;
        non_negative("margin", self.margin)?;
        non_negative("arrow.head_length", self.arrow.head_length)?;
        non_negative("arrow.head_width", self.arrow.head_width)?;
        if !self.value_offset.is_finite() {
            return Err(Error::Invalid(format!(
                "value_offset must be finite, got {}",
                self.value_offset
            )));
        }

        let ArrowConfig { start, end, .. } = self.arrow;
        if !(0.0 <= start && start < end && end <= 1.0) {
            return Err(Error::Invalid(format!(
                "arrow span must satisfy 0 <= start < end <= 1, got {}..{}",
                start, end
            )));
        }
        Ok(())
    }

    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.figure_size.0 * self.dpi, self.figure_size.1 * self.dpi)
    }

    /// Convert a length in points to pixels
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Invalid(format!("{} must be finite and positive, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Invalid(format!("{} must be finite and not negative, got {}", name, value)))
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Parse `"14x10"` into `(14.0, 10.0)`
fn parse_size(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
