//! Diagram description files.
//!
//! ```yaml
//! title: 重庆
//! paths:
//!   - text: 阴
//!     values: ["44", "55", "45"]
//!     color: 阴平
//!   - text: 阳
//!     values: ["11", "21", "31"]
//! ```
//!
//! Paths render in file order. A missing `color` takes the next palette
//! entry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wudu_config::PlotConfig;

use crate::chart::ToneChart;
use crate::{Error, Result};

/// One labeled path of tonal values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    pub text: String,
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PathSpec {
    pub fn new(text: &str, values: &[&str], color: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            color: color.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub paths: Vec<PathSpec>,
}

impl Diagram {
    /// Chongqing Mandarin tones, one path per category
    pub fn chongqing() -> Self {
        Self {
            title: Some("重庆".to_string()),
            paths: vec![
                PathSpec::new("阴", &["44", "55", "45"], Some("阴平")),
                PathSpec::new("阳", &["11", "21", "31"], Some("阳平")),
                PathSpec::new("上", &["552", "441", "341"], Some("阴上")),
                PathSpec::new("去", &["24", "13", "213"], Some("阴去")),
            ],
        }
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let diagram = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&data)?,
            Some("json") => Self::from_json_str(&data)?,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };
        tracing::debug!(paths = diagram.paths.len(), "Loaded diagram from {}", path.display());
        Ok(diagram)
    }

    pub fn from_yaml_str(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Draw every path onto `chart`, stopping at the first invalid one
    pub fn apply(&self, chart: &mut ToneChart) -> Result<()> {
        if let Some(title) = &self.title {
            chart.set_title(title.clone());
        }
        for spec in &self.paths {
            chart.create_path(&spec.text, spec.values.as_slice(), spec.color.as_deref())?;
        }
        Ok(())
    }

    /// Fresh chart with this diagram drawn on it
    pub fn render(&self, config: PlotConfig) -> Result<ToneChart> {
        let mut chart = ToneChart::new(config)?;
        self.apply(&mut chart)?;
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Layer, Primitive};

    #[test]
    fn test_chongqing_sample() {
        let chart = Diagram::chongqing().render(PlotConfig::default()).unwrap();
        let scene = chart.scene();
        assert_eq!(scene.layer(Layer::Marker).count(), 12);
        assert_eq!(scene.layer(Layer::Line).count(), 8);
        assert_eq!(scene.layer(Layer::Arrow).count(), 8);
        assert_eq!(scene.layer(Layer::Annotation).count(), 12);
        assert_eq!(chart.title(), Some("重庆"));

        let colors: Vec<&str> = scene.layer(Layer::Marker).map(Primitive::color).collect();
        assert_eq!(&colors[..3], &["#FDCD00"; 3]);
        assert_eq!(colors[3], "#A46F24");
        assert_eq!(colors[6], "#91D285");
        assert_eq!(colors[9], "#0190E4");
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml = r#"
title: test
paths:
  - text: 阴
    values: ["44", "55"]
    color: 金
  - text: 阳
    values: ["11"]
"#;
        let json = r#"{
            "title": "test",
            "paths": [
                {"text": "阴", "values": ["44", "55"], "color": "金"},
                {"text": "阳", "values": ["11"]}
            ]
        }"#;
        let a = Diagram::from_yaml_str(yaml).unwrap();
        let b = Diagram::from_json_str(json).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.paths[1].color, None);
    }

    #[test]
    fn test_invalid_path_reports_value() {
        let diagram = Diagram {
            title: None,
            paths: vec![PathSpec::new("x", &["44", "4"], None)],
        };
        let err = diagram.render(PlotConfig::default()).unwrap_err();
        assert!(err.to_string().contains("\"4\""));
    }

    #[test]
    fn test_demo_file_matches_builtin_sample() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../demos/chongqing.yaml");
        assert_eq!(Diagram::load(path).unwrap(), Diagram::chongqing());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chongqing.json");
        std::fs::write(&path, serde_json::to_string(&Diagram::chongqing()).unwrap()).unwrap();
        assert_eq!(Diagram::load(&path).unwrap(), Diagram::chongqing());

        let txt = dir.path().join("chongqing.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(matches!(Diagram::load(&txt), Err(Error::UnsupportedFormat(_))));
    }
}
