//! Tone chart: the grid plus paths of tonal values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use wudu_config::PlotConfig;
use wudu_core::{transform, ColorResolver, Coord, TonalValue};

use crate::scene::{Layer, Primitive, Scene};
use crate::{Error, Result};

/// Coordinate space of primitive inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Five-level grid coordinates, transformed before drawing
    Grid,
    /// Already in plotting space
    Plot,
}

impl Space {
    fn place(self, x: f64, y: f64) -> Coord {
        match self {
            Space::Grid => transform(x, y),
            Space::Plot => (x, y).into(),
        }
    }
}

/// Output format for [`ToneChart::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    /// The raw scene display list
    Json,
}

impl Format {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(Format::Svg),
            Some("json") => Ok(Format::Json),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A five-level tone diagram.
///
/// The grid is drawn on construction. Each [`create_path`](Self::create_path)
/// adds markers, connectors and annotations on top.
#[derive(Debug, Clone)]
pub struct ToneChart {
    config: PlotConfig,
    scene: Scene,
    colors: ColorResolver,
    title: Option<String>,
}

impl ToneChart {
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        let mut chart = Self {
            config,
            scene: Scene::new(),
            colors: ColorResolver::new(),
            title: None,
        };
        chart.draw_grid();
        Ok(chart)
    }

    /// 5 lines each way at grid levels 1..=5
    fn draw_grid(&mut self) {
        for i in 1..=5 {
            let i = i as f64;
            for (p1, p2) in [((1.0, i), (5.0, i)), ((i, 1.0), (i, 5.0))] {
                self.scene.push(
                    Layer::Grid,
                    Primitive::Line {
                        from: transform(p1.0, p1.1),
                        to: transform(p2.0, p2.1),
                        color: self.config.grid_color.clone(),
                        width: self.config.grid_width,
                    },
                );
            }
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Title embedded in exported documents
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Place a filled marker with `label` centered on it
    pub fn create_point(&mut self, x: f64, y: f64, label: &str, color: &str, space: Space) {
        let at = space.place(x, y);
        self.scene.push(
            Layer::Marker,
            Primitive::Marker {
                at,
                color: color.to_string(),
                size: self.config.marker_size,
            },
        );
        self.scene.push(
            Layer::MarkerText,
            Primitive::Text {
                at,
                content: label.to_string(),
                color: self.config.label_color.clone(),
                font_size: self.config.label_font_size,
            },
        );
    }

    /// Connect `p1` to `p2` with a line and a mid-segment arrowhead.
    ///
    /// The head sits part way along the segment so it stays clear of the
    /// destination marker.
    pub fn create_arrow_line(
        &mut self,
        p1: (f64, f64),
        p2: (f64, f64),
        color: &str,
        width: f64,
        space: Space,
    ) {
        let from = space.place(p1.0, p1.1);
        let to = space.place(p2.0, p2.1);
        let arrow = &self.config.arrow;

        self.scene.push(
            Layer::Arrow,
            Primitive::ArrowHead {
                tail: from.lerp(to, arrow.start),
                tip: from.lerp(to, arrow.end),
                color: color.to_string(),
                width,
                head_length: arrow.head_length,
                head_width: arrow.head_width,
            },
        );
        self.scene.push(
            Layer::Line,
            Primitive::Line {
                from,
                to,
                color: color.to_string(),
                width,
            },
        );
    }

    /// Draw a path of tonal values labeled `text`.
    ///
    /// `color` may be a tone category (阴平…), a color name (金…), any
    /// literal color, or `None` for the next palette color. Every value is
    /// validated before anything is drawn.
    pub fn create_path<S: AsRef<str>>(
        &mut self,
        text: &str,
        path: &[S],
        color: Option<&str>,
    ) -> Result<()> {
        let values = path
            .iter()
            .map(|v| TonalValue::parse(v.as_ref()))
            .collect::<wudu_core::Result<Vec<_>>>()?;

        let color = self.colors.resolve(color);
        tracing::debug!(text, %color, values = values.len(), "drawing path");

        let mut previous: Option<Coord> = None;
        for value in &values {
            let at = value.coord();
            self.create_point(at.u, at.v, text, &color, Space::Plot);

            if let Some(from) = previous {
                self.create_arrow_line(
                    (from.u, from.v),
                    (at.u, at.v),
                    &color,
                    self.config.line_width,
                    Space::Plot,
                );
            }

            self.scene.push(
                Layer::Annotation,
                Primitive::Text {
                    at: at.offset(self.config.value_offset, 0.0),
                    content: value.to_string(),
                    color: color.clone(),
                    font_size: self.config.value_font_size,
                },
            );
            previous = Some(at);
        }
        Ok(())
    }

    /// Render to an SVG document. Fails on unrecognized literal colors.
    pub fn to_svg(&self) -> Result<svg::Document> {
        crate::render::to_document(&self.scene, &self.config, self.title.as_deref())
    }

    /// Write the chart to `path`; the extension selects the format
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match Format::from_path(path)? {
            Format::Svg => {
                let document = self.to_svg()?;
                svg::save(path, &document)?;
            }
            Format::Json => {
                let mut writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(&mut writer, &self.scene)?;
                writer.flush()?;
            }
        }
        tracing::info!("Wrote {} items to {}", self.scene.len(), path.display());
        Ok(())
    }
}
