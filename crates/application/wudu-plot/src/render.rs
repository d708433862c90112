//! SVG rendering of a scene.
//!
//! Plotting space is mapped onto the figure so the grid diamond fills the
//! canvas with `margin` plotting units of padding on every side. Point
//! sizes scale with `dpi / 72`.

use svg::node::element::{Circle, Group, Line, Polyline, Rectangle, Text, Title};
use svg::Document;
use wudu_config::PlotConfig;
use wudu_core::color::to_svg_paint;
use wudu_core::{Coord, SQRT_2};

use crate::scene::{Layer, Primitive, Scene};
use crate::Result;

/// Plotting space → pixel mapping
#[derive(Debug, Clone, Copy)]
struct Viewport {
    width: f64,
    height: f64,
    u_min: f64,
    v_max: f64,
    sx: f64,
    sy: f64,
    px_per_pt: f64,
}

impl Viewport {
    fn new(config: &PlotConfig) -> Self {
        let (width, height) = config.pixel_size();
        let m = config.margin;
        // Grid corners: (1,5) and (5,1) horizontally, (1,1) and (5,5) vertically
        let half = 2.0 * SQRT_2;
        let (u_min, u_max) = (-half - m, half + m);
        let (v_min, v_max) = (SQRT_2 - m, 5.0 * SQRT_2 + m);
        Self {
            width,
            height,
            u_min,
            v_max,
            sx: width / (u_max - u_min),
            sy: height / (v_max - v_min),
            px_per_pt: config.points_to_pixels(1.0),
        }
    }

    fn px(&self, c: Coord) -> (f64, f64) {
        ((c.u - self.u_min) * self.sx, (self.v_max - c.v) * self.sy)
    }

    fn pt(&self, points: f64) -> f64 {
        points * self.px_per_pt
    }
}

fn num(x: f64) -> String {
    format!("{:.2}", x)
}

/// Build an SVG document for `scene`.
///
/// Colors are checked here; an unrecognized literal fails the whole render.
pub fn to_document(scene: &Scene, config: &PlotConfig, title: Option<&str>) -> Result<Document> {
    let view = Viewport::new(config);

    let mut document = Document::new()
        .set("width", num(view.width))
        .set("height", num(view.height))
        .set("viewBox", format!("0 0 {} {}", num(view.width), num(view.height)))
        .set("font-family", config.font_family.clone());

    if let Some(title) = title {
        document = document.add(Title::new(title));
    }

    if let Some(background) = &config.background {
        document = document.add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", to_svg_paint(background)?),
        );
    }

    let mut current: Option<(Layer, Group)> = None;
    for item in scene.paint_order() {
        let (layer, group) = match current.take() {
            Some((layer, group)) if layer == item.layer => (layer, group),
            Some((_, finished)) => {
                document = document.add(finished);
                (item.layer, layer_group(item.layer))
            }
            None => (item.layer, layer_group(item.layer)),
        };
        let group = draw(group, &item.primitive, &view)?;
        current = Some((layer, group));
    }
    if let Some((_, finished)) = current {
        document = document.add(finished);
    }

    tracing::debug!(items = scene.len(), "rendered svg document");
    Ok(document)
}

fn layer_group(layer: Layer) -> Group {
    let class = match layer {
        Layer::Grid => "grid",
        Layer::Line => "lines",
        Layer::Arrow => "arrows",
        Layer::Annotation => "values",
        Layer::Marker => "markers",
        Layer::MarkerText => "labels",
    };
    Group::new().set("class", class)
}

fn draw(group: Group, primitive: &Primitive, view: &Viewport) -> Result<Group> {
    let paint = to_svg_paint(primitive.color())?;

    let group = match primitive {
        Primitive::Line { from, to, width, .. } => {
            let (x1, y1) = view.px(*from);
            let (x2, y2) = view.px(*to);
            group.add(
                Line::new()
                    .set("x1", num(x1))
                    .set("y1", num(y1))
                    .set("x2", num(x2))
                    .set("y2", num(y2))
                    .set("stroke", paint)
                    .set("stroke-width", num(view.pt(*width)))
                    .set("stroke-linecap", "round"),
            )
        }
        Primitive::ArrowHead {
            tail,
            tip,
            width,
            head_length,
            head_width,
            ..
        } => {
            let (tx, ty) = view.px(*tail);
            let (hx, hy) = view.px(*tip);
            let (dx, dy) = (hx - tx, hy - ty);
            let len = dx.hypot(dy);
            if len < f64::EPSILON {
                // Zero-length segment has no direction to point in
                return Ok(group);
            }
            let (ux, uy) = (dx / len, dy / len);
            let back = view.pt(*head_length);
            let half = view.pt(*head_width) / 2.0;
            let (bx, by) = (hx - ux * back, hy - uy * back);
            let points = format!(
                "{},{} {},{} {},{}",
                num(bx - uy * half),
                num(by + ux * half),
                num(hx),
                num(hy),
                num(bx + uy * half),
                num(by - ux * half),
            );
            group.add(
                Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", paint)
                    .set("stroke-width", num(view.pt(*width)))
                    .set("stroke-linecap", "round")
                    .set("stroke-linejoin", "round"),
            )
        }
        Primitive::Marker { at, size, .. } => {
            let (cx, cy) = view.px(*at);
            group.add(
                Circle::new()
                    .set("cx", num(cx))
                    .set("cy", num(cy))
                    .set("r", num(view.pt(size.sqrt() / 2.0)))
                    .set("fill", paint),
            )
        }
        Primitive::Text {
            at,
            content,
            font_size,
            ..
        } => {
            let (x, y) = view.px(*at);
            group.add(
                Text::new(content.as_str())
                    .set("x", num(x))
                    .set("y", num(y))
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-size", num(view.pt(*font_size)))
                    .set("fill", paint),
            )
        }
    };
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wudu_core::transform;

    #[test]
    fn test_viewport_centers_grid() {
        let config = PlotConfig::default();
        let view = Viewport::new(&config);

        // Grid center (3,3) lands at the canvas center on a square figure
        let (x, y) = view.px(transform(3.0, 3.0));
        assert!((x - 700.0).abs() < 1e-9);
        assert!((y - 700.0).abs() < 1e-9);

        // "55" is above "11"
        let (_, top) = view.px(transform(5.0, 5.0));
        let (_, bottom) = view.px(transform(1.0, 1.0));
        assert!(top < bottom);

        // Rising contours sit right of falling ones
        let (right, _) = view.px(transform(1.0, 5.0));
        let (left, _) = view.px(transform(5.0, 1.0));
        assert!(left < right);
    }

    #[test]
    fn test_point_sizes_follow_dpi() {
        let config = PlotConfig {
            dpi: 144.0,
            ..Default::default()
        };
        let view = Viewport::new(&config);
        assert_eq!(view.pt(10.0), 20.0);
    }

    #[test]
    fn test_layers_grouped_in_order() {
        let mut scene = Scene::new();
        let text = |content: &str| Primitive::Text {
            at: Coord::new(0.0, 3.0),
            content: content.to_string(),
            color: "white".to_string(),
            font_size: 32.0,
        };
        scene.push(Layer::MarkerText, text("上"));
        scene.push(
            Layer::Marker,
            Primitive::Marker {
                at: Coord::new(0.0, 3.0),
                color: "#91D285".to_string(),
                size: 4000.0,
            },
        );

        let config = PlotConfig::default();
        let svg = to_document(&scene, &config, Some("重庆")).unwrap().to_string();
        let markers = svg.find(r#"class="markers""#).unwrap();
        let labels = svg.find(r#"class="labels""#).unwrap();
        assert!(markers < labels);
        assert!(svg.contains("<title>"));
        assert!(svg.contains("重庆"));
        assert!(svg.contains("SimHei"));
    }

    #[test]
    fn test_invalid_background_rejected() {
        let config = PlotConfig {
            background: Some("#12".to_string()),
            ..Default::default()
        };
        assert!(to_document(&Scene::new(), &config, None).is_err());

        let config = PlotConfig {
            background: None,
            ..Default::default()
        };
        let svg = to_document(&Scene::new(), &config, None).unwrap().to_string();
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_degenerate_arrowhead_skipped() {
        let mut scene = Scene::new();
        scene.push(
            Layer::Arrow,
            Primitive::ArrowHead {
                tail: Coord::new(1.0, 1.0),
                tip: Coord::new(1.0, 1.0),
                color: "red".to_string(),
                width: 4.0,
                head_length: 20.0,
                head_width: 12.0,
            },
        );
        let svg = to_document(&scene, &PlotConfig::default(), None)
            .unwrap()
            .to_string();
        assert!(!svg.contains("<polyline"));
    }
}
