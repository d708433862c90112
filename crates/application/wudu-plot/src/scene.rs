//! Drawing surface.
//!
//! A chart draws into a [`Scene`]: an append-only display list of
//! primitives in plotting space. Backends walk the list in z-order.
//!
//! ```text
//! Grid < Line < Arrow < Annotation < Marker < MarkerText
//! ```
//!
//! Within one layer, later items draw over earlier ones.

use serde::{Deserialize, Serialize};
use wudu_core::Coord;

/// Stacking layer, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Grid,
    Line,
    Arrow,
    Annotation,
    Marker,
    MarkerText,
}

/// A drawable element. Sizes are in points, positions in plotting space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Coord,
        to: Coord,
        color: String,
        width: f64,
    },
    /// Open `->` head pointing from `tail` to `tip`
    ArrowHead {
        tail: Coord,
        tip: Coord,
        color: String,
        width: f64,
        head_length: f64,
        head_width: f64,
    },
    /// Filled circle; `size` is the area in square points
    Marker {
        at: Coord,
        color: String,
        size: f64,
    },
    /// Text centered on `at`
    Text {
        at: Coord,
        content: String,
        color: String,
        font_size: f64,
    },
}

impl Primitive {
    pub fn color(&self) -> &str {
        match self {
            Primitive::Line { color, .. }
            | Primitive::ArrowHead { color, .. }
            | Primitive::Marker { color, .. }
            | Primitive::Text { color, .. } => color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub layer: Layer,
    #[serde(flatten)]
    pub primitive: Primitive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    items: Vec<Item>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer, primitive: Primitive) {
        self.items.push(Item { layer, primitive });
    }

    /// Items in paint order: by layer, insertion order within a layer
    pub fn paint_order(&self) -> Vec<&Item> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.layer);
        ordered
    }

    /// Items on one layer, in insertion order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.primitive)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Primitive {
        Primitive::Text {
            at: Coord::new(0.0, 0.0),
            content: content.to_string(),
            color: "black".to_string(),
            font_size: 10.0,
        }
    }

    #[test]
    fn test_paint_order_is_stable_within_layer() {
        let mut scene = Scene::new();
        scene.push(Layer::MarkerText, text("a"));
        scene.push(Layer::Grid, text("b"));
        scene.push(Layer::MarkerText, text("c"));
        scene.push(Layer::Line, text("d"));

        let order: Vec<&str> = scene
            .paint_order()
            .into_iter()
            .map(|item| match &item.primitive {
                Primitive::Text { content, .. } => content.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(order, ["b", "d", "a", "c"]);
        assert_eq!(scene.layer(Layer::MarkerText).count(), 2);
    }

    #[test]
    fn test_json_keeps_coordinates_exact() {
        // Value annotation of "45": u = 1/√2 - 0.5
        let at = wudu_core::transform(4.0, 5.0).offset(-0.5, 0.0);
        let mut scene = Scene::new();
        scene.push(Layer::Annotation, text("45"));
        scene.push(
            Layer::Annotation,
            Primitive::Text {
                at,
                content: "45".to_string(),
                color: "#FDCD00".to_string(),
                font_size: 24.0,
            },
        );

        let json = serde_json::to_string_pretty(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_json_shape() {
        let mut scene = Scene::new();
        scene.push(
            Layer::Marker,
            Primitive::Marker {
                at: Coord::new(1.0, 2.0),
                color: "#FDCD00".to_string(),
                size: 4000.0,
            },
        );
        let json = serde_json::to_value(&scene).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["layer"], "marker");
        assert_eq!(item["kind"], "marker");
        assert_eq!(item["at"]["v"], 2.0);

        let back: Scene = serde_json::from_value(json).unwrap();
        assert_eq!(back, scene);
    }
}
