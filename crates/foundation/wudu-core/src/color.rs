//! Tone colors.
//!
//! Eight color names, eight tone categories and eight hex values, index
//! aligned: 阴平 ↔ 金 ↔ `#FDCD00`, 阳平 ↔ 茶 ↔ `#A46F24`, and so on.

use crate::{Error, Result};

/// Color category names
pub const COLOR_NAMES: [&str; 8] = ["金", "茶", "草", "柳", "蔚", "靛", "雪", "墨"];

/// Tone category names, yin/yang pairs of 平 上 去 入
pub const TONAL_NAMES: [&str; 8] = [
    "阴平", "阳平", "阴上", "阳上", "阴去", "阳去", "阴入", "阳入",
];

/// Hex value for each color/tone index
pub const PALETTE: [&str; 8] = [
    "#FDCD00", "#A46F24", "#91D285", "#70916F", "#0190E4", "#3750A5", "#B4C3D9", "#69666F",
];

/// Palette entry for a tone category or color name
pub fn named(name: &str) -> Option<&'static str> {
    TONAL_NAMES
        .iter()
        .position(|n| *n == name)
        .or_else(|| COLOR_NAMES.iter().position(|n| *n == name))
        .map(|i| PALETTE[i])
}

/// Picks a color for each path.
///
/// Holds the round-robin cursor used when no color is requested, so two
/// resolvers never share a cycle.
#[derive(Debug, Clone, Default)]
pub struct ColorResolver {
    next: usize,
}

impl ColorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a requested color.
    ///
    /// `None` takes the next palette entry. Tone and color names map to
    /// their palette entry. Anything else is returned unchanged and only
    /// checked when the chart is exported.
    pub fn resolve(&mut self, color: Option<&str>) -> String {
        let resolved = match color {
            None => {
                let hex = PALETTE[self.next];
                self.next = (self.next + 1) % PALETTE.len();
                hex.to_string()
            }
            Some(name) => named(name).unwrap_or(name).to_string(),
        };
        tracing::trace!(requested = ?color, %resolved, "resolved color");
        resolved
    }

    /// Index of the palette entry the next `resolve(None)` returns
    pub fn position(&self) -> usize {
        self.next
    }
}

/// CSS color keywords understood by SVG renderers
const CSS_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// Single-letter shorthands for the base colors
const SHORTHANDS: [(&str, &str); 8] = [
    ("r", "red"),
    ("g", "green"),
    ("b", "blue"),
    ("c", "cyan"),
    ("m", "magenta"),
    ("y", "yellow"),
    ("k", "black"),
    ("w", "white"),
];

/// Convert a literal color specification to an SVG paint value.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, CSS keywords (any
/// case) and the single-letter base colors.
pub fn to_svg_paint(spec: &str) -> Result<String> {
    let trimmed = spec.trim();

    if let Some(hex) = trimmed.strip_prefix('#') {
        let valid_len = matches!(hex.len(), 3 | 4 | 6 | 8);
        if valid_len && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(trimmed.to_string());
        }
        return Err(Error::InvalidColor(spec.to_string()));
    }

    if let Some((_, full)) = SHORTHANDS.iter().find(|(short, _)| *short == trimmed) {
        return Ok((*full).to_string());
    }

    let lower = trimmed.to_ascii_lowercase();
    if CSS_NAMES.contains(&lower.as_str()) {
        return Ok(lower);
    }

    Err(Error::InvalidColor(spec.to_string()))
}
