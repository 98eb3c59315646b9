use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::geometry::Orientation;
use crate::geometry::primitives::Rect;

/// Missing fields fall back to [`SvgDrawOptions::default`]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
#[serde(default)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    pub theme: SvgLayoutTheme,
    ///Draw the committed horizontal cuts of the cut log across the container
    pub cut_log: bool,
    ///Draw the guillotine cut tree, each cut spanning only its region
    pub cut_tree: bool,
    ///Label every rectangle with its id
    pub labels: bool,
    ///Draw the layout produced by the oracle instead of the consolidated one
    pub original_layout: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            cut_log: true,
            cut_tree: true,
            labels: true,
            original_layout: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f32,
    pub container_fill: Color,
    pub item_fill: Color,
    pub rotated_item_fill: Color,
    pub cut_log_color: Color,
    pub cut_tree_color: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        container_fill: Color(0xCC, 0x82, 0x4A),
        item_fill: Color(0xFF, 0xC8, 0x79),
        rotated_item_fill: Color(0xFF, 0xA5, 0x00), // LIGHT ORANGE
        cut_log_color: Color(0xFF, 0x00, 0x00),     // RED
        cut_tree_color: Color(0x00, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        container_fill: Color(0xD3, 0xD3, 0xD3),
        item_fill: Color(0x7A, 0x7A, 0x7A),
        rotated_item_fill: Color(0x63, 0x63, 0x63), //GRAY
        cut_log_color: Color(0xD0, 0x00, 0x00),
        cut_tree_color: Color(0xFF, 0xFF, 0xFF),
    };
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u8, u8, u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color: {s}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid color {s}: {e}"))
        };
        Ok(Color(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn aa_rect_data(rect: Rect) -> Data {
    let (x_min, y_min) = (rect.x_min as f32, rect.y_min as f32);
    let (x_max, y_max) = (rect.x_max as f32, rect.y_max as f32);
    Data::new()
        .move_to((x_min, y_min))
        .line_to((x_max, y_min))
        .line_to((x_max, y_max))
        .line_to((x_min, y_max))
        .close()
}

/// Segment of a cut at `position` spanning `region`
pub fn cut_data(orientation: Orientation, position: u32, region: Rect) -> Data {
    let p = position as f32;
    match orientation {
        Orientation::Horizontal => Data::new()
            .move_to((region.x_min as f32, p))
            .line_to((region.x_max as f32, p)),
        Orientation::Vertical => Data::new()
            .move_to((p, region.y_min as f32))
            .line_to((p, region.y_max as f32)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_roundtrips_through_hex() {
        let c: Color = "#cc824a".parse().unwrap();
        assert_eq!(c, Color(0xCC, 0x82, 0x4A));
        assert_eq!(c.to_string(), "#CC824A");
        assert!("#12345".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SvgDrawOptions = serde_json::from_str(r#"{"labels": false}"#).unwrap();
        assert_eq!(options.theme, SvgLayoutTheme::EARTH_TONES);
        assert!(options.cut_log);
        assert!(options.cut_tree);
        assert!(!options.labels);
        assert!(!options.original_layout);

        let empty: SvgDrawOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SvgDrawOptions::default());
    }
}
