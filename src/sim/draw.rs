//! The drawing surface the engines paint onto.
//!
//! Engines only ever call into a [`Renderer`]; they never read anything
//! back. All coordinates are logical canvas units with the origin at the
//! top-left corner and y growing downwards.

use serde::Deserialize;

use crate::sim::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parses `#RRGGBB`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    /// Stand-in for canvas alpha: fades the colour into `background`.
    pub fn with_alpha(self, alpha: f64, background: Rgb) -> Rgb {
        background.mix(self, alpha)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("expected a #RRGGBB colour, got {value:?}"))
    }
}

pub trait Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb);
    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, filled: bool);
    fn path(&mut self, points: &[(f64, f64)], color: Rgb, closed: bool);
    /// Text centred on `(x, y)`.
    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgb);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb },
    Circle { x: f64, y: f64, radius: f64, color: Rgb, filled: bool },
    Path { points: Vec<(f64, f64)>, color: Rgb, closed: bool },
    Text { x: f64, y: f64, text: String, color: Rgb },
}

/// Records draw calls so a frame can be painted later, or inspected in tests.
#[derive(Debug, Default)]
pub struct DrawList {
    shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.shapes.push(Shape::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        self.shapes.push(Shape::StrokeRect { rect, color });
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, filled: bool) {
        self.shapes.push(Shape::Circle { x, y, radius, color, filled });
    }

    fn path(&mut self, points: &[(f64, f64)], color: Rgb, closed: bool) {
        self.shapes.push(Shape::Path {
            points: points.to_vec(),
            color,
            closed,
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, color: Rgb) {
        self.shapes.push(Shape::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#FF6600"), Some(Rgb(255, 102, 0)));
        assert_eq!(Rgb::from_hex("#ff6600"), Some(Rgb(255, 102, 0)));
        assert_eq!(Rgb::from_hex("FF6600"), None);
        assert_eq!(Rgb::from_hex("#FF66"), None);
        assert_eq!(Rgb::from_hex("#GG6600"), None);
    }

    #[test]
    fn alpha_fades_into_background() {
        let c = Rgb(200, 100, 0);
        assert_eq!(c.with_alpha(1.0, Rgb::BLACK), c);
        assert_eq!(c.with_alpha(0.0, Rgb::BLACK), Rgb::BLACK);
        assert_eq!(c.with_alpha(0.5, Rgb::BLACK), Rgb(100, 50, 0));
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgb::WHITE);
        list.text(5.0, 5.0, "PAUSED", Rgb::WHITE);
        list.path(&[(0.0, 0.0), (1.0, 1.0)], Rgb::BLACK, false);

        assert_eq!(list.shapes().len(), 3);
        assert!(matches!(list.shapes()[0], Shape::FillRect { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["PAUSED"]);

        list.clear();
        assert!(list.shapes().is_empty());
    }
}
