//! The drawing-surface trait and the paint/text styles shared by all surfaces.
//!
//! # Coordinate system
//!
//! Surfaces receive diagram units (centimetres) with the origin at the
//! lower left and `y` increasing upward, the same space the layout
//! functions of `bitdraw` compute in.

use bitdraw::layout::{Point, Rect};

/// Default stroke width.
pub const LINE_NORMAL: f64 = 0.02;
/// Thin stroke, used for leader lines.
pub const LINE_THIN: f64 = 0.014;
/// Thick stroke, used for list item boxes.
pub const LINE_THICK: f64 = 0.04;
/// Base font size of a surface, in diagram units.
pub const DEFAULT_FONT_SIZE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Grey level, 0.0 black to 1.0 white.
    Grey(f64),
    /// Red, green and blue in 0.0..=1.0.
    Rgb(f64, f64, f64),
}

impl Color {
    pub const BLACK: Color = Color::Grey(0.0);
    pub const WHITE: Color = Color::Grey(1.0);

    /// Components scaled to 0..=255.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        match *self {
            Color::Grey(g) => (scale(g), scale(g), scale(g)),
            Color::Rgb(r, g, b) => (scale(r), scale(g), scale(b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

/// How a shape is stroked and filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub line_width: f64,
    pub dash: Dash,
    /// Draw an arrowhead at the end of open paths.
    pub arrow: bool,
}

impl Default for Paint {
    fn default() -> Self {
        Paint::stroke()
    }
}

impl Paint {
    /// Black outline of normal width.
    pub fn stroke() -> Self {
        Paint {
            stroke: Some(Color::BLACK),
            fill: None,
            line_width: LINE_NORMAL,
            dash: Dash::Solid,
            arrow: false,
        }
    }

    /// Filled shape without an outline.
    pub fn fill(color: Color) -> Self {
        Paint {
            stroke: None,
            fill: Some(color),
            ..Paint::stroke()
        }
    }

    /// Filled shape outlined in the same colour.
    pub fn solid(color: Color) -> Self {
        Paint {
            stroke: Some(color),
            fill: Some(color),
            ..Paint::stroke()
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_dash(mut self, dash: Dash) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_arrow(mut self) -> Self {
        self.arrow = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which part of the text sits on the anchor's `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Baseline,
    Middle,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Sans,
    Mono,
    Serif,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub halign: HAlign,
    pub valign: VAlign,
    pub font: Font,
    pub bold: bool,
    /// Scale relative to the surface's base font size.
    pub scale: f64,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            halign: HAlign::Left,
            valign: VAlign::Baseline,
            font: Font::Sans,
            bold: false,
            scale: 1.0,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    pub fn centered() -> Self {
        TextStyle {
            halign: HAlign::Center,
            ..Default::default()
        }
    }

    pub fn mono() -> Self {
        TextStyle {
            font: Font::Mono,
            ..Default::default()
        }
    }

    pub fn align(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}

/// Rough extent of `text` drawn at `at` with a base font size of
/// `font_size`; glyph metrics are up to the viewer.
pub fn text_extent(at: Point, text: &str, style: &TextStyle, font_size: f64) -> Rect {
    let size = font_size * style.scale;
    let width = text.chars().count() as f64 * size * 0.6;
    let left = match style.halign {
        HAlign::Left => at.x,
        HAlign::Center => at.x - width / 2.0,
        HAlign::Right => at.x - width,
    };
    let bottom = match style.valign {
        VAlign::Baseline => at.y - 0.25 * size,
        VAlign::Middle => at.y - 0.5 * size,
        VAlign::Top => at.y - size,
    };
    Rect::new(left, bottom, width, size)
}

/// A target that diagrams can be painted on (SVG document, test recorder, ...).
pub trait Surface {
    /// Stroke and/or fill a rectangle.
    fn rect(&mut self, rect: Rect, paint: &Paint);

    /// Draw an open path through `points`.
    fn polyline(&mut self, points: &[Point], paint: &Paint);

    /// Draw a straight line; with `paint.arrow` set the head is at `to`.
    fn line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.polyline(&[from, to], paint);
    }

    fn circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Draw `text` anchored at `at`.
    fn text(&mut self, at: Point, text: &str, style: &TextStyle);

    /// Font size that a `TextStyle::scale` of 1.0 stands for.
    fn font_size(&self) -> f64 {
        DEFAULT_FONT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(Color::Grey(0.5).to_rgb8(), (128, 128, 128));
        assert_eq!(Color::Rgb(0.0, 0.5, 0.8).to_rgb8(), (0, 128, 204));
        assert_eq!(Color::Grey(1.5).to_rgb8(), (255, 255, 255));
    }

    #[test]
    fn test_paint_builders() {
        let paint = Paint::stroke().with_dash(Dash::Dotted).with_arrow();
        assert_eq!(paint.stroke, Some(Color::BLACK));
        assert_eq!(paint.dash, Dash::Dotted);
        assert!(paint.arrow);
        assert_eq!(Paint::fill(Color::WHITE).stroke, None);
    }

    #[test]
    fn test_text_extent_follows_alignment() {
        let style = TextStyle::centered().align(HAlign::Center, VAlign::Middle);
        let extent = text_extent(Point::new(1.0, 1.0), "abcd", &style, 0.5);
        assert!((extent.width - 1.2).abs() < 1e-9);
        assert!((extent.x - 0.4).abs() < 1e-9);
        assert!((extent.y - 0.75).abs() < 1e-9);
        assert!((extent.height - 0.5).abs() < 1e-9);

        let baseline = text_extent(Point::new(0.0, 0.0), "ab", &TextStyle::default(), 0.4);
        assert!((baseline.y + 0.1).abs() < 1e-9);
        assert!(baseline.x.abs() < 1e-9);
    }
}
