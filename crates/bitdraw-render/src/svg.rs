//! SVG output.
//!
//! [SvgSurface] collects elements as they are drawn and keeps a running
//! bounding box, so the finished document's `viewBox` fits the drawing
//! without the caller having to size it.

use std::path::Path;

use bitdraw::layout::{Point, Rect};
use tracing::{debug, info};

use crate::{
    errors::RenderError,
    surface::{
        Color, DEFAULT_FONT_SIZE, Dash, Font, HAlign, Paint, Surface, TextStyle, VAlign, text_extent,
    },
};

/// Output settings for [SvgSurface].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Pixels per diagram unit (centimetre).
    pub px_per_unit: f64,
    /// Blank border around the drawing, in diagram units.
    pub margin: f64,
    /// Base font size, in diagram units.
    pub font_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            px_per_unit: 40.0,
            margin: 0.2,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

/// A surface that builds an SVG document.
#[derive(Debug)]
pub struct SvgSurface {
    config: RenderConfig,
    elements: Vec<String>,
    bounds: Option<Bounds>,
    uses_arrows: bool,
}

impl Default for SvgSurface {
    fn default() -> Self {
        SvgSurface::new(RenderConfig::default())
    }
}

impl SvgSurface {
    pub fn new(config: RenderConfig) -> Self {
        SvgSurface {
            config,
            elements: Vec::new(),
            bounds: None,
            uses_arrows: false,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of drawn elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn include(&mut self, x: f64, y: f64) {
        let bounds = self.bounds.get_or_insert(Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        });
        bounds.min_x = bounds.min_x.min(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_x = bounds.max_x.max(x);
        bounds.max_y = bounds.max_y.max(y);
    }

    fn px_x(&self, x: f64) -> String {
        num(x * self.config.px_per_unit)
    }

    fn px_y(&self, y: f64) -> String {
        num(-y * self.config.px_per_unit)
    }

    fn px(&self, length: f64) -> String {
        num(length * self.config.px_per_unit)
    }

    fn paint_attrs(&mut self, paint: &Paint) -> String {
        let mut attrs = String::new();

        match paint.fill {
            Some(color) => attrs.push_str(&format!(" fill=\"{}\"", svg_color(color))),
            None => attrs.push_str(" fill=\"none\""),
        }

        if let Some(color) = paint.stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                svg_color(color),
                self.px(paint.line_width)
            ));
            match paint.dash {
                Dash::Solid => {}
                Dash::Dotted => attrs.push_str(&format!(
                    " stroke-dasharray=\"{} {}\" stroke-linecap=\"round\"",
                    num(0.0),
                    self.px(paint.line_width * 4.0)
                )),
                Dash::Dashed => attrs.push_str(&format!(
                    " stroke-dasharray=\"{} {}\"",
                    self.px(paint.line_width * 6.0),
                    self.px(paint.line_width * 4.0)
                )),
            }
        }

        if paint.arrow {
            self.uses_arrows = true;
            attrs.push_str(" marker-end=\"url(#arrow)\"");
        }

        attrs
    }

    /// Completes the document.
    pub fn finish(self) -> String {
        let scale = self.config.px_per_unit;
        let margin = self.config.margin;
        let bounds = self.bounds.unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        });

        // y is flipped, so the top of the drawing is -max_y.
        let x = (bounds.min_x - margin) * scale;
        let y = -(bounds.max_y + margin) * scale;
        let width = (bounds.max_x - bounds.min_x + 2.0 * margin) * scale;
        let height = (bounds.max_y - bounds.min_y + 2.0 * margin) * scale;

        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{x} {y} {w} {h}\">\n",
            x = num(x),
            y = num(y),
            w = num(width),
            h = num(height),
        ));

        if self.uses_arrows {
            out.push_str(concat!(
                "<defs>\n",
                "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" ",
                "markerWidth=\"5\" markerHeight=\"5\" orient=\"auto-start-reverse\">",
                "<path d=\"M 0 0 L 10 5 L 0 10 z\"/></marker>\n",
                "</defs>\n",
            ));
        }

        for element in &self.elements {
            out.push_str(element);
            out.push('\n');
        }

        out.push_str("</svg>\n");
        out
    }

    /// Completes the document and writes it to `path`.
    pub fn save(self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let elements = self.elements.len();
        let document = self.finish();

        std::fs::write(path, document).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), elements, "wrote svg");
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn rect(&mut self, rect: Rect, paint: &Paint) {
        self.include(rect.x, rect.y);
        self.include(rect.right(), rect.top());

        let attrs = self.paint_attrs(paint);
        let element = format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
            self.px_x(rect.x),
            self.px_y(rect.top()),
            self.px(rect.width),
            self.px(rect.height),
        );
        self.elements.push(element);
    }

    fn polyline(&mut self, points: &[Point], paint: &Paint) {
        if points.len() < 2 {
            debug!(points = points.len(), "skipping degenerate polyline");
            return;
        }

        for point in points {
            self.include(point.x, point.y);
        }

        let coords = points
            .iter()
            .map(|p| format!("{},{}", self.px_x(p.x), self.px_y(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let attrs = self.paint_attrs(paint);
        self.elements
            .push(format!("<polyline points=\"{coords}\"{attrs}/>"));
    }

    fn circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.include(center.x - radius, center.y - radius);
        self.include(center.x + radius, center.y + radius);

        let attrs = self.paint_attrs(paint);
        let element = format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}/>",
            self.px_x(center.x),
            self.px_y(center.y),
            self.px(radius),
        );
        self.elements.push(element);
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let size = self.config.font_size * style.scale;
        let extent = text_extent(at, text, style, self.config.font_size);
        self.include(extent.x, extent.y);
        self.include(extent.right(), extent.top());

        let anchor = match style.halign {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let baseline = match style.valign {
            VAlign::Baseline => "",
            VAlign::Middle => " dominant-baseline=\"central\"",
            VAlign::Top => " dominant-baseline=\"hanging\"",
        };
        let family = match style.font {
            Font::Sans => "sans-serif",
            Font::Mono => "monospace",
            Font::Serif => "serif",
        };
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };

        let element = format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{family}\" font-size=\"{}\"{weight} fill=\"{}\" text-anchor=\"{anchor}\"{baseline}>{}</text>",
            self.px_x(at.x),
            self.px_y(at.y),
            self.px(size),
            svg_color(style.color),
            escape(text),
        );
        self.elements.push(element);
    }

    fn font_size(&self) -> f64 {
        self.config.font_size
    }
}

fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn svg_color(color: Color) -> String {
    let (r, g, b) = color.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
