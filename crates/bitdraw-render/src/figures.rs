//! The built-in lecture figures.
//!
//! Each [Figure] draws one complete illustration onto a [Surface]. The
//! bit-field figures are thin wrappers around `bitdraw::presets`; the IEEE
//! 754 and list figures lay out their boxes with
//! [`layout_partition`](bitdraw::layout::layout_partition).

use std::{fmt, str::FromStr};

use bitdraw::{
    glyph::Placement,
    layout::{FieldBox, PartitionOptions, Point, Rect, layout_partition},
    presets::{self, Ieee754Format},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    curve::{Curve, CurveOptions, paint_series},
    errors::RenderError,
    paint::paint_diagram,
    surface::{
        Color, Dash, HAlign, LINE_THICK, LINE_THIN, Paint, Surface, TextStyle, VAlign, text_extent,
    },
};

/// Value shown in the two's-complement figure.
pub const BINARY_EXAMPLE: u32 = 0x6CD8932F;
/// Code point of the 2-byte UTF-8 figure (é).
pub const UTF8_TWO_BYTE_EXAMPLE: u32 = 0x00E9;
/// Code point of the 3-byte UTF-8 figure (∞).
pub const UTF8_THREE_BYTE_EXAMPLE: u32 = 0x221E;
/// Seed of the random-walk figure, so repeated runs draw the same walks.
pub const RANDOM_WALK_SEED: u64 = 0x5EED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    /// A 32-bit value and its two's-complement negation.
    Binary,
    Utf8TwoByte,
    Utf8ThreeByte,
    Ieee754Double,
    Ieee754Single,
    /// Slicing a list at index 5.
    ListSlices,
    /// Positive and negative list indices.
    ListIndices,
    /// "3.x" badge marking Python 3 material.
    SymbolPython3,
    /// "?" badge marking questions.
    SymbolQuestion,
    /// Three random walks of 10000 steps.
    RandomWalk,
}

impl Figure {
    pub const ALL: [Figure; 10] = [
        Figure::Binary,
        Figure::Utf8TwoByte,
        Figure::Utf8ThreeByte,
        Figure::Ieee754Double,
        Figure::Ieee754Single,
        Figure::ListSlices,
        Figure::ListIndices,
        Figure::SymbolPython3,
        Figure::SymbolQuestion,
        Figure::RandomWalk,
    ];

    /// Name used on the command line and as the output file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Figure::Binary => "binary",
            Figure::Utf8TwoByte => "utf8-2",
            Figure::Utf8ThreeByte => "utf8-3",
            Figure::Ieee754Double => "ieee754-64",
            Figure::Ieee754Single => "ieee754-32",
            Figure::ListSlices => "list-slices",
            Figure::ListIndices => "list-indices",
            Figure::SymbolPython3 => "symbol-python3",
            Figure::SymbolQuestion => "symbol-question",
            Figure::RandomWalk => "randomwalk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Figure::Binary => "0x6CD8932F and its two's-complement negation",
            Figure::Utf8TwoByte => "U+00E9 packed into two UTF-8 bytes",
            Figure::Utf8ThreeByte => "U+221E packed into three UTF-8 bytes",
            Figure::Ieee754Double => "sign, exponent and mantissa of a binary64 float",
            Figure::Ieee754Single => "sign, exponent and mantissa of a binary32 float",
            Figure::ListSlices => "the slices a[0:5] and a[5:8] of an 8-item list",
            Figure::ListIndices => "positive and negative indices of a list",
            Figure::SymbolPython3 => "blue \"3.x\" badge for Python 3 material",
            Figure::SymbolQuestion => "orange \"?\" badge for questions",
            Figure::RandomWalk => "three random walks of 10000 steps of length 0.1",
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), RenderError> {
        debug!(figure = self.name(), "drawing figure");

        match self {
            Figure::Binary => {
                paint_diagram(surface, &presets::twos_complement(BINARY_EXAMPLE)?.layout())
            }
            Figure::Utf8TwoByte => {
                paint_diagram(surface, &presets::utf8_two_byte(UTF8_TWO_BYTE_EXAMPLE)?.layout())
            }
            Figure::Utf8ThreeByte => paint_diagram(
                surface,
                &presets::utf8_three_byte(UTF8_THREE_BYTE_EXAMPLE)?.layout(),
            ),
            Figure::Ieee754Double => draw_ieee754(surface, Ieee754Format::Binary64),
            Figure::Ieee754Single => draw_ieee754(surface, Ieee754Format::Binary32),
            Figure::ListSlices => draw_list_slices(surface, 8, &[5]),
            Figure::ListIndices => draw_list_indices(surface, 3),
            Figure::SymbolPython3 => draw_badge(surface, "3.x", Color::Rgb(0.0, 0.5, 0.8)),
            Figure::SymbolQuestion => draw_badge(surface, "?", Color::Rgb(0.8, 0.5, 0.0)),
            Figure::RandomWalk => {
                let mut rng = StdRng::seed_from_u64(RANDOM_WALK_SEED);
                draw_random_walks(surface, &mut rng, 3, 10_000)?
            }
        }

        Ok(())
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Figure {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Figure::ALL
            .into_iter()
            .find(|figure| figure.name() == s)
            .ok_or_else(|| RenderError::UnknownFigure(s.to_string()))
    }
}

/// Box size of the IEEE 754 figure.
const IEEE_BOX: f64 = 0.8;
/// Captions under the sign, exponent and mantissa boxes, with the depth of
/// their leader lines.
const IEEE_CAPTIONS: [(&str, f64); 3] = [("Vorzeichen", 1.2), ("Exponent", 0.7), ("Mantisse", 0.7)];

/// Draws the sign/exponent/mantissa boxes of an IEEE 754 format.
///
/// The exponent and mantissa are drawn with elided (dotted) middles, so
/// box widths are symbolic: 1, 2 and 6 boxes.
pub fn draw_ieee754<S: Surface + ?Sized>(surface: &mut S, format: Ieee754Format) {
    let b = IEEE_BOX;
    let parts = format.parts();
    let shown = [(parts[0].0, 1), (parts[1].0, 2), (parts[2].0, 6)];
    let boxes = layout_partition(
        &shown,
        &PartitionOptions {
            origin: Point::default(),
            cell_size: b,
            gap: 0.2 * b,
            caption: Placement::Above,
            caption_offset: 0.1 * b,
        },
    );

    for ((field, (_, bits)), (caption, depth)) in boxes.iter().zip(parts).zip(IEEE_CAPTIONS) {
        if field.bits == 1 {
            surface.rect(field.rect, &Paint::stroke());
        } else {
            draw_elided_box(surface, field.rect, 0.5 * b);
        }

        let count = if bits == 1 {
            "1 Bit".to_string()
        } else {
            format!("{bits} Bits")
        };
        surface.text(field.caption, &count, &TextStyle::centered());
        surface.text(
            field.rect.center(),
            &field.label,
            &TextStyle::centered().align(HAlign::Center, VAlign::Middle),
        );

        let x = field.rect.x + 0.1 * b;
        surface.polyline(
            &[
                Point::new(x, field.rect.y - 0.1),
                Point::new(x, field.rect.y - depth),
                Point::new(x + 0.2 * b, field.rect.y - depth),
            ],
            &Paint::stroke().with_width(LINE_THIN),
        );
        surface.text(
            Point::new(field.rect.x + 0.2 * b, field.rect.y - depth + 0.1),
            caption,
            &TextStyle::default(),
        );
    }
}

/// Outlines `rect` with solid ends of width `end` and dotted top and bottom
/// edges in between.
fn draw_elided_box<S: Surface + ?Sized>(surface: &mut S, rect: Rect, end: f64) {
    let (left, right, bottom, top) = (rect.x, rect.right(), rect.y, rect.top());
    let solid = Paint::stroke();
    let dotted = Paint::stroke().with_dash(Dash::Dotted);

    surface.polyline(
        &[
            Point::new(left + end, top),
            Point::new(left, top),
            Point::new(left, bottom),
            Point::new(left + end, bottom),
        ],
        &solid,
    );
    surface.line(Point::new(left + end, bottom), Point::new(right - end, bottom), &dotted);
    surface.line(Point::new(left + end, top), Point::new(right - end, top), &dotted);
    surface.polyline(
        &[
            Point::new(right - end, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(right - end, bottom),
        ],
        &solid,
    );
}

/// Edge length of a list item box.
const LIST_BOX: f64 = 1.0;
/// Space between list item boxes.
const LIST_GAP: f64 = 0.2;

fn list_items(count: usize, origin_x: f64) -> Vec<FieldBox> {
    let parts = vec![("", 1u32); count];
    layout_partition(
        &parts,
        &PartitionOptions {
            origin: Point::new(origin_x, 0.0),
            cell_size: LIST_BOX,
            gap: LIST_GAP,
            caption: Placement::Above,
            caption_offset: 0.2,
        },
    )
}

fn draw_item<S: Surface + ?Sized>(surface: &mut S, rect: Rect) {
    surface.rect(
        rect,
        &Paint::stroke().with_fill(Color::WHITE).with_width(LINE_THICK),
    );
}

/// Draws a list of `len` items cut into slices at `cuts`, with grey slice
/// backgrounds, the slice expressions above and the boundary indices below.
pub fn draw_list_slices<S: Surface + ?Sized>(surface: &mut S, len: usize, cuts: &[usize]) {
    let items = list_items(len, 0.0);
    let mono = TextStyle::mono();

    let mut bounds: Vec<usize> = Vec::with_capacity(cuts.len() + 2);
    bounds.push(0);
    bounds.extend(cuts.iter().copied().filter(|&c| c > 0 && c < len));
    bounds.push(len);

    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start >= end {
            continue;
        }
        let left = items[start].rect.x - 0.3 * LIST_GAP;
        let right = items[end - 1].rect.right() + 0.3 * LIST_GAP;
        surface.rect(
            Rect::new(left, -0.2, right - left, LIST_BOX + 0.4),
            &Paint::fill(Color::Grey(0.5)),
        );
        surface.text(
            Point::new((left + right) / 2.0, LIST_BOX + 0.4),
            &format!("a[{start}:{end}]"),
            &mono.align(HAlign::Center, VAlign::Baseline),
        );
    }

    for (n, item) in items.iter().enumerate() {
        draw_item(surface, item.rect);
        surface.text(
            item.rect.center(),
            &n.to_string(),
            &mono.align(HAlign::Center, VAlign::Middle),
        );
    }

    let arrow = Paint::stroke().with_arrow();
    for n in 0..=len {
        let x = n as f64 * (LIST_BOX + LIST_GAP) - 0.5 * LIST_GAP;
        surface.line(Point::new(x, -0.5), Point::new(x, -0.1), &arrow);
        surface.text(
            Point::new(x, -0.7),
            &n.to_string(),
            &mono.align(HAlign::Center, VAlign::Top),
        );
    }
}

/// Draws `shown` items at each end of a list of length `N` with their
/// positive indices above and negative indices below, separated by dots.
pub fn draw_list_indices<S: Surface + ?Sized>(surface: &mut S, shown: usize) {
    let dots_width = 1.0;
    let dots = 3;
    let mono = TextStyle::mono();
    let above = mono.align(HAlign::Center, VAlign::Baseline);
    let below = mono.align(HAlign::Center, VAlign::Top);

    let head = list_items(shown, 0.0);
    let tail_x = shown as f64 * (LIST_BOX + LIST_GAP) + LIST_GAP + dots_width;
    let tail = list_items(shown, tail_x);

    for (n, item) in head.iter().enumerate() {
        draw_item(surface, item.rect);
        surface.text(item.caption, &n.to_string(), &above);
        let negative = if n == 0 {
            "-N".to_string()
        } else {
            format!("-N+{n}")
        };
        surface.text(Point::new(item.caption.x, -0.2), &negative, &below);
    }

    for (n, item) in tail.iter().enumerate() {
        let back = shown - n;
        draw_item(surface, item.rect);
        surface.text(item.caption, &format!("N-{back}"), &above);
        surface.text(Point::new(item.caption.x, -0.2), &format!("-{back}"), &below);
    }

    let x0 = shown as f64 * (LIST_BOX + LIST_GAP);
    for n in 0..dots {
        let x = x0 + (0.5 + n as f64) * dots_width / dots as f64;
        surface.circle(
            Point::new(x, 0.5 * LIST_BOX),
            0.05 * LIST_BOX,
            &Paint::fill(Color::BLACK),
        );
    }
}

/// Draws `text` in bold white on a box of `color` reaching 0.1 beyond the
/// text on every side.
pub fn draw_badge<S: Surface + ?Sized>(surface: &mut S, text: &str, color: Color) {
    let style = TextStyle {
        bold: true,
        color: Color::WHITE,
        ..TextStyle::default()
    };
    let origin = Point::default();
    let extent = text_extent(origin, text, &style, surface.font_size());
    surface.rect(
        Rect::new(
            extent.x - 0.1,
            extent.y - 0.1,
            extent.width + 0.2,
            extent.height + 0.2,
        ),
        &Paint::fill(color),
    );
    surface.text(origin, text, &style);
}

/// Step length of the random walks.
const WALK_STEP: f64 = 0.1;
/// Line colours of successive walks.
const WALK_COLORS: [Color; 3] = [
    Color::Rgb(0.122, 0.467, 0.706),
    Color::Rgb(1.0, 0.498, 0.055),
    Color::Rgb(0.173, 0.627, 0.173),
];

/// A walk from the origin of `steps` steps of length `step`, each in a
/// uniformly random direction. The result holds `steps + 1` points.
pub fn random_walk<R: Rng + ?Sized>(rng: &mut R, steps: usize, step: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(steps + 1);
    let (mut x, mut y) = (0.0, 0.0);
    points.push((x, y));
    for _ in 0..steps {
        let direction = std::f64::consts::TAU * rng.r#gen::<f64>();
        x += step * direction.cos();
        y += step * direction.sin();
        points.push((x, y));
    }
    points
}

/// Draws `walks` random walks in one graph with axis titles `x` and `y`.
pub fn draw_random_walks<S: Surface + ?Sized, R: Rng + ?Sized>(
    surface: &mut S,
    rng: &mut R,
    walks: usize,
    steps: usize,
) -> Result<(), RenderError> {
    let curves = (0..walks)
        .map(|_| Curve::from_points(random_walk(rng, steps, WALK_STEP)))
        .collect::<Result<Vec<_>, _>>()?;
    let series: Vec<(&Curve, Paint)> = curves
        .iter()
        .zip(WALK_COLORS.iter().cycle())
        .map(|(curve, &color)| {
            let line = Paint {
                stroke: Some(color),
                ..Paint::stroke()
            };
            (curve, line.with_width(LINE_THIN))
        })
        .collect();

    let options = CurveOptions {
        x_title: Some("x".to_string()),
        y_title: Some("y".to_string()),
        ..CurveOptions::default()
    };
    debug!(walks, steps, "drawing random walks");
    paint_series(surface, &series, &options);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        paint::recording::{Op, Recorder},
        svg::SvgSurface,
    };

    use super::*;

    #[test]
    fn test_names_round_trip() {
        for figure in Figure::ALL {
            assert_eq!(figure.name().parse::<Figure>().unwrap(), figure);
        }
        assert!(matches!(
            "pie-chart".parse::<Figure>(),
            Err(RenderError::UnknownFigure(name)) if name == "pie-chart"
        ));
    }

    #[test]
    fn test_every_figure_draws() {
        for figure in Figure::ALL {
            let mut svg = SvgSurface::default();
            figure.draw(&mut svg).unwrap();
            assert!(!svg.is_empty(), "{figure} drew nothing");
            assert!(svg.finish().ends_with("</svg>\n"));
        }
    }

    #[test]
    fn test_ieee754_captions() {
        let mut recorder = Recorder::default();
        draw_ieee754(&mut recorder, Ieee754Format::Binary64);
        let texts = recorder.texts();
        for expected in ["1 Bit", "11 Bits", "52 Bits", "S", "E", "T", "Vorzeichen", "Mantisse"] {
            assert!(texts.contains(&expected), "missing {expected}");
        }

        let dotted = recorder.count(|op| matches!(op, Op::Polyline(_, paint) if paint.dash == Dash::Dotted));
        assert_eq!(dotted, 4);
    }

    #[test]
    fn test_list_slices() {
        let mut recorder = Recorder::default();
        draw_list_slices(&mut recorder, 8, &[5]);
        let texts = recorder.texts();
        assert!(texts.contains(&"a[0:5]"));
        assert!(texts.contains(&"a[5:8]"));

        let grey = recorder.ops.iter().find_map(|op| match op {
            Op::Rect(rect, paint) if paint.fill == Some(Color::Grey(0.5)) => Some(*rect),
            _ => None,
        });
        let grey = grey.unwrap();
        assert!((grey.x + 0.06).abs() < 1e-9);
        assert!((grey.width - 5.92).abs() < 1e-9);

        let arrows = recorder.count(|op| matches!(op, Op::Polyline(_, paint) if paint.arrow));
        assert_eq!(arrows, 9);
    }

    #[test]
    fn test_list_indices() {
        let mut recorder = Recorder::default();
        draw_list_indices(&mut recorder, 3);
        let texts = recorder.texts();
        for expected in ["0", "2", "-N", "-N+2", "N-3", "N-1", "-3", "-1"] {
            assert!(texts.contains(&expected), "missing {expected}");
        }
        assert_eq!(recorder.count(|op| matches!(op, Op::Circle(..))), 3);

        let tail = recorder.ops.iter().filter_map(|op| match op {
            Op::Rect(rect, _) => Some(rect.x),
            _ => None,
        });
        let xs: Vec<f64> = tail.collect();
        assert!((xs[3] - 4.8).abs() < 1e-9);
    }

    fn badge(figure: Figure) -> (Rect, Paint, String, TextStyle) {
        let mut recorder = Recorder::default();
        figure.draw(&mut recorder).unwrap();
        match recorder.ops.as_slice() {
            [Op::Rect(rect, paint), Op::Text(at, text, style)] => {
                assert_eq!(*at, Point::default());
                (*rect, *paint, text.clone(), *style)
            }
            ops => panic!("unexpected ops {ops:?}"),
        }
    }

    #[test]
    fn test_symbol_python3() {
        let (rect, paint, text, style) = badge(Figure::SymbolPython3);
        assert_eq!(text, "3.x");
        assert_eq!(paint.fill, Some(Color::Rgb(0.0, 0.5, 0.8)));
        assert_eq!(paint.stroke, None);
        assert!(style.bold);
        assert_eq!(style.color, Color::WHITE);

        // three glyphs of 0.6 * 0.3 plus 0.1 on each side
        assert!((rect.x + 0.1).abs() < 1e-9);
        assert!((rect.width - 0.74).abs() < 1e-9);
        assert!((rect.y + 0.175).abs() < 1e-9);
        assert!((rect.height - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_symbol_question() {
        let (rect, paint, text, style) = badge(Figure::SymbolQuestion);
        assert_eq!(text, "?");
        assert_eq!(paint.fill, Some(Color::Rgb(0.8, 0.5, 0.0)));
        assert!(style.bold);
        assert_eq!(style.color, Color::WHITE);
        assert!((rect.width - 0.38).abs() < 1e-9);
    }

    #[test]
    fn test_badge_follows_surface_font_size() {
        let mut svg = SvgSurface::new(crate::svg::RenderConfig {
            font_size: 0.6,
            ..Default::default()
        });
        draw_badge(&mut svg, "?", Color::BLACK);
        let doc = svg.finish();
        // 0.6 * 0.6 + 0.2 wide at 40 px per unit
        assert!(doc.contains("width=\"22.4\""), "{doc}");
        assert!(doc.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_random_walk_steps_have_fixed_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let walk = random_walk(&mut rng, 50, 0.1);
        assert_eq!(walk.len(), 51);
        assert_eq!(walk[0], (0.0, 0.0));
        for pair in walk.windows(2) {
            let (dx, dy) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            assert!((dx.hypot(dy) - 0.1).abs() < 1e-9);
        }

        let mut again = StdRng::seed_from_u64(7);
        assert_eq!(random_walk(&mut again, 50, 0.1), walk);
    }

    #[test]
    fn test_random_walks_figure() {
        let mut recorder = Recorder::default();
        let mut rng = StdRng::seed_from_u64(RANDOM_WALK_SEED);
        draw_random_walks(&mut recorder, &mut rng, 3, 100).unwrap();

        let walks: Vec<_> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Polyline(points, paint) if points.len() == 101 => Some(paint.stroke),
                _ => None,
            })
            .collect();
        assert_eq!(walks, WALK_COLORS.map(Some));

        let texts = recorder.texts();
        assert!(texts.contains(&"x"));
        assert!(texts.contains(&"y"));
    }
}
