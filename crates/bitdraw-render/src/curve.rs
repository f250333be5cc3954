//! Line plots of x/y data files.
//!
//! A data file holds one point per line as two whitespace-separated numbers;
//! extra columns are ignored, blank lines and `#` comments are skipped.
//! [paint_curve] draws the points inside a framed graph with ticked linear
//! axes.

use bitdraw::layout::{Point, Rect};
use tracing::debug;

use crate::{
    errors::RenderError,
    surface::{Color, Dash, HAlign, LINE_THIN, Paint, Surface, TextStyle, VAlign},
};

/// Height of the graph relative to its width.
const ASPECT: f64 = 0.618;
/// Length of an axis tick.
const TICK: f64 = 0.1;
/// Upper bound for the number of ticks on an axis.
const MAX_TICKS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<(f64, f64)>,
}

impl Curve {
    /// Parses a data file; fails on the first line that does not start with
    /// two numbers, or when there are no points at all.
    pub fn parse(text: &str) -> Result<Self, RenderError> {
        let mut points = Vec::new();

        for (n, line) in text.lines().enumerate() {
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let mut columns = content.split_whitespace().map(str::parse::<f64>);
            match (columns.next(), columns.next()) {
                (Some(Ok(x)), Some(Ok(y))) if x.is_finite() && y.is_finite() => points.push((x, y)),
                _ => {
                    return Err(RenderError::CurveData {
                        line: n + 1,
                        content: content.to_string(),
                    });
                }
            }
        }

        if points.is_empty() {
            return Err(RenderError::EmptyCurve);
        }

        debug!(points = points.len(), "parsed curve data");
        Ok(Curve { points })
    }

    /// Builds a curve from points computed in code; non-finite points are
    /// dropped.
    pub fn from_points(points: Vec<(f64, f64)>) -> Result<Self, RenderError> {
        let points: Vec<_> = points
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if points.is_empty() {
            return Err(RenderError::EmptyCurve);
        }
        Ok(Curve { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Smallest and largest x and y, as `(x_min, x_max, y_min, y_max)`.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        self.points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        )
    }
}

/// How [paint_curve] draws the data.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOptions {
    /// Graph width in diagram units; the height follows from it.
    pub width: f64,
    pub line: Paint,
    /// Paint for a small circle at every data point.
    pub markers: Option<Paint>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for CurveOptions {
    fn default() -> Self {
        CurveOptions {
            width: 8.0,
            line: Paint::stroke(),
            markers: None,
            x_title: None,
            y_title: None,
        }
    }
}

impl CurveOptions {
    /// Dashed blue line with red, black-outlined point markers and axis
    /// titles.
    pub fn styled(width: f64) -> Self {
        CurveOptions {
            width,
            line: Paint {
                stroke: Some(Color::Rgb(0.0, 0.0, 1.0)),
                ..Paint::stroke()
            }
            .with_dash(Dash::Dashed),
            markers: Some(Paint::stroke().with_fill(Color::Rgb(1.0, 0.0, 0.0))),
            x_title: Some("x".to_string()),
            y_title: Some("y".to_string()),
        }
    }
}

/// Tick positions covering `min..=max` with a 1, 2 or 5 times power of ten
/// step.
pub fn ticks(min: f64, max: f64) -> Vec<f64> {
    let (min, max) = if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    };

    let rough = (max - min) / (MAX_TICKS - 1) as f64;
    let magnitude = 10f64.powf(rough.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= rough)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).floor() as i64;
    let last = (max / step).ceil() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_label(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

/// Draws `curve` in a graph whose lower-left corner is at the origin.
pub fn paint_curve<S: Surface + ?Sized>(surface: &mut S, curve: &Curve, options: &CurveOptions) {
    paint_series(surface, &[(curve, options.line)], options);
}

/// Draws several curves, each with its own line paint, in one graph whose
/// axes cover all of them. `options.line` is not used.
pub fn paint_series<S: Surface + ?Sized>(
    surface: &mut S,
    series: &[(&Curve, Paint)],
    options: &CurveOptions,
) {
    let Some((x_min, x_max, y_min, y_max)) = series
        .iter()
        .map(|(curve, _)| curve.extent())
        .reduce(|(a0, a1, a2, a3), (b0, b1, b2, b3)| (a0.min(b0), a1.max(b1), a2.min(b2), a3.max(b3)))
    else {
        debug!("no curves to draw");
        return;
    };
    let x_ticks = ticks(x_min, x_max);
    let y_ticks = ticks(y_min, y_max);
    let (x_lo, x_hi) = (x_ticks[0], x_ticks[x_ticks.len() - 1]);
    let (y_lo, y_hi) = (y_ticks[0], y_ticks[y_ticks.len() - 1]);

    let width = options.width;
    let height = width * ASPECT;
    let to_graph = |x: f64, y: f64| {
        Point::new(
            (x - x_lo) / (x_hi - x_lo) * width,
            (y - y_lo) / (y_hi - y_lo) * height,
        )
    };

    surface.rect(Rect::new(0.0, 0.0, width, height), &Paint::stroke());

    let tick_paint = Paint::stroke().with_width(LINE_THIN);
    for &x in &x_ticks {
        let p = to_graph(x, y_lo);
        surface.line(p, p.offset(0.0, TICK), &tick_paint);
        surface.text(
            p.offset(0.0, -TICK),
            &tick_label(x),
            &TextStyle::centered().align(HAlign::Center, VAlign::Top),
        );
    }
    for &y in &y_ticks {
        let p = to_graph(x_lo, y);
        surface.line(p, p.offset(TICK, 0.0), &tick_paint);
        surface.text(
            p.offset(-TICK, 0.0),
            &tick_label(y),
            &TextStyle::default().align(HAlign::Right, VAlign::Middle),
        );
    }

    if let Some(title) = &options.x_title {
        surface.text(
            Point::new(width / 2.0, -0.7),
            title,
            &TextStyle::centered().align(HAlign::Center, VAlign::Top),
        );
    }
    if let Some(title) = &options.y_title {
        surface.text(
            Point::new(-1.0, height / 2.0),
            title,
            &TextStyle::default().align(HAlign::Right, VAlign::Middle),
        );
    }

    for (curve, line) in series {
        let points: Vec<Point> = curve.points().iter().map(|&(x, y)| to_graph(x, y)).collect();
        surface.polyline(&points, line);

        if let Some(marker) = &options.markers {
            for p in &points {
                surface.circle(*p, 0.05, marker);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::paint::recording::{Op, Recorder};

    use super::*;

    const DATA: &str = "# x y\n1 2\n2 3.5\n\n3 1\n4 4 extra\n";

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let curve = Curve::parse(DATA).unwrap();
        assert_eq!(curve.points(), &[(1.0, 2.0), (2.0, 3.5), (3.0, 1.0), (4.0, 4.0)]);
        assert_eq!(curve.extent(), (1.0, 4.0, 1.0, 4.0));
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let err = Curve::parse("1 2\n\n3 x\n").unwrap_err();
        assert!(matches!(
            err,
            RenderError::CurveData { line: 3, ref content } if content == "3 x"
        ));
        assert!(matches!(Curve::parse("1\n"), Err(RenderError::CurveData { line: 1, .. })));
        assert!(matches!(Curve::parse("# nothing\n"), Err(RenderError::EmptyCurve)));
    }

    #[test]
    fn test_ticks() {
        let close = |got: Vec<f64>, want: &[f64]| {
            got.len() == want.len() && got.iter().zip(want).all(|(a, b)| (a - b).abs() < 1e-9)
        };
        assert!(close(ticks(0.0, 10.0), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]));
        assert!(close(ticks(1.0, 4.0), &[1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0]));

        let flat = ticks(5.0, 5.0);
        assert!(flat[0] <= 4.0 && *flat.last().unwrap() >= 6.0);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(2.0), "2");
        assert_eq!(tick_label(0.25), "0.25");
        assert_eq!(tick_label(-0.0), "0");
    }

    #[test]
    fn test_paint_curve_spans_frame() {
        let curve = Curve::parse(DATA).unwrap();
        let mut recorder = Recorder::default();
        paint_curve(&mut recorder, &curve, &CurveOptions::default());

        let line = recorder.ops.iter().rev().find_map(|op| match op {
            Op::Polyline(points, _) if points.len() == 4 => Some(points.clone()),
            _ => None,
        });
        let line = line.unwrap();
        assert!(line[0].x.abs() < 1e-9);
        assert!((line[3].x - 8.0).abs() < 1e-9);
        assert!((line[3].y - 8.0 * ASPECT).abs() < 1e-9);
        assert_eq!(recorder.count(|op| matches!(op, Op::Circle(..))), 0);
    }

    #[test]
    fn test_styled_curve() {
        let curve = Curve::parse(DATA).unwrap();
        let mut recorder = Recorder::default();
        paint_curve(&mut recorder, &curve, &CurveOptions::styled(8.0));

        assert_eq!(recorder.count(|op| matches!(op, Op::Circle(..))), 4);
        assert!(recorder.texts().contains(&"x"));
        let dashed = recorder.count(|op| {
            matches!(op, Op::Polyline(_, paint)
                if paint.dash == Dash::Dashed && paint.stroke == Some(Color::Rgb(0.0, 0.0, 1.0)))
        });
        assert_eq!(dashed, 1);
    }

    #[test]
    fn test_from_points_drops_non_finite() {
        let curve = Curve::from_points(vec![(0.0, 1.0), (f64::NAN, 2.0), (2.0, f64::INFINITY)]).unwrap();
        assert_eq!(curve.points(), &[(0.0, 1.0)]);
        assert!(matches!(Curve::from_points(Vec::new()), Err(RenderError::EmptyCurve)));
    }

    #[test]
    fn test_series_share_axes() {
        let low = Curve::from_points(vec![(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let high = Curve::from_points(vec![(0.0, 4.0), (4.0, 8.0)]).unwrap();
        let red = Paint {
            stroke: Some(Color::Rgb(1.0, 0.0, 0.0)),
            ..Paint::stroke()
        };
        let mut recorder = Recorder::default();
        paint_series(&mut recorder, &[(&low, Paint::stroke()), (&high, red)], &CurveOptions::default());

        let lines: Vec<_> = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Polyline(points, paint) if points.len() == 2 && paint.line_width == Paint::stroke().line_width => {
                    Some((points.clone(), paint.stroke))
                }
                _ => None,
            })
            .collect();
        let (high_points, high_stroke) = lines.last().unwrap();
        assert_eq!(*high_stroke, Some(Color::Rgb(1.0, 0.0, 0.0)));
        assert!((high_points[1].x - 8.0).abs() < 1e-9);
        assert!((high_points[1].y - 8.0 * ASPECT).abs() < 1e-9);

        let mut empty = Recorder::default();
        paint_series(&mut empty, &[], &CurveOptions::default());
        assert!(empty.ops.is_empty());
    }
}
