//! Painting of `bitdraw` layouts onto a [Surface].

use bitdraw::{
    diagram::{DiagramLayout, RowLayout},
    glyph::Placement,
    layout::FieldBox,
};

use crate::surface::{Color, HAlign, Paint, Surface, TextStyle, VAlign};

/// Paints every row and arrow of a diagram.
pub fn paint_diagram<S: Surface + ?Sized>(surface: &mut S, layout: &DiagramLayout) {
    for row in &layout.rows {
        paint_row(surface, row);
    }

    let arrow = Paint::stroke().with_arrow();
    for a in &layout.arrows {
        surface.line(a.from, a.to, &arrow);
    }
}

/// Paints one row.
///
/// Rows without fields get a box around every bit cell; rows with fields
/// get one box per field instead.
pub fn paint_row<S: Surface + ?Sized>(surface: &mut S, row: &RowLayout) {
    if row.fields.is_empty() {
        for cell in &row.cells {
            surface.rect(cell.cell, &Paint::stroke());
        }
    } else {
        for field in &row.fields {
            paint_field(surface, field);
        }
    }

    let digit = TextStyle::centered();
    for cell in &row.cells {
        surface.text(cell.anchor, &cell.text(), &digit);
    }

    for group in &row.nibbles {
        surface.polyline(&group.bracket.points, &Paint::stroke());
        let style = match group.placement {
            Placement::Above => TextStyle::centered(),
            Placement::Below => TextStyle::centered().align(HAlign::Center, VAlign::Top),
        };
        surface.text(group.glyph.anchor, &group.glyph.text(), &style);
    }

    if let Some(decimal) = &row.decimal {
        surface.text(decimal.anchor, &decimal.text, &TextStyle::default());
    }
}

/// Paints a field box: shaded fields are filled and outlined in their grey,
/// others are outlined in black. Non-empty labels become captions.
pub fn paint_field<S: Surface + ?Sized>(surface: &mut S, field: &FieldBox) {
    match field.shade.grey() {
        Some(grey) => surface.rect(field.rect, &Paint::solid(Color::Grey(grey))),
        None => surface.rect(field.rect, &Paint::stroke()),
    }

    if !field.label.is_empty() {
        let valign = match field.placement {
            Placement::Above => VAlign::Baseline,
            Placement::Below => VAlign::Top,
        };
        surface.text(
            field.caption,
            &field.label,
            &TextStyle::centered().align(HAlign::Center, valign),
        );
    }
}


#[cfg(test)]
mod tests {
    use bitdraw::presets;

    use super::{
        recording::{Op, Recorder},
        *,
    };

    #[test]
    fn test_row_without_fields_boxes_every_cell() {
        let layout = presets::twos_complement(0x6CD8932F).unwrap().layout();
        let mut recorder = Recorder::default();
        paint_diagram(&mut recorder, &layout);

        assert_eq!(recorder.count(|op| matches!(op, Op::Rect(..))), 64);
        assert_eq!(recorder.count(|op| matches!(op, Op::Polyline(..))), 16);
        let texts = recorder.texts();
        assert!(texts.contains(&"= 1808827695"));
        assert!(texts.contains(&"= -1808827695"));
    }

    #[test]
    fn test_shaded_fields_are_filled() {
        let layout = presets::utf8_two_byte(0xE9).unwrap().layout();
        let mut recorder = Recorder::default();
        paint_diagram(&mut recorder, &layout);

        let filled = recorder.count(|op| matches!(op, Op::Rect(_, paint) if paint.fill.is_some()));
        assert_eq!(filled, 3);
        assert_eq!(recorder.count(|op| matches!(op, Op::Rect(..))), 7);

        let arrows = recorder.count(|op| matches!(op, Op::Polyline(_, paint) if paint.arrow));
        assert_eq!(arrows, 2);
    }

    #[test]
    fn test_nibbles_below_hang_from_anchor() {
        let layout = presets::utf8_two_byte(0xE9).unwrap().layout();
        let mut recorder = Recorder::default();
        paint_row(&mut recorder, &layout.rows[1]);

        let hanging = recorder
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, text, style) if style.valign == VAlign::Top => Some(text.as_str()),
                _ => None,
            })
            .collect::<String>();
        assert_eq!(hanging, "C3A9");
    }
}
