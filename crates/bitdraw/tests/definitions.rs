use bitdraw::{
    diagram::{Diagram, hex_from_nibbles},
    errors::LayoutError,
    field::Shade,
    glyph::Placement,
    serde::DiagramDef,
};

fn compile(json: &str) -> Result<Diagram, LayoutError> {
    let def: DiagramDef = serde_json::from_str(json).unwrap();
    Diagram::try_from(def)
}

#[test]
fn test_compile_utf8_definition() {
    let diagram = compile(
        r#"{
            "rows": [
                { "value": 233, "width": 16, "nibbles": "Above",
                  "fields": [
                    { "low_bit": 11, "high_bit": 15, "shade": "Dark" },
                    { "low_bit": 6, "high_bit": 10 },
                    { "low_bit": 0, "high_bit": 5 }
                  ] },
                { "value": 50089, "width": 16, "nibbles": "Below" }
            ],
            "arrows": [ { "from_row": 0, "from_cell": 7.5, "to_row": 1, "to_cell": 5.5 } ]
        }"#,
    )
    .unwrap();

    assert_eq!(diagram.rows().len(), 2);
    assert_eq!(diagram.rows()[0].fields()[0].shade, Shade::Dark);
    assert_eq!(diagram.rows()[1].options().nibbles, Some(Placement::Below));

    let layout = diagram.layout();
    assert_eq!(hex_from_nibbles(&layout.rows[1].nibbles), "C3A9");
    assert_eq!(layout.arrows.len(), 1);
}

#[test]
fn test_defaults_are_applied() {
    let diagram = compile(r#"{ "rows": [ { "value": 5, "width": 4 } ] }"#).unwrap();
    assert_eq!(diagram.style.cell_size, 0.4);
    assert_eq!(diagram.style.group_gap, 0.1);
    assert_eq!(diagram.row_spacing, 1.0);
}

#[test]
fn test_value_out_of_range_is_rejected() {
    let err = compile(r#"{ "rows": [ { "value": 256, "width": 8 } ] }"#).unwrap_err();
    assert_eq!(
        err,
        LayoutError::ValueOutOfRange {
            value: 256,
            width: 8
        }
    );
}

#[test]
fn test_field_outside_width_is_rejected() {
    let err = compile(
        r#"{ "rows": [ { "value": 1, "width": 8,
             "fields": [ { "label": "x", "low_bit": 4, "high_bit": 9 } ] } ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::FieldOutOfRange { .. }));
}

#[test]
fn test_layout_serializes() {
    let diagram = compile(r#"{ "rows": [ { "value": 10, "width": 4, "decimal": "Signed" } ] }"#).unwrap();
    let json = serde_json::to_value(diagram.layout()).unwrap();
    assert_eq!(json["rows"][0]["decimal"]["text"], "= -6");
    assert_eq!(json["rows"][0]["cells"].as_array().unwrap().len(), 4);
}
