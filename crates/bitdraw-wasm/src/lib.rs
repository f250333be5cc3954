//! WASM bindings for the `bitdraw` diagram engine.
//!
//! A diagram is described in JSON (the shape of
//! [`DiagramDef`](bitdraw::serde::DiagramDef)), compiled once, and can then
//! be rendered to an SVG string or inspected as a layout object.
//!
//! ```text
//! // const diagram = new WasmDiagram(JSON.stringify({
//! //   rows: [
//! //     { value: 0xE9, width: 16, nibbles: "Above",
//! //       fields: [{ low_bit: 11, high_bit: 15, shade: "Dark" },
//! //                { low_bit: 6, high_bit: 10 },
//! //                { low_bit: 0, high_bit: 5 }] },
//! //     { value: 0xC3A9, width: 16, nibbles: "Below" }
//! //   ],
//! //   arrows: [{ from_row: 0, from_cell: 7.5, to_row: 1, to_cell: 5.5 }]
//! // }));
//! // element.innerHTML = diagram.toSvg();
//! ```
//!
//! Errors reach JavaScript as strings holding the error message.

mod convert;

use bitdraw::{diagram::Diagram, serde::DiagramDef};
use bitdraw_render::{Figure, SvgSurface, paint::paint_diagram};
use wasm_bindgen::prelude::*;

/// A compiled diagram.
#[wasm_bindgen]
pub struct WasmDiagram {
    diagram: Diagram,
}

#[wasm_bindgen]
impl WasmDiagram {
    /// Compiles a diagram from its JSON definition.
    ///
    /// Fails when the JSON does not match the definition shape, or when a
    /// value, field or arrow does not fit its row.
    #[wasm_bindgen(constructor)]
    pub fn new(diagram_json: &str) -> Result<WasmDiagram, JsValue> {
        let def: DiagramDef = serde_json::from_str(diagram_json).map_err(convert::error_to_js)?;
        let diagram = Diagram::try_from(def).map_err(convert::error_to_js)?;
        Ok(WasmDiagram { diagram })
    }

    /// Renders the diagram as a standalone SVG document.
    #[wasm_bindgen(js_name = toSvg)]
    pub fn to_svg(&self) -> String {
        let mut svg = SvgSurface::default();
        paint_diagram(&mut svg, &self.diagram.layout());
        svg.finish()
    }

    /// The computed layout: cells, nibbles, fields, labels and arrows with
    /// their coordinates in centimetres.
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        convert::to_js(&self.diagram.layout())
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.diagram.rows().len()
    }
}

/// Renders one of the built-in figures (`binary`, `utf8-2`, ...) as SVG.
#[wasm_bindgen(js_name = figureSvg)]
pub fn figure_svg(name: &str) -> Result<String, JsValue> {
    let figure: Figure = name.parse().map_err(convert::error_to_js)?;
    let mut svg = SvgSurface::default();
    figure.draw(&mut svg).map_err(convert::error_to_js)?;
    Ok(svg.finish())
}
