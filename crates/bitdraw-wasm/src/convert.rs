use std::fmt::Display;

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Turns any error into a JS string carrying its message.
pub fn error_to_js<E: Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Converts a serializable value (e.g. a layout) into a plain JS object.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(error_to_js)
}
