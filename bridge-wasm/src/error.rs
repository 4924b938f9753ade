//! Error types for the browser adapters

use bridge_traits::error::BridgeError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result type for browser adapter operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors raised while talking to the page
#[derive(Error, Debug)]
pub enum WasmError {
    /// JavaScript exception or rejected promise
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A global the adapters need (window, document) is absent
    #[error("Browser object not available: {0}")]
    Unavailable(String),

    /// A value from JavaScript had an unexpected shape
    #[error("Unexpected JavaScript value: {0}")]
    UnexpectedValue(String),

    /// Conversion between JavaScript and Rust values failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_wasm_bindgen::Error),
}

impl From<WasmError> for BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::Unavailable(what) => BridgeError::NotAvailable(what),
            other => BridgeError::OperationFailed(other.to_string()),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(js_value: JsValue) -> Self {
        WasmError::JavaScript(js_error_message(&js_value))
    }
}

/// Best-effort message for a thrown JavaScript value.
pub fn js_error_message(js_value: &JsValue) -> String {
    if let Some(message) = js_value.as_string() {
        message
    } else if let Some(error) = js_value.dyn_ref::<js_sys::Error>() {
        error.message().into()
    } else {
        format!("{:?}", js_value)
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
