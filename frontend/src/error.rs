use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("could not build tracking payload: {0}")]
    Payload(#[from] serde_wasm_bindgen::Error),
}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        FxError::Js(message)
    }
}
