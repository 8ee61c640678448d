use pixelplace_shared::CanvasDecodeError;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("invalid element type: {0}")]
    InvalidElement(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid canvas payload: {0}")]
    Canvas(#[from] CanvasDecodeError),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|error| String::from(error.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<ClientError> for JsValue {
    fn from(error: ClientError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
