//! Server API
//!
//! Fetch wrappers for the order page's JSON endpoints, organized by domain.

mod catalog;
mod currency;
mod records;

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// Re-export all public items
pub use catalog::*;
pub use currency::*;
pub use records::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no browser window")]
    NoWindow,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    fn network(err: JsValue) -> Self {
        Self::Network(js_message(&err))
    }

    fn decode(err: JsValue) -> Self {
        Self::Decode(js_message(&err))
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}

/// GET `url` and decode the JSON body
async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let window = web_sys::window().ok_or(ApiError::NoWindow)?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(ApiError::network)?
        .dyn_into()
        .map_err(ApiError::network)?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    let body = JsFuture::from(response.json().map_err(ApiError::decode)?)
        .await
        .map_err(ApiError::decode)?;
    serde_wasm_bindgen::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::Status(404).to_string(), "HTTP status 404");
        assert_eq!(ApiError::Network("offline".into()).to_string(), "network error: offline");
    }
}
