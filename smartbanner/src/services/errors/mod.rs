use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures the banner can report to its caller.
///
/// Page conditions that simply mean "no banner here" (unsupported platform,
/// a previous dismissal, missing app id) are not errors; see `SkipReason`.
#[derive(Debug, Error)]
pub enum BannerError {
    #[error("Configuration error: {field} = {value}")]
    Configuration { field: String, value: String },

    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("DOM operation failed: {operation} - {reason}")]
    Dom { operation: String, reason: String },

    #[error("Storage error: {key} - {reason}")]
    Storage { key: String, reason: String },

    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl BannerError {
    pub fn dom(operation: &str, reason: impl Into<String>) -> Self {
        BannerError::Dom {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn storage(key: &str, reason: impl Into<String>) -> Self {
        BannerError::Storage {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<JsValue> for BannerError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .unwrap_or_else(|| format!("{:?}", js_val));
        BannerError::JavaScript(message)
    }
}

impl From<BannerError> for JsValue {
    fn from(err: BannerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type BannerResult<T> = Result<T, BannerError>;
