use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Missing element: {0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    #[error("Invalid launch instant: {0}")]
    InvalidInstant(String),
}

impl ControlError {
    /// Markup that is simply not on this page is expected and only worth a debug line.
    pub fn is_absent_markup(&self) -> bool {
        matches!(self, ControlError::MissingElement(_))
    }
}

impl From<JsValue> for ControlError {
    fn from(value: JsValue) -> Self {
        ControlError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

/// Logs the outcome of wiring a controller and hands back the handle, if any.
pub fn report<T>(name: &str, result: Result<T, ControlError>) -> Option<T> {
    match result {
        Ok(handle) => {
            log::info!("{} wired", name);
            Some(handle)
        }
        Err(e) if e.is_absent_markup() => {
            log::debug!("{} skipped: {}", name, e);
            None
        }
        Err(e) => {
            log::warn!("{} not wired: {}", name, e);
            None
        }
    }
}
