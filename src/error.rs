//! Crate error type.
//!
//! Nothing here is ever surfaced to the page. Browser calls that fail are
//! turned into [`Error::Js`], logged at debug level and dropped; the feature
//! they belonged to simply does less.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stored or configured theme preference is not one of the known values.
    #[error("unknown theme preference: {0:?}")]
    UnknownPreference(String),

    /// The JSON config object could not be parsed.
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),

    /// The configured log level is not a `log::Level` name.
    #[error("invalid log level: {0:?}")]
    LogLevel(String),

    /// Persisting the theme preference failed.
    #[error("preference storage failed: {0}")]
    Storage(String),

    /// A web API call returned an exception.
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(feature = "browser")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Log-and-drop for fallible browser calls.
///
/// The page never sees these failures, so the browser layer funnels every
/// `Result` it does not otherwise need through here.
#[cfg(feature = "browser")]
pub(crate) trait LogFailure<T> {
    /// Returns the success value, or logs `context` with the error at debug level.
    fn or_log(self, context: &str) -> Option<T>;
}

#[cfg(feature = "browser")]
impl<T, E: Into<Error>> LogFailure<T> for Result<T, E> {
    fn or_log(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                let e: Error = e.into();
                log::debug!("{context}: {e}");
                None
            }
        }
    }
}
