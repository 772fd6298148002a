use serde::Serialize;

use crate::template::TemplateError;

/// An error a handler returns from an API call.
///
/// Sent to the client as `{"code":..,"error":..}` with the status line
/// `<code> <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error ({code}): {message}")]
pub struct WireError {
    pub code: u16,
    pub message: String,
}

impl WireError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Shorthand for ending a transform with an error:
///
/// ```
/// use alpine_wires::wires::{self, Reply};
///
/// fn transform(_params: wires::FieldSet) -> Reply {
///     wires::error(500, "Internal server error")
/// }
/// assert!(transform(wires::FieldSet::new()).is_err());
/// ```
pub fn error<T>(code: u16, message: impl Into<String>) -> Result<T, WireError> {
    Err(WireError::new(code, message))
}

/// Failures of the wiring layer itself, as opposed to handler errors
#[derive(Debug, thiserror::Error)]
pub enum WiresError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Wire format of a [`WireError`]
#[derive(Debug, Serialize)]
pub(super) struct ErrorBody<'a> {
    pub code: u16,
    pub error: &'a str,
}

impl<'a> From<&'a WireError> for ErrorBody<'a> {
    fn from(err: &'a WireError) -> Self {
        Self {
            code: err.code,
            error: &err.message,
        }
    }
}
