//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::FieldErrors;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// HTTP 401
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// HTTP 403
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 409
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Field-level validation errors (structured, displayed inline)
    #[error("Validation failed: {}", summarize_fields(.0))]
    Validation(FieldErrors),

    /// HTTP 5xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A controller was asked to move to a state it cannot reach from the current one
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Another operation on the same controller is still in flight
    #[error("Operation already in progress")]
    Busy,
}

fn summarize_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Unauthorized(_)
            | Self::Forbidden(_)
            | Self::NotFound(_)
            | Self::Conflict(_)
            | Self::Validation(_)
            | Self::InvalidTransition(_)
            | Self::Busy => true,
            Self::Http { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Stable machine-readable code, matching the serde tag.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "Network",
            Self::Timeout(_) => "Timeout",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::NotFound(_) => "NotFound",
            Self::Conflict(_) => "Conflict",
            Self::Validation(_) => "Validation",
            Self::Server { .. } => "Server",
            Self::Http { .. } => "Http",
            Self::Storage(_) => "Storage",
            Self::Serialization(_) => "Serialization",
            Self::InvalidTransition(_) => "InvalidTransition",
            Self::Busy => "Busy",
        }
    }

    /// HTTP status associated with the error, if it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Validation(_) => Some(422),
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field errors carried by a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Normalized error kept in controller state.
///
/// Cheap to clone and free of transport details, so views can render it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&CoreError> for ErrorInfo {
    fn from(err: &CoreError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            status: err.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("site".to_string(), "required".to_string());
        errors.insert("name".to_string(), "required".to_string());
        let err = CoreError::Validation(errors);
        assert_eq!(
            err.to_string(),
            "Validation failed: name: required, site: required"
        );
        assert!(err.is_expected());
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn server_errors_are_unexpected() {
        let err = CoreError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_expected());
        let info = ErrorInfo::from(&err);
        assert_eq!(info.code, "Server");
        assert_eq!(info.status, Some(500));
        assert_eq!(info.message, "Server error (500): boom");
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::NotFound("asset 7".to_string())).unwrap();
        assert_eq!(json["code"], "NotFound");
        assert_eq!(json["details"], "asset 7");
    }
}
