use serde::Serialize;
use thiserror::Error;

/// Unified API error type.
///
/// Three categories only: a missing row, bad caller-supplied data, and
/// everything the storage layer can throw. Routers map `NotFound` to 404
/// and every other signal to 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("data validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Storage(_) => "storage_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 500,
            Self::Storage(_) => 500,
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_the_only_404() {
        assert_eq!(ApiError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ApiError::Validation("x".into()).status_code(), 500);
        assert_eq!(ApiError::Storage("x".into()).status_code(), 500);
    }

    #[test]
    fn envelope_carries_code_and_message() {
        let err = ApiError::Storage("disk on fire".into());
        let env = ErrorEnvelope::from(&err);
        assert_eq!(env.error.code, "storage_error");
        assert!(env.error.message.contains("disk on fire"));
    }
}
