use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum TodoError {
    #[error("Validation error: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Todo not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Shorthand for a validation failure on a single location.
    pub fn invalid(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        TodoError::Validation(vec![FieldError::new(loc, msg, kind)])
    }
}

impl From<figment::Error> for TodoError {
    fn from(e: figment::Error) -> Self {
        TodoError::Config(Box::new(e))
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> axum::response::Response {
        match self {
            TodoError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { detail: details }),
            )
                .into_response(),
            TodoError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Todo not found" })),
            )
                .into_response(),
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldError>,
}
