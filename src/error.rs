use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::DatastoreError;

const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Failure of a JSON route, rendered as `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: DatastoreError,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Tags a datastore failure with the route it surfaced in.
    pub fn internal(context: &'static str) -> impl FnOnce(DatastoreError) -> Self {
        move |source| Self::Internal { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(message) | Self::NotFound(message) => message,
            Self::Internal { context, source } => {
                // the cause stays in the log, never in the body
                tracing::error!(context, error = %source, "request failed");
                INTERNAL_SERVER_ERROR.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
