//! Console error taxonomy and its HTTP mapping.
//!
//! ERROR HANDLING
//! ==============
//! Invalid persisted session data never reaches this type: the session
//! store recovers from it by clearing the cache. Everything here is either
//! a caller mistake (bad credentials, unknown id) or a store failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::services::kv::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Deliberately non-specific: unknown user and wrong password look the same.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not signed in")]
    Unauthenticated,
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("fixture catalog has no organizations")]
    NoOrganizations,
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

impl ConsoleError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}

/// Map a console error to the status returned by JSON endpoints.
#[must_use]
pub fn console_error_to_status(err: &ConsoleError) -> StatusCode {
    match err {
        ConsoleError::InvalidCredentials | ConsoleError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ConsoleError::NotFound { .. } => StatusCode::NOT_FOUND,
        ConsoleError::NoOrganizations | ConsoleError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = console_error_to_status(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "console request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
