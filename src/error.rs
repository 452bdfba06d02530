use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum KeeperError {
    #[error("Parent not found")]
    ParentNotFound,

    #[error("Child not found")]
    ChildNotFound,

    #[error("Parent email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid date '{value}' for field '{field}', expected YYYY-MM-DD")]
    InvalidDate {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Appointment {appointment_id} references missing child {child_id}")]
    OrphanedChild { appointment_id: i64, child_id: i64 },

    #[error("Child {child_id} references missing parent {parent_id}")]
    OrphanedParent { child_id: i64, parent_id: i64 },

    #[error("Reminder notification failed: {0}")]
    Notify(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl KeeperError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            KeeperError::ParentNotFound | KeeperError::ChildNotFound => StatusCode::NOT_FOUND,
            KeeperError::DuplicateEmail(_) => StatusCode::CONFLICT,
            KeeperError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            KeeperError::OrphanedChild { .. }
            | KeeperError::OrphanedParent { .. }
            | KeeperError::Notify(_)
            | KeeperError::DatabaseError(_)
            | KeeperError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for KeeperError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = match &self {
            KeeperError::DuplicateEmail(_) => "Parent email already registered".to_string(),
            KeeperError::DatabaseError(_) | KeeperError::Config(_) => {
                "An internal server error occurred.".to_string()
            }
            other => other.to_string(),
        };
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        }
        (status, Json(MessageBody { message })).into_response()
    }
}

/// `{"message": "..."}` body shared by acknowledgements and error responses.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
