//! Permission manager errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::discord::DiscordError;
use crate::permissions::PermissionError;

/// Errors surfaced by [`crate::manager::PermissionsManager`].
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Command, member, or other resource does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authorization gate refused the actor. Raised before any write.
    #[error("{0}")]
    AccessDenied(#[from] PermissionError),

    /// Upstream refused the request.
    #[error("Discord rejected the request ({status}): {details}")]
    RemoteRejected { status: u16, details: String },

    /// Failed read, or a transport or decoding failure.
    #[error("Upstream error: {0}")]
    Upstream(DiscordError),
}

impl From<DiscordError> for ManagerError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::NotFound(what) => Self::NotFound(what),
            DiscordError::Rejected { status, body } => Self::RemoteRejected {
                status,
                details: body,
            },
            other @ (DiscordError::Failed { .. } | DiscordError::Http(_)) => Self::Upstream(other),
        }
    }
}

impl IntoResponse for ManagerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({"error": "not_found", "message": format!("Not found: {what}")}),
            ),
            Self::AccessDenied(e) => (
                StatusCode::FORBIDDEN,
                serde_json::json!({"error": "permission", "message": e.to_string()}),
            ),
            Self::RemoteRejected { status, details } => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({
                    "error": "remote_rejected",
                    "message": format!("Discord rejected the request ({status})"),
                    "details": details,
                }),
            ),
            Self::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({"error": "upstream", "message": "Discord request failed"}),
            ),
        };
        (status, Json(body)).into_response()
    }
}
