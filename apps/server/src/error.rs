//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or malformed required field.
    #[error("{0}")]
    Validation(String),

    /// Duplicate value for a unique field.
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid, or expired credentials.
    #[error("{0}")]
    Authentication(String),

    /// Valid caller, but not the resource owner.
    #[error("{0}")]
    Authorization(String),

    /// Resource absent.
    #[error("{0}")]
    NotFound(String),

    /// Identifier is not a well-formed resource reference. Distinct from
    /// NotFound and reported as a client error, not a 500.
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    /// Storage collaborator failure.
    #[error(transparent)]
    Store(#[from] recipe_store::StoreError),

    /// Token or hashing failure.
    #[error(transparent)]
    Auth(#[from] auth::AuthError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        use recipe_store::StoreError;

        let (status, message) = match &self {
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Conflict(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::Authorization(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::MalformedId(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Store(StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ServerError::Store(StoreError::AlreadyExists { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ServerError::Store(e) => {
                // Collaborator failures are logged with their detail; the
                // client only sees a generic message.
                tracing::error!(error = %e, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Auth(
                auth::AuthError::PasswordHashing(e) | auth::AuthError::JwtEncoding(e),
            ) => {
                tracing::error!(error = %e, "Credential operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Auth(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
        };

        let body = json!({ "error": message });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ServerError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ServerError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (
                ServerError::Authentication("no".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServerError::Authorization("not yours".into()),
                StatusCode::FORBIDDEN,
            ),
            (ServerError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ServerError::MalformedId("xyz".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_store_failure_does_not_leak_detail() {
        let error = ServerError::Store(recipe_store::StoreError::Other(
            "connection refused at 10.0.0.5".into(),
        ));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
