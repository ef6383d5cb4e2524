//! Response envelopes and error mapping shared by every HTTP module

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::{DeleteSummary, DomainError, UpdateSummary};

/// `{"message": "..."}`, the body of every error and of informational replies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a single-record insert
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.into(),
        }
    }
}

/// Result of a single-record update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateSummary> for UpdateResponse {
    fn from(s: UpdateSummary) -> Self {
        Self {
            acknowledged: true,
            matched_count: s.matched,
            modified_count: s.modified,
        }
    }
}

/// Result of a single-record delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteSummary> for DeleteResponse {
    fn from(s: DeleteSummary) -> Self {
        Self {
            acknowledged: true,
            deleted_count: s.deleted,
        }
    }
}

/// HTTP-facing error: a status code plus the `{message}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a domain error. Storage failures are logged and replaced by
    /// `fallback` so store internals never reach the client.
    pub fn from_domain(err: DomainError, fallback: &str) -> Self {
        let status = match &err {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if err.is_storage() {
            error!(error = %err, "{}", fallback);
            return Self::new(status, fallback);
        }

        match err {
            DomainError::Validation(msg) | DomainError::Conflict(msg) | DomainError::Forbidden(msg) => {
                Self::new(status, msg)
            }
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

/// Attach an endpoint-specific fallback message to a domain result.
pub trait OrFailWith<T> {
    fn or_fail_with(self, fallback: &str) -> ApiResult<T>;
}

impl<T> OrFailWith<T> for Result<T, DomainError> {
    fn or_fail_with(self, fallback: &str) -> ApiResult<T> {
        self.map_err(|e| ApiError::from_domain(e, fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_masked() {
        let err = ApiError::from_domain(
            DomainError::Storage("disk I/O error".into()),
            "Registration failed",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Registration failed");
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err = ApiError::from(DomainError::Forbidden("Blocked".into()));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Blocked");

        let err = ApiError::from(DomainError::not_found("User", "email", "x@y.z"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn write_envelopes_use_camel_case() {
        let body = serde_json::to_value(UpdateResponse::from(UpdateSummary::matched(true))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"acknowledged": true, "matchedCount": 1, "modifiedCount": 1})
        );
        let body = serde_json::to_value(InsertResponse::new("abc")).unwrap();
        assert_eq!(body["insertedId"], "abc");
    }
}
