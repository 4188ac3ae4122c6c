//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
    #[error("invalid schema identifier '{0}'")]
    InvalidSchema(String),
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Message is shown as-is, e.g. "Clinic not found".
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("credential: {0}")]
    Credential(String),
}

impl AppError {
    pub fn not_found(name: &str) -> Self {
        AppError::NotFound(format!("{} not found", name))
    }

    /// Unique, foreign-key, not-null and check violations are caused by the request.
    fn constraint_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        use sqlx::error::ErrorKind;
        match self {
            AppError::Db(sqlx::Error::Database(e)) => match e.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Some(&**e),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Client-facing message for internal database failures; the cause is only logged.
pub const INTERNAL_DB_MESSAGE: &str = "internal database error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let mut message = None;
        let (status, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Credential(_) => (StatusCode::INTERNAL_SERVER_ERROR, "credential_error"),
            AppError::Db(e) => {
                if let Some(db) = self.constraint_error() {
                    tracing::warn!(constraint = ?db.constraint(), "constraint violation: {}", db.message());
                    details = db
                        .constraint()
                        .map(|c| serde_json::json!({ "constraint": c }));
                    message = Some(db.message().to_string());
                    (StatusCode::CONFLICT, "constraint_violation")
                } else if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    message = Some(INTERNAL_DB_MESSAGE.to_string());
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let message = message.unwrap_or_else(|| self.to_string());
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let (status, body) = body_of(AppError::not_found("Clinic")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "Clinic not found");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn validation_is_unprocessable() {
        let (status, body) = body_of(AppError::Validation("name is required".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["message"], "name is required");
    }

    #[tokio::test]
    async fn other_database_errors_are_internal() {
        let (status, body) = body_of(AppError::Db(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "database_error");
        assert_eq!(body["error"]["message"], INTERNAL_DB_MESSAGE);
        assert!(!body["error"]["message"].as_str().unwrap().contains("pool"));
    }

    #[tokio::test]
    async fn bad_request_and_credential_codes() {
        let (status, body) = body_of(AppError::BadRequest("wrong key".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
        let (status, body) = body_of(AppError::Credential("hash".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "credential_error");
    }
}
