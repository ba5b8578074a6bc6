//! API Gateway error types rendered as problem-details JSON.
//!
//! Every failure leaving the gateway has the shape
//! `{status, title, detail, errors?}` with `errors` entries of the form
//! `{location, message}`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use dm_01_asset_store::AssetError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type of error bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// One located problem inside a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Where the problem is, e.g. `body.amount`
    pub location: String,
    /// Human readable message
    pub message: String,
}

/// API Gateway error with HTTP status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Short summary of the problem class
    pub title: String,
    /// Message specific to this occurrence
    pub detail: String,
    /// Located problems, omitted when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            detail: detail.into(),
            errors: Vec::new(),
        }
    }

    /// Attach a located problem
    pub fn with_error(mut self, location: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(ErrorDetail {
            location: location.into(),
            message: message.into(),
        });
        self
    }

    /// 400 - request could not be understood
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    /// 404 - resource not found
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    /// 422 - well-formed but semantically invalid
    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    /// 500 - internal error; `detail` must not leak internals
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Map a failure raised while creating an asset.
    pub fn from_write_error(err: &AssetError) -> Self {
        match err {
            AssetError::MalformedPayload { .. }
            | AssetError::MissingDiscriminator
            | AssetError::UnknownVariant { .. } => {
                let location = match err {
                    AssetError::MalformedPayload { .. } => "body",
                    _ => "body.type",
                };
                Self::bad_request(err.to_string()).with_error(location, err.to_string())
            }
            AssetError::ValidationError { field, reason } => {
                Self::unprocessable(err.to_string())
                    .with_error(format!("body.{}", field), reason.clone())
            }
            AssetError::NotFound { .. } => Self::not_found(err.to_string()),
            AssetError::CorruptRecord { .. } | AssetError::StorageFailure { .. } => {
                Self::internal("failed to store asset")
            }
        }
    }

    /// Map a failure raised while reading an asset.
    ///
    /// Anything wrong with a stored record is a server fault, including a
    /// kind that is no longer registered.
    pub fn from_read_error(err: &AssetError) -> Self {
        match err {
            AssetError::NotFound { id } => Self::not_found(format!("asset {} not found", id)),
            AssetError::CorruptRecord { .. } | AssetError::UnknownVariant { .. } => {
                Self::internal("stored asset is unreadable")
            }
            AssetError::StorageFailure { .. } => Self::internal("failed to read asset"),
            AssetError::MalformedPayload { .. }
            | AssetError::MissingDiscriminator
            | AssetError::ValidationError { .. } => Self::internal(err.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::to_vec(&self).unwrap_or_default();
        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        response
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::bad_request(format!("malformed payload: {}", e)).with_error("body", e.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Server(String),
}
