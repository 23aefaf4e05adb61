//! JSON API handlers.
//!
//! Every response uses the `{success, data | error, message}` envelope.
//! Handlers run service calls on actix's blocking pool because diesel is
//! synchronous.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::{ErrorKind, ServiceError, ServiceResult};

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod members;
pub mod orders;
pub mod reports;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(code),
            message: Some(message.into()),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::data(data))
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::data(data))
}

/// Status code and machine-readable code for an error kind.
pub fn error_status(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::AmbiguousIdentity => (StatusCode::BAD_REQUEST, "VERIFICATION_REQUIRED"),
        ErrorKind::IdentityMismatch => (StatusCode::BAD_REQUEST, "IDENTITY_MISMATCH"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Persistence => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Render a service error. Persistence failures are logged with `action` and
/// answered with a generic message.
pub fn error_response(err: &ServiceError, action: &str) -> HttpResponse {
    let kind = err.kind();
    let (status, code) = error_status(kind);

    let message = match kind {
        ErrorKind::Persistence => {
            log::error!("Failed to {action}: {err}");
            "internal server error".to_string()
        }
        ErrorKind::AmbiguousIdentity | ErrorKind::IdentityMismatch => {
            log::debug!("Could not {action}: {err}");
            err.to_string()
        }
        _ => err.to_string(),
    };

    HttpResponse::build(status).json(ApiResponse::<()>::failure(code, message))
}

/// Run a synchronous service call on the blocking thread pool.
pub async fn blocking<T, F>(call: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(call)
        .await
        .map_err(|err| ServiceError::Internal(err.to_string()))?
}

/// Render malformed JSON bodies through the envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::failure(
        "VALIDATION_ERROR",
        format!("invalid request body: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// Render malformed query strings through the envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::failure(
        "VALIDATION_ERROR",
        format!("invalid query string: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
