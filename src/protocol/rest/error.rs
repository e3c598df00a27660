//! REST API Error Types
//!
//! Rejections raised before a route handler runs: authentication and
//! request validation. Both answer with the `{code, message}` envelope and
//! a matching transport status.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::AuthError;
use crate::protocol::wire::Envelope;
use crate::schema::ValidationError;

/// REST API error that can be returned from extractors and middleware
#[derive(Debug)]
pub struct RestError {
    pub status: StatusCode,
    pub message: String,
}

impl RestError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = Json(Envelope::new(self.status.as_u16(), self.message));
        (self.status, body).into_response()
    }
}

// Conversions from domain errors
impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        RestError::forbidden(err.to_string())
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::unprocessable(err.to_string())
    }
}

/// Keeps axum's status (400 syntax, 415 content type, 422 shape) and its
/// message, which includes the JSON path of the offending field.
impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::new(rejection.status(), rejection.body_text())
    }
}
