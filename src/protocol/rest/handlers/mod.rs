//! REST API Handlers
//!
//! Contains all HTTP endpoint handlers organized by resource.

pub mod api;
pub mod database;
pub mod row;
pub mod table;
pub mod user;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response header set by routes that accept a request but do nothing.
pub const NOT_IMPLEMENTED_HEADER: &str = "x-not-implemented";

/// Echo of a stub route: the request body, unchanged, flagged with
/// [`NOT_IMPLEMENTED_HEADER`].
#[derive(Debug)]
pub struct NotImplemented<T>(pub T);

impl<T: Serialize> IntoResponse for NotImplemented<T> {
    fn into_response(self) -> Response {
        ([(NOT_IMPLEMENTED_HEADER, "true")], Json(self.0)).into_response()
    }
}

fn not_implemented<T: Serialize>(route: &'static str, request: T) -> NotImplemented<T> {
    tracing::warn!(route, "route_not_implemented");
    NotImplemented(request)
}
