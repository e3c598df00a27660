//! API Handlers

use std::sync::Arc;

use axum::{Extension, Json};

use crate::protocol::wire::Envelope;
use crate::protocol::Handler;

/// API version
#[utoipa::path(
    get,
    path = "/api",
    tag = "API",
    responses(
        (status = 200, description = "API version", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn version(Extension(handler): Extension<Arc<Handler>>) -> Json<Envelope> {
    Json(handler.api_version())
}
