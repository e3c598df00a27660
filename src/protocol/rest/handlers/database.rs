//! Database Handlers
//!
//! List, create and drop databases. Statements run on a connection with no
//! database selected.

use std::sync::Arc;

use axum::{Extension, Json};

use crate::protocol::rest::extract::ValidJson;
use crate::protocol::wire::Envelope;
use crate::protocol::Handler;
use crate::schema::DatabaseRequest;

/// List databases (`SHOW DATABASES`)
#[utoipa::path(
    get,
    path = "/database/get",
    tag = "Database",
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn list_databases(Extension(handler): Extension<Arc<Handler>>) -> Json<Envelope> {
    Json(handler.list_databases().await)
}

/// Create a database (`CREATE DATABASE {database_name}`)
#[utoipa::path(
    post,
    path = "/database/create",
    tag = "Database",
    request_body = DatabaseRequest,
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
        (status = 422, description = "Invalid request", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn create_database(
    Extension(handler): Extension<Arc<Handler>>,
    ValidJson(request): ValidJson<DatabaseRequest>,
) -> Json<Envelope> {
    Json(handler.create_database(&request).await)
}

/// Drop a database (`DROP DATABASE {database_name}`)
#[utoipa::path(
    delete,
    path = "/database/delete",
    tag = "Database",
    request_body = DatabaseRequest,
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
        (status = 422, description = "Invalid request", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn delete_database(
    Extension(handler): Extension<Arc<Handler>>,
    ValidJson(request): ValidJson<DatabaseRequest>,
) -> Json<Envelope> {
    Json(handler.delete_database(&request).await)
}
