//! Table Handlers
//!
//! Every statement here runs on a connection opened against the request's
//! database.

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};

use crate::protocol::rest::extract::ValidJson;
use crate::protocol::wire::Envelope;
use crate::protocol::Handler;
use crate::schema::{TableCreateRequest, TableRenameRequest, TableRequest};

/// List tables in a database (`SHOW TABLES`)
#[utoipa::path(
    get,
    path = "/table/get/{database_name}",
    tag = "Table",
    params(
        ("database_name" = String, Path, description = "Database name")
    ),
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn list_tables(
    Extension(handler): Extension<Arc<Handler>>,
    Path(database_name): Path<String>,
) -> Json<Envelope> {
    Json(handler.list_tables(&database_name).await)
}

/// Create a table (`CREATE TABLE {table_name} ({name params},...)`)
#[utoipa::path(
    post,
    path = "/table/create",
    tag = "Table",
    request_body = TableCreateRequest,
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
        (status = 422, description = "Invalid request", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn create_table(
    Extension(handler): Extension<Arc<Handler>>,
    ValidJson(request): ValidJson<TableCreateRequest>,
) -> Json<Envelope> {
    Json(handler.create_table(&request).await)
}

/// Rename a table (`RENAME TABLE {old} TO {new}`)
#[utoipa::path(
    put,
    path = "/table/rename",
    tag = "Table",
    request_body = TableRenameRequest,
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
        (status = 422, description = "Invalid request", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn rename_table(
    Extension(handler): Extension<Arc<Handler>>,
    ValidJson(request): ValidJson<TableRenameRequest>,
) -> Json<Envelope> {
    Json(handler.rename_table(&request).await)
}

/// Drop a table (`DROP TABLE {table_name}`)
#[utoipa::path(
    delete,
    path = "/table/delete",
    tag = "Table",
    request_body = TableRequest,
    responses(
        (status = 200, description = "Statement outcome", body = Envelope),
        (status = 403, description = "Bad credentials", body = Envelope),
        (status = 422, description = "Invalid request", body = Envelope),
    ),
    security(("api_key" = []))
)]
pub async fn delete_table(
    Extension(handler): Extension<Arc<Handler>>,
    ValidJson(request): ValidJson<TableRequest>,
) -> Json<Envelope> {
    Json(handler.delete_table(&request).await)
}
