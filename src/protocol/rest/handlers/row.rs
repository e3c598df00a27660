//! Row Handlers
//!
//! Not implemented: each route validates its body and echoes it back with
//! the `x-not-implemented` header. No SQL is issued.

use super::{not_implemented, NotImplemented};
use crate::protocol::rest::extract::ValidJson;
use crate::schema::{ConditionRowRequest, DeleteRowRequest, RowRequest};

/// Get rows (not implemented)
#[utoipa::path(
    get,
    path = "/row/get",
    tag = "Row",
    request_body = RowRequest,
    responses((status = 200, description = "Request echoed unchanged", body = RowRequest)),
    security(("api_key" = []))
)]
pub async fn get_rows(ValidJson(request): ValidJson<RowRequest>) -> NotImplemented<RowRequest> {
    not_implemented("/row/get", request)
}

/// Insert a row (not implemented)
#[utoipa::path(
    post,
    path = "/row/insert",
    tag = "Row",
    request_body = RowRequest,
    responses((status = 200, description = "Request echoed unchanged", body = RowRequest)),
    security(("api_key" = []))
)]
pub async fn insert_row(ValidJson(request): ValidJson<RowRequest>) -> NotImplemented<RowRequest> {
    not_implemented("/row/insert", request)
}

/// Update rows matching a condition (not implemented)
#[utoipa::path(
    put,
    path = "/row/update",
    tag = "Row",
    request_body = ConditionRowRequest,
    responses((status = 200, description = "Request echoed unchanged", body = ConditionRowRequest)),
    security(("api_key" = []))
)]
pub async fn update_row(
    ValidJson(request): ValidJson<ConditionRowRequest>,
) -> NotImplemented<ConditionRowRequest> {
    not_implemented("/row/update", request)
}

/// Delete rows matching a condition (not implemented)
#[utoipa::path(
    delete,
    path = "/row/delete",
    tag = "Row",
    request_body = DeleteRowRequest,
    responses((status = 200, description = "Request echoed unchanged", body = DeleteRowRequest)),
    security(("api_key" = []))
)]
pub async fn delete_row(
    ValidJson(request): ValidJson<DeleteRowRequest>,
) -> NotImplemented<DeleteRowRequest> {
    not_implemented("/row/delete", request)
}
