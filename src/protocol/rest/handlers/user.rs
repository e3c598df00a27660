//! User Handlers
//!
//! Not implemented: user and privilege management is out of scope. Each
//! route validates its body and echoes it back unchanged.

use super::{not_implemented, NotImplemented};
use crate::protocol::rest::extract::ValidJson;
use crate::schema::UserRequest;

#[utoipa::path(
    get,
    path = "/user/get",
    tag = "User",
    request_body = UserRequest,
    responses((status = 200, description = "Request echoed unchanged", body = UserRequest)),
    security(("api_key" = []))
)]
pub async fn get_user(ValidJson(request): ValidJson<UserRequest>) -> NotImplemented<UserRequest> {
    not_implemented("/user/get", request)
}

#[utoipa::path(
    post,
    path = "/user/create",
    tag = "User",
    request_body = UserRequest,
    responses((status = 200, description = "Request echoed unchanged", body = UserRequest)),
    security(("api_key" = []))
)]
pub async fn create_user(
    ValidJson(request): ValidJson<UserRequest>,
) -> NotImplemented<UserRequest> {
    not_implemented("/user/create", request)
}

#[utoipa::path(
    put,
    path = "/user/update",
    tag = "User",
    request_body = UserRequest,
    responses((status = 200, description = "Request echoed unchanged", body = UserRequest)),
    security(("api_key" = []))
)]
pub async fn update_user(
    ValidJson(request): ValidJson<UserRequest>,
) -> NotImplemented<UserRequest> {
    not_implemented("/user/update", request)
}

#[utoipa::path(
    delete,
    path = "/user/delete",
    tag = "User",
    request_body = UserRequest,
    responses((status = 200, description = "Request echoed unchanged", body = UserRequest)),
    security(("api_key" = []))
)]
pub async fn delete_user(
    ValidJson(request): ValidJson<UserRequest>,
) -> NotImplemented<UserRequest> {
    not_implemented("/user/delete", request)
}
