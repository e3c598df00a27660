//! `OpenAPI` Specification
//!
//! Defines the `OpenAPI` documentation for the REST API using utoipa.

use std::sync::Arc;

use axum::{Extension, Json};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use super::handlers::{api, database, row, table, user};
use crate::protocol::wire::Envelope;
use crate::schema::{
    ConditionRowRequest, ConditionValue, DatabaseRequest, DeleteRowRequest, RowCondition,
    RowRequest, TableColumnField, TableCreateRequest, TableRenameRequest, TableRequest,
    UserRequest,
};

/// Path of the served document. Reachable without an API key.
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MySQL API",
        version = "1.0.0",
        description = "HTTP API for administering MySQL databases and tables",
        license(name = "MIT")
    ),
    paths(
        api::version,
        database::list_databases,
        database::create_database,
        database::delete_database,
        table::list_tables,
        table::create_table,
        table::rename_table,
        table::delete_table,
        row::get_rows,
        row::insert_row,
        row::update_row,
        row::delete_row,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user,
    ),
    components(schemas(
        Envelope,
        DatabaseRequest,
        TableRequest,
        TableColumnField,
        TableCreateRequest,
        TableRenameRequest,
        RowRequest,
        RowCondition,
        ConditionValue,
        ConditionRowRequest,
        DeleteRowRequest,
        UserRequest,
    )),
    tags(
        (name = "API", description = "Version"),
        (name = "Database", description = "Database management"),
        (name = "Table", description = "Table management"),
        (name = "Row", description = "Row operations (not implemented)"),
        (name = "User", description = "User management (not implemented)")
    )
)]
pub struct ApiDoc;

/// The document with the `api_key` scheme every path references, carried
/// in `header`.
pub fn document(header: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi
        .components
        .get_or_insert_with(Default::default)
        .add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(header))),
        );
    openapi
}

/// Serve the document built at startup
pub async fn openapi_json(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(doc.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api",
            "/database/get",
            "/database/create",
            "/database/delete",
            "/table/get/{database_name}",
            "/table/create",
            "/table/rename",
            "/table/delete",
            "/row/insert",
            "/user/create",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_document_declares_access_token_header() {
        let doc = serde_json::to_value(document("AccessToken")).unwrap();
        let scheme = &doc["components"]["securitySchemes"]["api_key"];
        assert_eq!(scheme["in"], "header");
        assert_eq!(scheme["name"], "AccessToken");
    }

    #[test]
    fn test_document_names_configured_header() {
        let doc = serde_json::to_value(document("X-Api-Key")).unwrap();
        assert_eq!(
            doc["components"]["securitySchemes"]["api_key"]["name"],
            "X-Api-Key"
        );
    }
}
