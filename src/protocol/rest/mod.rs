//! HTTP API Module
//!
//! Assembles the router: every route sits behind the API key middleware,
//! then request tracing, optional gzip compression and CORS wrap the lot.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Extension, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::ApiKeyGate;
use crate::config::{Config, HttpConfig};
use crate::protocol::Handler;

use self::error::RestError;
use self::handlers::{api, database, row, table, user};
use self::openapi::OPENAPI_PATH;

/// Middleware: API key authentication.
/// Runs before body extraction, so a denied request never reaches a handler.
/// Only the OpenAPI document is public.
async fn auth_middleware(
    Extension(gate): Extension<Arc<ApiKeyGate>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.uri().path() == OPENAPI_PATH {
        return next.run(req).await;
    }

    let presented = req
        .headers()
        .get(gate.header())
        .and_then(|value| value.to_str().ok());

    match gate.check(presented) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                reason = ?e,
                "access_denied"
            );
            RestError::from(e).into_response()
        }
    }
}

fn cors_layer(config: &HttpConfig) -> Option<CorsLayer> {
    if config.cors_allow_all {
        // Explicit dev mode opt-in: allow all origins
        return Some(CorsLayer::permissive());
    }
    if config.cors_origins.is_empty() {
        // Same-origin only
        return None;
    }
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| {
            let parsed = s.parse::<HeaderValue>();
            if parsed.is_err() {
                tracing::warn!(origin = %s, "invalid_cors_origin_ignored");
            }
            parsed.ok()
        })
        .collect();
    // Credentials rule out wildcard methods/headers, so mirror the request.
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

/// Creates the Axum router
pub fn create_router(handler: Arc<Handler>, config: &Config) -> Router {
    let gate = Arc::new(ApiKeyGate::from_config(&config.auth));
    if !gate.is_configured() {
        tracing::warn!(header = %gate.header(), "api_key_not_configured");
    }

    let mut app = Router::new()
        .route("/api", get(api::version))
        .route("/database/get", get(database::list_databases))
        .route("/database/create", post(database::create_database))
        .route("/database/delete", delete(database::delete_database))
        .route("/table/get/:database_name", get(table::list_tables))
        .route("/table/create", post(table::create_table))
        .route("/table/rename", put(table::rename_table))
        .route("/table/delete", delete(table::delete_table))
        .route("/row/get", get(row::get_rows))
        .route("/rows/get", get(row::get_rows))
        .route("/row/insert", post(row::insert_row))
        .route("/row/update", put(row::update_row))
        .route("/row/delete", delete(row::delete_row))
        .route("/user/get", get(user::get_user))
        .route("/user/create", post(user::create_user))
        .route("/user/update", put(user::update_user))
        .route("/user/delete", delete(user::delete_user))
        .route(OPENAPI_PATH, get(openapi::openapi_json))
        .layer(Extension(Arc::new(openapi::document(gate.header()))))
        .layer(Extension(handler));

    // Extension must be the OUTER layer so the middleware can extract it.
    app = app
        .layer(middleware::from_fn(auth_middleware))
        .layer(Extension(gate))
        .layer(TraceLayer::new_for_http());

    if config.http.compression {
        app = app.layer(CompressionLayer::new());
    }

    if let Some(cors) = cors_layer(&config.http) {
        app = app.layer(cors);
    }

    app
}

/// Starts the HTTP server with graceful shutdown support.
///
/// Listens for SIGINT (ctrl-c) and SIGTERM. In-flight statements run on
/// their own tasks and are not cancelled by shutdown.
pub async fn start_http_server(
    handler: Arc<Handler>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(Arc::clone(&handler), config);

    let addr: SocketAddr = config.http.socket_addr().parse()?;

    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4()?
    } else {
        tokio::net::TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;

    tracing::info!(%addr, "http_server_listening");
    tracing::info!(docs = %format!("http://{addr}{OPENAPI_PATH}"), "openapi_available");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(
        uptime_secs = handler.uptime_seconds(),
        statements = handler.total_statements(),
        "http_server_stopped"
    );
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "sigterm_handler_failed");
                    std::future::pending::<()>().await;
                }
            }
        };
        tokio::select! {
            () = ctrl_c => tracing::info!("received_sigint"),
            () = terminate => tracing::info!("received_sigterm"),
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        tracing::info!("received_sigint");
    }
}
