//! # MySQL API
//!
//! A thin HTTP API over a MySQL server. Each endpoint takes a JSON body,
//! interpolates its fields into one SQL statement, runs it on a fresh
//! connection and answers with a `{code, message}` envelope.
//!
//! ## Request Flow
//! ```text
//! HTTP request
//!     ↓
//! [Auth middleware]      → 403 unless AccessToken matches
//!     ↓
//! [ValidJson<T>]         → 4xx on shape or invariant errors
//!     ↓
//! [Handler]              → Statement (SQL + optional database scope)
//!     ↓
//! [StatementExecutor]    → connect, execute, fetch, close
//!     ↓
//! Envelope { code: 200 | 500, message }
//! ```
//!
//! Identifiers are interpolated verbatim. Nothing here quotes, escapes or
//! parameterizes SQL.
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use mysql_api::{protocol::{rest, Handler}, Config};
//!
//! let config = Config::load()?;
//! let handler = Arc::new(Handler::from_config(&config));
//! rest::start_http_server(handler, &config).await?;
//! ```

pub mod auth;
pub mod config;
pub mod executor;
pub mod protocol;
pub mod schema;
pub mod statement;

pub use config::Config;
pub use executor::{DatabaseError, MySqlExecutor, Scalar, StatementExecutor};
pub use statement::Statement;
