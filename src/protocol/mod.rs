//! MySQL API Protocol
//!
//! HTTP surface, response envelope and route logic.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |  HTTP request                                               |
//! |    -> auth middleware (AccessToken header)                  |
//! |    -> ValidJson<T> (deserialize + Validate)                 |
//! |    -> rest handler -> Handler -> Statement -> Executor      |
//! |    <- Envelope { code, message }                            |
//! +-------------------------------------------------------------+
//! ```
//!
//! # Module Structure
//!
//! - `wire` - The `{code, message}` envelope
//! - `handler` - Handler implementing route logic
//! - `rest` - Router, middleware, extractors and endpoint handlers

pub mod handler;
pub mod rest;
pub mod wire;

pub use handler::Handler;
pub use wire::Envelope;
