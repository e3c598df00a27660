//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - config.toml (default configuration)
//! - config.local.toml (git-ignored local overrides)
//! - Environment variables (MYSQLAPI_* prefix)
//! - The legacy deployment variables (MYSQL_HOST, MYSQL_PORT, MYSQL_USER,
//!   MYSQL_ROOT_PASSWORD, API_KEY)
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [database]
//! host = "db.internal"
//! user = "admin"
//!
//! [auth]
//! api_key = "change-me"
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! MYSQLAPI_DATABASE__HOST=10.0.0.5
//! MYSQLAPI_HTTP__PORT=9000
//! API_KEY=s3cret
//! ```

use std::collections::BTreeMap;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// `(variable, section, key)` for every string field settable from the
/// environment. These are read verbatim: the `Env` provider parses values
/// as TOML scalars, which would turn `API_KEY=0123` into `123`.
type EnvField = (&'static str, &'static str, &'static str);

type EnvSections = BTreeMap<&'static str, BTreeMap<&'static str, String>>;

const PREFIXED_STRING_ENV: &[EnvField] = &[
    ("MYSQLAPI_HTTP__HOST", "http", "host"),
    ("MYSQLAPI_DATABASE__HOST", "database", "host"),
    ("MYSQLAPI_DATABASE__USER", "database", "user"),
    ("MYSQLAPI_DATABASE__PASSWORD", "database", "password"),
    ("MYSQLAPI_AUTH__HEADER", "auth", "header"),
    ("MYSQLAPI_AUTH__API_KEY", "auth", "api_key"),
    ("MYSQLAPI_LOGGING__LEVEL", "logging", "level"),
    ("MYSQLAPI_LOGGING__FORMAT", "logging", "format"),
    ("MYSQLAPI_LOGGING__FILE", "logging", "file"),
];

/// Legacy deployment variables. `MYSQL_PORT` is numeric and goes through `Env`.
const LEGACY_STRING_ENV: &[EnvField] = &[
    ("MYSQL_HOST", "database", "host"),
    ("MYSQL_USER", "database", "user"),
    ("MYSQL_ROOT_PASSWORD", "database", "password"),
    ("API_KEY", "auth", "api_key"),
];

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// HTTP server bind address
    #[serde(default = "default_http_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Allowed CORS origins. Credentials are allowed for these origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Explicitly allow all CORS origins (dev mode opt-in, no credentials)
    #[serde(default)]
    pub cors_allow_all: bool,

    /// Gzip-compress responses when the client accepts it
    #[serde(default = "default_true")]
    pub compression: bool,
}

/// Connection settings for the MySQL server
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,
}

/// API key authentication
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Request header carrying the key
    #[serde(default = "default_auth_header")]
    pub header: String,

    /// Shared secret. When unset, every protected route is denied.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Append-only log file
    #[serde(default = "default_log_file")]
    pub file: String,
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("header", &self.header)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_http_host() -> String {
    "127.0.0.1".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://127.0.0.1:8080".to_string(),
        "http://localhost:8080".to_string(),
    ]
}
fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    3306
}
fn default_db_user() -> String {
    "root".to_string()
}
fn default_auth_header() -> String {
    "AccessToken".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}
fn default_log_file() -> String {
    "debug.log".to_string()
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Merges in order:
    /// 1. config.toml (base configuration)
    /// 2. config.local.toml (local overrides, git-ignored)
    /// 3. Environment variables (MYSQLAPI_* prefix)
    /// 4. Legacy variables (MYSQL_HOST, MYSQL_PORT, MYSQL_USER, MYSQL_ROOT_PASSWORD, API_KEY)
    ///
    /// String fields from 3 and 4 keep the exact text of the variable.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(
            Figment::new()
                .merge(Toml::file("config.toml"))
                .merge(Toml::file("config.local.toml")),
        )
        .extract()
    }

    /// Load configuration from specific file path
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Self::figment(Figment::new().merge(Toml::file(path))).extract()
    }

    fn figment(base: Figment) -> Figment {
        base.merge(Env::prefixed("MYSQLAPI_").split("__"))
            .merge(verbatim_env(PREFIXED_STRING_ENV))
            .merge(Env::raw().only(&["MYSQL_PORT"]).map(|_| "database.port".into()))
            .merge(verbatim_env(LEGACY_STRING_ENV))
    }
}

/// Set, non-empty variables from `fields`, nested by section, as plain strings.
fn verbatim_env(fields: &[EnvField]) -> Serialized<EnvSections> {
    let mut sections = EnvSections::new();
    for (var, section, key) in fields {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => {
                sections.entry(*section).or_default().insert(*key, value);
            }
            _ => {}
        }
    }
    Serialized::defaults(sections)
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            host: default_http_host(),
            port: default_http_port(),
            cors_origins: default_cors_origins(),
            cors_allow_all: false,
            compression: true,
        }
    }
}

impl HttpConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            header: default_auth_header(),
            api_key: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
        }
    }
}
