//! Statement Executor
//!
//! Runs one statement per connection: connect, execute, fetch every row,
//! close. The statement goes over the binary protocol as an unnamed
//! prepared statement, so exactly one statement runs per call. There is no
//! pool, no transaction and no timeout. Only the first column of each result
//! row is kept.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnectOptions, MySqlDatabaseError, MySqlRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, Connection, Row, ValueRef};

use crate::config::DatabaseConfig;
use crate::statement::Statement;

/// Every way a statement can fail. Displays as the driver's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// Could not open the connection (bad credentials, unknown database, unreachable host)
    #[error("{0}")]
    Connection(String),

    /// The server rejected or failed the statement
    #[error("{0}")]
    Statement(String),

    /// A result value could not be read
    #[error("{0}")]
    Decode(String),

    /// The task running the statement panicked or was cancelled
    #[error("statement task aborted: {0}")]
    Aborted(String),
}

impl DatabaseError {
    fn connection(err: sqlx::Error) -> Self {
        DatabaseError::Connection(driver_message(&err))
    }

    fn statement(err: sqlx::Error) -> Self {
        DatabaseError::Statement(driver_message(&err))
    }

    fn decode(err: sqlx::Error) -> Self {
        DatabaseError::Decode(driver_message(&err))
    }
}

/// MySQL server errors render as `1049 (42000): Unknown database 'x'`.
pub fn driver_message(err: &sqlx::Error) -> String {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return format!(
                "{} ({}): {}",
                mysql.number(),
                mysql.code().unwrap_or("HY000"),
                mysql.message()
            );
        }
        return db.message().to_string();
    }
    err.to_string()
}

/// First-column value of one result row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "NULL"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::UInt(u) => write!(f, "{u}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "'{s}'"),
            Scalar::Bytes(b) => write!(f, "'{}'", String::from_utf8_lossy(b)),
        }
    }
}

/// Render a result list for an envelope message: `['a', 'b']`.
pub fn render_rows(rows: &[Scalar]) -> String {
    let items = rows
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{items}]")
}

/// Runs a single statement and returns the first column of every row.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Scalar>, DatabaseError>;
}

/// Executor backed by a fresh MySQL connection per call.
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    config: DatabaseConfig,
}

impl MySqlExecutor {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self, database: Option<&str>) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            // Plain server session: no sql_mode additions, server time zone.
            .pipes_as_concat(false)
            .no_engine_substitution(false)
            .timezone(None::<String>);
        if let Some(password) = &self.config.password {
            options = options.password(password);
        }
        if let Some(database) = database {
            options = options.database(database);
        }
        options
    }
}

#[async_trait]
impl StatementExecutor for MySqlExecutor {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Scalar>, DatabaseError> {
        let mut conn = self
            .connect_options(statement.database())
            .connect()
            .await
            .map_err(DatabaseError::connection)?;

        let fetched = prepared(statement).fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            tracing::debug!(error = %e, "connection_close_failed");
        }

        fetched
            .map_err(DatabaseError::statement)?
            .iter()
            .map(first_column)
            .collect()
    }
}

/// Unnamed prepared statement. The binary protocol carries exactly one
/// statement, so a `;`-joined second one is a syntax error, not a second run.
fn prepared(statement: &Statement) -> Query<'_, MySql, MySqlArguments> {
    sqlx::query(statement.sql()).persistent(false)
}

fn first_column(row: &MySqlRow) -> Result<Scalar, DatabaseError> {
    if row.columns().is_empty() {
        return Ok(Scalar::Null);
    }
    if row.try_get_raw(0).map_err(DatabaseError::decode)?.is_null() {
        return Ok(Scalar::Null);
    }
    if let Ok(v) = row.try_get::<i64, _>(0) {
        return Ok(Scalar::Int(v));
    }
    if let Ok(v) = row.try_get::<u64, _>(0) {
        return Ok(Scalar::UInt(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(0) {
        return Ok(Scalar::Float(v));
    }
    if let Ok(v) = row.try_get::<f32, _>(0) {
        return Ok(Scalar::Float(f64::from(v)));
    }
    if let Ok(v) = row.try_get::<bool, _>(0) {
        return Ok(Scalar::Bool(v));
    }
    if let Ok(v) = row.try_get::<String, _>(0) {
        return Ok(Scalar::Text(v));
    }
    let bytes = row
        .try_get::<Vec<u8>, _>(0)
        .map_err(DatabaseError::decode)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => Scalar::Text(text),
        Err(e) => Scalar::Bytes(e.into_bytes()),
    })
}
