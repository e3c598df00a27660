//! Handler for the MySQL API
//!
//! Route logic shared by the REST handlers: build one statement from a
//! validated request, run it, and fold the outcome into an [`Envelope`].
//! Failures never escape as errors; they become `code: 500` envelopes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::executor::{render_rows, DatabaseError, MySqlExecutor, Scalar, StatementExecutor};
use crate::schema::{DatabaseRequest, TableCreateRequest, TableRenameRequest, TableRequest};
use crate::statement::Statement;

use super::wire::{Envelope, API_VERSION};

/// Shared across requests; holds no per-request state.
pub struct Handler {
    executor: Arc<dyn StatementExecutor>,
    start_time: Instant,
    statement_count: AtomicU64,
}

impl Handler {
    /// Create a new handler with the given executor.
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            executor,
            start_time: Instant::now(),
            statement_count: AtomicU64::new(0),
        }
    }

    /// Create a handler that talks to the MySQL server in `config.database`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MySqlExecutor::new(config.database.clone())))
    }

    /// Get uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Statements handed to the executor so far.
    pub fn total_statements(&self) -> u64 {
        self.statement_count.load(Ordering::Relaxed)
    }

    /// Run one statement to completion.
    ///
    /// The statement runs on its own task: if the caller goes away the
    /// statement still finishes.
    pub async fn run(&self, statement: Statement) -> Result<Vec<Scalar>, DatabaseError> {
        self.statement_count.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(sql = %statement, database = ?statement.database(), "statement_start");

        let executor = Arc::clone(&self.executor);
        let sql = statement.to_string();
        let outcome = tokio::spawn(async move { executor.execute(&statement).await })
            .await
            .map_err(|e| DatabaseError::Aborted(e.to_string()))
            .and_then(|result| result);

        match &outcome {
            Ok(rows) => tracing::debug!(sql = %sql, rows = rows.len(), "statement_done"),
            Err(e) => tracing::error!(sql = %sql, error = %e, "statement_failed"),
        }
        outcome
    }

    async fn respond(
        &self,
        statement: Statement,
        on_success: impl FnOnce(&[Scalar]) -> String,
    ) -> Envelope {
        match self.run(statement).await {
            Ok(rows) => Envelope::ok(on_success(&rows)),
            Err(e) => Envelope::failure(e.to_string()),
        }
    }

    pub fn api_version(&self) -> Envelope {
        Envelope::ok(API_VERSION)
    }

    pub async fn list_databases(&self) -> Envelope {
        self.respond(Statement::show_databases(), |rows| {
            format!("Existing databases: {}", render_rows(rows))
        })
        .await
    }

    pub async fn create_database(&self, request: &DatabaseRequest) -> Envelope {
        let name = &request.database_name;
        let envelope = self
            .respond(Statement::create_database(name), |_| {
                format!("Database {name} has been created")
            })
            .await;
        if envelope.is_ok() {
            tracing::info!(database = %name, "database_created");
        }
        envelope
    }

    pub async fn delete_database(&self, request: &DatabaseRequest) -> Envelope {
        let name = &request.database_name;
        let envelope = self
            .respond(Statement::drop_database(name), |_| {
                format!("Database {name} has been deleted")
            })
            .await;
        if envelope.is_ok() {
            tracing::info!(database = %name, "database_deleted");
        }
        envelope
    }

    pub async fn list_tables(&self, database: &str) -> Envelope {
        self.respond(Statement::show_tables(database), |rows| {
            format!(
                "Existing tables: {} in database {database}",
                render_rows(rows)
            )
        })
        .await
    }

    pub async fn create_table(&self, request: &TableCreateRequest) -> Envelope {
        let (database, table) = (&request.database_name, &request.table_name);
        let statement = Statement::create_table(database, table, &request.columns);
        let envelope = self
            .respond(statement, |_| {
                format!("Table {table} in database {database} has been created")
            })
            .await;
        if envelope.is_ok() {
            tracing::info!(database = %database, table = %table, columns = request.columns.len(), "table_created");
        }
        envelope
    }

    pub async fn rename_table(&self, request: &TableRenameRequest) -> Envelope {
        let database = &request.database_name;
        let (old, new) = (&request.old_table_name, &request.new_table_name);
        let envelope = self
            .respond(Statement::rename_table(database, old, new), |_| {
                format!("Table {old} has been renamed to {new} in database {database}")
            })
            .await;
        if envelope.is_ok() {
            tracing::info!(database = %database, from = %old, to = %new, "table_renamed");
        }
        envelope
    }

    pub async fn delete_table(&self, request: &TableRequest) -> Envelope {
        let (database, table) = (&request.database_name, &request.table_name);
        let envelope = self
            .respond(Statement::drop_table(database, table), |_| {
                format!("Table {table} has been deleted from database {database}")
            })
            .await;
        if envelope.is_ok() {
            tracing::info!(database = %database, table = %table, "table_deleted");
        }
        envelope
    }
}
