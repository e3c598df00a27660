//! Shared fixtures: an in-memory stand-in for the MySQL server.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mysql_api::protocol::rest::create_router;
use mysql_api::protocol::Handler;
use mysql_api::{Config, DatabaseError, Scalar, Statement, StatementExecutor};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const API_KEY: &str = "test-key";

/// Understands the handful of statements the API issues.
#[derive(Default)]
pub struct FakeMySql {
    databases: Mutex<BTreeMap<String, BTreeSet<String>>>,
    calls: AtomicUsize,
    pub log: Mutex<Vec<Statement>>,
}

impl FakeMySql {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn run(&self, statement: &Statement) -> Result<Vec<Scalar>, DatabaseError> {
        let sql = statement.sql();
        let mut dbs = self.databases.lock();
        let words: Vec<&str> = sql.split_whitespace().collect();

        let scope = match statement.database() {
            Some(db) if !dbs.contains_key(db) => {
                return Err(DatabaseError::Connection(format!(
                    "1049 (42000): Unknown database '{db}'"
                )))
            }
            other => other.map(str::to_string),
        };

        match words.as_slice() {
            ["SHOW", "DATABASES"] => Ok(dbs.keys().cloned().map(Scalar::Text).collect()),
            ["CREATE", "DATABASE", name] => {
                if dbs.contains_key(*name) {
                    return Err(DatabaseError::Statement(format!(
                        "1007 (HY000): Can't create database '{name}'; database exists"
                    )));
                }
                dbs.insert((*name).to_string(), BTreeSet::new());
                Ok(vec![])
            }
            ["DROP", "DATABASE", name] => match dbs.remove(*name) {
                Some(_) => Ok(vec![]),
                None => Err(DatabaseError::Statement(format!(
                    "1008 (HY000): Can't drop database '{name}'; database doesn't exist"
                ))),
            },
            ["SHOW", "TABLES"] => {
                let db = scope.ok_or_else(no_database)?;
                Ok(dbs[&db].iter().cloned().map(Scalar::Text).collect())
            }
            ["CREATE", "TABLE", name, ..] => {
                let db = scope.ok_or_else(no_database)?;
                dbs.get_mut(&db)
                    .map(|tables| tables.insert((*name).to_string()));
                Ok(vec![])
            }
            ["RENAME", "TABLE", old, "TO", new] => {
                let db = scope.ok_or_else(no_database)?;
                let tables = dbs.get_mut(&db).ok_or_else(no_database)?;
                if !tables.remove(*old) {
                    return Err(DatabaseError::Statement(format!(
                        "1146 (42S02): Table '{db}.{old}' doesn't exist"
                    )));
                }
                tables.insert((*new).to_string());
                Ok(vec![])
            }
            ["DROP", "TABLE", name] => {
                let db = scope.ok_or_else(no_database)?;
                let tables = dbs.get_mut(&db).ok_or_else(no_database)?;
                if tables.remove(*name) {
                    Ok(vec![])
                } else {
                    Err(DatabaseError::Statement(format!(
                        "1051 (42S02): Unknown table '{db}.{name}'"
                    )))
                }
            }
            _ => Err(DatabaseError::Statement(format!(
                "1064 (42000): You have an error in your SQL syntax near '{sql}'"
            ))),
        }
    }
}

fn no_database() -> DatabaseError {
    DatabaseError::Statement("1046 (3D000): No database selected".to_string())
}

#[async_trait]
impl StatementExecutor for FakeMySql {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Scalar>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().push(statement.clone());
        self.run(statement)
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.api_key = Some(API_KEY.to_string());
    config
}

pub fn create_test_app() -> (Router, Arc<FakeMySql>) {
    let fake = Arc::new(FakeMySql::default());
    let handler = Arc::new(Handler::new(fake.clone()));
    (create_router(handler, &test_config()), fake)
}

/// Send a request with the test API key; returns status and JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_key(app, method, uri, body, Some(API_KEY)).await
}

pub async fn send_with_key(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    key: Option<&str>,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(build_request(method, uri, body, key))
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

pub fn build_request(
    method: &str,
    uri: &str,
    body: Option<Value>,
    key: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("AccessToken", key);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
