//! # Request Schema Module
//!
//! Typed request bodies for every route. Each shape spells out the fields
//! of its logical parent (database → table → table-create, ...) rather than
//! nesting them, so the JSON stays flat.
//!
//! Deserialization enforces presence and types; [`Validate`] enforces the
//! remaining invariants. Nothing here escapes or quotes identifiers.

pub mod validator;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub use validator::{Validate, ValidationError, ViolationType};

use validator::{has_items, non_empty, same_length, scalars};

// Database

/// Request naming one database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseRequest {
    pub database_name: String,
}

impl Validate for DatabaseRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)
    }
}

// Table

/// Column definition: name plus a raw type/constraint fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableColumnField {
    pub name: String,
    /// e.g. `INT NOT NULL`
    pub params: String,
}

/// Request naming one table in one database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableRequest {
    pub database_name: String,
    pub table_name: String,
}

impl Validate for TableRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("table_name", &self.table_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableCreateRequest {
    pub database_name: String,
    pub table_name: String,
    pub columns: Vec<TableColumnField>,
}

impl Validate for TableCreateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("table_name", &self.table_name)?;
        has_items("columns", &self.columns)?;
        for (i, column) in self.columns.iter().enumerate() {
            non_empty(&format!("columns[{i}].name"), &column.name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableRenameRequest {
    pub database_name: String,
    pub old_table_name: String,
    pub new_table_name: String,
}

impl Validate for TableRenameRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("old_table_name", &self.old_table_name)?;
        non_empty("new_table_name", &self.new_table_name)
    }
}

// Row

/// Value side of a row condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ConditionValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// `column = value` filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RowCondition {
    pub column: String,
    pub value: ConditionValue,
}

impl RowCondition {
    fn validate_at(&self, field: &str) -> Result<(), ValidationError> {
        non_empty(&format!("{field}.column"), &self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RowRequest {
    pub database_name: String,
    pub table_name: String,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub values: Vec<Value>,
}

impl Validate for RowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("table_name", &self.table_name)?;
        same_length(self.columns.len(), self.values.len())?;
        scalars("values", &self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionRowRequest {
    pub database_name: String,
    pub table_name: String,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub values: Vec<Value>,
    pub condition: RowCondition,
}

impl Validate for ConditionRowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("table_name", &self.table_name)?;
        same_length(self.columns.len(), self.values.len())?;
        scalars("values", &self.values)?;
        self.condition.validate_at("condition")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteRowRequest {
    pub database_name: String,
    pub table_name: String,
    pub condition: RowCondition,
}

impl Validate for DeleteRowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("database_name", &self.database_name)?;
        non_empty("table_name", &self.table_name)?;
        self.condition.validate_at("condition")
    }
}

// User

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRequest {
    pub username: String,
    pub table_name: String,
    #[schema(value_type = Object)]
    pub privileges: BTreeMap<String, Value>,
}

impl Validate for UserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("username", &self.username)
    }
}
