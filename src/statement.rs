//! SQL statement templates
//!
//! Every implemented route maps to exactly one [`Statement`]. Identifiers
//! and column fragments are interpolated verbatim: no quoting, no escaping,
//! no parameters.

use std::fmt;

use crate::schema::TableColumnField;

/// One SQL statement plus the database its connection is opened against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    database: Option<String>,
}

impl Statement {
    /// Statement run on a connection with no database selected.
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            database: None,
        }
    }

    /// Statement run on a connection opened against `database`.
    pub fn scoped(sql: impl Into<String>, database: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            database: Some(database.into()),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn show_databases() -> Self {
        Self::new("SHOW DATABASES")
    }

    pub fn create_database(database: &str) -> Self {
        Self::new(format!("CREATE DATABASE {database}"))
    }

    pub fn drop_database(database: &str) -> Self {
        Self::new(format!("DROP DATABASE {database}"))
    }

    pub fn show_tables(database: &str) -> Self {
        Self::scoped("SHOW TABLES", database)
    }

    /// `CREATE TABLE t (name params,name params,...)`
    pub fn create_table(database: &str, table: &str, columns: &[TableColumnField]) -> Self {
        let columns = columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.params))
            .collect::<Vec<_>>()
            .join(",");
        Self::scoped(format!("CREATE TABLE {table} ({columns})"), database)
    }

    pub fn rename_table(database: &str, old_table: &str, new_table: &str) -> Self {
        Self::scoped(format!("RENAME TABLE {old_table} TO {new_table}"), database)
    }

    pub fn drop_table(database: &str, table: &str) -> Self {
        Self::scoped(format!("DROP TABLE {table}"), database)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, params: &str) -> TableColumnField {
        TableColumnField {
            name: name.to_string(),
            params: params.to_string(),
        }
    }

    #[test]
    fn test_database_statements_are_unscoped() {
        let show = Statement::show_databases();
        assert_eq!(show.sql(), "SHOW DATABASES");
        assert_eq!(show.database(), None);

        let create = Statement::create_database("shop");
        assert_eq!(create.sql(), "CREATE DATABASE shop");
        assert_eq!(create.database(), None);

        assert_eq!(Statement::drop_database("shop").sql(), "DROP DATABASE shop");
    }

    #[test]
    fn test_table_statements_are_scoped() {
        let show = Statement::show_tables("shop");
        assert_eq!(show.sql(), "SHOW TABLES");
        assert_eq!(show.database(), Some("shop"));

        let rename = Statement::rename_table("shop", "orders", "orders_old");
        assert_eq!(rename.sql(), "RENAME TABLE orders TO orders_old");
        assert_eq!(rename.database(), Some("shop"));

        let drop = Statement::drop_table("shop", "orders");
        assert_eq!(drop.sql(), "DROP TABLE orders");
        assert_eq!(drop.database(), Some("shop"));
    }

    #[test]
    fn test_create_table_joins_columns_in_order() {
        let statement = Statement::create_table(
            "shop",
            "orders",
            &[
                column("id", "INT NOT NULL PRIMARY KEY"),
                column("note", "TEXT"),
            ],
        );
        assert_eq!(
            statement.sql(),
            "CREATE TABLE orders (id INT NOT NULL PRIMARY KEY,note TEXT)"
        );
        assert_eq!(statement.database(), Some("shop"));
    }

    #[test]
    fn test_identifiers_are_not_escaped() {
        let statement = Statement::drop_table("d", "t; DROP DATABASE d");
        assert_eq!(statement.sql(), "DROP TABLE t; DROP DATABASE d");
    }

    #[test]
    fn test_display_is_sql() {
        assert_eq!(
            Statement::create_database("x").to_string(),
            "CREATE DATABASE x"
        );
    }
}
