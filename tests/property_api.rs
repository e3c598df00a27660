//! Property-based tests (proptest) over the router and statement builders.

mod common;

use common::{create_test_app, send};
use mysql_api::schema::TableColumnField;
use mysql_api::Statement;
use proptest::prelude::*;
use serde_json::json;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn created_database_is_listed(name in identifier()) {
        let listed = runtime().block_on(async {
            let (app, _fake) = create_test_app();
            send(&app, "POST", "/database/create", Some(json!({"database_name": name}))).await;
            let (_, json) = send(&app, "GET", "/database/get", None).await;
            json["message"].as_str().unwrap().to_string()
        });
        let quoted = format!("'{name}'");
        prop_assert!(listed.contains(&quoted));
    }

    #[test]
    fn deleted_database_is_not_listed(name in identifier()) {
        let (deleted, listed) = runtime().block_on(async {
            let (app, _fake) = create_test_app();
            let body = json!({"database_name": name});
            send(&app, "POST", "/database/create", Some(body.clone())).await;
            let (_, deleted) = send(&app, "DELETE", "/database/delete", Some(body)).await;
            let (_, json) = send(&app, "GET", "/database/get", None).await;
            (deleted, json["message"].as_str().unwrap().to_string())
        });
        prop_assert_eq!(deleted["code"].as_u64(), Some(200));
        let quoted = format!("'{name}'");
        prop_assert!(!listed.contains(&quoted));
    }

    #[test]
    fn api_version_never_reaches_database(query in "[a-z]{1,8}=[a-z0-9]{0,8}") {
        let (json, calls) = runtime().block_on(async {
            let (app, fake) = create_test_app();
            let (_, json) = send(&app, "GET", &format!("/api?{query}"), None).await;
            (json, fake.calls())
        });
        prop_assert_eq!(json["message"].as_str(), Some("MySQL API version 1.0.0"));
        prop_assert_eq!(calls, 0);
    }

    #[test]
    fn row_insert_echoes_any_scalar_values(
        columns in prop::collection::vec(identifier(), 1..6),
        seed in any::<i64>(),
    ) {
        let values: Vec<_> = columns
            .iter()
            .enumerate()
            .map(|(i, _)| if i % 2 == 0 { json!(seed) } else { json!(format!("v{i}")) })
            .collect();
        let body = json!({
            "database_name": "d",
            "table_name": "t",
            "columns": columns,
            "values": values,
        });
        let (echoed, calls) = runtime().block_on(async {
            let (app, fake) = create_test_app();
            let (_, json) = send(&app, "POST", "/row/insert", Some(body.clone())).await;
            (json, fake.calls())
        });
        prop_assert_eq!(echoed, body);
        prop_assert_eq!(calls, 0);
    }

    #[test]
    fn create_table_lists_every_column_in_order(
        table in identifier(),
        names in prop::collection::vec(identifier(), 1..8),
    ) {
        let columns: Vec<TableColumnField> = names
            .iter()
            .map(|name| TableColumnField { name: name.clone(), params: "INT".to_string() })
            .collect();
        let statement = Statement::create_table("db", &table, &columns);
        let expected = names
            .iter()
            .map(|n| format!("{n} INT"))
            .collect::<Vec<_>>()
            .join(",");
        prop_assert_eq!(statement.sql(), format!("CREATE TABLE {table} ({expected})"));
        prop_assert_eq!(statement.database(), Some("db"));
    }
}
