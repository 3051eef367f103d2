//! Integration tests against a live `PostgreSQL` server.
//!
//! These cover the catalog query, column names of prepared statements, and
//! the mapping of column values to JSON.
//!
//! These tests require a running `PostgreSQL` instance reachable through the
//! `POSTGRES_*` variables. Each test creates its own tables in `public`.
//! Run with: `cargo test -- --ignored`

use axum::http::StatusCode;
use serde_json::json;
use shared::llm::CannedSqlGenerator;
use shared::storage::Database;

use super::common::{ask, get, postgres_database, run_sql, test_app_with_postgres};

// ============================================================================
// END-TO-END
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_count_customers_with_postgres() {
    run_sql(
        r#"
        DROP TABLE IF EXISTS "Customer" CASCADE;
        CREATE TABLE "Customer" (id int, name text);
        INSERT INTO "Customer" VALUES (1, 'Ada'), (2, 'Grace'), (3, 'Edsger');
        "#,
    )
    .await;

    let app = test_app_with_postgres(CannedSqlGenerator::replying(
        "```sql\nSELECT COUNT(*) FROM \"Customer\"\n```",
    ));

    let (status, body) = ask(app, "How many customers are there?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated_sql"], "SELECT COUNT(*) FROM \"Customer\"");
    assert_eq!(body["rows"], 1);
    assert_eq!(body["columns"], json!(["count"]));
    assert_eq!(body["results"], json!([{"count": 3}]));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_inspect_schema_with_postgres() {
    run_sql(
        r#"
        DROP TABLE IF EXISTS "chat_inspect_orders" CASCADE;
        CREATE TABLE "chat_inspect_orders" (id integer, placed_at date);
        "#,
    )
    .await;

    let app = test_app_with_postgres(CannedSqlGenerator::replying("SELECT 1"));
    let (status, body) = get(app, "/inspect-schema").await;

    assert_eq!(status, StatusCode::OK);
    let tables = body["tables"].as_array().unwrap();
    assert!(tables.contains(&json!("chat_inspect_orders")));
    assert!(body["schema_text"]
        .as_str()
        .unwrap()
        .contains("Table chat_inspect_orders (id integer, placed_at date)"));
}

// ============================================================================
// CATALOG
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_fetch_schema_reads_public_columns_in_order() {
    run_sql(
        r#"
        DROP TABLE IF EXISTS "chat_schema_events" CASCADE;
        CREATE TABLE "chat_schema_events" (
            id integer,
            label varchar(20),
            created timestamptz
        );
        "#,
    )
    .await;

    let columns = postgres_database().fetch_schema().await.unwrap();
    let events: Vec<(&str, &str)> = columns
        .iter()
        .filter(|c| c.table_name == "chat_schema_events")
        .map(|c| (c.column_name.as_str(), c.data_type.as_str()))
        .collect();

    assert_eq!(
        events,
        vec![
            ("id", "integer"),
            ("label", "character varying"),
            ("created", "timestamp with time zone"),
        ]
    );
}

// ============================================================================
// EXECUTION AND VALUE MAPPING
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_empty_result_keeps_columns() {
    let result = postgres_database()
        .execute("SELECT 1 AS one, 'x'::text AS two WHERE false")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["one", "two"]);
    assert_eq!(result.row_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_execution_error_carries_server_message() {
    let err = postgres_database()
        .execute("SELECT * FROM \"chat_table_that_does_not_exist\"")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires running PostgreSQL instance"]
async fn test_value_mapping() {
    run_sql(
        r"
        DROP TYPE IF EXISTS chat_mood CASCADE;
        CREATE TYPE chat_mood AS ENUM ('happy', 'sad');
        ",
    )
    .await;

    let result = postgres_database()
        .execute(
            "SELECT 12.50::numeric AS amount, \
                    'NaN'::numeric AS not_a_number, \
                    TIMESTAMPTZ '2024-03-01 12:00:00+00' AS at, \
                    DATE '2024-03-01' AS day, \
                    ARRAY[1, 2, NULL]::int4[] AS ids, \
                    ARRAY['a', 'b']::text[] AS tags, \
                    'happy'::chat_mood AS mood, \
                    true AS flag, \
                    NULL::int4 AS missing, \
                    point(1, 2) AS unmapped",
        )
        .await
        .unwrap();

    assert_eq!(result.row_count(), 1);
    assert_eq!(
        serde_json::to_value(result.records()).unwrap(),
        json!([{
            "amount": 12.5,
            "not_a_number": null,
            "at": "2024-03-01T12:00:00+00:00",
            "day": "2024-03-01",
            "ids": [1, 2, null],
            "tags": ["a", "b"],
            "mood": "happy",
            "flag": true,
            "missing": null,
            "unmapped": null,
        }])
    );
}
