//! Live integration tests for stockpulse-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh Postgres database spun up by the sqlx test harness.
//! The `migrations` path is relative to the crate root
//! (`crates/stockpulse-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use chrono::{Duration, Utc};
use stockpulse_db::{
    insert_headlines, list_headlines, run_migrations, sentiment_breakdown, DbError, NewHeadline,
};

fn headline(title: &str, sentiment: &str, confidence: f64, age_minutes: i64) -> NewHeadline {
    NewHeadline {
        title: title.to_string(),
        sentiment: sentiment.to_string(),
        confidence,
        date: Utc::now() - Duration::minutes(age_minutes),
    }
}

// ---------------------------------------------------------------------------
// Append / read round-trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn append_then_read_returns_exactly_the_appended_rows(pool: sqlx::PgPool) {
    let batch = vec![
        headline("[A] oldest", "positive", 0.95, 30),
        headline("[A] middle", "negative", 0.88, 20),
        headline("[B] newest", "neutral", 0.41, 10),
    ];

    let inserted = insert_headlines(&pool, &batch).await.expect("insert failed");
    assert_eq!(inserted, 3);

    let rows = list_headlines(&pool, None).await.expect("read failed");
    assert_eq!(rows.len(), 3, "no loss, no extra rows");

    // Read path is ordered by date descending.
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["[B] newest", "[A] middle", "[A] oldest"]);

    // No mutation: values round-trip as stored.
    assert_eq!(rows[0].sentiment, "neutral");
    assert!((rows[0].confidence - 0.41).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn duplicate_batches_append_duplicate_rows(pool: sqlx::PgPool) {
    let batch = vec![headline("[A] repeated", "positive", 0.9, 5)];

    insert_headlines(&pool, &batch).await.expect("first insert");
    insert_headlines(&pool, &batch).await.expect("second insert");

    // No dedup key exists: overlapping runs store the post twice.
    let rows = list_headlines(&pool, None).await.expect("read failed");
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn list_honors_the_row_limit(pool: sqlx::PgPool) {
    let batch: Vec<NewHeadline> = (0..5)
        .map(|i| headline(&format!("[A] item {i}"), "neutral", 0.5, i))
        .collect();
    insert_headlines(&pool, &batch).await.expect("insert failed");

    let rows = list_headlines(&pool, Some(2)).await.expect("read failed");
    assert_eq!(rows.len(), 2);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn breakdown_groups_by_label_with_mean_confidence(pool: sqlx::PgPool) {
    let batch = vec![
        headline("[A] one", "positive", 0.8, 1),
        headline("[A] two", "positive", 0.6, 2),
        headline("[A] bad", "error", 0.0, 3),
    ];
    insert_headlines(&pool, &batch).await.expect("insert failed");

    let breakdown = sentiment_breakdown(&pool).await.expect("breakdown failed");
    assert_eq!(breakdown.len(), 2);

    // Most frequent label first.
    assert_eq!(breakdown[0].sentiment, "positive");
    assert_eq!(breakdown[0].count, 2);
    assert!((breakdown[0].mean_confidence - 0.7).abs() < 1e-9);

    assert_eq!(breakdown[1].sentiment, "error");
    assert_eq!(breakdown[1].count, 1);
    assert!(breakdown[1].mean_confidence.abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Store states
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn reading_an_uninitialized_store_is_a_catchable_error(pool: sqlx::PgPool) {
    let err = list_headlines(&pool, None)
        .await
        .expect_err("read against a missing table must fail, not panic");
    assert!(matches!(err, DbError::Sqlx(_)), "got: {err:?}");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres (DATABASE_URL)"]
async fn migrations_are_idempotent(pool: sqlx::PgPool) {
    run_migrations(&pool).await.expect("first run");
    run_migrations(&pool).await.expect("second run on a ready store");

    // The store is usable after initialization.
    let rows = list_headlines(&pool, None).await.expect("read failed");
    assert!(rows.is_empty());
}
