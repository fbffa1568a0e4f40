//! Database operations for the `headline_sentiment` table.
//!
//! Append-only: this module exposes no UPDATE or DELETE. Overlapping
//! collection runs insert duplicate rows for the same underlying post; no
//! deduplication key exists in the schema.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A classified headline ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHeadline {
    /// Display title, already prefixed with its source tag.
    pub title: String,
    /// One of `positive`, `negative`, `neutral`, `error`.
    pub sentiment: String,
    /// Argmax probability in [0, 1]; exactly 0.0 for `error` rows.
    pub confidence: f64,
    /// When the underlying post was observed by the collector.
    pub date: DateTime<Utc>,
}

/// A row from the `headline_sentiment` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HeadlineRow {
    pub id: i64,
    pub title: String,
    pub sentiment: String,
    pub confidence: f64,
    pub date: DateTime<Utc>,
}

/// Per-label aggregate over all persisted rows.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SentimentBreakdown {
    pub sentiment: String,
    pub count: i64,
    pub mean_confidence: f64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Append a batch of classified headlines as new rows.
///
/// Rows are written inside a single transaction in batch order, so a fault
/// leaves the store without a partial batch. An empty batch is a no-op and
/// returns 0.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction or any insert fails.
pub async fn insert_headlines(pool: &PgPool, rows: &[NewHeadline]) -> Result<usize, DbError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO headline_sentiment (title, sentiment, confidence, date) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&row.title)
        .bind(&row.sentiment)
        .bind(row.confidence)
        .bind(row.date)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(rows.len())
}

/// List persisted headlines ordered by `date DESC` then `id DESC`.
///
/// `limit` of `None` returns every row (the inspection path); viewers pass an
/// explicit cap.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, including when the store
/// has not been initialized yet.
pub async fn list_headlines(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<HeadlineRow>, DbError> {
    let rows = match limit {
        Some(limit) => {
            sqlx::query_as::<_, HeadlineRow>(
                "SELECT id, title, sentiment, confidence, date \
                 FROM headline_sentiment \
                 ORDER BY date DESC, id DESC \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, HeadlineRow>(
                "SELECT id, title, sentiment, confidence, date \
                 FROM headline_sentiment \
                 ORDER BY date DESC, id DESC",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Per-sentiment row counts and mean confidence, most frequent label first.
///
/// Presentation data for the dashboard and the inspect command; `error` rows
/// participate with their stored 0.0 confidence.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn sentiment_breakdown(pool: &PgPool) -> Result<Vec<SentimentBreakdown>, DbError> {
    let rows = sqlx::query_as::<_, SentimentBreakdown>(
        "SELECT sentiment, COUNT(*) AS count, AVG(confidence) AS mean_confidence \
         FROM headline_sentiment \
         GROUP BY sentiment \
         ORDER BY count DESC, sentiment",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
