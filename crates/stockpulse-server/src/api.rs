//! Read-only API over persisted headline sentiment.
//!
//! The dashboard is a thin view over the store: it lists rows by recency and
//! shows per-sentiment aggregates. Nothing here writes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use stockpulse_db::DbError;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
}

pub(crate) fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/headlines", get(list_headlines))
        .route("/api/summary", get(summary))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) struct ApiError(DbError);

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "store read failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "store read failed — is the schema initialized?".to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct HeadlineItem {
    id: i64,
    title: String,
    sentiment: String,
    confidence: f64,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct HeadlinesQuery {
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SummaryItem {
    sentiment: String,
    count: i64,
    mean_confidence: f64,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    total: i64,
    mean_confidence: f64,
    sentiments: Vec<SummaryItem>,
}

/// `GET /api/headlines?limit=`: persisted rows, most recent first.
async fn list_headlines(
    State(state): State<AppState>,
    Query(query): Query<HeadlinesQuery>,
) -> Result<Json<Vec<HeadlineItem>>, ApiError> {
    let rows =
        stockpulse_db::list_headlines(&state.pool, Some(normalize_limit(query.limit))).await?;

    let items = rows
        .into_iter()
        .map(|row| HeadlineItem {
            id: row.id,
            title: row.title,
            sentiment: row.sentiment,
            confidence: row.confidence,
            date: row.date,
        })
        .collect();

    Ok(Json(items))
}

/// `GET /api/summary`: per-sentiment counts and the overall mean confidence.
async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, ApiError> {
    let breakdown = stockpulse_db::sentiment_breakdown(&state.pool).await?;

    let total: i64 = breakdown.iter().map(|entry| entry.count).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean_confidence = if total == 0 {
        0.0
    } else {
        breakdown
            .iter()
            .map(|entry| entry.mean_confidence * entry.count as f64)
            .sum::<f64>()
            / total as f64
    };

    let sentiments = breakdown
        .into_iter()
        .map(|entry| SummaryItem {
            sentiment: entry.sentiment,
            count: entry.count,
            mean_confidence: entry.mean_confidence,
        })
        .collect();

    Ok(Json(SummaryResponse {
        total,
        mean_confidence,
        sentiments,
    }))
}

/// Clamp a caller-provided limit into `[1, MAX_LIMIT]`, defaulting when absent.
fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_limit_defaults_when_absent() {
        assert_eq!(normalize_limit(None), DEFAULT_LIMIT);
    }

    #[test]
    fn normalize_limit_clamps_extremes() {
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(-5)), 1);
        assert_eq!(normalize_limit(Some(1_000_000)), MAX_LIMIT);
    }

    #[test]
    fn normalize_limit_passes_reasonable_values_through() {
        assert_eq!(normalize_limit(Some(25)), 25);
    }
}
