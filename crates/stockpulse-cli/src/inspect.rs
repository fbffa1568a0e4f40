//! Read-only inspection of the persisted store.

use anyhow::Context;
use sqlx::PgPool;

/// Print recent rows and the per-sentiment breakdown.
///
/// # Errors
///
/// Fails with context when the store cannot be read, most commonly because
/// the schema has not been initialized yet.
pub(crate) async fn run_inspect(pool: &PgPool, limit: Option<i64>) -> anyhow::Result<()> {
    let rows = stockpulse_db::list_headlines(pool, limit)
        .await
        .context("failed to read headline_sentiment — run `stockpulse-cli init-db` first?")?;

    if rows.is_empty() {
        println!("the table is empty");
        return Ok(());
    }

    println!("{} rows (most recent first):", rows.len());
    for row in &rows {
        println!(
            "  {}  {:<8}  {:.2}  {}",
            row.date.format("%Y-%m-%d %H:%M"),
            row.sentiment,
            row.confidence,
            row.title
        );
    }

    let breakdown = stockpulse_db::sentiment_breakdown(pool).await?;
    println!("\nbreakdown:");
    for entry in &breakdown {
        println!(
            "  {:<8}  {:>5} rows  mean confidence {:.2}",
            entry.sentiment, entry.count, entry.mean_confidence
        );
    }

    Ok(())
}
