//! One-shot collect → classify → persist run.

use std::time::Duration;

use sqlx::PgPool;

use stockpulse_core::AppConfig;
use stockpulse_db::NewHeadline;
use stockpulse_feed::{collect_hot_items, FeedClient, HotItem};
use stockpulse_sentiment::SentimentClassifier;

/// Outcome of one pipeline run.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PipelineOutcome {
    /// No source yielded items; persistence was not attempted.
    NoData,
    /// The classified batch was appended to the store.
    Stored { rows: usize },
}

/// Run the full pipeline once.
///
/// 1. Collect hot items from every configured source, in order, tagging each
///    item with its source. Per-source feed failures have already been
///    absorbed by the collector (partial results).
/// 2. Short-circuit with [`PipelineOutcome::NoData`] if nothing was
///    collected.
/// 3. Classify every item sequentially; classifier faults become `error`
///    sentinel rows and never abort the batch.
/// 4. Append the batch to the store.
///
/// # Errors
///
/// Only the final persistence write fails a run; everything upstream
/// degrades to partial or sentinel results.
pub(crate) async fn run_pipeline(
    pool: &PgPool,
    client: &FeedClient,
    classifier: &SentimentClassifier,
    config: &AppConfig,
) -> anyhow::Result<PipelineOutcome> {
    let delay = Duration::from_secs(config.feed_inter_page_delay_secs);

    // Step 1: collect. Source order is preserved in the final batch.
    let mut collected: Vec<(String, HotItem)> = Vec::new();
    for source in &config.sources {
        tracing::info!(source, "collecting hot headlines");
        let items = collect_hot_items(
            client,
            source,
            config.feed_page_limit,
            config.feed_page_count,
            delay,
        )
        .await;
        collected.extend(items.into_iter().map(|item| (source.clone(), item)));
    }

    // Step 2: nothing collected is an informational outcome, not an error.
    if collected.is_empty() {
        tracing::info!("no items collected from any source — skipping persistence");
        return Ok(PipelineOutcome::NoData);
    }

    // Step 3: classify in collection order.
    tracing::info!(count = collected.len(), "classifying headlines");
    let rows = classify_batch(classifier, &collected);

    // Step 4: append; a write fault is the run-level failure.
    let stored = stockpulse_db::insert_headlines(pool, &rows).await?;
    tracing::info!(rows = stored, "stored classified headlines");
    Ok(PipelineOutcome::Stored { rows: stored })
}

/// Classify tagged items into insertable rows, preserving order.
///
/// The raw title is what the model sees; the persisted title carries the
/// `[<source>] ` provenance prefix.
fn classify_batch(
    classifier: &SentimentClassifier,
    items: &[(String, HotItem)],
) -> Vec<NewHeadline> {
    items
        .iter()
        .map(|(source, item)| {
            let result = classifier.classify(&item.title);
            tracing::debug!(
                sentiment = %result.sentiment,
                confidence = result.confidence,
                title = %item.title,
                "classified headline"
            );
            NewHeadline {
                title: tag_title(source, &item.title),
                sentiment: result.sentiment.as_str().to_string(),
                confidence: result.confidence,
                date: item.observed_at,
            }
        })
        .collect()
}

fn tag_title(source: &str, title: &str) -> String {
    format!("[{source}] {title}")
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
