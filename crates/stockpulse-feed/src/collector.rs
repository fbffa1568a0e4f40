//! Multi-page collection loop for one source.

use std::time::Duration;

use crate::client::FeedClient;
use crate::types::HotItem;

/// Collects up to `pages` pages of hot items from one source.
///
/// Pages are fetched strictly sequentially: each request depends on the
/// cursor returned by the previous one. Before every request except the
/// first, the collector pauses for `inter_page_delay` as a rate-limit
/// courtesy, so the pause lands after each successful page except the last.
///
/// Collection for the source stops when:
/// 1. the page budget is spent,
/// 2. the feed returns no continuation token (exhausted), or
/// 3. the client reports any error.
///
/// **Partial-results semantics**: a page failure is logged and absorbed, and
/// whatever was gathered from earlier pages is returned. This function never
/// fails for ordinary fetch errors.
pub async fn collect_hot_items(
    client: &FeedClient,
    source: &str,
    limit: u32,
    pages: usize,
    inter_page_delay: Duration,
) -> Vec<HotItem> {
    let mut items: Vec<HotItem> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut is_first_page = true;

    for page in 1..=pages {
        if !is_first_page && !inter_page_delay.is_zero() {
            tokio::time::sleep(inter_page_delay).await;
        }
        is_first_page = false;

        match client.fetch_hot_page(source, limit, cursor.as_deref()).await {
            Ok((page_items, next)) => {
                tracing::debug!(source, page, count = page_items.len(), "fetched hot page");
                items.extend(page_items);

                cursor = next;
                if cursor.is_none() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(
                    source,
                    page,
                    error = %e,
                    "feed page fetch failed — keeping partial results"
                );
                break;
            }
        }
    }

    tracing::info!(source, count = items.len(), "collection finished");
    items
}
