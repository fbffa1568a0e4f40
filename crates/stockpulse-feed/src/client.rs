//! HTTP client for one page of a forum's hot feed.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use crate::error::FeedError;
use crate::types::{HotItem, Listing};

/// Client for a paginated hot-feed endpoint.
///
/// Stateless between calls: the continuation cursor is passed in and handed
/// back explicitly, so a single client can serve any number of sources.
///
/// A non-success status is returned as a typed error and is never retried;
/// the calling collector treats it as the end of that source's availability.
pub struct FeedClient {
    client: Client,
    base_url: String,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given base URL, request timeout, and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches one page of hot posts for `source`, returning the page's
    /// non-sticky items and the continuation token for the next page.
    ///
    /// `after` is the cursor from the previous page, or `None` for the first
    /// page. A returned `None` cursor means the feed is exhausted.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] — any non-2xx status. Not retried.
    /// - [`FeedError::Http`] — network or TLS failure.
    /// - [`FeedError::Deserialize`] — response body is not a valid listing.
    /// - [`FeedError::InvalidBaseUrl`] — the configured base URL is unusable.
    pub async fn fetch_hot_page(
        &self,
        source: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<(Vec<HotItem>, Option<String>), FeedError> {
        let url = self.hot_url(source, limit, after)?;

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let listing =
            serde_json::from_str::<Listing>(&body).map_err(|e| FeedError::Deserialize {
                context: format!("hot listing for r/{source}"),
                source: e,
            })?;

        let observed_at = Utc::now();
        let items = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter(|post| !post.stickied)
            .map(|post| HotItem {
                source_url: post.url.unwrap_or_default(),
                title: post.title,
                score: post.score,
                observed_at,
            })
            .collect();

        // Some feeds signal exhaustion with an empty-string cursor.
        let next = listing.data.after.filter(|cursor| !cursor.is_empty());

        Ok((items, next))
    }

    /// Builds the hot-listing URL for the given source, page size, and
    /// optional cursor.
    fn hot_url(&self, source: &str, limit: u32, after: Option<&str>) -> Result<String, FeedError> {
        let base = format!("{}/r/{}/hot.json", self.base_url, source);
        let mut url = reqwest::Url::parse(&base).map_err(|e| FeedError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        if let Some(cursor) = after {
            url.query_pairs_mut().append_pair("after", cursor);
        }

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
