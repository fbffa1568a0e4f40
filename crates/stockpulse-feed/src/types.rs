use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One non-sticky forum post as fetched from a hot feed page.
///
/// Lives only for the duration of a collection run; classification output is
/// what gets persisted, never the raw item.
#[derive(Debug, Clone)]
pub struct HotItem {
    pub title: String,
    /// Source-reported popularity. Informational only.
    pub score: i64,
    pub source_url: String,
    /// Stamped when the page is decoded, not the post's creation time.
    pub observed_at: DateTime<Utc>,
}

/// Feed listing envelope: `{"data": {"children": [...], "after": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub(crate) data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    pub(crate) children: Vec<Child>,
    pub(crate) after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Child {
    pub(crate) data: PostData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostData {
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) score: i64,
    #[serde(default)]
    pub(crate) url: Option<String>,
    /// Absent on some item kinds; absent means not pinned.
    #[serde(default)]
    pub(crate) stickied: bool,
}
