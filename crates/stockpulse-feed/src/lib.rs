//! Paginated collection of discussion headlines from forum hot feeds.
//!
//! [`FeedClient`] fetches one page at a time, threading the feed's opaque
//! continuation token explicitly through calls. [`collect_hot_items`] drives
//! the client across a per-source page budget with a fixed courtesy delay
//! between requests, and keeps partial results when a page fails.

mod client;
mod collector;
mod error;
mod types;

pub use client::FeedClient;
pub use collector::collect_hot_items;
pub use error::FeedError;
pub use types::HotItem;
