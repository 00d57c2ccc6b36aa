// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};

pub const UNKNOWN_AUTHOR: &str = "unknown";
pub const UNTITLED: &str = "untitled";
pub const NO_LINK: &str = "no link";

/// A syndication feed the bot reads from. Fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// One parsed entry, as handed back by a [`FeedFetcher`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl FeedEntry {
    /// `published`, falling back to `updated`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.published.or(self.updated)
    }
}

/// A recent entry that made it into the bulletin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub author: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItem {
    /// Three-line block: `[author] title`, summary, link.
    pub fn render(&self) -> String {
        format!(
            "[{}] {}\n{}\n{}",
            self.author, self.title, self.summary, self.link
        )
    }
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse the feed at `url`, entries in feed order.
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>>;
}
