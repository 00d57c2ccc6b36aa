use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use feed_rs::model::Entry;
use metrics::{counter, histogram};

use crate::ingest::types::{FeedEntry, FeedFetcher};

const USER_AGENT: &str = "news-digest-bot/0.1";

/// Fetches feeds over HTTP and parses them with `feed-rs` (RSS 0.9x/2.0, Atom, JSON Feed).
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let body = self
            .client
            .get(url)
            .send()
            .await
            .context("feed http get()")?
            .error_for_status()
            .context("feed non-2xx")?
            .bytes()
            .await
            .context("feed http .bytes()")?;
        parse_feed(&body)
    }
}

/// Parse a raw feed document into entries, keeping feed order.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let t0 = std::time::Instant::now();
    let feed = feed_rs::parser::parse(bytes).context("parsing feed document")?;
    let out: Vec<FeedEntry> = feed.entries.into_iter().map(to_feed_entry).collect();

    histogram!("feed_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    counter!("feed_entries_parsed_total").increment(out.len() as u64);
    Ok(out)
}

fn to_feed_entry(e: Entry) -> FeedEntry {
    let summary = e
        .summary
        .map(|t| t.content)
        .or_else(|| e.content.and_then(|c| c.body));
    FeedEntry {
        title: e.title.map(|t| t.content),
        link: e.links.into_iter().next().map(|l| l.href),
        summary,
        author: e
            .authors
            .into_iter()
            .map(|p| p.name)
            .find(|n| !n.trim().is_empty()),
        published: e.published,
        updated: e.updated,
    }
}
