// src/ingest/mod.rs
pub mod providers;
pub mod types;

use chrono::{DateTime, Duration, Utc};
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingest::types::{
    FeedEntry, FeedFetcher, FeedSource, NewsItem, NO_LINK, UNKNOWN_AUTHOR, UNTITLED,
};

/// Substituted for the bulletin when nothing recent survived filtering.
pub const NO_RECENT_ITEMS: &str =
    "No recent news items were found (the feeds are probably blocked or empty).";

/// Raw summary ceiling, in characters, applied before cleaning.
pub const SUMMARY_MAX_CHARS: usize = 300;

#[derive(Clone, Copy, Debug)]
pub struct AggregateOptions {
    pub recency_window: Duration,
    pub per_source_cap: usize,
    pub total_cap: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            recency_window: Duration::hours(3),
            per_source_cap: 8,
            total_cap: 20,
        }
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Bulletin {
    pub items: Vec<NewsItem>,
    pub sources_attempted: usize,
    pub sources_failed: usize,
}

impl Bulletin {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Timestamp of the most recent item kept.
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.items.iter().filter_map(|i| i.published_at).max()
    }

    /// Rendered items joined by a blank line, or [`NO_RECENT_ITEMS`].
    pub fn text(&self) -> String {
        if self.items.is_empty() {
            return NO_RECENT_ITEMS.to_string();
        }
        self.items
            .iter()
            .map(NewsItem::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Aggregate all sources relative to the current time.
pub async fn aggregate(
    fetcher: &dyn FeedFetcher,
    sources: &[FeedSource],
    opts: &AggregateOptions,
) -> Bulletin {
    aggregate_at(fetcher, sources, opts, Utc::now()).await
}

/// Fetch each source in order, keep entries newer than `now - recency_window`
/// and cap the result. A failing source is logged and skipped.
pub async fn aggregate_at(
    fetcher: &dyn FeedFetcher,
    sources: &[FeedSource],
    opts: &AggregateOptions,
    now: DateTime<Utc>,
) -> Bulletin {
    let cutoff = now - opts.recency_window;
    let mut bulletin = Bulletin {
        sources_attempted: sources.len(),
        ..Default::default()
    };

    for source in sources {
        match fetcher.fetch(&source.url).await {
            Ok(entries) => {
                tracing::info!(url = %source.url, entries = entries.len(), "feed fetched");
                bulletin.items.extend(
                    entries
                        .into_iter()
                        .take(opts.per_source_cap)
                        .filter_map(|e| to_news_item(e, cutoff)),
                );
            }
            Err(e) => {
                tracing::warn!(url = %source.url, error = ?e, "feed fetch failed");
                counter!("feed_fetch_errors_total").increment(1);
                bulletin.sources_failed += 1;
            }
        }
    }

    bulletin.items.truncate(opts.total_cap);
    counter!("feed_items_kept_total").increment(bulletin.items.len() as u64);
    bulletin
}

fn to_news_item(entry: FeedEntry, cutoff: DateTime<Utc>) -> Option<NewsItem> {
    let ts = entry.timestamp()?;
    if ts <= cutoff {
        return None;
    }
    Some(NewsItem {
        author: entry.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        title: entry.title.unwrap_or_else(|| UNTITLED.to_string()),
        summary: clean_summary(entry.summary.as_deref().unwrap_or_default()),
        link: entry.link.unwrap_or_else(|| NO_LINK.to_string()),
        published_at: Some(ts),
    })
}

// Markup is assumed only when the summary closes an element or carries a void
// element; a bare `a<b` in prose does not count.
static RE_HTML_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</[a-z][a-z0-9]*\s*>|<(?:br|hr|img)(?:\s[^<>]*)?/?>").unwrap()
});
static RE_TAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?/?>").unwrap()
});
static RE_OPEN_TAG_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?$").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Cut the raw summary to [`SUMMARY_MAX_CHARS`] and trim it. HTML summaries are
/// also reduced to their text.
///
/// The cut happens first, so a tag sliced in half at the boundary is dropped too.
/// Plain text is only trimmed.
pub fn clean_summary(raw: &str) -> String {
    let cut: String = raw.chars().take(SUMMARY_MAX_CHARS).collect();
    if !RE_HTML_HINT.is_match(raw) {
        return cut.trim().to_string();
    }

    let out = RE_TAGS.replace_all(&cut, " ");
    let out = RE_OPEN_TAG_TAIL.replace(&out, "");
    let out = html_escape::decode_html_entities(&out);
    let out = RE_WS.replace_all(&out, " ");
    out.trim().to_string()
}
