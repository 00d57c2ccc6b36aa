// tests/common/mod.rs
//
// In-process doubles for the three external services.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use news_digest_bot::ingest::types::{FeedEntry, FeedFetcher, FeedSource};
use news_digest_bot::publish::PostingService;
use news_digest_bot::summarize::{CompletionClient, CompletionRequest};

/// Serves canned entries per URL; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct StubFetcher {
    feeds: HashMap<String, Vec<FeedEntry>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }
}

#[async_trait::async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused: {url}"))
    }
}

pub fn sources(urls: &[&str]) -> Vec<FeedSource> {
    urls.iter().map(|u| FeedSource::new(*u)).collect()
}

pub fn entry(title: &str, published: DateTime<Utc>) -> FeedEntry {
    FeedEntry {
        title: Some(title.to_string()),
        link: Some(format!("https://news.example/{}", title.replace(' ', "-"))),
        summary: Some(format!("About {title}")),
        author: Some("desk".to_string()),
        published: Some(published),
        updated: None,
    }
}

pub fn minutes_ago(now: DateTime<Utc>, m: i64) -> DateTime<Utc> {
    now - Duration::minutes(m)
}

/// Completion double: fixed reply or a failure; records prompts.
pub struct ScriptedCompletion {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        self.prompts.lock().unwrap().push(req.prompt.clone());
        self.reply
            .clone()
            .ok_or_else(|| anyhow!("429 Too Many Requests"))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Posting double that records every text it was handed.
#[derive(Default)]
pub struct RecordingPoster {
    pub posts: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl PostingService for RecordingPoster {
    async fn create_post(&self, text: &str) -> Result<String> {
        self.posts.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(anyhow!("401 Unauthorized"));
        }
        Ok(format!("post-{}", self.posts.lock().unwrap().len()))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
