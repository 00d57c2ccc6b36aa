// src/pipeline.rs
//! One cycle: aggregate feeds, summarize, publish. Nothing survives the cycle.

use std::sync::Arc;

use anyhow::Result;
use metrics::{counter, gauge};

use crate::config::AppConfig;
use crate::ingest::providers::http_feed::HttpFeedFetcher;
use crate::ingest::types::{FeedFetcher, FeedSource};
use crate::ingest::{self, AggregateOptions};
use crate::publish::{DryRunPoster, PostResult, PostingService, Publisher, XPoster};
use crate::summarize::{ChatCompletionsClient, Summarizer, GENERATION_FAILED};

/// What happened during one cycle. Logged, never stored.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub sources_attempted: usize,
    pub sources_failed: usize,
    pub items: usize,
    pub post_text: String,
    pub used_fallback: bool,
    pub post: PostResult,
}

pub struct Pipeline {
    fetcher: Arc<dyn FeedFetcher>,
    sources: Vec<FeedSource>,
    options: AggregateOptions,
    summarizer: Summarizer,
    publisher: Publisher,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        sources: Vec<FeedSource>,
        options: AggregateOptions,
        summarizer: Summarizer,
        publisher: Publisher,
    ) -> Self {
        Self {
            fetcher,
            sources,
            options,
            summarizer,
            publisher,
        }
    }

    /// Build the service clients once, from configuration.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFeedFetcher::new()?);
        let completion = Arc::new(ChatCompletionsClient::new(
            cfg.groq_base_url.clone(),
            cfg.groq_api_key.clone(),
        )?);
        let poster: Arc<dyn PostingService> = if cfg.dry_run {
            Arc::new(DryRunPoster)
        } else {
            Arc::new(XPoster::new(cfg.x_base_url.clone(), cfg.x_credentials.clone())?)
        };

        tracing::info!(
            feeds = cfg.feeds.len(),
            model = %cfg.summarizer.model,
            poster = poster.name(),
            key_len = cfg.groq_api_key.len(),
            "pipeline configured"
        );

        Ok(Self::new(
            fetcher,
            cfg.feeds.clone(),
            cfg.aggregate,
            Summarizer::new(completion, cfg.summarizer.clone()),
            Publisher::new(poster),
        ))
    }

    pub async fn run_cycle(&self) -> CycleReport {
        tracing::info!(sources = self.sources.len(), "cycle started");

        let bulletin = ingest::aggregate(self.fetcher.as_ref(), &self.sources, &self.options).await;
        let post_text = self.summarizer.summarize(&bulletin.text()).await;
        let post = self.publisher.publish(&post_text).await;

        counter!("digest_cycles_total").increment(1);
        gauge!("digest_last_cycle_ts").set(chrono::Utc::now().timestamp() as f64);

        let report = CycleReport {
            sources_attempted: bulletin.sources_attempted,
            sources_failed: bulletin.sources_failed,
            items: bulletin.items.len(),
            used_fallback: post_text == GENERATION_FAILED,
            post_text,
            post,
        };
        tracing::info!(
            items = report.items,
            newest = ?bulletin.newest(),
            sources_failed = report.sources_failed,
            used_fallback = report.used_fallback,
            published = report.post.is_published(),
            "cycle finished"
        );
        report
    }
}

#[async_trait::async_trait]
impl crate::scheduler::Job for Pipeline {
    async fn run(&self) {
        self.run_cycle().await;
    }
}
