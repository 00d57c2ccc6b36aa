// src/config/app.rs
//! Process configuration, read once from the environment at startup.
//!
//! Credentials are not validated here: a missing key becomes an empty string and
//! the corresponding call fails when the pipeline runs.

use std::time::Duration;

use crate::ingest::types::FeedSource;
use crate::ingest::AggregateOptions;
use crate::publish::x::DEFAULT_X_BASE;
use crate::publish::OAuthCredentials;
use crate::summarize::client::DEFAULT_GROQ_BASE;
use crate::summarize::SummarizerSettings;

pub const DEFAULT_PORT: u16 = 5000;
/// Two hours between cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub interval: Duration,
    pub run_on_start: bool,
    pub dry_run: bool,
    pub metrics_enabled: bool,

    pub feeds: Vec<FeedSource>,
    pub aggregate: AggregateOptions,

    pub groq_api_key: String,
    pub groq_base_url: String,
    pub summarizer: SummarizerSettings,

    pub x_credentials: OAuthCredentials,
    pub x_base_url: String,
}

impl AppConfig {
    /// Read from the process environment; the feed list comes from
    /// [`crate::config::feeds::load_feeds_default`].
    pub fn from_env() -> Self {
        let feeds = crate::config::feeds::load_feeds_default();
        Self::from_lookup(|k| std::env::var(k).ok(), feeds)
    }

    pub fn from_lookup<F>(get: F, feeds: Vec<FeedSource>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| get(k).unwrap_or_default();
        let flag = |k: &str| {
            get(k).is_some_and(|v| {
                matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
            })
        };

        let port = get("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let mut summarizer = SummarizerSettings::default();
        if let Some(model) = get("COMPLETION_MODEL").filter(|m| !m.trim().is_empty()) {
            summarizer.model = model.trim().to_string();
        }
        if let Some(lang) = get("POST_LANGUAGE").filter(|l| !l.trim().is_empty()) {
            summarizer.language = lang.trim().to_string();
        }

        Self {
            port,
            interval: DEFAULT_INTERVAL,
            run_on_start: flag("RUN_ON_START"),
            dry_run: flag("DRY_RUN"),
            metrics_enabled: flag("METRICS_ENABLED"),
            feeds,
            aggregate: AggregateOptions::default(),
            groq_api_key: var("GROQ_API_KEY"),
            groq_base_url: get("GROQ_API_BASE").unwrap_or_else(|| DEFAULT_GROQ_BASE.to_string()),
            summarizer,
            x_credentials: OAuthCredentials {
                consumer_key: var("X_API_KEY"),
                consumer_secret: var("X_API_SECRET"),
                access_token: var("X_ACCESS_TOKEN"),
                access_token_secret: var("X_ACCESS_TOKEN_SECRET"),
            },
            x_base_url: get("X_API_BASE").unwrap_or_else(|| DEFAULT_X_BASE.to_string()),
        }
    }
}
