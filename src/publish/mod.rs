//! Publisher: hands the generated post to the posting service and logs the outcome.

pub mod oauth;
pub mod x;

use std::sync::Arc;

use anyhow::Result;
use metrics::counter;

pub use oauth::OAuthCredentials;
pub use x::XPoster;

/// A social platform that can publish a text post.
#[async_trait::async_trait]
pub trait PostingService: Send + Sync {
    /// Publish `text` and return the platform's post id.
    async fn create_post(&self, text: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostResult {
    Published { id: String },
    Failed { error: String },
}

impl PostResult {
    pub fn is_published(&self) -> bool {
        matches!(self, PostResult::Published { .. })
    }
}

pub struct Publisher {
    service: Arc<dyn PostingService>,
}

impl Publisher {
    pub fn new(service: Arc<dyn PostingService>) -> Self {
        Self { service }
    }

    /// Post `text` unmodified. Errors are logged and returned as
    /// [`PostResult::Failed`]; nothing is retried.
    pub async fn publish(&self, text: &str) -> PostResult {
        match self.service.create_post(text).await {
            Ok(id) => {
                tracing::info!(service = self.service.name(), id = %id, text, "post published");
                counter!("posts_published_total").increment(1);
                PostResult::Published { id }
            }
            Err(e) => {
                tracing::error!(service = self.service.name(), error = ?e, "post failed");
                counter!("post_failures_total").increment(1);
                PostResult::Failed {
                    error: format!("{e:#}"),
                }
            }
        }
    }
}

/// Logs the post instead of publishing it.
pub struct DryRunPoster;

pub const DRY_RUN_ID: &str = "dry-run";

#[async_trait::async_trait]
impl PostingService for DryRunPoster {
    async fn create_post(&self, text: &str) -> Result<String> {
        tracing::info!(chars = text.chars().count(), text, "dry run, not posting");
        Ok(DRY_RUN_ID.to_string())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
