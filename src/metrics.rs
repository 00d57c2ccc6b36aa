use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once per process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        describe();
        Ok(Self { handle })
    }

    /// Wrap an existing handle without touching the global recorder.
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// `GET /metrics`, rendered from this handle on every request.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!("digest_cycles_total", "Pipeline cycles completed.");
    describe_gauge!("digest_last_cycle_ts", "Unix ts when the last cycle finished.");
    describe_counter!("feed_fetch_errors_total", "Feed fetch/parse errors.");
    describe_counter!("feed_entries_parsed_total", "Entries parsed from feeds.");
    describe_counter!("feed_items_kept_total", "Items kept after recency filtering and caps.");
    describe_histogram!("feed_parse_ms", "Feed parse time in milliseconds.");
    describe_counter!("completion_failures_total", "Summaries replaced by the fallback text.");
    describe_counter!("posts_published_total", "Posts published.");
    describe_counter!("post_failures_total", "Posts that failed to publish.");
}
