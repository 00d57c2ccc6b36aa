//! news-digest-bot — binary entrypoint.
//! Starts the periodic digest task and serves the liveness route.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use news_digest_bot::{
    api, metrics::Metrics, spawn_scheduler, telemetry, AppConfig, Pipeline, SchedulerCfg,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the host injects the environment.
    let _ = dotenvy::dotenv();
    telemetry::init();

    let cfg = AppConfig::from_env();
    let metrics = if cfg.metrics_enabled {
        Some(Metrics::init()?)
    } else {
        None
    };

    let pipeline = Arc::new(Pipeline::from_config(&cfg)?);
    let scheduler = spawn_scheduler(
        pipeline,
        SchedulerCfg {
            interval: cfg.interval,
            run_on_start: cfg.run_on_start,
        },
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");

    let served = axum::serve(listener, api::router(metrics.as_ref()))
        .await
        .context("http server");
    scheduler.cancel();
    served
}
