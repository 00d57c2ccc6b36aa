//! Runs a single digest cycle with the normal configuration and exits.
//! Set `DRY_RUN=1` to see the generated post without publishing it.

use news_digest_bot::{telemetry, AppConfig, Pipeline, PostResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init();

    let cfg = AppConfig::from_env();
    let pipeline = Pipeline::from_config(&cfg)?;
    let report = pipeline.run_cycle().await;

    println!(
        "sources: {} ({} failed), items: {}, fallback: {}",
        report.sources_attempted, report.sources_failed, report.items, report.used_fallback
    );
    println!("---\n{}\n---", report.post_text);
    match report.post {
        PostResult::Published { id } => println!("published: {id}"),
        PostResult::Failed { error } => println!("post failed: {error}"),
    }
    Ok(())
}
