// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod publish;
pub mod scheduler;
pub mod summarize;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::config::AppConfig;
pub use crate::ingest::{aggregate, aggregate_at, AggregateOptions, Bulletin, NO_RECENT_ITEMS};
pub use crate::pipeline::{CycleReport, Pipeline};
pub use crate::publish::{PostResult, Publisher};
pub use crate::scheduler::{spawn_scheduler, SchedulerCfg, SchedulerHandle};
pub use crate::summarize::{Summarizer, GENERATION_FAILED, MAX_POST_CHARS};
