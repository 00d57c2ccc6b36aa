// src/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Work fired on every tick.
#[async_trait::async_trait]
pub trait Job: Send + Sync + 'static {
    async fn run(&self);
}

#[derive(Clone, Copy, Debug)]
pub struct SchedulerCfg {
    pub interval: Duration,
    /// Fire once immediately instead of waiting a full interval.
    pub run_on_start: bool,
}

/// Owns the periodic task. Dropping the handle also stops the loop.
pub struct SchedulerHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop after the cycle in flight, if any.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        let Self { cancel, task } = self;
        let _ = cancel.send(true);
        task.await
    }
}

/// Spawn the periodic task. Each cycle is awaited inline, so cycles never
/// overlap; ticks that come due meanwhile are skipped.
pub fn spawn_scheduler<J: Job>(job: Arc<J>, cfg: SchedulerCfg) -> SchedulerHandle {
    let (cancel, mut cancelled) = watch::channel(false);

    let task = tokio::spawn(async move {
        let first = if cfg.run_on_start {
            Instant::now()
        } else {
            Instant::now() + cfg.interval
        };
        let mut ticker = tokio::time::interval_at(first, cfg.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = cfg.interval.as_secs(),
            run_on_start = cfg.run_on_start,
            "scheduler started"
        );
        loop {
            tokio::select! {
                biased;
                res = cancelled.changed() => {
                    if res.is_err() || *cancelled.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let started = Instant::now();
                    job.run().await;
                    let took = started.elapsed();
                    if took > cfg.interval {
                        tracing::warn!(
                            took_secs = took.as_secs(),
                            "cycle outran the interval, missed firings skipped"
                        );
                    }
                }
            }
        }
        tracing::info!("scheduler stopped");
    });

    SchedulerHandle { cancel, task }
}
