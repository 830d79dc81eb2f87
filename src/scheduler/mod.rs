// src/scheduler/mod.rs
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::application::manager::ContentNotifyManager;

/// Cron-style driver: runs one notification cycle per tick, forever. The
/// manager isolates per-action failures, so a bad cycle never stops the loop.
pub async fn start_scheduler(manager: Arc<ContentNotifyManager>, period: Duration) {
    let mut interval = interval(period);

    loop {
        interval.tick().await;
        info!("notification cycle starting");
        manager.run_cycle().await;
    }
}
