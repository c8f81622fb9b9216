//! Polling loop for the live feed

use std::future::Future;

use arby_live_core::{
    epoch_seconds,
    feed::{LiveFeed, SnapshotSource},
};
use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::info;

use crate::ticker;

/// Poll and render until `shutdown` resolves. Shutdown is observed both while
/// waiting for the next tick and while a poll is in flight.
pub async fn run<S, F>(feed: &mut LiveFeed<S>, poll_interval: Duration, shutdown: F)
where
    S: SnapshotSource,
    F: Future<Output = ()>,
{
    // Each poll completes before the next tick, so snapshots apply in order
    let mut poll_timer = interval(poll_interval);
    poll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    info!("Starting live polling loop");

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = poll_timer.tick() => {}
        }

        let now = epoch_seconds(Utc::now());
        tokio::select! {
            _ = &mut shutdown => break,
            polled = feed.poll_once(now) => {
                if let Some(display) = polled {
                    ticker::render(display);
                }
            }
        }
    }

    info!("Shutdown requested, stopping collector");
}
