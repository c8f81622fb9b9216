//! Polled snapshot feed
//!
//! Connects a [`SnapshotSource`] to the reconciliation engine. Poll errors
//! are absorbed here: a failed poll leaves the retained state untouched.

use async_trait::async_trait;
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::LiveResult;
use crate::reconcile::ReconciliationEngine;
use crate::types::{DisplaySet, Snapshot};

/// Anything that can produce the current keyed comparison set
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Human readable name for logs
    fn name(&self) -> &str;

    /// Fetch one complete snapshot
    async fn fetch_snapshot(&self) -> LiveResult<Snapshot>;
}

/// A snapshot source driving a reconciliation engine
pub struct LiveFeed<S: SnapshotSource> {
    source: S,
    engine: ReconciliationEngine,
    last_display: DisplaySet,
    failed_polls: u64,
}

impl<S: SnapshotSource> LiveFeed<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            engine: ReconciliationEngine::new(config),
            last_display: DisplaySet::default(),
            failed_polls: 0,
        }
    }

    /// Fetch and reconcile one snapshot. `now` is the poll completion time.
    /// Returns `None` when the poll failed; nothing changes in that case.
    pub async fn poll_once(&mut self, now: f64) -> Option<&DisplaySet> {
        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                self.last_display = self.engine.tick(snapshot, now);
                Some(&self.last_display)
            }
            Err(e) => {
                self.failed_polls += 1;
                warn!(
                    source = self.source.name(),
                    failed_polls = self.failed_polls,
                    "Failed to fetch live snapshot: {}",
                    e
                );
                None
            }
        }
    }

    /// Last display set with highlights re-evaluated at `now`
    pub fn render(&mut self, now: f64) -> &DisplaySet {
        self.engine.refresh_highlights(&mut self.last_display, now);
        &self.last_display
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn failed_polls(&self) -> u64 {
        self.failed_polls
    }
}
