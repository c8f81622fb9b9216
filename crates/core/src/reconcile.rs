//! Snapshot Reconciliation Engine
//!
//! Folds each polled snapshot into the retained session state: detects
//! per-key spread moves, classifies freshness, and substitutes the
//! last-known-good sample when the incoming one is stale or empty.

use std::collections::HashMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::highlight::HighlightScheduler;
use crate::types::{
    ChangeEvent, Direction, DisplayEntry, DisplaySet, MetricKey, MetricSample, Snapshot,
};

/// Session state owned by the engine. Created empty, never persisted.
#[derive(Debug, Clone, Default)]
pub struct RetainedState {
    /// Last snapshot processed
    previous: Snapshot,
    /// Latest non-degenerate sample per key; never evicted
    last_known_good: HashMap<MetricKey, MetricSample>,
    highlights: HighlightScheduler,
}

/// Output of one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub display: DisplaySet,
    pub changes: Vec<ChangeEvent>,
}

impl RetainedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn last_known_good(&self, key: &str) -> Option<&MetricSample> {
        self.last_known_good.get(key)
    }

    pub fn highlights(&self) -> &HighlightScheduler {
        &self.highlights
    }

    pub fn cached_keys(&self) -> usize {
        self.last_known_good.len()
    }

    /// Process one incoming snapshot.
    ///
    /// Display membership follows `incoming` exactly. Degenerate samples
    /// never emit change events and never overwrite the cache.
    pub fn reconcile(
        &mut self,
        incoming: Snapshot,
        now: f64,
        stale_threshold_seconds: f64,
    ) -> Reconciliation {
        let mut result = Reconciliation::default();

        for (key, sample) in &incoming {
            let is_degenerate = sample.is_degenerate();
            let is_stale = sample.is_stale(now, stale_threshold_seconds);

            if !is_degenerate {
                let moved = self
                    .previous
                    .get(key)
                    .and_then(|prev| Direction::between(prev.primary_value, sample.primary_value));
                if let Some(direction) = moved {
                    debug!(
                        key = %key,
                        ?direction,
                        value = sample.primary_value,
                        "Spread moved"
                    );
                    result.changes.push(ChangeEvent {
                        key: key.clone(),
                        direction,
                    });
                }
            }

            let cached = if is_degenerate || is_stale {
                self.last_known_good.get(key)
            } else {
                None
            };
            let entry = match cached {
                Some(cached) => {
                    debug!(
                        key = %key,
                        is_stale,
                        is_degenerate,
                        "Showing last-known-good sample"
                    );
                    DisplayEntry {
                        key: key.clone(),
                        sample: cached.clone(),
                        is_cached: true,
                        is_stale,
                        is_degenerate,
                        highlight: None,
                    }
                }
                None => DisplayEntry {
                    key: key.clone(),
                    sample: sample.clone(),
                    is_cached: false,
                    is_stale,
                    is_degenerate,
                    highlight: None,
                },
            };
            result.display.insert(entry);

            if !is_degenerate {
                self.last_known_good.insert(key.clone(), sample.clone());
            }
        }

        self.previous = incoming;
        result
    }
}

/// Reconciliation plus highlight scheduling for one session
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: EngineConfig,
    state: RetainedState,
}

impl ReconciliationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: RetainedState::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &RetainedState {
        &self.state
    }

    /// Apply one completed poll. Snapshots must arrive in poll order.
    pub fn tick(&mut self, incoming: Snapshot, now: f64) -> DisplaySet {
        let Reconciliation {
            mut display,
            changes,
        } = self
            .state
            .reconcile(incoming, now, self.config.stale_threshold_seconds);

        self.state.highlights.on_change_events(
            &changes,
            now,
            self.config.highlight_duration_seconds,
        );
        self.refresh_highlights(&mut display, now);

        let keys = display.len();
        debug!(
            keys,
            changes = changes.len(),
            cached = self.state.cached_keys(),
            "Snapshot reconciled"
        );
        display
    }

    /// Re-evaluate highlights for a render between polls
    pub fn refresh_highlights(&mut self, display: &mut DisplaySet, now: f64) {
        let active = self.state.highlights.active_highlights(now);
        for entry in display.entries_mut() {
            entry.highlight = active.get(&entry.key).copied();
        }
    }

    pub fn active_highlights(&mut self, now: f64) -> HashMap<MetricKey, Direction> {
        self.state.highlights.active_highlights(now)
    }
}
