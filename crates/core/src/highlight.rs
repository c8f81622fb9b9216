//! Highlight Scheduler
//!
//! Turns change events into short-lived directional highlights. Expiry is
//! evaluated against a caller-supplied `now`; nothing runs in the background.

use std::collections::HashMap;

use crate::types::{ChangeEvent, Direction, MetricKey};

/// A highlight that is active until `expires_at` (exclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub direction: Direction,
    pub expires_at: f64,
}

impl Highlight {
    pub fn is_active(&self, now: f64) -> bool {
        self.expires_at > now
    }
}

/// Per-key highlight state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Idle,
    Flashing(Direction),
}

/// Holds at most one highlight per key; size is bounded by the keys ever seen.
#[derive(Debug, Clone, Default)]
pub struct HighlightScheduler {
    highlights: HashMap<MetricKey, Highlight>,
}

impl HighlightScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a highlight for every event. The latest event for a
    /// key replaces any earlier one, timer included.
    pub fn on_change_events(&mut self, events: &[ChangeEvent], now: f64, duration_seconds: f64) {
        for event in events {
            self.highlights.insert(
                event.key.clone(),
                Highlight {
                    direction: event.direction,
                    expires_at: now + duration_seconds,
                },
            );
        }
    }

    /// All highlights still active at `now`. Expired entries are dropped.
    pub fn active_highlights(&mut self, now: f64) -> HashMap<MetricKey, Direction> {
        self.evict_expired(now);
        self.highlights
            .iter()
            .map(|(key, highlight)| (key.clone(), highlight.direction))
            .collect()
    }

    pub fn state(&self, key: &str, now: f64) -> HighlightState {
        match self.highlights.get(key) {
            Some(highlight) if highlight.is_active(now) => {
                HighlightState::Flashing(highlight.direction)
            }
            _ => HighlightState::Idle,
        }
    }

    /// Active highlight direction for a key, without mutating
    pub fn direction_at(&self, key: &str, now: f64) -> Option<Direction> {
        match self.state(key, now) {
            HighlightState::Flashing(direction) => Some(direction),
            HighlightState::Idle => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Highlight> {
        self.highlights.get(key)
    }

    pub fn evict_expired(&mut self, now: f64) {
        self.highlights.retain(|_, highlight| highlight.is_active(now));
    }

    /// Number of retained entries, expired ones included until evicted
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}
