//! Core types for the live comparison feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::LiveResult;

/// Identifies one comparison route, e.g. "binance->kraken:BTC-ETH".
/// Unique within a snapshot and stable across polls.
pub type MetricKey = String;

/// One complete poll result
pub type Snapshot = HashMap<MetricKey, MetricSample>;

/// Kind of route a comparison was computed over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Direct,
    MultiLeg,
    Cross,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RouteType {
    /// Short badge shown next to the route label
    pub fn badge(&self) -> &'static str {
        match self {
            RouteType::Direct => "D",
            _ => "ML",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RouteType::Direct => "Direct",
            RouteType::MultiLeg => "Multi-leg",
            RouteType::Cross => "Cross",
            RouteType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Direction of a primary value change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of the move from `previous` to `current`, if any.
    /// Exact comparison: any difference counts.
    pub fn between(previous: f64, current: f64) -> Option<Self> {
        if current > previous {
            Some(Direction::Up)
        } else if current < previous {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }
}

/// One route's measurement at one poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub key: MetricKey,
    /// Spread percentage for the route
    pub primary_value: f64,
    /// Buy rate, sell rate and, for cross routes, the cross rate
    pub aux_values: Vec<f64>,
    /// Epoch seconds when the backend computed the comparison
    pub timestamp: f64,
    pub direction_tag: RouteType,
    pub route_label: String,
    pub buy_exchange: String,
    pub sell_exchange: String,
}

impl MetricSample {
    pub fn new(
        key: impl Into<MetricKey>,
        primary_value: f64,
        aux_values: Vec<f64>,
        timestamp: f64,
        direction_tag: RouteType,
    ) -> Self {
        let key = key.into();
        Self {
            route_label: key.clone(),
            key,
            primary_value,
            aux_values,
            timestamp,
            direction_tag,
            buy_exchange: String::new(),
            sell_exchange: String::new(),
        }
    }

    /// A sample with every tracked numeric field zeroed
    pub fn degenerate(key: impl Into<MetricKey>, timestamp: f64) -> Self {
        Self::new(key, 0.0, Vec::new(), timestamp, RouteType::Unknown)
    }

    /// True when the primary value and every auxiliary value are zero.
    ///
    /// A legitimate zero spread with zero rates is indistinguishable from
    /// "no data" here; both are treated as missing.
    pub fn is_degenerate(&self) -> bool {
        self.primary_value == 0.0 && self.aux_values.iter().all(|v| *v == 0.0)
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.timestamp
    }

    pub fn is_stale(&self, now: f64, stale_threshold_seconds: f64) -> bool {
        self.age(now) > stale_threshold_seconds
    }

    pub fn buy_rate(&self) -> f64 {
        self.aux_values.first().copied().unwrap_or(0.0)
    }

    pub fn sell_rate(&self) -> f64 {
        self.aux_values.get(1).copied().unwrap_or(0.0)
    }

    pub fn cross_rate(&self) -> Option<f64> {
        self.aux_values.get(2).copied()
    }
}

/// A comparison entry exactly as served by `GET /api/live`.
///
/// Every field is optional so that partial entries still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveComparison {
    pub route_type: Option<RouteType>,
    pub route_label: Option<String>,
    pub spread_pct: Option<f64>,
    pub buy_rate: Option<f64>,
    pub sell_rate: Option<f64>,
    pub buy_exchange: Option<String>,
    pub sell_exchange: Option<String>,
    pub cross_rate: Option<f64>,
    pub ts: Option<f64>,
}

impl LiveComparison {
    /// Convert into a sample. Missing or non-finite tracked numbers make the
    /// whole sample degenerate; a missing timestamp becomes 0 (always stale).
    pub fn into_sample(self, key: &str) -> MetricSample {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        let timestamp = finite(self.ts).unwrap_or(0.0);

        let tracked = (
            finite(self.spread_pct),
            finite(self.buy_rate),
            finite(self.sell_rate),
        );
        let (primary_value, aux_values) = match tracked {
            (Some(spread), Some(buy), Some(sell)) => {
                let mut aux = vec![buy, sell];
                let cross_rate = self.cross_rate;
                match cross_rate {
                    Some(cross) if cross.is_finite() => aux.push(cross),
                    Some(_) => return self.degenerate_sample(key, timestamp),
                    None => {}
                }
                (spread, aux)
            }
            _ => return self.degenerate_sample(key, timestamp),
        };

        MetricSample {
            key: key.to_string(),
            primary_value,
            aux_values,
            timestamp,
            direction_tag: self.route_type.unwrap_or_default(),
            route_label: self.route_label.unwrap_or_else(|| key.to_string()),
            buy_exchange: self.buy_exchange.unwrap_or_default(),
            sell_exchange: self.sell_exchange.unwrap_or_default(),
        }
    }

    fn degenerate_sample(self, key: &str, timestamp: f64) -> MetricSample {
        MetricSample {
            direction_tag: self.route_type.unwrap_or_default(),
            route_label: self.route_label.unwrap_or_else(|| key.to_string()),
            buy_exchange: self.buy_exchange.unwrap_or_default(),
            sell_exchange: self.sell_exchange.unwrap_or_default(),
            ..MetricSample::degenerate(key, timestamp)
        }
    }
}

/// Parse a `/api/live` response body into a snapshot.
///
/// The body must be a JSON object. Entries that fail to decode become
/// degenerate samples instead of failing the whole poll.
pub fn parse_snapshot(body: &str) -> LiveResult<Snapshot> {
    let raw: HashMap<String, serde_json::Value> = serde_json::from_str(body)?;
    let snapshot = raw
        .into_iter()
        .map(|(key, value)| {
            let sample = match serde_json::from_value::<LiveComparison>(value) {
                Ok(comparison) => comparison.into_sample(&key),
                Err(e) => {
                    tracing::debug!(
                        key = %key,
                        error = %e,
                        "Malformed live entry, treating as no data"
                    );
                    MetricSample::degenerate(key.as_str(), 0.0)
                }
            };
            (key, sample)
        })
        .collect();
    Ok(snapshot)
}

/// Fractional epoch seconds for a wall-clock instant
pub fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1_000_000_000.0
}

/// Colour band for a displayed spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadTier {
    Strong,
    Marginal,
    Flat,
}

impl SpreadTier {
    pub fn classify(spread_pct: f64) -> Self {
        if spread_pct > 0.5 {
            SpreadTier::Strong
        } else if spread_pct > 0.0 {
            SpreadTier::Marginal
        } else {
            SpreadTier::Flat
        }
    }
}

/// A detected primary value change for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub key: MetricKey,
    pub direction: Direction,
}

/// What the renderer should show for one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub key: MetricKey,
    /// Incoming sample, or the last-known-good one when `is_cached`
    pub sample: MetricSample,
    pub is_cached: bool,
    /// Staleness of the incoming sample
    pub is_stale: bool,
    /// Incoming sample carried no data
    pub is_degenerate: bool,
    pub highlight: Option<Direction>,
}

impl DisplayEntry {
    /// Neither live nor backed by a cached value
    pub fn is_no_data(&self) -> bool {
        !self.is_cached && (self.is_degenerate || self.is_stale)
    }

    pub fn tier(&self) -> SpreadTier {
        SpreadTier::classify(self.sample.primary_value)
    }
}

/// Per-key display state for one poll; keyed exactly like the incoming snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySet {
    entries: HashMap<MetricKey, DisplayEntry>,
}

impl DisplaySet {
    pub fn get(&self, key: &str) -> Option<&DisplayEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MetricKey> {
        self.entries.keys()
    }

    /// Entries by displayed spread, highest first; ties by key
    pub fn ranked(&self) -> Vec<&DisplayEntry> {
        let mut ranked: Vec<_> = self.entries.values().collect();
        ranked.sort_by(|a, b| {
            b.sample
                .primary_value
                .total_cmp(&a.sample.primary_value)
                .then_with(|| a.key.cmp(&b.key))
        });
        ranked
    }

    pub(crate) fn insert(&mut self, entry: DisplayEntry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut DisplayEntry> {
        self.entries.values_mut()
    }
}
