//! Text rendering of the live comparison ticker

use arby_live_core::{DisplayEntry, DisplaySet, SpreadTier};
use tracing::info;

/// One ticker line for a displayed route
pub fn format_entry(entry: &DisplayEntry) -> String {
    let sample = &entry.sample;
    let mut line = format!(
        "{:<24} [{:>2}] {:>9.4}% | Buy: {:.8} Sell: {:.8} | {} -> {}",
        sample.route_label,
        sample.direction_tag.badge(),
        sample.primary_value,
        sample.buy_rate(),
        sample.sell_rate(),
        sample.buy_exchange,
        sample.sell_exchange,
    );

    if let Some(direction) = entry.highlight {
        line.push(' ');
        line.push_str(direction.arrow());
    }
    if entry.is_no_data() {
        line.push_str(" (no data)");
    } else if entry.is_cached {
        line.push_str(" (cached)");
    }
    if entry.is_stale {
        line.push_str(" (stale)");
    }
    line
}

/// Log the ticker, best spread first
pub fn render(display: &DisplaySet) {
    if display.is_empty() {
        info!("Waiting for data...");
        return;
    }

    let ranked = display.ranked();
    let strong = ranked
        .iter()
        .filter(|entry| !entry.is_no_data() && entry.tier() == SpreadTier::Strong)
        .count();
    info!("📈 {} routes, {} above 0.5%", ranked.len(), strong);
    for entry in ranked {
        info!("  {}", format_entry(entry));
    }
}
