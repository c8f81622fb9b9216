use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn setup(log_level: &str) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_ansi(true)
        .compact();

    // RUST_LOG wins; otherwise LOG_LEVEL for everything else
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},arby_live_collector=debug,arby_live_core=info",
            log_level
        ))
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .init();
}
