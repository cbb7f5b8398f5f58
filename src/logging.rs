use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG wins when set; otherwise info (or debug when verbose) for this crate
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "sales_insight=debug,sales_server=debug,info"
    } else {
        "sales_insight=info,sales_server=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}
