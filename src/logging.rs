use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr so they never interleave with the record
/// summaries on stdout. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "hashtrack=debug"
    } else {
        "hashtrack=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
