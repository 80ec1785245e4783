//! Logging and tracing initialization.

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at info (or debug
/// with `verbose`). Safe to call more than once — later calls are no-ops.
pub fn init(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_directive = if verbose {
        "meetscribe=debug"
    } else {
        "meetscribe=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
