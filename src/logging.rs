use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins when set; otherwise
/// only warnings show, or everything from debug up with `--verbose`.
///
/// Safe to call more than once; later calls do nothing.
pub fn init(verbose: bool) {
    let default = if verbose { "stockroom=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
