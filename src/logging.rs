use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or
/// everything down to `debug` with `verbose`. Logs go to stderr so command
/// output on stdout can be piped.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "fintelli=debug"
    } else {
        "fintelli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be set (e.g. when embedded); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
