use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays parseable.
///
/// `RUST_LOG` wins over the `-v` count when set.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
