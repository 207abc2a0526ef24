//! Logging for the matchday crates.
//!
//! Feature crates emit structured events through the `tracing` macros;
//! [`init_tracing`] installs the subscriber once at the composition root.

/// Initialize the `tracing` subscriber used by the feature crates, writing
/// to stderr. Call once from the composition root; `debug` widens the
/// output with targets and source locations.
pub fn init_tracing(level: &str, debug: bool) {
    use tracing_subscriber::fmt;

    let level = match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    fmt()
        .with_max_level(level)
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .with_writer(std::io::stderr)
        .init();
}

/// Render an error together with its cause chain on one line, for the
/// transient notifications shown to admin users.
pub fn format_error(error: &dyn std::error::Error) -> String {
    const MAX_DEPTH: usize = 10;

    let mut line = error.to_string();
    let mut source = error.source();
    let mut depth = 0;
    while let Some(cause) = source {
        if depth >= MAX_DEPTH {
            break;
        }
        line = format!("{} Caused by: {}", line, cause);
        source = cause.source();
        depth += 1;
    }
    line
}
