//! Shared CLI styling and logging bootstrap for the driver binary.

use clap::builder::styling::{AnsiColor, Effects};
use clap::builder::Styles;

pub use clap_verbosity_flag as verbose;

/// Help styling shared with the rest of the toolchain binaries.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
}

/// Map the `-v` flag count onto the tracing level filter.
pub fn verbose_level_to_trace(level: Option<verbose::Level>) -> &'static tracing::Level {
    match level {
        Some(verbose::Level::Error) => &tracing::Level::WARN,
        Some(verbose::Level::Warn) => &tracing::Level::INFO,
        Some(verbose::Level::Info) => &tracing::Level::DEBUG,
        Some(verbose::Level::Debug) => &tracing::Level::TRACE,
        Some(verbose::Level::Trace) => &tracing::Level::TRACE,
        None => &tracing::Level::ERROR,
    }
}

/// Install the global tracing subscriber. With a file the log goes there as
/// JSON lines; otherwise it is plain text on stderr.
pub fn logging_setup(max_level: &tracing::Level, log_file: Option<&std::fs::File>) {
    match log_file.map(|f| f.try_clone()) {
        Some(Ok(file)) => tracing_subscriber::fmt()
            .with_max_level(*max_level)
            .json()
            .with_writer(std::sync::Arc::new(file))
            .init(),
        _ => tracing_subscriber::fmt()
            .with_max_level(*max_level)
            .with_target(false)
            .without_time()
            .init(),
    }
}
