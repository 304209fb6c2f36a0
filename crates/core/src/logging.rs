//! Logging infrastructure for the corpora CLI.
//!
//! Initializes the tracing subscriber for structured logging. All logs go to
//! stderr: stdout is reserved for the ingestion payload, which downstream
//! tools consume as JSON.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// The filter resolves in order: explicit `log_level` argument, `RUST_LOG`,
/// then `info`. HTTP client internals are capped at `warn` unless the caller
/// opts in explicitly, so fetch-heavy runs stay readable.
///
/// # Example
/// ```no_run
/// use corpora_core::logging::init_logging;
///
/// init_logging(Some("debug"), false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let directives = resolve_directives(log_level);

    let env_filter = EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", directives, e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Build the filter string, quieting the HTTP stack when the caller has not
/// configured it.
fn resolve_directives(log_level: Option<&str>) -> String {
    let base = log_level
        .map(String::from)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    if base.contains("hyper") || base.contains("reqwest") {
        return base;
    }

    format!("{},hyper=warn,reqwest=warn", base)
}

/// Check if the terminal supports color output.
fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Dumb terminals and redirected output get plain text
    !matches!(std::env::var("TERM").as_deref(), Ok("dumb"))
}
