//! Structured logging setup for codeviz
//!
//! Logs are written to stderr so that command output on stdout stays
//! machine-readable. `RUST_LOG` directives, when present, take precedence over
//! the configured level.
//!
//! # Example
//!
//! ```no_run
//! use codeviz::util::logging;
//! use tracing::{info, warn};
//!
//! logging::init_from_env();
//!
//! info!(repo = "octocat/hello", "Analyzing repository");
//! warn!(path = "package.json", "Manifest could not be parsed");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Dependency targets capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_TARGETS: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "rustls"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for codeviz's own targets
    pub level: Level,

    /// Emit one JSON object per event
    pub use_json: bool,

    /// Include the module target (e.g. `codeviz::stack`)
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,

    /// Include thread id and name
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with full event metadata
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }

    /// Reads `CODEVIZ_LOG_LEVEL` and `CODEVIZ_LOG_JSON`
    pub fn from_env() -> Self {
        let level = env::var("CODEVIZ_LOG_LEVEL")
            .map(|v| parse_level(&v))
            .unwrap_or(Level::INFO);

        let use_json = env::var("CODEVIZ_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }
}

/// Parses a level name case-insensitively, falling back to INFO
///
/// ```
/// use codeviz::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("Debug"), Level::DEBUG);
/// assert_eq!(parse_level("verbose"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    level_from_str(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
            level_str
        );
        Level::INFO
    })
}

/// Strict counterpart of [`parse_level`]; `None` for unknown names
pub fn level_from_str(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn build_filter(level: Level, rust_log_set: bool) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .with_default_directive(Directive::from(LevelFilter::WARN))
        .from_env_lossy();

    if rust_log_set {
        return filter;
    }

    if let Ok(own) = format!("codeviz={}", level).parse::<Directive>() {
        filter = filter.add_directive(own);
    }
    for target in NOISY_TARGETS {
        if let Ok(directive) = format!("{}=warn", target).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    filter
}

/// Installs the global subscriber; later calls are no-ops
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level, env::var("RUST_LOG").is_ok());

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_thread_ids(config.include_thread_ids)
            .with_thread_names(config.include_thread_ids);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
