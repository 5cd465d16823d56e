//! Tracing configuration for inspecting solver decisions.
//!
//! Three output formats, chosen by `--log-format` or `TYPEALG_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! TYPEALG_LOG=debug typealg scenarios
//! TYPEALG_LOG=trace TYPEALG_LOG_FORMAT=tree typealg hierarchy
//! TYPEALG_LOG="typealg_solver::normalize=trace" typealg --log-format json scenarios
//! ```
//!
//! Nothing is installed unless `TYPEALG_LOG` or `RUST_LOG` is set.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "TYPEALG_LOG";
const LOG_FORMAT_VAR: &str = "TYPEALG_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }

    /// Lenient parse; anything unknown is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `TYPEALG_LOG` wins over `RUST_LOG`. `None` when neither is set.
fn log_filter() -> Option<EnvFilter> {
    match std::env::var(LOG_VAR) {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() => {
            Some(EnvFilter::from_default_env())
        }
        Err(_) => None,
    }
}

/// Install the global subscriber. Output goes to stderr.
pub fn init_tracing(format: Option<LogFormat>) {
    let Some(filter) = log_filter() else {
        return;
    };

    let format = format.unwrap_or_else(LogFormat::from_env);
    let text = (format == LogFormat::Text).then(|| fmt::layer().with_writer(std::io::stderr));
    let json =
        (format == LogFormat::Json).then(|| fmt::layer().json().with_writer(std::io::stderr));
    let tree = (format == LogFormat::Tree)
        .then(|| tracing_tree::HierarchicalLayer::new(2).with_targets(true));

    Registry::default()
        .with(filter)
        .with(text)
        .with(json)
        .with(tree)
        .init();
}
