//! Tracing configuration for debugging checker runs.
//!
//! Supports three output formats controlled by `LUMEN_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ```bash
//! LUMEN_LOG=debug LUMEN_LOG_FORMAT=tree cargo test -p lumen-checker
//! LUMEN_LOG="lumen_checker::decidability=trace" cargo test
//! ```
//!
//! The subscriber is only initialised when `LUMEN_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("LUMEN_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `LUMEN_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("LUMEN_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `LUMEN_LOG` nor `RUST_LOG` is set. Calling it
/// more than once is harmless: later calls leave the installed subscriber in
/// place. All output goes to stderr.
pub fn init_tracing() {
    let has_lumen_log = std::env::var("LUMEN_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_lumen_log && !has_rust_log {
        return;
    }
    install(build_filter(), LogFormat::from_env());
}

/// Install a subscriber with an explicit filter and format.
///
/// Returns whether this call installed it; `false` means another global
/// subscriber was already in place.
pub fn install(filter: EnvFilter, format: LogFormat) -> bool {
    // `try_init` so test binaries can call this from every test.
    let result = match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, ?format, "tracing subscriber not installed");
            false
        }
    }
}
