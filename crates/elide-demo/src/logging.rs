#![forbid(unsafe_code)]

//! Tracing setup.
//!
//! The demo owns the terminal, so log output goes to a file or nowhere.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `ELIDE_DEMO_LOG_FILTER` is unset.
pub const DEFAULT_FILTER: &str = "elide_widgets=debug,elide_demo=debug";

/// Build the filter from `directives`, falling back to [`DEFAULT_FILTER`]
/// when they are missing or invalid.
#[must_use]
pub fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a plain-text subscriber writing to `path`.
///
/// # Errors
///
/// Fails if the file cannot be created or a global subscriber is already set.
pub fn init(path: &Path) -> elide::Result<()> {
    let file = File::create(path)?;
    let directives = std::env::var("ELIDE_DEMO_LOG_FILTER").ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| elide::Error::Logging(format!("subscriber install failed: {err}")))
}
