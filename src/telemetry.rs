//! Structured logging initialisation.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "REGION_SPLICE_LOG";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "debug";

static TELEMETRY_GUARD: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Installs the global subscriber on first use. Later calls are no-ops.
///
/// `verbose` overrides whatever `REGION_SPLICE_LOG` says.
pub fn initialise(verbose: bool) -> Result<(), TelemetryError> {
    if TELEMETRY_GUARD.get().is_some() {
        return Ok(());
    }
    let directive = filter_directive(verbose, std::env::var(LOG_ENV).ok());
    install_subscriber(&directive)?;
    let _ = TELEMETRY_GUARD.set(());
    Ok(())
}

fn filter_directive(verbose: bool, from_env: Option<String>) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    from_env
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn install_subscriber(directive: &str) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_new(directive).map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| TelemetryError::Subscriber(error.to_string()))
}
