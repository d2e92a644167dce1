// src/logging.rs
use std::env;
use std::io::{self, IsTerminal as _};
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Environment variable holding filter directives, e.g. `savcalc=debug`.
/// Falls back to `RUST_LOG`.
pub const LOG_ENV: &str = "SAVCALC_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

static INITIALISED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Error)]
pub enum InitError {
    #[error("logging has already been initialised")]
    AlreadyInitialised,
    #[error("failed to read {LOG_ENV}: {0}")]
    Env(#[from] env::VarError),
    #[error("invalid {LOG_ENV} directive: {0}")]
    Directive(#[from] ParseError),
    #[error("failed to install the log subscriber: {0}")]
    Install(String),
}

/// Installs the global subscriber. Diagnostics go to stderr so they never
/// mix with results written to stdout.
///
/// # Errors
///
/// Returns an error if called twice, or if the filter directives are invalid.
pub fn init() -> Result<(), InitError> {
    INITIALISED
        .set(())
        .map_err(|()| InitError::AlreadyInitialised)?;

    let filter = filter_from_env()?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| InitError::Install(err.to_string()))
}

fn filter_from_env() -> Result<EnvFilter, InitError> {
    match env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))),
        Err(err) => Err(err.into()),
    }
}
