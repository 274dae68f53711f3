//! Logging setup
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init_logging`] once.

use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Install a formatted subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (e.g. `"e2ebench=info"`) when
/// `RUST_LOG` is unset or unparsable.
///
/// # Errors
/// Returns [`Error::Other`] if a global subscriber is already installed or
/// the directive is invalid.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| {
                Error::Other(format!("invalid log directive '{default_directive}': {e}"))
            })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Other(format!("logging already initialized: {e}")))
}
