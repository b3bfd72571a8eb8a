//! Global tracing subscriber for the binaries.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

static INITIALIZED: OnceLock<()> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Installs an stderr fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Subsequent calls are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INITIALIZED.set(());

    tracing::debug!("Logging initialized");
    Ok(())
}
