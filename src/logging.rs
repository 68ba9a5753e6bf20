//! Logging
//!
//! Installs the global `tracing` subscriber for hosts that do not bring
//! their own. `RUST_LOG` wins over the configured filter.

use crate::config::LoggingSettings;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILE_PREFIX};
use crate::error::{Error, Result};
use crate::helpers::{get_or_create_data_dir, is_development};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_development() && settings.filter == DEFAULT_LOG_FILTER {
            EnvFilter::new("design_kit_core=debug,info")
        } else {
            EnvFilter::new(&settings.filter)
        }
    })
}

/// Initialize the global subscriber.
///
/// When file logging is enabled the returned guard must be kept alive for
/// buffered lines to be flushed.
pub fn init(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(settings);

    if !settings.file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| Error::Logging {
                message: e.to_string(),
            })?;
        return Ok(None);
    }

    let directory = match &settings.directory {
        Some(directory) => directory.clone(),
        None => get_or_create_data_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&directory)?;

    let appender = tracing_appender::rolling::daily(&directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging {
            message: e.to_string(),
        })?;

    tracing::info!("Logging to {}", directory.display());
    Ok(Some(guard))
}
