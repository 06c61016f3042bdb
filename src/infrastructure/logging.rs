use std::{io, path::Path};

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "parser.log";

static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Console output on stderr plus a daily rolling file under `logs_dir`.
///
/// `RUST_LOG` takes precedence over `level`. Calling this twice is a no-op.
pub fn init_tracing(level: &str, logs_dir: &Path) -> Result<()> {
    GUARD.get_or_try_init::<_, anyhow::Error>(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let (file_writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()?;

        tracing::debug!(logs = %logs_dir.display(), "tracing initialized");
        Ok(guard)
    })?;
    Ok(())
}
