//! Logging setup for the CLI.
//!
//! Human-readable logs always go to stderr. When a log file or directory is
//! configured, structured JSON lines are also written there through a
//! non-blocking appender. Stdout is never touched, so `serve` can use it
//! for the MCP protocol.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_PATH_ENV: &str = "READING_TIME_LOG_PATH";
const LOG_DIR_ENV: &str = "READING_TIME_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "reading-time.jsonl";

/// Where file logs should be written, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Explicit log file; wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for `reading-time.jsonl`.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the log environment variables, falling back to `config_log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let non_empty = |p: PathBuf| (!p.as_os_str().is_empty()).then_some(p);
        Self {
            log_path: log_path.and_then(non_empty),
            log_dir: env_dir.and_then(non_empty).or(config_dir),
        }
    }

    /// The file JSON logs go to, if file logging is enabled.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| self.log_dir.as_ref().map(|dir| dir.join(DEFAULT_LOG_FILE)))
    }
}

/// Build the log filter from CLI flags.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level one step, and the configured level is the base.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, default_level))
}

fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let Some(path) = config.log_file() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    let (dir, file_name) = split_log_path(&path)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().json().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Some(guard))
}

fn split_log_path(path: &Path) -> anyhow::Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file_name))
}
