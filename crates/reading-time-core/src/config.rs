//! Configuration loading and discovery.
//!
//! Settings are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config from the XDG config directory
//! 3. Project config, found by walking up from the working directory
//! 4. Explicit files (`--config`)
//! 5. `READING_TIME_*` environment variables
//!
//! # Supported formats
//!
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `reading-time.<ext>` in current directory or any parent
//! - `.reading-time.<ext>` in current directory or any parent
//! - `reading.<ext>` in current directory or any parent
//! - `.reading.<ext>` in current directory or any parent
//! - `~/.config/reading-time/config.<ext>` (user config)
//!
//! Only the closest directory containing any of these files contributes.
//! The walk stops at a directory containing `.git`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use reading_time_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("{} words per minute", config.estimate_config().wpm);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::estimate::{EstimateConfig, Rounding};

/// The configuration for reading-time.
///
/// Estimate settings are optional so that command-line flags, config files
/// and built-in defaults can be told apart; [`Config::estimate_config`]
/// fills the gaps.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Reading rate in words per minute (default: 200).
    pub wpm: Option<u32>,
    /// Label for a one-minute reading time (default: "minute to read").
    pub postfix: Option<String>,
    /// Label for any other reading time (default: "minutes to read").
    pub plural: Option<String>,
    /// Add image viewing time to the reading time (default: false).
    pub image_time: Option<bool>,
    /// Seconds added to every reading time (default: 0).
    pub extra_seconds: Option<u32>,
    /// Rounding applied to whole minutes (default: up).
    pub rounding: Option<Rounding>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Use `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Config {
    /// Estimate settings with defaults filled in for anything unset.
    pub fn estimate_config(&self) -> EstimateConfig {
        let defaults = EstimateConfig::default();
        EstimateConfig {
            wpm: self.wpm.unwrap_or(defaults.wpm),
            postfix: self.postfix.clone().unwrap_or(defaults.postfix),
            plural: self.plural.clone().unwrap_or(defaults.plural),
            image_time: self.image_time.unwrap_or(defaults.image_time),
            extra_seconds: self.extra_seconds.unwrap_or(defaults.extra_seconds),
            rounding: self.rounding.unwrap_or(defaults.rounding),
        }
    }

    /// The effective input size limit, if any.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files (e.g., from `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions, merged in this order.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup.
const APP_NAME: &str = "reading-time";

/// Config file base names, lowest precedence first.
const APP_NAMES: &[&str] = &["reading", "reading-time"];

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "READING_TIME_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop walking up at a directory containing this file or directory.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/reading-time/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward walk at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // READING_TIME_WPM=250, READING_TIME_LOG_LEVEL=debug, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            wpm = ?config.wpm,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files from the closest directory at or above `start` that has any.
    ///
    /// Ordered low→high precedence: `reading` before `reading-time`, and
    /// dotfiles before regular files for the same name.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = APP_NAMES
                .iter()
                .flat_map(|app_name| {
                    let dotfiles = CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| format!(".{app_name}.{ext}"));
                    let regular = CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| format!("{app_name}.{ext}"));
                    dotfiles.chain(regular)
                })
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // A config beside the marker still counts, so check the marker last.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/reading-time/` on Linux,
/// `~/Library/Application Support/reading-time/` on macOS, and the
/// equivalent elsewhere. `None` if the home directory cannot be determined.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
