//! Runtime settings loaded from the environment.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "STEPFLOW_LOG";
/// Variable holding the directory relative file names are resolved against.
pub const DIR_ENV: &str = "STEPFLOW_DIR";

/// Settings for the `stepflow` shell.
///
/// # Examples
///
/// ```
/// use stepflow::Settings;
/// use std::path::Path;
///
/// let settings = Settings::from_lookup(|key| match key {
///     "STEPFLOW_DIR" => Some("/tmp/flows".to_string()),
///     _ => None,
/// })?;
///
/// assert_eq!(settings.log_filter, "warn");
/// assert_eq!(settings.resolve("a.txt"), Path::new("/tmp/flows/a.txt"));
/// # Ok::<(), stepflow::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `tracing_subscriber::EnvFilter` directive. Default: `warn`.
    pub log_filter: String,
    /// Base for relative file names entered in the shell. Default: `.`.
    pub base_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            base_dir: PathBuf::from("."),
        }
    }
}

/// Loads an optional `.env` file from the current directory or its parents
/// into the process environment.
///
/// A missing file is not an error. Anything else (a malformed line, an
/// unreadable file) is handed back so it can be logged once logging is set
/// up.
pub fn load_env_file() -> Option<dotenvy::Error> {
    env_file_problem(dotenvy::dotenv().map(drop))
}

fn env_file_problem(result: Result<(), dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(()) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// Call [`load_env_file`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] when a variable is set to an empty or
    /// blank string.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(filter) = non_empty(LOG_ENV, lookup(LOG_ENV))? {
            settings.log_filter = filter;
        }
        if let Some(dir) = non_empty(DIR_ENV, lookup(DIR_ENV))? {
            settings.base_dir = PathBuf::from(dir);
        }
        Ok(settings)
    }

    /// Resolves a user-entered path: absolute paths are kept, relative ones
    /// are joined onto [`base_dir`](Settings::base_dir).
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn non_empty(key: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
        other => Ok(other),
    }
}
