//! Configuration for the coaching assistant.
//!
//! [`CoachConfig`] gathers the settings the external model runtime needs: the API
//! credential, the Vertex AI provider flag, and the model id used by each agent.
//! None of it affects the session store. It is a plain struct; build it with
//! [`CoachConfig::from_env`] or by hand.
//!
//! `from_env` first loads a `.env` file from the working directory (or a parent) with
//! `dotenvy`. Variables already set in the process environment win over the file.
//!
//! # Example
//!
//! ```rust
//! use healthcoach::CoachConfig;
//!
//! let config = CoachConfig::from_lookup(|var| match var {
//!     "GOOGLE_API_KEY" => Some("test-key".to_string()),
//!     "GOOGLE_GENAI_USE_VERTEXAI" => Some("TRUE".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert!(config.use_vertex_ai);
//! assert_eq!(config.models.main, "gemini-2.0-flash");
//! ```

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the model provider credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Environment variable selecting Vertex AI instead of the public API.
pub const USE_VERTEX_AI_VAR: &str = "GOOGLE_GENAI_USE_VERTEXAI";

/// Model used by every agent unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Retries the model runtime may attempt per call.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {var} has invalid boolean value '{value}'")]
    InvalidFlag { var: &'static str, value: String },
    #[error("could not read env file {path}: {message}")]
    EnvFile { path: String, message: String },
}

/// Model id per agent role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub main: String,
    pub planner: String,
    pub workout: String,
    pub tracker: String,
    pub recovery: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            main: DEFAULT_MODEL.to_string(),
            planner: DEFAULT_MODEL.to_string(),
            workout: DEFAULT_MODEL.to_string(),
            tracker: DEFAULT_MODEL.to_string(),
            recovery: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Settings handed to the model runtime.
#[derive(Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Passed through to the model runtime; `None` when unset.
    pub api_key: Option<String>,
    pub use_vertex_ai: bool,
    pub models: ModelConfig,
    pub max_retries: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            use_vertex_ai: false,
            models: ModelConfig::default(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl std::fmt::Debug for CoachConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoachConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("use_vertex_ai", &self.use_vertex_ai)
            .field("models", &self.models)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl CoachConfig {
    /// Read the configuration from the process environment, after loading `.env`.
    ///
    /// A missing `.env` is fine; a malformed one is logged and skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => log::warn!("ignoring .env file: {}", err),
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration from an explicit env file, layered under the process
    /// environment. Unlike [`from_env`](Self::from_env) the file must exist.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_file_and_lookup(path.as_ref(), |var| std::env::var(var).ok())
    }

    fn from_file_and_lookup<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = read_env_file(path)?;
        log::debug!("read {} entries from {}", file.len(), path.display());
        Self::from_lookup(|var| lookup(var).or_else(|| file.get(var).cloned()))
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty());
        let use_vertex_ai = match lookup(USE_VERTEX_AI_VAR) {
            Some(raw) => parse_flag(USE_VERTEX_AI_VAR, &raw)?,
            None => false,
        };

        if api_key.is_none() {
            log::warn!("{} is not set; model calls will fail", API_KEY_VAR);
        }
        log::debug!("vertex ai: {}", use_vertex_ai);

        Ok(Self {
            api_key,
            use_vertex_ai,
            ..Self::default()
        })
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_file_error = |err: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        message: err.to_string(),
    };
    dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .map(|item| item.map_err(env_file_error))
        .collect()
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |var: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = CoachConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CoachConfig::default());
        assert_eq!(
            config.require_api_key(),
            Err(ConfigError::MissingVar(API_KEY_VAR))
        );
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_vertex_flag_parsing() {
        for (raw, expected) in [("TRUE", true), ("1", true), ("FALSE", false), ("no", false)] {
            let config =
                CoachConfig::from_lookup(lookup_from(&[(USE_VERTEX_AI_VAR, raw)])).unwrap();
            assert_eq!(config.use_vertex_ai, expected, "flag value {}", raw);
        }

        let err = CoachConfig::from_lookup(lookup_from(&[(USE_VERTEX_AI_VAR, "maybe")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "environment variable GOOGLE_GENAI_USE_VERTEXAI has invalid boolean value 'maybe'"
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = CoachConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap();
        assert!(config.api_key.is_none());

        let config = CoachConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(config.require_api_key(), Ok("abc"));
        assert!(!format!("{:?}", config).contains("abc"));
    }

    #[test]
    fn test_env_file_fills_unset_variables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GOOGLE_API_KEY=file-key").unwrap();
        writeln!(file, "GOOGLE_GENAI_USE_VERTEXAI=TRUE").unwrap();

        let config = CoachConfig::from_file_and_lookup(file.path(), lookup_from(&[])).unwrap();
        assert_eq!(config.require_api_key(), Ok("file-key"));
        assert!(config.use_vertex_ai);
    }

    #[test]
    fn test_process_environment_wins_over_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GOOGLE_API_KEY=file-key").unwrap();
        writeln!(file, "GOOGLE_GENAI_USE_VERTEXAI=TRUE").unwrap();

        let config = CoachConfig::from_file_and_lookup(
            file.path(),
            lookup_from(&[(API_KEY_VAR, "process-key"), (USE_VERTEX_AI_VAR, "FALSE")]),
        )
        .unwrap();
        assert_eq!(config.require_api_key(), Ok("process-key"));
        assert!(!config.use_vertex_ai);
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CoachConfig::from_env_file(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }
}
