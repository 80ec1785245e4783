//! Configuration loading and defaults.
//!
//! Defaults live in [`crate::defaults`]; a TOML file and `MEETSCRIBE_*`
//! environment variables override them, and CLI flags override both. The
//! resolved configuration is passed explicitly into the pipeline — nothing
//! here is mutated after startup.

use crate::defaults;
use crate::error::{MeetscribeError, Result};
use crate::llm::prompt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub stt: SttConfig,
    pub ollama: OllamaConfig,
    pub limits: LimitsConfig,
}

/// Input/output locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Optional prompt template file; the built-in template is used when unset
    pub prompt_file: Option<PathBuf>,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
}

/// Summarization service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

/// Guardrails applied before a file enters the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_file_mb: u64,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            input_dir: dirs::video_dir().unwrap_or_else(|| home.join("Videos")),
            output_dir: home.join("meetscribe-output"),
            prompt_file: None,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            model: defaults::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_mb: defaults::DEFAULT_MAX_FILE_MB,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if the file is
    /// missing. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - MEETSCRIBE_INPUT_DIR → paths.input_dir
    /// - MEETSCRIBE_OUTPUT_DIR → paths.output_dir
    /// - MEETSCRIBE_MODEL → stt.model
    /// - MEETSCRIBE_LANGUAGE → stt.language
    /// - MEETSCRIBE_OLLAMA_URL → ollama.url
    /// - MEETSCRIBE_OLLAMA_MODEL → ollama.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("MEETSCRIBE_INPUT_DIR")
            && !dir.is_empty()
        {
            self.paths.input_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("MEETSCRIBE_OUTPUT_DIR")
            && !dir.is_empty()
        {
            self.paths.output_dir = PathBuf::from(dir);
        }

        if let Ok(model) = std::env::var("MEETSCRIBE_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("MEETSCRIBE_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(url) = std::env::var("MEETSCRIBE_OLLAMA_URL")
            && !url.is_empty()
        {
            self.ollama.url = url;
        }

        if let Ok(model) = std::env::var("MEETSCRIBE_OLLAMA_MODEL")
            && !model.is_empty()
        {
            self.ollama.model = model;
        }

        self
    }

    /// Resolve the prompt template: the configured file if set, the
    /// built-in template otherwise. Validates the placeholder up front.
    pub fn prompt_template(&self) -> Result<String> {
        let template = match &self.paths.prompt_file {
            Some(path) => {
                fs::read_to_string(path).map_err(|e| MeetscribeError::ConfigInvalidValue {
                    key: "paths.prompt_file".to_string(),
                    message: format!("{}: {e}", path.display()),
                })?
            }
            None => defaults::DEFAULT_PROMPT_TEMPLATE.to_string(),
        };
        prompt::validate(&template)?;
        Ok(template)
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/meetscribe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("meetscribe")
            .join("config.toml")
    }
}
