use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assignment::{DEFAULT_ASSIGNMENT_INDEX, KeyAssignment, KeyPolicies};
use crate::error::ConfigError;
use crate::navigator::DEFAULT_MAX_PARAGRAPH_CROSSINGS;
use crate::segmenter::DEFAULT_BULKY_PUNCTUATION;

fn default_true() -> bool {
    true
}

fn default_assignment_index() -> usize {
    DEFAULT_ASSIGNMENT_INDEX
}

fn default_bulky_word_punctuation() -> String {
    DEFAULT_BULKY_PUNCTUATION.to_string()
}

fn default_max_paragraph_crossings() -> usize {
    DEFAULT_MAX_PARAGRAPH_CROSSINGS
}

/// Word navigation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Replace the host's Control+Left/Right word movement
    #[serde(default = "default_true")]
    pub override_move_by_word: bool,

    /// Enable Control+Windows+Left/Right for fine/bulky word movement
    #[serde(default = "default_true")]
    pub enable_move_by_word_ex: bool,

    /// Index into the command assignment presets
    #[serde(default = "default_assignment_index")]
    pub assignment_index: usize,

    /// Characters that separate bulky words, in addition to whitespace
    #[serde(default = "default_bulky_word_punctuation")]
    pub bulky_word_punctuation: String,

    /// Applications where word navigation is left to the host
    #[serde(default)]
    pub applications_blacklist: Vec<String>,

    /// Maximum number of paragraphs inspected by a single move
    #[serde(default = "default_max_paragraph_crossings")]
    pub max_paragraph_crossings: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            override_move_by_word: true,
            enable_move_by_word_ex: true,
            assignment_index: DEFAULT_ASSIGNMENT_INDEX,
            bulky_word_punctuation: default_bulky_word_punctuation(),
            applications_blacklist: Vec::new(),
            max_paragraph_crossings: DEFAULT_MAX_PARAGRAPH_CROSSINGS,
        }
    }
}

impl NavigationConfig {
    /// The selected command assignment preset
    pub fn assignment(&self) -> Result<&'static KeyAssignment, ConfigError> {
        KeyAssignment::get(self.assignment_index)
    }

    /// Compile the policies used by each gesture family
    pub fn key_policies(&self) -> Result<KeyPolicies, ConfigError> {
        KeyPolicies::new(
            self.assignment()?,
            &self.bulky_word_punctuation,
            self.max_paragraph_crossings,
        )
    }

    /// Whether word navigation is disabled for `application` (case-insensitive)
    pub fn is_blacklisted(&self, application: &str) -> bool {
        self.applications_blacklist
            .iter()
            .map(|name| name.trim())
            .any(|name| !name.is_empty() && name.eq_ignore_ascii_case(application.trim()))
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from default location or use defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file {}: {}", config_path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> std::path::PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("wordnav").join("config.toml")
        } else {
            std::path::PathBuf::from(".wordnav.toml")
        }
    }
}
