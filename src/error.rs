use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while loading or compiling navigation settings.
///
/// These surface when the configuration is read or turned into a
/// [`KeyPolicies`](crate::assignment::KeyPolicies) snapshot, never while moving the cursor.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(code(wordnav::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    #[diagnostic(code(wordnav::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    #[diagnostic(code(wordnav::config::serialize))]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config file {path}")]
    #[diagnostic(code(wordnav::config::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("assignment index {index} is out of range")]
    #[diagnostic(
        code(wordnav::config::assignment_index),
        help("use a value between 0 and {max}; run `wordnav list-assignments` to see them")
    )]
    AssignmentIndex { index: usize, max: usize },

    #[error("max_paragraph_crossings must be at least 1")]
    #[diagnostic(code(wordnav::config::crossing_budget))]
    CrossingBudget,

    #[error("bulky word separators {punctuation:?} could not be compiled")]
    #[diagnostic(code(wordnav::config::punctuation))]
    Punctuation {
        punctuation: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while dispatching a navigation gesture.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum NavigationError {
    /// The gesture's main key is not an arrow key, so it carries no direction.
    #[error("gesture key {0:?} does not map to a navigation direction")]
    #[diagnostic(code(wordnav::navigation::unrecognized_key))]
    UnrecognizedKey(String),

    /// A move by word gesture arrived without either control key held.
    #[error("move by word gesture {0:?} arrived without a control key")]
    #[diagnostic(code(wordnav::navigation::missing_control_key))]
    MissingControlKey(String),
}
