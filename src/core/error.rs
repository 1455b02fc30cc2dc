//! Error handling for the vcport portfile generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant is terminal for
//! the render call that produced it; callers decide whether to abort a batch
//! or skip the offending package.
//!
//! # Examples
//!
//! ```
//! use vcport::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::template_missing("cmake"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for vcport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vcport operations
#[derive(Debug, Error)]
pub enum Error {
    /// Source hosting provider outside the supported set
    #[error("Unknown provider '{0}': expected one of gitlab, github, bitbucket")]
    UnknownProvider(String),

    /// Language runtime required by the install stanza is not installed
    #[error(
        "Could not find the '{interpreter}' interpreter, it is required to install this package"
    )]
    RuntimeNotFound { interpreter: String },

    /// No stanza set registered for the requested template kind
    #[error("No template registered for kind '{0}'")]
    TemplateMissing(String),

    /// Release repository URL could not be split into owner and repository
    #[error("Invalid release URL '{url}': {reason}")]
    InvalidReleaseUrl { url: String, reason: String },

    /// Package build type has no template
    #[error("Build type '{0}' is not supported")]
    UnsupportedBuildType(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new missing template error
    pub fn template_missing<S: Into<String>>(kind: S) -> Self {
        Self::TemplateMissing(kind.into())
    }

    /// Create a new invalid release URL error
    pub fn invalid_release_url<U: Into<String>, R: Into<String>>(url: U, reason: R) -> Self {
        Self::InvalidReleaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
