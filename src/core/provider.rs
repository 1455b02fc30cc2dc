//! Source hosting providers a portfile can fetch from.
//!
//! Each provider has its own fetch stanza header. The set is closed: a
//! provider name that is not one of the three known hosts is rejected when it
//! is parsed, so an unknown provider never reaches the renderer.
//!
//! # Examples
//!
//! ```
//! use vcport::core::provider::Provider;
//! use std::str::FromStr;
//!
//! let provider = Provider::from_str("GitHub").unwrap();
//! assert_eq!(provider, Provider::Github);
//! assert_eq!(provider.fetch_header(), "fetch_from_github(");
//! assert!(Provider::from_str("sourceforge").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;

/// Fetch stanza header for GitLab hosted sources
pub const GITLAB_FETCH_HEADER: &str = "fetch_from_gitlab(";
/// Fetch stanza header for GitHub hosted sources
pub const GITHUB_FETCH_HEADER: &str = "fetch_from_github(";
/// Fetch stanza header for Bitbucket hosted sources
pub const BITBUCKET_FETCH_HEADER: &str = "fetch_from_bitbucket(";

/// Source code hosting service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Provider {
    Gitlab,
    Github,
    Bitbucket,
}

impl Provider {
    /// Returns the provider identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gitlab => "gitlab",
            Self::Github => "github",
            Self::Bitbucket => "bitbucket",
        }
    }

    /// Header literal that opens this provider's fetch stanza
    pub fn fetch_header(&self) -> &'static str {
        match self {
            Self::Gitlab => GITLAB_FETCH_HEADER,
            Self::Github => GITHUB_FETCH_HEADER,
            Self::Bitbucket => BITBUCKET_FETCH_HEADER,
        }
    }

    /// Returns an iterator over all supported providers
    pub fn all() -> impl Iterator<Item = Self> {
        use Provider::*;
        [Github, Gitlab, Bitbucket].iter().copied()
    }

    /// Find the provider whose name appears in a repository host name.
    ///
    /// Providers are checked in `all()` order, so `github` wins if a host
    /// somehow mentions several.
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.to_lowercase();
        Self::all().find(|p| host.contains(p.as_str()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gitlab" => Ok(Provider::Gitlab),
            "github" => Ok(Provider::Github),
            "bitbucket" => Ok(Provider::Bitbucket),
            _ => Err(Error::UnknownProvider(s.to_string())),
        }
    }
}

impl TryFrom<String> for Provider {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        provider.as_str().to_string()
    }
}
