//! Template kinds and the stanza layout each one renders.
//!
//! # Examples
//!
//! ```
//! use vcport::core::templates::{InstallStep, TemplateKind};
//! use std::str::FromStr;
//!
//! let kind = TemplateKind::from_str("cmake-head-ref").unwrap();
//! assert_eq!(kind, TemplateKind::CmakeHeadRef);
//! assert_eq!(kind.head_ref(), Some("master"));
//! assert_eq!(kind.install_step(), InstallStep::Build);
//!
//! // The default template is the plain CMake build
//! assert_eq!(TemplateKind::default(), TemplateKind::Cmake);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;

/// Secondary ref tracked by templates that carry a `HEAD_REF` directive
pub const DEFAULT_HEAD_REF: &str = "master";

/// Post-fetch step a template emits after the configure stanza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStep {
    /// Stop after configuring
    None,
    /// Plain build system install
    Build,
    /// Language-runtime aware install into the distribution prefix
    Runtime,
}

/// Named portfile templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemplateKind {
    /// CMake configure and install, pinned to the release ref only
    #[default]
    Cmake,
    /// CMake with a `HEAD_REF` fallback and explicit configure options
    CmakeHeadRef,
    /// CMake configure without an install step
    CmakeConfigure,
    /// Python package installed with its interpreter
    Python,
}

impl TemplateKind {
    /// Returns the template identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cmake => "cmake",
            Self::CmakeHeadRef => "cmake-head-ref",
            Self::CmakeConfigure => "cmake-configure",
            Self::Python => "python",
        }
    }

    /// Fixed secondary ref emitted as `HEAD_REF`, if this template has one
    pub fn head_ref(&self) -> Option<&'static str> {
        match self {
            Self::CmakeHeadRef | Self::Python => Some(DEFAULT_HEAD_REF),
            Self::Cmake | Self::CmakeConfigure => None,
        }
    }

    /// Whether the configure stanza passes an `OPTIONS` block
    pub fn passes_build_options(&self) -> bool {
        matches!(self, Self::CmakeHeadRef)
    }

    pub fn install_step(&self) -> InstallStep {
        match self {
            Self::Cmake | Self::CmakeHeadRef => InstallStep::Build,
            Self::CmakeConfigure => InstallStep::None,
            Self::Python => InstallStep::Runtime,
        }
    }

    /// One line summary shown by `vcport templates list`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cmake => "CMake build pinned to the release tag",
            Self::CmakeHeadRef => "CMake build with HEAD_REF master and install prefix options",
            Self::CmakeConfigure => "CMake configure only, no install step",
            Self::Python => "Python package installed into the distribution prefix",
        }
    }

    /// Returns an iterator over all template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplateKind::*;
        [Cmake, CmakeHeadRef, CmakeConfigure, Python].iter().copied()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "cmake" => Ok(TemplateKind::Cmake),
            "cmake-head-ref" => Ok(TemplateKind::CmakeHeadRef),
            "cmake-configure" => Ok(TemplateKind::CmakeConfigure),
            "python" => Ok(TemplateKind::Python),
            _ => Err(Error::template_missing(s)),
        }
    }
}

impl TryFrom<String> for TemplateKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemplateKind> for String {
    fn from(kind: TemplateKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_kind_from_str() {
        assert_eq!(TemplateKind::from_str("cmake").unwrap(), TemplateKind::Cmake);
        assert_eq!(
            TemplateKind::from_str("cmake_head_ref").unwrap(),
            TemplateKind::CmakeHeadRef
        );
        assert_eq!(
            TemplateKind::from_str("CMAKE-CONFIGURE").unwrap(),
            TemplateKind::CmakeConfigure
        );
        assert_eq!(TemplateKind::from_str("python").unwrap(), TemplateKind::Python);
    }

    #[test]
    fn test_unknown_template_kind_is_missing() {
        let err = TemplateKind::from_str("meson").unwrap_err();
        assert!(matches!(err, Error::TemplateMissing(name) if name == "meson"));
    }

    #[test]
    fn test_round_trip_through_as_str() {
        for kind in TemplateKind::all() {
            assert_eq!(TemplateKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_exactly_one_install_step_per_kind() {
        assert_eq!(TemplateKind::Cmake.install_step(), InstallStep::Build);
        assert_eq!(TemplateKind::CmakeHeadRef.install_step(), InstallStep::Build);
        assert_eq!(TemplateKind::CmakeConfigure.install_step(), InstallStep::None);
        assert_eq!(TemplateKind::Python.install_step(), InstallStep::Runtime);
    }

    #[test]
    fn test_near_duplicate_cmake_kinds_differ() {
        assert_eq!(TemplateKind::Cmake.head_ref(), None);
        assert!(!TemplateKind::Cmake.passes_build_options());
        assert_eq!(TemplateKind::CmakeHeadRef.head_ref(), Some("master"));
        assert!(TemplateKind::CmakeHeadRef.passes_build_options());
    }
}
