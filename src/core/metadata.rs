//! Release metadata of a package: naming, release tags and build type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;
use crate::core::templates::TemplateKind;

/// Namespace prefix of release tags created for vcpkg ports
pub const RELEASE_TAG_NAMESPACE: &str = "vcpkg";

/// Build system a package declares in its package manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuildType {
    AmentCmake,
    AmentPython,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmentCmake => "ament_cmake",
            Self::AmentPython => "ament_python",
        }
    }

    /// Template kind used when the caller does not choose one
    pub fn default_template(&self) -> TemplateKind {
        match self {
            Self::AmentCmake => TemplateKind::CmakeHeadRef,
            Self::AmentPython => TemplateKind::Python,
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ament_cmake" => Ok(BuildType::AmentCmake),
            "ament_python" => Ok(BuildType::AmentPython),
            _ => Err(Error::UnsupportedBuildType(s.to_string())),
        }
    }
}

impl TryFrom<String> for BuildType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildType> for String {
    fn from(build_type: BuildType) -> Self {
        build_type.as_str().to_string()
    }
}

/// Metadata of one package release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    /// Release increment of this version
    #[serde(default = "default_inc")]
    pub inc: u32,
    pub distribution: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_build_type")]
    pub build_type: BuildType,
    /// Already resolved port names this package depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

fn default_inc() -> u32 {
    1
}

fn default_build_type() -> BuildType {
    BuildType::AmentCmake
}

impl PackageMetadata {
    /// Release tag the port's `REF` points at:
    /// `vcpkg/{name}_{version}-{inc}_{distribution}`
    pub fn release_tag(&self) -> String {
        release_tag(&self.name, &self.version, self.inc, &self.distribution)
    }
}

/// Release tag for a package version in a distribution
pub fn release_tag(name: &str, version: &str, inc: u32, distribution: &str) -> String {
    format!("{RELEASE_TAG_NAMESPACE}/{name}_{version}-{inc}_{distribution}")
}
