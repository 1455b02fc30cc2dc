//! Package description files and their merge with command line values.
//!
//! A package description is TOML, YAML or JSON, picked by file extension:
//!
//! ```toml
//! template = "python"
//!
//! [source]
//! release_url = "https://github.com/ros2-gbp/bloom-release.git"
//!
//! [install]
//! interpreter = "python3"
//!
//! [package]
//! name = "bloom"
//! version = "0.11.2"
//! distribution = "humble"
//! build_type = "ament_python"
//! ```
//!
//! Missing source fields are filled from `[package]`: the ref defaults to the
//! package's release tag and the target distribution to its distribution.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::core::metadata::PackageMetadata;
use crate::core::provider::Provider;
use crate::core::source::{InstallSettings, PackageSource};
use crate::core::templates::TemplateKind;

/// Source fields, each optional so files and flags can be layered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub provider: Option<Provider>,
    pub owner_name: Option<String>,
    pub repo_name: Option<String>,
    pub release_url: Option<String>,
    pub ref_tag: Option<String>,
    pub target_distro: Option<String>,
}

/// Repository identity assembled from one or more layers
#[derive(Debug, Default)]
struct SourceIdentity {
    provider: Option<Provider>,
    owner_name: Option<String>,
    repo_name: Option<String>,
}

impl SourceIdentity {
    /// Identity described by a single layer: its release URL, if any, with
    /// the layer's explicit fields applied on top
    fn from_layer(layer: &SourceConfig) -> Result<Self> {
        let mut identity = match &layer.release_url {
            Some(url) => {
                let parsed = PackageSource::from_release_url(url, "", "")?;
                Self {
                    provider: Some(parsed.provider),
                    owner_name: Some(parsed.owner_name),
                    repo_name: Some(parsed.repo_name),
                }
            }
            None => Self::default(),
        };
        identity.overlay(layer);
        Ok(identity)
    }

    fn overlay(&mut self, layer: &SourceConfig) {
        if let Some(provider) = layer.provider {
            self.provider = Some(provider);
        }
        if let Some(owner) = &layer.owner_name {
            self.owner_name = Some(owner.clone());
        }
        if let Some(repo) = &layer.repo_name {
            self.repo_name = Some(repo.clone());
        }
    }
}

/// Parsed package description file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default)]
    pub template: Option<TemplateKind>,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub install: Option<InstallSettings>,
    #[serde(default)]
    pub package: Option<PackageMetadata>,
}

/// Everything the renderer needs for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub source: PackageSource,
    pub kind: TemplateKind,
    pub metadata: Option<PackageMetadata>,
}

impl PackageConfig {
    /// Load a package description, choosing the format from the extension
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        debug!(path = %path.display(), format = %extension, "Loading package description");
        Self::parse(&content, &extension)
    }

    /// Parse a package description in the given format
    pub fn parse(content: &str, format: &str) -> Result<Self> {
        match format {
            "toml" => Ok(toml::from_str(content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "json" => Ok(serde_json::from_str(content)?),
            other => Err(Error::config(format!(
                "Unsupported package description format '{other}', expected toml, yaml or json"
            ))),
        }
    }

    /// Apply command line overrides and produce renderer input
    pub fn resolve(
        self,
        overrides: SourceConfig,
        template: Option<TemplateKind>,
    ) -> Result<ResolvedPackage> {
        let metadata = self.package;

        // A release URL on the command line replaces the file's identity,
        // explicit command line fields then apply on top of either
        let base_layer = if overrides.release_url.is_some() {
            &overrides
        } else {
            &self.source
        };
        let mut identity = SourceIdentity::from_layer(base_layer)?;
        identity.overlay(&overrides);

        let ref_tag = overrides
            .ref_tag
            .or(self.source.ref_tag)
            .or_else(|| metadata.as_ref().map(PackageMetadata::release_tag))
            .ok_or_else(|| Error::config("missing ref tag (set ref_tag or [package])"))?;
        let target_distro = overrides
            .target_distro
            .or(self.source.target_distro)
            .or_else(|| metadata.as_ref().map(|m| m.distribution.clone()))
            .ok_or_else(|| {
                Error::config("missing target distribution (set target_distro or [package])")
            })?;

        let mut package_source = match identity {
            SourceIdentity {
                provider: Some(provider),
                owner_name: Some(owner),
                repo_name: Some(repo),
            } => PackageSource::new(provider, owner, repo, ref_tag, target_distro),
            partial => {
                let mut missing = Vec::new();
                if partial.provider.is_none() {
                    missing.push("provider");
                }
                if partial.owner_name.is_none() {
                    missing.push("owner_name");
                }
                if partial.repo_name.is_none() {
                    missing.push("repo_name");
                }
                return Err(Error::config(format!(
                    "missing {} (or set release_url)",
                    missing.join(", ")
                )));
            }
        };
        package_source.install_settings = self.install;

        let kind = template
            .or(self.template)
            .or_else(|| metadata.as_ref().map(|m| m.build_type.default_template()))
            .unwrap_or_default();

        Ok(ResolvedPackage {
            source: package_source,
            kind,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::BuildType;
    use std::io::Write;

    const TOML_CONFIG: &str = r#"
template = "python"

[source]
release_url = "https://github.com/ros2-gbp/bloom-release.git"

[install]
interpreter = "python3"

[package]
name = "bloom"
version = "0.11.2"
distribution = "humble"
build_type = "ament_python"
"#;

    #[test]
    fn test_parse_toml_and_resolve() {
        let config = PackageConfig::parse(TOML_CONFIG, "toml").unwrap();
        assert_eq!(config.template, Some(TemplateKind::Python));

        let resolved = config.resolve(SourceConfig::default(), None).unwrap();
        assert_eq!(resolved.kind, TemplateKind::Python);
        assert_eq!(resolved.source.provider, Provider::Github);
        assert_eq!(resolved.source.owner_name, "ros2-gbp");
        assert_eq!(resolved.source.repo_name, "bloom-release");
        assert_eq!(resolved.source.ref_tag, "vcpkg/bloom_0.11.2-1_humble");
        assert_eq!(resolved.source.target_distro, "humble");
        assert_eq!(
            resolved.source.install_settings.unwrap().interpreter,
            "python3"
        );
        assert_eq!(
            resolved.metadata.unwrap().build_type,
            BuildType::AmentPython
        );
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
source:
  provider: gitlab
  owner_name: group
  repo_name: project
  ref_tag: v2.0.0
  target_distro: jazzy
"#;
        let resolved = PackageConfig::parse(yaml, "yml")
            .unwrap()
            .resolve(SourceConfig::default(), None)
            .unwrap();
        assert_eq!(resolved.source.provider, Provider::Gitlab);
        assert_eq!(resolved.source.repo_path(), "group/project");
        assert_eq!(resolved.kind, TemplateKind::Cmake);
        assert!(resolved.metadata.is_none());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = PackageConfig::parse(TOML_CONFIG, "toml").unwrap();
        let overrides = SourceConfig {
            provider: Some(Provider::Bitbucket),
            owner_name: Some("me".to_string()),
            repo_name: Some("fork".to_string()),
            ref_tag: Some("custom".to_string()),
            ..Default::default()
        };
        let resolved = config
            .resolve(overrides, Some(TemplateKind::CmakeConfigure))
            .unwrap();
        assert_eq!(resolved.kind, TemplateKind::CmakeConfigure);
        assert_eq!(resolved.source.provider, Provider::Bitbucket);
        assert_eq!(resolved.source.repo_path(), "me/fork");
        assert_eq!(resolved.source.ref_tag, "custom");
        assert_eq!(resolved.source.target_distro, "humble");
    }

    #[test]
    fn test_release_url_override_replaces_file_identity() {
        let toml = r#"
[source]
provider = "github"
owner_name = "old"
repo_name = "old"
ref_tag = "1.0"
target_distro = "humble"
"#;
        let overrides = SourceConfig {
            release_url: Some("https://gitlab.com/new/pkg.git".to_string()),
            ..Default::default()
        };
        let resolved = PackageConfig::parse(toml, "toml")
            .unwrap()
            .resolve(overrides, None)
            .unwrap();
        assert_eq!(resolved.source.provider, Provider::Gitlab);
        assert_eq!(resolved.source.repo_path(), "new/pkg");
        assert_eq!(resolved.source.ref_tag, "1.0");
    }

    #[test]
    fn test_owner_override_applies_over_file_release_url() {
        let toml = r#"
[source]
release_url = "https://github.com/ros/bloom.git"
ref_tag = "1.0"
target_distro = "humble"
"#;
        let overrides = SourceConfig {
            owner_name: Some("fork".to_string()),
            ..Default::default()
        };
        let resolved = PackageConfig::parse(toml, "toml")
            .unwrap()
            .resolve(overrides, None)
            .unwrap();
        assert_eq!(resolved.source.provider, Provider::Github);
        assert_eq!(resolved.source.owner_name, "fork");
        assert_eq!(resolved.source.repo_path(), "fork/bloom");
    }

    #[test]
    fn test_provider_override_applies_over_release_url_override() {
        let overrides = SourceConfig {
            release_url: Some("https://github.com/ros/bloom.git".to_string()),
            provider: Some(Provider::Bitbucket),
            ref_tag: Some("1".to_string()),
            target_distro: Some("d".to_string()),
            ..Default::default()
        };
        let resolved = PackageConfig::default().resolve(overrides, None).unwrap();
        assert_eq!(resolved.source.provider, Provider::Bitbucket);
        assert_eq!(resolved.source.repo_path(), "ros/bloom");
    }

    #[test]
    fn test_build_type_selects_default_template() {
        let toml = r#"
[source]
provider = "github"
owner_name = "ros2"
repo_name = "rclcpp"

[package]
name = "rclcpp"
version = "16.0.1"
distribution = "humble"
"#;
        let resolved = PackageConfig::parse(toml, "toml")
            .unwrap()
            .resolve(SourceConfig::default(), None)
            .unwrap();
        assert_eq!(resolved.kind, TemplateKind::CmakeHeadRef);
    }

    #[test]
    fn test_unknown_provider_in_file_is_rejected() {
        let err = PackageConfig::parse("[source]\nprovider = \"svn\"\n", "toml").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let overrides = SourceConfig {
            provider: Some(Provider::Github),
            ref_tag: Some("1".to_string()),
            target_distro: Some("d".to_string()),
            ..Default::default()
        };
        let err = PackageConfig::default()
            .resolve(overrides, None)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("owner_name"));
        assert!(message.contains("repo_name"));
        assert!(!message.contains("provider,"));

        let err = PackageConfig::default()
            .resolve(SourceConfig::default(), None)
            .unwrap_err();
        assert!(err.to_string().contains("missing ref tag"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = PackageConfig::parse("", "ini").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_CONFIG.as_bytes()).unwrap();

        let config = PackageConfig::load(file.path()).await.unwrap();
        assert_eq!(config.package.unwrap().name, "bloom");
    }
}
