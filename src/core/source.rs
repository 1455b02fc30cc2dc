//! Package source description consumed by the manifest renderer.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::error::{Error, Result};
use crate::core::provider::Provider;

/// CMake variable holding the port's staging directory
pub const PACKAGES_DIR_VAR: &str = "${CURRENT_PACKAGES_DIR}";

/// Directory under the staging directory where distributions are installed
pub const DISTRO_INSTALL_ROOT: &str = "opt/ros";

/// Where and how a package's source is fetched, plus the install prefix segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSource {
    pub provider: Provider,
    pub owner_name: String,
    pub repo_name: String,
    pub ref_tag: String,
    pub target_distro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_settings: Option<InstallSettings>,
}

/// Options for the language-runtime aware install stanza
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallSettings {
    /// Interpreter executable looked up before the install stanza is rendered
    pub interpreter: String,
    /// Create the runtime library directory before installing into it
    pub prepare_site_path: bool,
    /// Runtime library directory, relative to the install prefix
    pub site_packages: String,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            prepare_site_path: true,
            site_packages: "Lib/site-packages".to_string(),
        }
    }
}

impl PackageSource {
    pub fn new(
        provider: Provider,
        owner_name: impl Into<String>,
        repo_name: impl Into<String>,
        ref_tag: impl Into<String>,
        target_distro: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            owner_name: owner_name.into(),
            repo_name: repo_name.into(),
            ref_tag: ref_tag.into(),
            target_distro: target_distro.into(),
            install_settings: None,
        }
    }

    pub fn with_install_settings(mut self, settings: InstallSettings) -> Self {
        self.install_settings = Some(settings);
        self
    }

    /// Build a source from a release repository URL such as
    /// `https://github.com/<owner>/<repo>.git`.
    pub fn from_release_url(
        release_url: &str,
        ref_tag: impl Into<String>,
        target_distro: impl Into<String>,
    ) -> Result<Self> {
        let parsed = Url::parse(release_url)
            .map_err(|e| Error::invalid_release_url(release_url, e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| Error::invalid_release_url(release_url, "missing host"))?;
        let provider =
            Provider::from_host(host).ok_or_else(|| Error::UnknownProvider(host.to_string()))?;

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(Error::invalid_release_url(
                release_url,
                "expected <owner>/<repository> in the path",
            ));
        }

        let owner = segments[segments.len() - 2];
        let last = segments[segments.len() - 1];
        let repo = last.strip_suffix(".git").unwrap_or(last);
        if repo.is_empty() {
            return Err(Error::invalid_release_url(release_url, "empty repository name"));
        }

        debug!(%provider, owner, repo, "Parsed release URL");
        Ok(Self::new(provider, owner, repo, ref_tag, target_distro))
    }

    /// `REPO` directive value
    pub fn repo_path(&self) -> String {
        format!("{}/{}", self.owner_name, self.repo_name)
    }

    /// Install settings, falling back to the defaults when none were given
    pub fn install_settings_or_default(&self) -> InstallSettings {
        self.install_settings.clone().unwrap_or_default()
    }
}

/// Install prefix for a distribution inside the port's staging directory
pub fn install_prefix(target_distro: &str) -> String {
    format!("{PACKAGES_DIR_VAR}/{DISTRO_INSTALL_ROOT}/{target_distro}")
}

/// Runtime library directory nested under the distribution's install prefix
pub fn runtime_site_path(target_distro: &str, site_packages: &str) -> String {
    format!("{}/{}", install_prefix(target_distro), site_packages)
}

/// Recover the distribution name from an install prefix produced by [`install_prefix`]
pub fn distro_from_install_prefix(prefix: &str) -> Option<&str> {
    prefix
        .strip_prefix(PACKAGES_DIR_VAR)?
        .strip_prefix('/')?
        .strip_prefix(DISTRO_INSTALL_ROOT)?
        .strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_release_url_github() {
        let source =
            PackageSource::from_release_url("https://github.com/ros/bloom.git", "1.2.3", "noetic")
                .unwrap();
        assert_eq!(source.provider, Provider::Github);
        assert_eq!(source.owner_name, "ros");
        assert_eq!(source.repo_name, "bloom");
        assert_eq!(source.ref_tag, "1.2.3");
        assert_eq!(source.target_distro, "noetic");
        assert!(source.install_settings.is_none());
    }

    #[test]
    fn test_from_release_url_without_git_suffix() {
        let source = PackageSource::from_release_url(
            "https://gitlab.com/group/sub/my-release",
            "v1",
            "humble",
        )
        .unwrap();
        assert_eq!(source.provider, Provider::Gitlab);
        assert_eq!(source.owner_name, "sub");
        assert_eq!(source.repo_name, "my-release");
    }

    #[test]
    fn test_from_release_url_trailing_slash() {
        let source =
            PackageSource::from_release_url("https://bitbucket.org/team/pkg/", "t", "d").unwrap();
        assert_eq!(source.provider, Provider::Bitbucket);
        assert_eq!(source.repo_path(), "team/pkg");
    }

    #[test]
    fn test_from_release_url_unknown_host() {
        let err = PackageSource::from_release_url("https://example.com/a/b.git", "t", "d")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownProvider(host) if host == "example.com"));
    }

    #[test]
    fn test_from_release_url_malformed() {
        let err = PackageSource::from_release_url("not a url", "t", "d").unwrap_err();
        assert!(matches!(err, Error::InvalidReleaseUrl { .. }));

        let err = PackageSource::from_release_url("https://github.com/ros", "t", "d").unwrap_err();
        assert!(matches!(err, Error::InvalidReleaseUrl { .. }));
    }

    #[test]
    fn test_repo_path_is_verbatim() {
        let source = PackageSource::new(Provider::Github, "{{owner}}", "re po$", "1", "d");
        assert_eq!(source.repo_path(), "{{owner}}/re po$");
    }

    #[test]
    fn test_install_paths_round_trip() {
        let prefix = install_prefix("noetic");
        assert_eq!(prefix, "${CURRENT_PACKAGES_DIR}/opt/ros/noetic");
        assert_eq!(distro_from_install_prefix(&prefix), Some("noetic"));

        let site = runtime_site_path("noetic", "Lib/site-packages");
        assert_eq!(site, format!("{prefix}/Lib/site-packages"));
        assert!(site.starts_with(&prefix));

        assert_eq!(distro_from_install_prefix("/usr/local"), None);
    }

    #[test]
    fn test_install_settings_default() {
        let settings = InstallSettings::default();
        assert_eq!(settings.interpreter, "python");
        assert!(settings.prepare_site_path);
        assert_eq!(settings.site_packages, "Lib/site-packages");
    }

    #[test]
    fn test_install_settings_partial_deserialize() {
        let settings: InstallSettings = toml::from_str("interpreter = \"python3\"").unwrap();
        assert_eq!(settings.interpreter, "python3");
        assert!(settings.prepare_site_path);
    }
}
