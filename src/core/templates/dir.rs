//! Template override directory resolution and loading.
//!
//! An override directory holds one sub-directory per template kind, each with
//! any of `fetch.cmake.tera`, `configure.cmake.tera` and `install.cmake.tera`.
//! Stanzas found on disk replace the built-in ones, the rest are kept.
//!
//! The directory is resolved in this order:
//! 1. The `--template-dir` CLI flag
//! 2. The `VCPORT_TEMPLATE_DIR` environment variable
//! 3. `~/.config/vcport/templates/`, when it exists

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::builtin;
use super::kind::TemplateKind;
use super::registry::{Stanza, TemplateRegistry};
use crate::core::error::Result;

/// Environment variable naming the template override directory
pub const TEMPLATE_DIR_ENV: &str = "VCPORT_TEMPLATE_DIR";

/// Trait for reading template configuration, allowing dependency injection for testing
pub trait TemplateConfigReader {
    fn get_template_dir(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvTemplateConfigReader;

impl TemplateConfigReader for EnvTemplateConfigReader {
    fn get_template_dir(&self) -> Option<String> {
        std::env::var(TEMPLATE_DIR_ENV).ok()
    }
}

/// Mock implementation for testing with controlled values
#[cfg(test)]
pub struct MockTemplateConfigReader(Option<String>);

#[cfg(test)]
impl MockTemplateConfigReader {
    pub fn new(template_dir: Option<String>) -> Self {
        Self(template_dir)
    }
}

#[cfg(test)]
impl TemplateConfigReader for MockTemplateConfigReader {
    fn get_template_dir(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A resolved template override directory
#[derive(Debug, Clone)]
pub struct TemplateDir {
    path: PathBuf,
}

impl TemplateDir {
    /// Resolve the override directory, if any, using the process environment
    pub fn discover(custom_dir: Option<&Path>) -> io::Result<Option<Self>> {
        Self::discover_with_config(custom_dir, &EnvTemplateConfigReader)
    }

    pub fn discover_with_config(
        custom_dir: Option<&Path>,
        config_reader: &dyn TemplateConfigReader,
    ) -> io::Result<Option<Self>> {
        if let Some(dir) = custom_dir {
            debug!("Using custom template directory: {}", dir.display());
            return Self::existing(dir.to_path_buf()).map(Some);
        }

        if let Some(env_dir) = config_reader.get_template_dir() {
            debug!("Using {}: {}", TEMPLATE_DIR_ENV, env_dir);
            return Self::existing(PathBuf::from(env_dir)).map(Some);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let candidate = config_dir.join("vcport").join("templates");
            if candidate.is_dir() {
                debug!("Found user template directory: {}", candidate.display());
                return Ok(Some(Self { path: candidate }));
            }
        }

        debug!("No template override directory, using built-in templates only");
        Ok(None)
    }

    fn existing(path: PathBuf) -> io::Result<Self> {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", path.display()),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace registry stanzas with the ones found on disk.
    ///
    /// Returns the template kinds that had at least one override.
    pub fn apply(&self, registry: &mut TemplateRegistry) -> Result<Vec<TemplateKind>> {
        let mut overridden = Vec::new();

        for kind in TemplateKind::all() {
            let kind_dir = self.path.join(kind.as_str());
            if !kind_dir.is_dir() {
                continue;
            }

            let mut set = match registry.stanza_set(kind) {
                Ok(existing) => existing.clone(),
                Err(_) => builtin::stanza_set(kind),
            };

            let mut changed = false;
            for stanza in Stanza::all() {
                let file = kind_dir.join(stanza.file_name());
                if file.is_file() {
                    debug!(%kind, %stanza, path = %file.display(), "Loading stanza override");
                    set.set(stanza, fs::read_to_string(&file)?);
                    changed = true;
                }
            }

            if changed {
                registry.register(kind, set)?;
                overridden.push(kind);
            }
        }

        if !overridden.is_empty() {
            info!(
                path = %self.path.display(),
                kinds = ?overridden,
                "Applied template overrides"
            );
        }
        Ok(overridden)
    }
}

/// Build the registry used for rendering: built-in templates plus any overrides
pub fn load_registry(custom_dir: Option<&Path>) -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::builtin()?;
    if let Some(dir) = TemplateDir::discover(custom_dir)? {
        dir.apply(&mut registry)?;
    }
    Ok(registry)
}
