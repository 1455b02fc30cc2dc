//! Language runtime presence checks.

use std::path::PathBuf;
use tracing::debug;

/// Locates a language runtime interpreter on the rendering host
pub trait RuntimeProbe: Send + Sync {
    /// Full path of the interpreter, or `None` when it is not installed
    fn locate(&self, interpreter: &str) -> Option<PathBuf>;
}

/// Probe that searches `PATH` for the interpreter executable
#[derive(Debug, Default, Clone, Copy)]
pub struct PathRuntimeProbe;

impl PathRuntimeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl RuntimeProbe for PathRuntimeProbe {
    fn locate(&self, interpreter: &str) -> Option<PathBuf> {
        let found = which::which(interpreter).ok();
        debug!(interpreter, found = ?found, "Probed for runtime interpreter");
        found
    }
}

/// Probe with a fixed answer, for tests and for rendering without a host check
#[derive(Debug, Clone, Default)]
pub struct StaticRuntimeProbe(Option<PathBuf>);

impl StaticRuntimeProbe {
    /// Reports every interpreter as installed at `path`
    pub fn present(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    /// Reports every interpreter as missing
    pub fn absent() -> Self {
        Self(None)
    }
}

impl RuntimeProbe for StaticRuntimeProbe {
    fn locate(&self, _interpreter: &str) -> Option<PathBuf> {
        self.0.clone()
    }
}
