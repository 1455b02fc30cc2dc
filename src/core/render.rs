//! Manifest renderer: turns a package source into portfile text.
//!
//! A portfile is assembled from up to three stanzas in fixed order:
//! source fetch, configure, then the optional install step of the template
//! kind. Every render is a pure function of its inputs apart from the
//! runtime probe consulted by runtime-aware templates.

use std::sync::Arc;

use serde::Serialize;
use tera::Context;
use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::provider::Provider;
use crate::core::runtime::{PathRuntimeProbe, RuntimeProbe};
use crate::core::source::{PackageSource, install_prefix, runtime_site_path};
use crate::core::templates::builtin::BUILD_TESTING_OFF;
use crate::core::templates::{InstallStep, Stanza, TemplateKind, TemplateRegistry};

/// Rendered portfile text and the inputs that selected its stanzas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedManifest {
    pub text: String,
    pub provider: Provider,
    pub kind: TemplateKind,
}

/// Renders portfiles from a template registry
pub struct ManifestRenderer {
    registry: TemplateRegistry,
    probe: Arc<dyn RuntimeProbe>,
}

impl ManifestRenderer {
    pub fn new(registry: TemplateRegistry, probe: Arc<dyn RuntimeProbe>) -> Self {
        Self { registry, probe }
    }

    /// Renderer over the built-in templates that probes `PATH` for runtimes
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            TemplateRegistry::builtin()?,
            Arc::new(PathRuntimeProbe::new()),
        ))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Render using a template kind given by name
    pub fn render_named(&self, source: &PackageSource, kind: &str) -> Result<RenderedManifest> {
        self.render(source, kind.parse()?)
    }

    /// Render the portfile for `source` with the stanzas of `kind`.
    ///
    /// Nothing is returned unless every stanza rendered: a missing template or
    /// a missing runtime fails the whole call.
    pub fn render(&self, source: &PackageSource, kind: TemplateKind) -> Result<RenderedManifest> {
        // Fail on unregistered kinds before probing anything
        self.registry.stanza_set(kind)?;

        let install_step = kind.install_step();
        let context = self.build_context(source, kind)?;

        let mut stanzas = Vec::with_capacity(3);
        for stanza in Stanza::all() {
            if stanza == Stanza::Install && install_step == InstallStep::None {
                debug!(%kind, "Template has no install step");
                continue;
            }
            let rendered = self
                .registry
                .render_stanza(kind, stanza, &context)?
                .ok_or_else(|| Error::template_missing(format!("{kind}/{stanza}")))?;
            stanzas.push(rendered);
        }

        info!(
            provider = %source.provider,
            kind = %kind,
            repo = %source.repo_path(),
            "Rendered portfile"
        );

        Ok(RenderedManifest {
            text: stanzas.join("\n"),
            provider: source.provider,
            kind,
        })
    }

    fn build_context(&self, source: &PackageSource, kind: TemplateKind) -> Result<Context> {
        let mut context = Context::new();
        context.insert("fetch_header", source.provider.fetch_header());
        context.insert("provider", source.provider.as_str());
        context.insert("owner_name", &source.owner_name);
        context.insert("repo_name", &source.repo_name);
        context.insert("repo_path", &source.repo_path());
        context.insert("ref_tag", &source.ref_tag);
        context.insert("head_ref", &kind.head_ref());
        context.insert("target_distro", &source.target_distro);

        let prefix = install_prefix(&source.target_distro);
        let options: Vec<String> = if kind.passes_build_options() {
            vec![
                format!("-DCMAKE_INSTALL_PREFIX={prefix}"),
                BUILD_TESTING_OFF.to_string(),
            ]
        } else {
            Vec::new()
        };
        context.insert("options", &options);

        if kind.install_step() == InstallStep::Runtime {
            let settings = source.install_settings_or_default();
            let interpreter_path = self.probe.locate(&settings.interpreter).ok_or_else(|| {
                Error::RuntimeNotFound {
                    interpreter: settings.interpreter.clone(),
                }
            })?;
            debug!(
                interpreter = %settings.interpreter,
                path = %interpreter_path.display(),
                "Runtime interpreter found"
            );

            context.insert("interpreter", &settings.interpreter);
            context.insert("interpreter_path", &interpreter_path.to_string_lossy());
            context.insert("prepare_site_path", &settings.prepare_site_path);
            context.insert(
                "site_path",
                &runtime_site_path(&source.target_distro, &settings.site_packages),
            );
        }
        context.insert("install_prefix", &prefix);

        Ok(context)
    }
}
