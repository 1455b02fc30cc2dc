//! Registry of stanza templates keyed by template kind.

use std::collections::HashMap;
use std::fmt;

use tera::{Context, Tera};
use tracing::{debug, warn};

use super::builtin;
use super::kind::TemplateKind;
use crate::core::error::{Error, Result};

/// Ordered blocks of a portfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stanza {
    Fetch,
    Configure,
    Install,
}

impl Stanza {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Configure => "configure",
            Self::Install => "install",
        }
    }

    /// File name of this stanza inside a template override directory
    pub fn file_name(&self) -> String {
        format!("{}.cmake.tera", self.as_str())
    }

    /// All stanzas in manifest order
    pub fn all() -> [Stanza; 3] {
        [Stanza::Fetch, Stanza::Configure, Stanza::Install]
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw template sources making up one template kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StanzaSet {
    pub fetch: String,
    pub configure: String,
    pub install: Option<String>,
}

impl StanzaSet {
    pub fn get(&self, stanza: Stanza) -> Option<&str> {
        match stanza {
            Stanza::Fetch => Some(&self.fetch),
            Stanza::Configure => Some(&self.configure),
            Stanza::Install => self.install.as_deref(),
        }
    }

    pub fn set(&mut self, stanza: Stanza, source: String) {
        match stanza {
            Stanza::Fetch => self.fetch = source,
            Stanza::Configure => self.configure = source,
            Stanza::Install => self.install = Some(source),
        }
    }
}

/// Compiled stanza templates for every registered template kind
pub struct TemplateRegistry {
    tera: Tera,
    kinds: HashMap<TemplateKind, StanzaSet>,
}

impl TemplateRegistry {
    /// Registry with no template kinds
    pub fn empty() -> Self {
        let mut tera = Tera::default();
        // Stanza values must reach the manifest verbatim
        tera.autoescape_on(vec![]);
        Self {
            tera,
            kinds: HashMap::new(),
        }
    }

    /// Registry holding the built-in stanza set of every template kind
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        for kind in TemplateKind::all() {
            registry.register(kind, builtin::stanza_set(kind))?;
        }
        Ok(registry)
    }

    /// Register or replace the stanza set of a template kind
    ///
    /// The whole set is compiled before anything is committed, so a set with
    /// an invalid stanza leaves the previous registration untouched.
    pub fn register(&mut self, kind: TemplateKind, set: StanzaSet) -> Result<()> {
        let templates: Vec<(String, &str)> = Stanza::all()
            .into_iter()
            .filter_map(|stanza| {
                set.get(stanza)
                    .map(|source| (Self::template_name(kind, stanza), source))
            })
            .collect();

        let mut scratch = Tera::default();
        for (name, source) in &templates {
            scratch.add_raw_template(name, source)?;
        }
        self.tera.add_raw_templates(templates)?;

        if self.kinds.insert(kind, set).is_some() {
            debug!(%kind, "Replaced registered stanza set");
        }
        Ok(())
    }

    pub fn contains(&self, kind: TemplateKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Stanza set registered for a template kind
    pub fn stanza_set(&self, kind: TemplateKind) -> Result<&StanzaSet> {
        self.kinds
            .get(&kind)
            .ok_or_else(|| Error::template_missing(kind.as_str()))
    }

    /// Registered template kinds, in declaration order
    pub fn kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::all().filter(|k| self.contains(*k)).collect()
    }

    /// Render one stanza of a template kind.
    ///
    /// Returns `Ok(None)` when the kind is registered but has no template for
    /// the stanza.
    pub fn render_stanza(
        &self,
        kind: TemplateKind,
        stanza: Stanza,
        context: &Context,
    ) -> Result<Option<String>> {
        let set = self.stanza_set(kind)?;
        if set.get(stanza).is_none() {
            return Ok(None);
        }

        let rendered = self
            .tera
            .render(&Self::template_name(kind, stanza), context)
            .map_err(|e| {
                warn!(%kind, %stanza, error = %e, "Failed to render stanza");
                e
            })?;
        Ok(Some(rendered))
    }

    fn template_name(kind: TemplateKind, stanza: Stanza) -> String {
        format!("{}/{}.cmake", kind.as_str(), stanza.as_str())
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
