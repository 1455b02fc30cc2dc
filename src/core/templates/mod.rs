//! Template system for portfile generation.
//!
//! This module provides the stanza templates the manifest renderer assembles
//! into portfiles:
//! - Named template kinds and the install step each one carries
//! - Built-in stanza templates compiled into the binary
//! - A Tera backed registry keyed by template kind
//! - Override directories that replace individual stanzas

pub mod builtin;
pub mod dir;
pub mod kind;
pub mod registry;

pub use dir::*;
pub use kind::*;
pub use registry::*;
