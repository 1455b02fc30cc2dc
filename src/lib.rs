//! Render vcpkg portfiles for released packages.
//!
//! # Examples
//!
//! ```
//! use vcport::core::provider::Provider;
//! use vcport::core::render::ManifestRenderer;
//! use vcport::core::source::PackageSource;
//! use vcport::core::templates::TemplateKind;
//!
//! let renderer = ManifestRenderer::with_defaults().unwrap();
//! let source = PackageSource::new(Provider::Github, "ros", "bloom", "1.2.3", "noetic");
//! let manifest = renderer.render(&source, TemplateKind::Cmake).unwrap();
//!
//! assert!(manifest.text.starts_with("fetch_from_github("));
//! assert!(manifest.text.contains("REPO ros/bloom"));
//! assert!(manifest.text.contains("REF 1.2.3"));
//! ```
#![deny(unsafe_code)]

pub mod core;
