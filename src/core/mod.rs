//! vcport core library
//!
//! This library renders vcpkg portfiles that fetch a released package from
//! its source hosting provider and build it, along with the `vcpkg.json`
//! manifest that accompanies them.

pub mod config;
pub mod error;
pub mod metadata;
pub mod port;
pub mod provider;
pub mod render;
pub mod runtime;
pub mod source;
pub mod templates;
pub mod utils;

pub use error::Error;
