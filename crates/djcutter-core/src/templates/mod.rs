//! Template loading, parsing, and rendering
//!
//! This module provides:
//! - Template manifest types (`template.yaml`)
//! - Loading from a local directory or a zip archive
//! - Handlebars rendering of paths and contents into the draft tree
//! - Version compatibility checking

pub mod loader;
pub mod manifest;
pub mod renderer;
pub mod version;

pub use loader::{TemplateBundle, TemplateSource};
pub use manifest::{Defaults, TemplateManifest, MANIFEST_FILE};
pub use renderer::{RenderTarget, Renderer};
pub use version::check_compatibility;
