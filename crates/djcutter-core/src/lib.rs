//! djcutter core - scaffolding for Django projects
//!
//! This library turns a template plus a set of answers into a ready project
//! folder. The `djcutter` binary is a thin product layer over it.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template loading and rendering, layout
//!   materialization, toolchain detection
//! - **Layer 2: Workflow Orchestration** - The [`Collector`] state machine, the
//!   [`generate`] pipeline and the `ProductConfig` trait for custom front ends
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use djcutter_core::{generate, Features, GenerateOptions, ProjectConfig, ProjectType, TemplateSource};
//!
//! let bundle = TemplateSource::from_path("./template").load()?;
//! let config = ProjectConfig {
//!     project_type: ProjectType::Ddd,
//!     project_name: "shop".into(),
//!     app_name: "orders".into(),
//!     project_base_name: "shop_base".into(),
//!     features: Features::default(),
//! };
//! let project = generate(&bundle, &config, &GenerateOptions::default())?;
//! ```

pub mod collector;
pub mod config;
pub mod generate;
pub mod materialize;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use collector::{Answer, Collector, Progress, State, Step};
pub use config::{ConfigError, Feature, Features, ProjectConfig, ProjectType};
pub use generate::{generate, GenerateOptions, GeneratedProject};
pub use materialize::{materialize, MaterializeError, MaterializeReport};
pub use product::ProductConfig;
pub use runtime::{check_toolchain, Tool, ToolInfo};
pub use templates::{TemplateBundle, TemplateManifest, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
