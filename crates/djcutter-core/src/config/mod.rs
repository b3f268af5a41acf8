//! Project configuration: answers collected from the user
//!
//! - [`ProjectType`]: the mutually exclusive template variants
//! - [`Feature`] / [`Features`]: boolean feature flags
//! - [`ProjectConfig`]: the finished answer set used as template context

pub mod features;
pub mod project;

pub use features::{Feature, Features};
pub use project::{ConfigError, ProjectConfig, ProjectType, RESERVED_DDD_NAME};
