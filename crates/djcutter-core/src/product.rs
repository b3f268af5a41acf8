//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to name itself, choose the environment
//! variables that relocate the template and the output, and describe what to
//! do once a project exists.

use crate::config::ProjectConfig;
use std::path::Path;

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable pointing at the template directory or zip archive
    fn template_env(&self) -> &'static str;

    /// Environment variable overriding where the project folder is created
    fn output_dir_env(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, config: &ProjectConfig) -> Vec<String>;
}
