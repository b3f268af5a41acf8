//! Template manifest types and parsing

use crate::config::{Features, ProjectType};
use serde::{Deserialize, Serialize};

/// File name of the manifest at the template root
pub const MANIFEST_FILE: &str = "template.yaml";

/// Initial answers offered by the prompts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub project_type: Option<ProjectType>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default)]
    pub project_base_name: Option<String>,

    /// `use_*` keys; unspecified ones keep the built-in defaults
    #[serde(flatten)]
    pub features: Features,
}

/// Template manifest (`template.yaml` next to the project skeleton)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Templated name of the skeleton directory, e.g. `{{project_name}}`
    pub root: String,

    /// File name patterns copied byte-for-byte instead of rendered
    #[serde(default)]
    pub copy_without_render: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,
}

impl TemplateManifest {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Whether a file must be copied verbatim
    ///
    /// Patterns match the file name only: `*suffix`, `prefix*`, or exact.
    pub fn is_copy_only(&self, file_path: &str) -> bool {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);
        matches_any(filename, &self.copy_without_render)
    }
}

fn matches_any(filename: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some(suffix) = pattern.strip_prefix('*') {
            filename.ends_with(suffix)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            filename.starts_with(prefix)
        } else {
            filename == pattern
        }
    })
}
