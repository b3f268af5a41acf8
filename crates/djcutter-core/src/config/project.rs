//! Project answers and their validation

use super::features::Features;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Project name that collides with the settings package of the ddd layout
pub const RESERVED_DDD_NAME: &str = "core_config";

/// Errors raised while collecting or validating answers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown project type '{0}' (expected 'django' or 'ddd')")]
    UnknownProjectType(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must not start or end with whitespace")]
    PaddedField { field: &'static str },

    #[error("You cannot use the core_config name for a ddd project")]
    ReservedProjectName,

    #[error("Expected {expected} for this question")]
    UnexpectedAnswer { expected: &'static str },
}

impl ConfigError {
    /// Whether the whole run must stop rather than re-asking the question
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigError::ReservedProjectName)
    }
}

/// Mutually exclusive project layouts shipped in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Django,
    Ddd,
}

impl ProjectType {
    pub const ALL: [ProjectType; 2] = [ProjectType::Django, ProjectType::Ddd];

    /// Name of the variant folder holding this layout
    pub fn folder_name(&self) -> &'static str {
        match self {
            ProjectType::Django => "django",
            ProjectType::Ddd => "ddd",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProjectType::Django => "Classic Django project layout",
            ProjectType::Ddd => "Domain-driven layout with a core_config settings package",
        }
    }

    /// The layout that is discarded when this one is selected
    pub fn other(&self) -> ProjectType {
        match self {
            ProjectType::Django => ProjectType::Ddd,
            ProjectType::Ddd => ProjectType::Django,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder_name())
    }
}

impl FromStr for ProjectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "django" => Ok(ProjectType::Django),
            "ddd" => Ok(ProjectType::Ddd),
            other => Err(ConfigError::UnknownProjectType(other.to_string())),
        }
    }
}

/// Trim a name answer, rejecting blanks
pub fn normalize_name(field: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Reject the reserved project name for ddd projects
pub fn check_reserved_name(
    project_type: ProjectType,
    project_name: &str,
) -> Result<(), ConfigError> {
    if project_type == ProjectType::Ddd && project_name.trim() == RESERVED_DDD_NAME {
        return Err(ConfigError::ReservedProjectName);
    }
    Ok(())
}

/// Names reach paths verbatim, so they must already be trimmed
fn check_trimmed(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if normalize_name(field, value)? != value {
        return Err(ConfigError::PaddedField { field });
    }
    Ok(())
}

/// Complete set of answers handed to the template engine
///
/// Serializes to a flat mapping (`project_type`, the three names and every
/// `use_*` flag), which is exactly the context templates are rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_type: ProjectType,
    pub project_name: String,
    pub app_name: String,
    pub project_base_name: String,
    #[serde(flatten)]
    pub features: Features,
}

impl ProjectConfig {
    /// Check every invariant the template relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("project_name", &self.project_name),
            ("app_name", &self.app_name),
            ("project_base_name", &self.project_base_name),
        ] {
            check_trimmed(field, value)?;
        }
        check_reserved_name(self.project_type, &self.project_name)
    }

    /// Template context as a JSON object
    pub fn context(&self) -> serde_json::Value {
        // Plain strings and bools only, serialization cannot fail
        serde_json::to_value(self).unwrap_or_default()
    }
}
