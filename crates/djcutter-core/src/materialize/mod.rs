//! Post-generation materialization of the draft tree
//!
//! Runs once, right after rendering, with the project directory as root:
//! 1. Variant resolution: keep the folder matching the project type, promote
//!    its entries to the root, delete the other variant
//! 2. Feature pruning: delete optional folders whose flag is off
//!
//! Every folder the pass relies on is checked before the first deletion, so a
//! template that does not match the expected layout fails without changes.
//! Filesystem errors after that point are fatal and are not rolled back.

pub mod prune;
pub mod variant;

use crate::config::{Feature, ProjectConfig};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use prune::OPTIONAL_FOLDERS;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Variant folder '{}' is missing from the generated project", path.display())]
    MissingVariant { path: PathBuf },

    #[error("Folder '{}' for {feature} is missing from the generated project", path.display())]
    MissingOptionalFolder { feature: Feature, path: PathBuf },

    #[error("Cannot promote '{name}': the project root already contains an entry with that name")]
    PromoteConflict { name: String },

    #[error("Failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MaterializeError {
    pub(crate) fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| MaterializeError::Io {
            action,
            path,
            source,
        }
    }
}

/// What the pass changed, relative to the project root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Entries moved from the selected variant folder to the root
    pub promoted: Vec<String>,
    /// Folders deleted: the unused variant, then disabled feature folders
    pub removed: Vec<String>,
}

/// Resolve variants and prune optional folders under `root`
pub fn materialize(
    root: &Path,
    config: &ProjectConfig,
) -> Result<MaterializeReport, MaterializeError> {
    variant::check(root, config.project_type)?;
    prune::check(root, config.project_type, &config.features)?;

    let mut report = MaterializeReport::default();
    variant::resolve(root, config.project_type, &mut report)?;
    prune::prune(root, &config.features, &mut report)?;

    Ok(report)
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::fs;
    use std::path::Path;

    /// Draft tree with both variants and every optional folder
    pub fn draft_tree(root: &Path) {
        for (path, content) in [
            ("django/manage.py", "django manage"),
            ("django/config/settings.py", "django settings"),
            ("django/.env", "DJANGO=1"),
            ("ddd/manage.py", "ddd manage"),
            ("ddd/core_config/settings.py", "ddd settings"),
            ("ddd/domain/__init__.py", ""),
            ("docker-compose/local.yml", "services: {}"),
            ("deployment/nginx.conf", "server {}"),
            ("make/Makefile", "run:"),
            ("git/.gitignore", "*.pyc"),
            ("README.md", "readme"),
        ] {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::draft_tree;
    use super::*;
    use crate::config::{Features, ProjectType};
    use std::fs;

    fn config(project_type: ProjectType, features: Features) -> ProjectConfig {
        ProjectConfig {
            project_type,
            project_name: "shop".to_string(),
            app_name: "orders".to_string(),
            project_base_name: "base".to_string(),
            features,
        }
    }

    #[test]
    fn test_django_with_everything_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);

        let report = materialize(root, &config(ProjectType::Django, Features::none()))
            .unwrap();

        for gone in ["django", "ddd", "docker-compose", "deployment", "make", "git"] {
            assert!(!root.join(gone).exists(), "{} should be removed", gone);
        }
        assert_eq!(
            fs::read_to_string(root.join("manage.py")).unwrap(),
            "django manage"
        );
        assert!(root.join("config/settings.py").is_file());
        assert!(root.join(".env").is_file());
        assert!(root.join("README.md").is_file());
        assert!(!root.join("core_config").exists());

        assert_eq!(report.promoted, vec![".env", "config", "manage.py"]);
        assert_eq!(
            report.removed,
            vec!["ddd", "docker-compose", "deployment", "make", "git"]
        );
    }

    #[test]
    fn test_ddd_with_everything_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);

        let report = materialize(root, &config(ProjectType::Ddd, Features::all()))
            .unwrap();

        assert!(!root.join("django").exists());
        assert!(!root.join("ddd").exists());
        assert_eq!(
            fs::read_to_string(root.join("manage.py")).unwrap(),
            "ddd manage"
        );
        assert!(root.join("core_config/settings.py").is_file());
        assert!(root.join("domain/__init__.py").is_file());
        assert!(!root.join(".env").exists());

        // Enabled feature folders are untouched
        assert_eq!(
            fs::read_to_string(root.join("docker-compose/local.yml"))
                .unwrap(),
            "services: {}"
        );
        assert_eq!(
            fs::read_to_string(root.join("make/Makefile")).unwrap(),
            "run:"
        );
        assert!(root.join("deployment/nginx.conf").is_file());
        assert!(root.join("git/.gitignore").is_file());
        assert_eq!(report.removed, vec!["django"]);
    }

    #[test]
    fn test_missing_optional_folder_leaves_tree_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);
        fs::remove_dir_all(root.join("make")).unwrap();

        let err = materialize(root, &config(ProjectType::Django, Features::none()))
            .unwrap_err();

        assert!(matches!(
            err,
            MaterializeError::MissingOptionalFolder {
                feature: Feature::Make,
                ..
            }
        ));
        assert!(root.join("django").is_dir());
        assert!(root.join("ddd").is_dir());
        assert!(root.join("git").is_dir());
    }

    #[test]
    fn test_missing_variant_leaves_tree_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);
        fs::remove_dir_all(root.join("ddd")).unwrap();

        let err = materialize(root, &config(ProjectType::Django, Features::none()))
            .unwrap_err();

        assert!(matches!(err, MaterializeError::MissingVariant { .. }));
        assert!(root.join("django/manage.py").is_file());
        assert!(root.join("docker-compose").is_dir());
    }

    #[test]
    fn test_error_messages_name_the_folder() {
        let err = MaterializeError::MissingOptionalFolder {
            feature: Feature::Docker,
            path: PathBuf::from("/tmp/shop/deployment"),
        };
        assert_eq!(
            err.to_string(),
            "Folder '/tmp/shop/deployment' for Docker is missing from the generated project"
        );
    }
}
