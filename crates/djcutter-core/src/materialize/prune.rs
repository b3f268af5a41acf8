//! Optional-feature pruning

use super::{MaterializeError, MaterializeReport};
use crate::config::{Feature, Features, ProjectType};
use std::fs;
use std::path::Path;

/// Folders that only survive when their feature is enabled
pub const OPTIONAL_FOLDERS: &[(Feature, &[&str])] = &[
    (Feature::Docker, &["docker-compose", "deployment"]),
    (Feature::Make, &["make"]),
    (Feature::Git, &["git"]),
];

/// Folders to delete for the given flags, in table order
pub fn disabled_folders(features: &Features) -> Vec<(Feature, &'static str)> {
    OPTIONAL_FOLDERS
        .iter()
        .filter(|(feature, _)| !features.get(*feature))
        .flat_map(|(feature, folders)| folders.iter().map(move |folder| (*feature, *folder)))
        .collect()
}

/// Verify every folder to delete will be at the root once the selected
/// variant has been promoted
///
/// A missing folder means the template and this table disagree, which is
/// always fatal.
pub fn check(
    root: &Path,
    selected: ProjectType,
    features: &Features,
) -> Result<(), MaterializeError> {
    let selected_dir = root.join(selected.folder_name());

    for (feature, folder) in disabled_folders(features) {
        let at_root = root.join(folder);
        if !at_root.is_dir() && !selected_dir.join(folder).is_dir() {
            return Err(MaterializeError::MissingOptionalFolder {
                feature,
                path: at_root,
            });
        }
    }

    Ok(())
}

/// Delete the folders of every disabled feature
pub fn prune(
    root: &Path,
    features: &Features,
    report: &mut MaterializeReport,
) -> Result<(), MaterializeError> {
    for (feature, folder) in disabled_folders(features) {
        let path = root.join(folder);
        if !path.is_dir() {
            return Err(MaterializeError::MissingOptionalFolder { feature, path });
        }
        fs::remove_dir_all(&path)
            .map_err(MaterializeError::io("remove", &path))?;
        report.removed.push(folder.to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::fixture::draft_tree;

    #[test]
    fn test_table_covers_expected_folders() {
        let folders: Vec<&str> = disabled_folders(&Features::none())
            .into_iter()
            .map(|(_, folder)| folder)
            .collect();
        assert_eq!(folders, vec!["docker-compose", "deployment", "make", "git"]);
        assert!(disabled_folders(&Features::all()).is_empty());
    }

    #[test]
    fn test_docker_off_removes_both_folders() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);
        let features = Features {
            use_docker: false,
            use_make: true,
            use_git: true,
            ..Features::default()
        };

        let mut report = MaterializeReport::default();
        prune(root, &features, &mut report).unwrap();

        assert!(!root.join("docker-compose").exists());
        assert!(!root.join("deployment").exists());
        assert!(root.join("make/Makefile").is_file());
        assert!(root.join("git/.gitignore").is_file());
        assert_eq!(report.removed, vec!["docker-compose", "deployment"]);
    }

    #[test]
    fn test_make_off_removes_make_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);
        let features = Features {
            use_docker: true,
            use_make: false,
            use_git: true,
            ..Features::default()
        };

        let mut report = MaterializeReport::default();
        prune(root, &features, &mut report).unwrap();

        assert!(!root.join("make").exists());
        assert!(root.join("docker-compose").is_dir());
        assert!(root.join("git").is_dir());
    }

    #[test]
    fn test_git_off_removes_git_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        draft_tree(root);
        let features = Features {
            use_docker: true,
            use_make: true,
            use_git: false,
            ..Features::default()
        };

        let mut report = MaterializeReport::default();
        prune(root, &features, &mut report).unwrap();

        assert!(!root.join("git").exists());
        assert_eq!(report.removed, vec!["git"]);
    }

    #[test]
    fn test_check_accepts_folder_inside_selected_variant() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("django/git")).unwrap();
        let features = Features {
            use_docker: true,
            use_make: true,
            use_git: false,
            ..Features::default()
        };

        assert!(check(root, ProjectType::Django, &features).is_ok());
        assert!(matches!(
            check(root, ProjectType::Ddd, &features),
            Err(MaterializeError::MissingOptionalFolder {
                feature: Feature::Git,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_folder_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = MaterializeReport::default();

        let err = prune(dir.path(), &Features::none(), &mut report)
            .unwrap_err();

        assert!(matches!(
            err,
            MaterializeError::MissingOptionalFolder {
                feature: Feature::Docker,
                ..
            }
        ));
        assert!(report.removed.is_empty());
    }
}
