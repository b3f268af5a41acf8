//! Variant resolution: collapse the selected layout folder into the root

use super::{MaterializeError, MaterializeReport};
use crate::config::ProjectType;
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary name of the selected folder while its entries are promoted
///
/// Renaming first lets a variant contain an entry named after itself.
fn staging_dir(root: &Path, selected: ProjectType) -> PathBuf {
    root.join(format!(".{}.promote", selected.folder_name()))
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Entry names of a directory, sorted
pub(crate) fn entry_names(dir: &Path) -> Result<Vec<String>, MaterializeError> {
    let mut names = fs::read_dir(dir)
        .map_err(MaterializeError::io("read", dir))?
        .map(|entry| {
            entry
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .map_err(MaterializeError::io("read", dir))
        })
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}

/// Verify both variant folders exist and promotion cannot clobber anything
pub fn check(root: &Path, selected: ProjectType) -> Result<(), MaterializeError> {
    for project_type in ProjectType::ALL {
        let path = root.join(project_type.folder_name());
        if !path.is_dir() {
            return Err(MaterializeError::MissingVariant { path });
        }
    }

    let staging = staging_dir(root, selected);
    if exists(&staging) {
        return Err(MaterializeError::PromoteConflict {
            name: staging
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        });
    }

    let selected_dir = root.join(selected.folder_name());
    for name in entry_names(&selected_dir)? {
        let is_variant_name = ProjectType::ALL
            .iter()
            .any(|project_type| project_type.folder_name() == name);
        if !is_variant_name && exists(&root.join(&name)) {
            return Err(MaterializeError::PromoteConflict { name });
        }
    }

    Ok(())
}

/// Delete the unselected variant and promote the selected one's entries
pub fn resolve(
    root: &Path,
    selected: ProjectType,
    report: &mut MaterializeReport,
) -> Result<(), MaterializeError> {
    let discarded = selected.other();
    let discarded_dir = root.join(discarded.folder_name());
    fs::remove_dir_all(&discarded_dir)
        .map_err(MaterializeError::io("remove", &discarded_dir))?;
    report.removed.push(discarded.folder_name().to_string());

    let selected_dir = root.join(selected.folder_name());
    let staging = staging_dir(root, selected);
    fs::rename(&selected_dir, &staging)
        .map_err(MaterializeError::io("move", &selected_dir))?;

    for name in entry_names(&staging)? {
        let from = staging.join(&name);
        fs::rename(&from, root.join(&name))
            .map_err(MaterializeError::io("move", &from))?;
        report.promoted.push(name);
    }

    fs::remove_dir(&staging)
        .map_err(MaterializeError::io("remove", &staging))?;

    Ok(())
}
