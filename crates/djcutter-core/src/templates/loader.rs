//! Template loading from a local directory or a zip archive
//!
//! Both sources end up as the same in-memory [`TemplateBundle`], so rendering
//! never touches the template location again:
//! - Directory: walked with `walkdir`
//! - Archive: read with `zip`; a single wrapping top-level folder is stripped

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Where the template lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl TemplateSource {
    /// Pick the source kind from the path: `.zip` files are archives
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip || path.is_file() {
            Self::Archive(path)
        } else {
            Self::Directory(path)
        }
    }

    /// Resolve the template location from the product's environment variable,
    /// falling back to the current directory
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        let path = std::env::var_os(config.template_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_path(path)
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    /// Read the manifest and every entry into memory
    pub fn load(&self) -> Result<TemplateBundle> {
        match self {
            Self::Directory(path) => TemplateBundle::from_directory(path),
            Self::Archive(path) => {
                let file = File::open(path).with_context(|| {
                    format!("Failed to open template archive {}", path.display())
                })?;
                TemplateBundle::from_archive(file).with_context(|| {
                    format!("Failed to load template archive {}", path.display())
                })
            }
        }
    }
}

/// A fully loaded template: manifest plus every entry keyed by `/`-separated
/// path relative to the template root
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub manifest: TemplateManifest,
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
}

impl TemplateBundle {
    /// Build a bundle from already-collected entries
    pub fn from_entries(
        files: BTreeMap<String, Vec<u8>>,
        dirs: BTreeSet<String>,
    ) -> Result<Self> {
        let raw = files
            .get(MANIFEST_FILE)
            .ok_or_else(|| anyhow::anyhow!("Template is missing {}", MANIFEST_FILE))?;
        let content = std::str::from_utf8(raw)
            .with_context(|| format!("{} is not valid UTF-8", MANIFEST_FILE))?;
        let manifest = TemplateManifest::from_yaml(content)
            .with_context(|| format!("Failed to parse {}", MANIFEST_FILE))?;

        Ok(Self {
            manifest,
            files,
            dirs,
        })
    }

    pub fn from_directory(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Template directory not found: {}", root.display());
        }

        let mut files = BTreeMap::new();
        let mut dirs = BTreeSet::new();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");

        for entry in walker {
            let entry = entry
                .with_context(|| format!("Failed to walk template directory {}", root.display()))?;
            let relative = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
            let key = to_key(relative);

            if entry.file_type().is_dir() {
                dirs.insert(key);
            } else {
                let content = std::fs::read(entry.path())
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                files.insert(key, content);
            }
        }

        Self::from_entries(files, dirs)
    }

    pub fn from_archive<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .context("Failed to read zip archive")?;

        let mut files: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut dirs: BTreeSet<String> = BTreeSet::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let Some(path) = file.enclosed_name() else {
                anyhow::bail!("Archive entry escapes the template root: {}", file.name());
            };
            let key = to_key(&path);
            if key.is_empty() {
                continue;
            }

            if file.is_dir() {
                dirs.insert(key);
            } else {
                let mut contents = Vec::new();
                file.read_to_end(&mut contents)
                    .with_context(|| format!("Failed to extract {}", key))?;
                files.insert(key, contents);
            }
        }

        // Archives usually wrap everything in one folder: {name}/template.yaml
        if !files.contains_key(MANIFEST_FILE) {
            if let Some(prefix) = single_wrapping_folder(&files, &dirs) {
                let strip = |key: &String| key.strip_prefix(&prefix).map(str::to_string);
                files = files
                    .iter()
                    .filter_map(|(key, content)| strip(key).map(|k| (k, content.clone())))
                    .collect();
                dirs = dirs
                    .iter()
                    .filter_map(strip)
                    .filter(|key| !key.is_empty())
                    .collect();
            }
        }

        Self::from_entries(files, dirs)
    }
}

/// `a/b/c` form of a relative path, dropping `.` components
fn to_key(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `name/` when every entry lives under one folder that holds the manifest
fn single_wrapping_folder(
    files: &BTreeMap<String, Vec<u8>>,
    dirs: &BTreeSet<String>,
) -> Option<String> {
    let mut tops = files
        .keys()
        .chain(dirs.iter())
        .map(|key| key.split('/').next().unwrap_or(key));
    let first = tops.next()?;
    if tops.any(|top| top != first) {
        return None;
    }

    let prefix = format!("{}/", first);
    files
        .contains_key(&format!("{}{}", prefix, MANIFEST_FILE))
        .then_some(prefix)
}
