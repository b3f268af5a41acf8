//! Project generation: validate, render, materialize

use crate::config::ProjectConfig;
use crate::materialize::{self, MaterializeReport};
use crate::templates::{Renderer, TemplateBundle};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Options for a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory the project folder is created in
    pub output_dir: PathBuf,
    /// Render into an existing project folder instead of failing
    pub overwrite_if_exists: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            overwrite_if_exists: false,
        }
    }
}

/// A finished project
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub project_dir: PathBuf,
    /// Files written by the renderer, before materialization
    pub rendered_files: usize,
    pub report: MaterializeReport,
}

/// Generate a project from a loaded template
///
/// Invalid configuration is rejected before anything is written. If rendering
/// or materialization fails, a project folder created by this call is removed
/// again; a pre-existing folder (`overwrite_if_exists`) is left as it is.
pub fn generate(
    bundle: &TemplateBundle,
    config: &ProjectConfig,
    options: &GenerateOptions,
) -> Result<GeneratedProject> {
    config.validate()?;

    let renderer = Renderer::new();
    let context = config.context();
    let target = renderer.prepare(
        bundle,
        &context,
        &options.output_dir,
        options.overwrite_if_exists,
    )?;

    let built = build(&renderer, bundle, config, &context, &target.project_dir);
    let (rendered_files, report) = match built {
        Ok(built) => built,
        Err(err) if target.created => {
            let removal = fs::remove_dir_all(&target.project_dir);
            return Err(discarded(err, &target.project_dir, removal));
        }
        Err(err) => return Err(err),
    };
    Ok(GeneratedProject {
        project_dir: target.project_dir,
        rendered_files,
        report,
    })
}

/// The build error, noting a project folder that could not be removed
fn discarded(err: anyhow::Error, project_dir: &Path, removal: io::Result<()>) -> anyhow::Error {
    match removal {
        Ok(()) => err,
        Err(cleanup) => err.context(format!(
            "Partially generated project left at {} (cleanup failed: {})",
            project_dir.display(),
            cleanup
        )),
    }
}

fn build(
    renderer: &Renderer,
    bundle: &TemplateBundle,
    config: &ProjectConfig,
    context: &serde_json::Value,
    project_dir: &Path,
) -> Result<(usize, MaterializeReport)> {
    let written = renderer
        .write_tree(bundle, context, project_dir)
        .context("Failed to render template")?;
    let report = materialize::materialize(project_dir, config)
        .context("Failed to finalize project layout")?;
    Ok((written.len(), report))
}
