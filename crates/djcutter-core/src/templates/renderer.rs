//! Template expansion into the draft project tree

use super::loader::TemplateBundle;
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the draft tree is written into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub project_dir: PathBuf,
    /// False when an existing directory is being overwritten
    pub created: bool,
}

/// Handlebars-backed renderer for paths and file contents
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Generating source files, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        // Unknown variables are template bugs
        handlebars.set_strict_mode(true);

        Self { handlebars }
    }

    pub fn render_str(&self, template: &str, context: &Value) -> Result<String> {
        Ok(self.handlebars.render_template(template, context)?)
    }

    /// Render a `/`-separated template path into a relative filesystem path
    ///
    /// Returns `None` when a component renders empty, which is how templates
    /// make a file or folder conditional.
    pub fn render_path(&self, template_path: &str, context: &Value) -> Result<Option<PathBuf>> {
        let rendered = self
            .render_str(template_path, context)
            .with_context(|| format!("Failed to render path: {}", template_path))?;

        if rendered.starts_with('/') || rendered.starts_with('\\') {
            anyhow::bail!(
                "Rendered path is absolute: {} -> {}",
                template_path,
                rendered
            );
        }

        let mut path = PathBuf::new();
        for part in rendered.split('/') {
            if part.trim().is_empty() {
                return Ok(None);
            }
            if part == "." || part == ".." || part.contains('\\') {
                anyhow::bail!(
                    "Rendered path leaves the project directory: {} -> {}",
                    template_path,
                    rendered
                );
            }
            path.push(part);
        }

        Ok(Some(path))
    }

    /// Resolve and create the project directory for a bundle
    pub fn prepare(
        &self,
        bundle: &TemplateBundle,
        context: &Value,
        output_dir: &Path,
        overwrite_if_exists: bool,
    ) -> Result<RenderTarget> {
        let root = &bundle.manifest.root;
        let name = match self.render_path(root, context)? {
            Some(path) if path.components().count() == 1 => path,
            _ => anyhow::bail!(
                "Template root '{}' must render to a single folder name",
                root
            ),
        };

        let project_dir = output_dir.join(name);
        let exists = project_dir.exists();
        if exists && !overwrite_if_exists {
            anyhow::bail!("Output directory already exists: {}", project_dir.display());
        }

        fs::create_dir_all(&project_dir)
            .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

        Ok(RenderTarget {
            project_dir,
            created: !exists,
        })
    }

    /// Write every entry under the manifest root into `project_dir`
    ///
    /// Returns the relative paths of the written files.
    pub fn write_tree(
        &self,
        bundle: &TemplateBundle,
        context: &Value,
        project_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let prefix = format!("{}/", bundle.manifest.root);

        for dir in &bundle.dirs {
            let Some(relative) = dir.strip_prefix(&prefix) else {
                continue;
            };
            if let Some(path) = self.render_path(relative, context)? {
                let target = project_dir.join(path);
                fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            }
        }

        let mut written = Vec::new();
        for (file, content) in &bundle.files {
            let Some(relative) = file.strip_prefix(&prefix) else {
                continue;
            };
            let Some(path) = self.render_path(relative, context)? else {
                continue;
            };

            let target = project_dir.join(&path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            let text = std::str::from_utf8(content)
                .ok()
                .filter(|_| !bundle.manifest.is_copy_only(file));
            let result = match text {
                Some(text) => {
                    let rendered = self
                        .render_str(text, context)
                        .with_context(|| format!("Failed to render template: {}", relative))?;
                    fs::write(&target, rendered)
                }
                None => fs::write(&target, content),
            };
            result.with_context(|| format!("Failed to write file: {}", target.display()))?;

            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::manifest::MANIFEST_FILE;
    use serde_json::json;
    use std::collections::{BTreeMap, BTreeSet};

    fn bundle(entries: &[(&str, &str)], dirs: &[&str]) -> TemplateBundle {
        let mut files: BTreeMap<String, Vec<u8>> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect();
        let manifest = "name: t\nversion: 0.1.0\nroot: \"{{project_name}}\"\n\
                        copy_without_render: [\"*.j2\"]\n";
        files.insert(MANIFEST_FILE.to_string(), manifest.as_bytes().to_vec());
        let dirs: BTreeSet<String> = dirs.iter().map(|d| d.to_string()).collect();
        TemplateBundle::from_entries(files, dirs).unwrap()
    }

    fn context() -> Value {
        json!({ "project_name": "shop", "app_name": "orders", "use_docker": false })
    }

    #[test]
    fn test_render_path_substitutes() {
        let renderer = Renderer::new();
        let path = renderer
            .render_path("{{app_name}}/models.py", &context())
            .unwrap();
        assert_eq!(path, Some(PathBuf::from("orders/models.py")));
    }

    #[test]
    fn test_render_path_skips_empty_component() {
        let renderer = Renderer::new();
        let path = renderer
            .render_path("{{#if use_docker}}Dockerfile{{/if}}", &context())
            .unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn test_render_path_rejects_escape() {
        let renderer = Renderer::new();
        let ctx = json!({ "project_name": "..", "abs": "/etc" });
        assert!(renderer.render_path("{{project_name}}/x", &ctx).is_err());
        assert!(renderer.render_path("{{abs}}/passwd", &ctx).is_err());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variables() {
        let renderer = Renderer::new();
        let err = renderer.render_str("{{missing}}", &context()).unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = Renderer::new();
        let ctx = json!({ "project_name": "a<b>&c" });
        assert_eq!(
            renderer.render_str("{{project_name}}", &ctx).unwrap(),
            "a<b>&c"
        );
    }

    #[test]
    fn test_write_tree() {
        let out = tempfile::tempdir().unwrap();
        let mut bundle = bundle(
            &[
                ("{{project_name}}/README.md", "# {{project_name}}"),
                (
                    "{{project_name}}/{{app_name}}/apps.py",
                    "name = '{{app_name}}'",
                ),
                ("{{project_name}}/page.j2", "{{ raw }}"),
                ("other/ignored.txt", "x"),
            ],
            &["{{project_name}}/make"],
        );
        bundle.files.insert(
            "{{project_name}}/logo.bin".to_string(),
            vec![0xff, 0xfe, 0x00],
        );
        let renderer = Renderer::new();

        let target = renderer
            .prepare(&bundle, &context(), out.path(), false)
            .unwrap();
        assert_eq!(target.project_dir, out.path().join("shop"));
        assert!(target.created);

        let written = renderer
            .write_tree(&bundle, &context(), &target.project_dir)
            .unwrap();

        let dir = &target.project_dir;
        assert_eq!(written.len(), 4);
        assert_eq!(fs::read_to_string(dir.join("README.md")).unwrap(), "# shop");
        assert_eq!(
            fs::read_to_string(dir.join("orders/apps.py")).unwrap(),
            "name = 'orders'"
        );
        assert_eq!(
            fs::read_to_string(dir.join("page.j2")).unwrap(),
            "{{ raw }}"
        );
        assert_eq!(
            fs::read(dir.join("logo.bin")).unwrap(),
            vec![0xff, 0xfe, 0x00]
        );
        assert!(dir.join("make").is_dir());
        assert!(!out.path().join("other").exists());
    }

    #[test]
    fn test_prepare_refuses_existing_directory() {
        let out = tempfile::tempdir().unwrap();
        fs::create_dir(out.path().join("shop")).unwrap();
        let bundle = bundle(&[], &[]);
        let renderer = Renderer::new();

        let err = renderer
            .prepare(&bundle, &context(), out.path(), false)
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let target = renderer
            .prepare(&bundle, &context(), out.path(), true)
            .unwrap();
        assert!(!target.created);
    }
}
