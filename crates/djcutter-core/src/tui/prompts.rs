//! Charm-style CLI prompts using cliclack

use crate::collector::{Answer, Collector, Progress, Step};
use crate::config::{ConfigError, Feature, ProjectConfig, ProjectType};
use crate::generate::{self, GenerateOptions, GeneratedProject};
use crate::product::ProductConfig;
use crate::runtime::check;
use crate::templates::{version, Defaults, TemplateBundle, TemplateSource};
use anyhow::Result;
use console::style;
use std::io;
use std::path::{Path, PathBuf};

/// Where to read the template from and where to write the project
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub template: TemplateSource,

    /// Directory the project folder is created in
    pub output_dir: PathBuf,
}

impl CreateArgs {
    /// Resolve both locations from the product's environment variables,
    /// defaulting to the current directory
    pub fn from_env<C: ProductConfig>(config: &C) -> Self {
        Self {
            template: TemplateSource::from_config(config),
            output_dir: std::env::var_os(config.output_dir_env())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// How an interactive run ended
#[derive(Debug)]
pub enum Outcome {
    Created(PathBuf),
    /// User quit before the form was complete; nothing was written
    Cancelled,
    /// Answers failed validation; generation never ran
    Rejected(ConfigError),
    /// Template loading or generation failed
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Created(_) | Outcome::Cancelled)
    }
}

/// Result of the question phase
enum Collected {
    Config(ProjectConfig),
    Cancelled,
    Rejected(ConfigError),
}

/// Run the CLI with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<Outcome> {
    cliclack::intro(config.display_name())?;

    // Step 1: Load the template
    let bundle = match load_template(&args.template) {
        Ok(bundle) => bundle,
        Err(e) => return fail(e),
    };

    // Check version compatibility
    if let Some(warning) = version::check_compatibility(
        cli_version,
        &bundle.manifest.version,
        config.upgrade_command(),
    ) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 2: Ask the questions
    let project = match collect(&bundle.manifest.defaults)? {
        Collected::Config(project) => project,
        Collected::Cancelled => {
            cliclack::outro_cancel("Cancelled, no files were written.")?;
            return Ok(Outcome::Cancelled);
        }
        Collected::Rejected(err) => {
            cliclack::log::error(err.to_string())?;
            cliclack::outro_cancel("Project not created.")?;
            return Ok(Outcome::Rejected(err));
        }
    };

    // Step 3: Show what is about to be generated
    print_summary(&project)?;

    // Step 4: Generate
    let options = GenerateOptions {
        output_dir: args.output_dir,
        overwrite_if_exists: false,
    };
    let generated = match create_project(&bundle, &project, &options)? {
        Ok(generated) => generated,
        Err(e) => return fail(e),
    };

    // Step 5: Advisory toolchain check
    check_toolchain(&project)?;

    // Step 6: Show next steps
    print_next_steps(config, &generated.project_dir, &project)?;

    Ok(Outcome::Created(generated.project_dir))
}

fn fail(e: anyhow::Error) -> Result<Outcome> {
    let message = format!("{:#}", e);
    cliclack::log::error(&message)?;
    cliclack::outro_cancel("Project not created.")?;
    Ok(Outcome::Failed(message))
}

fn load_template(source: &TemplateSource) -> Result<TemplateBundle> {
    let spinner = cliclack::spinner();
    spinner.start("Loading template...");

    match source.load() {
        Ok(bundle) => {
            let description = if bundle.manifest.description.is_empty() {
                source.path().display().to_string()
            } else {
                bundle.manifest.description.clone()
            };
            spinner.stop(format!(
                "Template: {} - {}",
                bundle.manifest.name, description
            ));
            Ok(bundle)
        }
        Err(e) => {
            spinner.stop("Failed to load template");
            Err(e)
        }
    }
}

fn collect(defaults: &Defaults) -> Result<Collected> {
    let mut collector = Collector::new();

    while let Some(step) = collector.current() {
        let answer = match ask(step, defaults) {
            Ok(answer) => answer,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                if confirm_quit()? {
                    collector.cancel();
                    return Ok(Collected::Cancelled);
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match collector.submit(answer) {
            Ok(Progress::Complete(project)) => return Ok(Collected::Config(project)),
            Ok(Progress::Next(_)) => {}
            Err(err) if err.is_fatal() => return Ok(Collected::Rejected(err)),
            Err(err) => cliclack::log::warning(err.to_string())?,
        }
    }

    anyhow::bail!("Prompts ended without a complete configuration")
}

fn confirm_quit() -> Result<bool> {
    match cliclack::confirm("Are you sure you want to quit?")
        .initial_value(true)
        .interact()
    {
        Ok(quit) => Ok(quit),
        // A second Esc/Ctrl+C counts as yes
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(true),
        Err(e) => Err(e.into()),
    }
}

fn ask(step: Step, defaults: &Defaults) -> io::Result<Answer> {
    match step {
        Step::ProjectType => {
            let mut select = cliclack::select(step.prompt());
            for project_type in ProjectType::ALL {
                select = select.item(
                    project_type,
                    project_type.folder_name(),
                    project_type.description(),
                );
            }
            let selected = select
                .initial_value(defaults.project_type.unwrap_or(ProjectType::Django))
                .interact()?;
            Ok(Answer::ProjectType(selected))
        }
        Step::ProjectName => ask_name(step, defaults.project_name.as_deref(), "my_project"),
        Step::AppName => ask_name(step, defaults.app_name.as_deref(), "blog"),
        Step::ProjectBaseName => ask_name(
            step,
            defaults.project_base_name.as_deref(),
            "my_project_base",
        ),
        Step::Feature(feature) => {
            let enabled: bool = cliclack::confirm(step.prompt())
                .initial_value(defaults.features.get(feature))
                .interact()?;
            Ok(Answer::Toggle(enabled))
        }
    }
}

fn ask_name(step: Step, default: Option<&str>, example: &str) -> io::Result<Answer> {
    let mut input = cliclack::input(step.prompt())
        .placeholder(default.unwrap_or(example));
    if let Some(default) = default {
        input = input.default_input(default);
    }

    let value: String = input
        .validate(|value: &String| {
            if value.trim().is_empty() {
                Err("Please enter a name")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(Answer::Text(value))
}

fn print_summary(project: &ProjectConfig) -> Result<()> {
    let enabled: Vec<&str> = project
        .features
        .enabled()
        .iter()
        .map(Feature::display_name)
        .collect();
    let features = if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    };

    cliclack::log::info(format!(
        "Project type: {}\nProject name: {}\nApp name: {}\nProject base name: {}\nFeatures: {}",
        style(project.project_type).cyan(),
        style(&project.project_name).cyan(),
        style(&project.app_name).cyan(),
        style(&project.project_base_name).cyan(),
        features
    ))?;

    Ok(())
}

/// Outer error is terminal I/O; inner error is a generation failure to report
fn create_project(
    bundle: &TemplateBundle,
    project: &ProjectConfig,
    options: &GenerateOptions,
) -> Result<Result<GeneratedProject>> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let generated = match generate::generate(bundle, project, options) {
        Ok(generated) => generated,
        Err(e) => {
            spinner.stop("Project generation failed");
            return Ok(Err(e));
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        generated.rendered_files,
        generated.project_dir.display()
    ));

    let report = &generated.report;
    if !report.promoted.is_empty() {
        cliclack::log::info(format!(
            "Using the {} layout ({} entries promoted)",
            project.project_type,
            report.promoted.len()
        ))?;
    }
    if !report.removed.is_empty() {
        cliclack::log::info(format!("Removed unused folders: {}", report.removed.join(", ")))?;
    }

    Ok(Ok(generated))
}

fn check_toolchain(project: &ProjectConfig) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools = check::check_toolchain(project);
    let found: Vec<String> = tools
        .iter()
        .filter(|info| info.available)
        .map(|info| match &info.version {
            Some(version) => format!("{} ({})", info.tool, version),
            None => info.tool.to_string(),
        })
        .collect();

    if found.is_empty() {
        spinner.stop("No project tools detected");
    } else {
        spinner.stop(format!("Detected tools: {}", found.join(", ")));
    }

    for info in tools.iter().filter(|info| !info.available) {
        cliclack::log::warning(format!(
            "{} not found (install from {})",
            info.tool,
            info.tool.install_hint()
        ))?;
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    project: &ProjectConfig,
) -> Result<()> {
    let steps = config.next_steps(project_dir, project);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Project created successfully!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct EnvConfig {
        template_env: &'static str,
        output_dir_env: &'static str,
    }

    impl ProductConfig for EnvConfig {
        fn display_name(&self) -> &'static str {
            "test"
        }

        fn template_env(&self) -> &'static str {
            self.template_env
        }

        fn output_dir_env(&self) -> &'static str {
            self.output_dir_env
        }

        fn upgrade_command(&self) -> &'static str {
            "true"
        }

        fn next_steps(&self, _dir: &Path, _config: &ProjectConfig) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_create_args_default_to_current_dir() {
        let config = EnvConfig {
            template_env: "DJCUTTER_PROMPTS_TEST_UNSET_TEMPLATE",
            output_dir_env: "DJCUTTER_PROMPTS_TEST_UNSET_OUTPUT",
        };
        std::env::remove_var(config.template_env);
        std::env::remove_var(config.output_dir_env);

        let args = CreateArgs::from_env(&config);

        assert_eq!(args.template, TemplateSource::Directory(PathBuf::from(".")));
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_create_args_read_overrides() {
        let config = EnvConfig {
            template_env: "DJCUTTER_PROMPTS_TEST_TEMPLATE",
            output_dir_env: "DJCUTTER_PROMPTS_TEST_OUTPUT",
        };
        std::env::set_var(config.template_env, "/srv/templates/django.zip");
        std::env::set_var(config.output_dir_env, "/srv/projects");

        let args = CreateArgs::from_env(&config);

        assert_eq!(
            args.template,
            TemplateSource::Archive(PathBuf::from("/srv/templates/django.zip"))
        );
        assert_eq!(args.output_dir, PathBuf::from("/srv/projects"));
    }
}
