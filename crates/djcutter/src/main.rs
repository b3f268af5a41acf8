//! djcutter - Project scaffolding for Django and DDD-style Django projects

use clap::Parser;
use colored::Colorize;
use djcutter_core::config::{Feature, ProjectConfig};
use djcutter_core::tui::{CreateArgs, Outcome};
use djcutter_core::ProductConfig;
use std::path::Path;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// djcutter product configuration
#[derive(Clone)]
pub struct DjcutterConfig;

impl ProductConfig for DjcutterConfig {
    fn display_name(&self) -> &'static str {
        "djcutter"
    }

    fn template_env(&self) -> &'static str {
        "DJCUTTER_TEMPLATE"
    }

    fn output_dir_env(&self) -> &'static str {
        "DJCUTTER_OUTPUT_DIR"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install djcutter --force"
    }

    fn next_steps(&self, dir: &Path, config: &ProjectConfig) -> Vec<String> {
        let mut steps = Vec::new();
        let features = &config.features;

        // Step 1: cd to the project
        steps.push(format!("cd {}", dir.display()));

        // Step 2: Start the stack, containerized or local
        if features.get(Feature::Docker) {
            steps.push(
                "docker compose -f docker-compose/local.yml up --build".to_string(),
            );
        } else {
            steps.push(
                "Set up Python environment:\n\
                      python3 -m venv .venv && .venv/bin/pip install -r requirements.txt"
                    .to_string(),
            );
            if features.get(Feature::Make) {
                steps.push("make run".to_string());
            } else {
                steps.push(".venv/bin/python manage.py runserver".to_string());
            }
        }

        // Step 3: Version control
        if features.get(Feature::Git) {
            steps.push(
                "git init && git add . && git commit -m \"Initial commit\"".to_string(),
            );
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "djcutter")]
#[command(about = "CLI for scaffolding Django and DDD-style Django projects")]
#[command(version)]
pub struct Args {}

fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully outside of prompts
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let _args = Args::parse();
    let config = DjcutterConfig;

    let result = djcutter_core::run(&config, CreateArgs::from_env(&config), CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(outcome) => exit_code(&outcome),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use djcutter_core::config::{ConfigError, Features, ProjectType};
    use std::path::PathBuf;

    fn project(features: Features) -> ProjectConfig {
        ProjectConfig {
            project_type: ProjectType::Django,
            project_name: "shop".to_string(),
            app_name: "orders".to_string(),
            project_base_name: "base".to_string(),
            features,
        }
    }

    #[test]
    fn test_next_steps_with_docker() {
        let mut features = Features::none();
        features.use_docker = true;
        features.use_git = true;

        let steps = DjcutterConfig.next_steps(Path::new("out/shop"), &project(features));

        assert_eq!(steps[0], "cd out/shop");
        assert!(steps[1].starts_with("docker compose"));
        assert!(steps[2].starts_with("git init"));
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_next_steps_without_docker() {
        let mut features = Features::none();
        features.use_make = true;

        let steps = DjcutterConfig.next_steps(Path::new("shop"), &project(features));

        assert!(steps[1].contains("python3 -m venv"));
        assert_eq!(steps[2], "make run");
        assert!(!steps.iter().any(|s| s.starts_with("git")));
    }

    #[test]
    fn test_outcomes_mapped_to_success() {
        assert!(Outcome::Created(PathBuf::from("shop")).is_success());
        assert!(Outcome::Cancelled.is_success());
        let rejected = Outcome::Rejected(ConfigError::ReservedProjectName);
        assert!(!rejected.is_success());
        assert!(!Outcome::Failed("boom".into()).is_success());
    }

    #[test]
    fn test_cli_accepts_no_arguments() {
        assert!(Args::try_parse_from(["djcutter"]).is_ok());
        let flagged = Args::try_parse_from(["djcutter", "--project-name", "x"]);
        assert!(flagged.is_err());
    }
}
