//! Question sequencing for the interactive form
//!
//! The collector is a forward-only state machine over the questions that make
//! up a [`ProjectConfig`]. It knows nothing about terminals: a front end asks
//! [`Collector::current`] which question to show, feeds the user's reply to
//! [`Collector::submit`], and stops once the machine reports completion or
//! the user cancels.

use crate::config::project::{check_reserved_name, normalize_name};
use crate::config::{ConfigError, Feature, Features, ProjectConfig, ProjectType};

/// A single question in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ProjectType,
    ProjectName,
    AppName,
    ProjectBaseName,
    Feature(Feature),
}

impl Step {
    /// The question that follows this one, `None` after the last feature
    pub fn next(self) -> Option<Step> {
        match self {
            Step::ProjectType => Some(Step::ProjectName),
            Step::ProjectName => Some(Step::AppName),
            Step::AppName => Some(Step::ProjectBaseName),
            Step::ProjectBaseName => Feature::ALL
                .first()
                .copied()
                .map(Step::Feature),
            Step::Feature(current) => Feature::ALL
                .iter()
                .position(|f| *f == current)
                .and_then(|idx| Feature::ALL.get(idx + 1))
                .copied()
                .map(Step::Feature),
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Step::ProjectType => "Project type".to_string(),
            Step::ProjectName => "Project name".to_string(),
            Step::AppName => "App name".to_string(),
            Step::ProjectBaseName => "Project base name".to_string(),
            Step::Feature(feature) => format!("Use {}?", feature.display_name()),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Step::ProjectType => "a project type",
            Step::ProjectName | Step::AppName | Step::ProjectBaseName => "a name",
            Step::Feature(_) => "a yes/no answer",
        }
    }
}

/// A reply to the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    ProjectType(ProjectType),
    Text(String),
    Toggle(bool),
}

/// Where the form stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Asking(Step),
    Complete,
    Cancelled,
}

/// Result of an accepted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Next(Step),
    Complete(ProjectConfig),
}

/// Forward-only collector of project answers
#[derive(Debug, Clone)]
pub struct Collector {
    state: State,
    project_type: Option<ProjectType>,
    project_name: Option<String>,
    app_name: Option<String>,
    project_base_name: Option<String>,
    features: Features,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Self {
            state: State::Asking(Step::ProjectType),
            project_type: None,
            project_name: None,
            app_name: None,
            project_base_name: None,
            features: Features::default(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// The question waiting for an answer, if any
    pub fn current(&self) -> Option<Step> {
        match self.state {
            State::Asking(step) => Some(step),
            State::Complete | State::Cancelled => None,
        }
    }

    /// Project type chosen so far
    pub fn project_type(&self) -> Option<ProjectType> {
        self.project_type
    }

    /// Accept an answer for the current question and advance
    ///
    /// A rejected answer leaves the collector on the same question.
    pub fn submit(&mut self, answer: Answer) -> Result<Progress, ConfigError> {
        let step = match self.state {
            State::Asking(step) => step,
            State::Complete | State::Cancelled => {
                return Err(ConfigError::UnexpectedAnswer {
                    expected: "no further answers",
                })
            }
        };

        match (step, answer) {
            (Step::ProjectType, Answer::ProjectType(project_type)) => {
                self.project_type = Some(project_type);
            }
            (Step::ProjectName, Answer::Text(raw)) => {
                let name = normalize_name("project_name", &raw)?;
                if let Some(project_type) = self.project_type {
                    check_reserved_name(project_type, &name)?;
                }
                self.project_name = Some(name);
            }
            (Step::AppName, Answer::Text(raw)) => {
                self.app_name = Some(normalize_name("app_name", &raw)?);
            }
            (Step::ProjectBaseName, Answer::Text(raw)) => {
                self.project_base_name = Some(normalize_name("project_base_name", &raw)?);
            }
            (Step::Feature(feature), Answer::Toggle(enabled)) => {
                self.features.set(feature, enabled);
            }
            (step, _) => {
                return Err(ConfigError::UnexpectedAnswer {
                    expected: step.expected(),
                })
            }
        }

        match step.next() {
            Some(next) => {
                self.state = State::Asking(next);
                Ok(Progress::Next(next))
            }
            None => {
                let config = self.finish()?;
                self.state = State::Complete;
                Ok(Progress::Complete(config))
            }
        }
    }

    /// Abandon the form, dropping everything collected so far
    pub fn cancel(&mut self) {
        *self = Self {
            state: State::Cancelled,
            ..Self::new()
        };
    }

    fn finish(&self) -> Result<ProjectConfig, ConfigError> {
        let missing = |field: &'static str| ConfigError::EmptyField { field };

        let config = ProjectConfig {
            project_type: self
                .project_type
                .ok_or(ConfigError::UnexpectedAnswer {
                    expected: "a project type",
                })?,
            project_name: self
                .project_name
                .clone()
                .ok_or_else(|| missing("project_name"))?,
            app_name: self.app_name.clone().ok_or_else(|| missing("app_name"))?,
            project_base_name: self
                .project_base_name
                .clone()
                .ok_or_else(|| missing("project_base_name"))?,
            features: self.features,
        };
        config.validate()?;
        Ok(config)
    }
}
