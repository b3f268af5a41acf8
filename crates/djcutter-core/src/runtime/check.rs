//! Detection of the tools a generated project expects on the machine

use crate::config::{Feature, ProjectConfig};
use std::fmt;
use std::process::Command;

/// Command-line tools used by generated projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Python,
    Docker,
    Make,
    Git,
}

impl Tool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Python => "Python 3",
            Tool::Docker => "Docker",
            Tool::Make => "Make",
            Tool::Git => "Git",
        }
    }

    /// Binary probed with `--version`
    pub fn binary(&self) -> &'static str {
        match self {
            Tool::Python => "python3",
            Tool::Docker => "docker",
            Tool::Make => "make",
            Tool::Git => "git",
        }
    }

    pub fn install_hint(&self) -> &'static str {
        match self {
            Tool::Python => "https://python.org",
            Tool::Docker => "https://docs.docker.com/get-docker",
            Tool::Make => "your system package manager",
            Tool::Git => "https://git-scm.com",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub tool: Tool,
    pub version: Option<String>,
    pub available: bool,
}

/// Tools the project needs: Python always, the rest when their feature is on
pub fn required_tools(config: &ProjectConfig) -> Vec<Tool> {
    let mut tools = vec![Tool::Python];
    for (feature, tool) in [
        (Feature::Docker, Tool::Docker),
        (Feature::Make, Tool::Make),
        (Feature::Git, Tool::Git),
    ] {
        if config.features.get(feature) {
            tools.push(tool);
        }
    }
    tools
}

/// Check if a tool is available, capturing its version line
pub fn check_tool(tool: Tool) -> ToolInfo {
    let output = Command::new(tool.binary()).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            // Some tools print their version on stderr
            let raw = if out.stdout.is_empty() {
                out.stderr
            } else {
                out.stdout
            };
            let version = String::from_utf8_lossy(&raw)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            ToolInfo {
                tool,
                version,
                available: true,
            }
        }
        _ => ToolInfo {
            tool,
            version: None,
            available: false,
        },
    }
}

/// Advisory check of every tool the project expects; never fails
pub fn check_toolchain(config: &ProjectConfig) -> Vec<ToolInfo> {
    required_tools(config).into_iter().map(check_tool).collect()
}
