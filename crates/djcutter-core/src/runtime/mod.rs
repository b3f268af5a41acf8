//! Toolchain detection
//!
//! Reports which of the tools a generated project relies on (Python, Docker,
//! Make, Git) are installed. Purely advisory.

pub mod check;

pub use check::{check_tool, check_toolchain, required_tools, Tool, ToolInfo};
