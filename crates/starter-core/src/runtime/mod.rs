//! External process execution and tool detection
//!
//! This module provides:
//! - The command runner every step shells out through
//! - Detection of node, npm, and git before an assembly starts

pub mod check;
pub mod process;

pub use check::{check_tools, node_version_warning, ToolInfo};
pub use process::{tokenize, CommandRunner, ProcessRunner};
