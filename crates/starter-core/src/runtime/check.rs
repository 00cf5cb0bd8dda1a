//! Detection of the external tools an assembly shells out to

use crate::config::Configuration;
use anyhow::Result;
use semver::Version;
use std::process::Command;

/// Oldest Node.js release the generated tooling supports
pub const MIN_NODE_VERSION: &str = "18.0.0";

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, program: &str) -> ToolInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> ToolInfo {
    probe("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> ToolInfo {
    probe("npm", "npm")
}

/// Check if git is available
pub fn check_git() -> ToolInfo {
    probe("git", "git")
}

/// Parse version string, handling a leading `v` and trailing text
pub fn parse_version(version_str: &str) -> Result<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Returns a warning if the installed Node.js is older than [`MIN_NODE_VERSION`]
pub fn node_version_warning(node_version: &str) -> Option<String> {
    let installed = parse_version(node_version).ok()?;
    let minimum = Version::parse(MIN_NODE_VERSION).ok()?;

    if installed < minimum {
        Some(format!(
            "Node.js {} is older than the supported minimum {}",
            node_version.trim(),
            MIN_NODE_VERSION
        ))
    } else {
        None
    }
}

/// Check every tool the given configuration will invoke; fail listing all
/// missing ones at once
pub fn check_tools(config: &Configuration) -> Result<Vec<ToolInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    let node = check_node();
    if node.available {
        results.push(node);
    } else {
        missing.push("Node.js (install from https://nodejs.org)");
    }

    let npm = check_npm();
    if npm.available {
        results.push(npm);
    } else {
        missing.push("npm (ships with Node.js, https://nodejs.org)");
    }

    if config.use_git() {
        let git = check_git();
        if git.available {
            results.push(git);
        } else {
            missing.push("git (install from https://git-scm.com)");
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}
