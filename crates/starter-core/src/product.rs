//! Product configuration trait for CLI binaries
//!
//! This trait defines what a binary built on this library must provide to
//! brand the prompts and tell the user what to do once the project exists.

use crate::config::Configuration;
use std::path::Path;

/// Configuration trait for CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable naming a local template directory
    fn template_dir_env(&self) -> &'static str;

    /// URL opened when required tools are missing
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String>;
}
