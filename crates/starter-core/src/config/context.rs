//! Per-assembly project context

use super::project::{Configuration, Language};
use std::path::{Path, PathBuf};

/// State shared by every step of one assembly
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root_path: PathBuf,
    config: Configuration,
    single_dev_script: bool,
}

impl ProjectContext {
    pub fn new(root_path: PathBuf, config: Configuration) -> Self {
        let single_dev_script = config.single_dev_script();
        Self {
            root_path,
            config,
            single_dev_script,
        }
    }

    /// Absolute path of the project directory
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.config.language()
    }

    /// Whether dev-mode scripts live under one key (`dev`, `css`) or fan out
    /// into `dev:*` keys joined by a parallel runner
    pub fn single_dev_script(&self) -> bool {
        self.single_dev_script
    }
}
