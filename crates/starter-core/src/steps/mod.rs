//! Assembly steps
//!
//! A step is one named, idempotent unit of work against the project
//! directory. Steps never talk to each other directly: they observe and
//! extend the project only through the [`Toolchain`] (commands, manifest
//! and templates).
//!
//! # Step Lifecycle
//!
//! 1. **Planning**: the pipeline selects steps from the configuration.
//! 2. **Preconditions**: before a step runs, the pipeline checks what it
//!    declared in [`Step::preconditions`].
//! 3. **Execution**: [`Step::run`] is awaited exactly once.
//! 4. **Result**: an error ends the assembly; nothing is retried.

mod git;
mod lint;
mod npm;
mod tailwind;
mod typescript;

pub use git::SetupGit;
pub use lint::{SetupLintConfig, SetupPrettierConfig};
pub use npm::{InitNpmProject, SetModuleType, SetupDevRunner};
pub use tailwind::SetupTailwind;
pub use typescript::SetupTypeScript;

use crate::config::ProjectContext;
use crate::error::{StepError, StepResult};
use crate::manifest::ManifestStore;
use crate::runtime::CommandRunner;
use crate::templates::TemplateInstaller;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Package manager executable
pub const NPM: &str = "npm";

/// Package runner executable
pub const NPX: &str = "npx";

/// Project state a step requires before it may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// `package.json` must already exist
    ManifestExists,
    /// `package.json` must not exist yet
    ManifestAbsent,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::ManifestExists => write!(f, "package.json must exist"),
            Precondition::ManifestAbsent => write!(f, "package.json must not exist yet"),
        }
    }
}

impl Precondition {
    /// Check this precondition against a project root
    pub async fn check(&self, manifest: &ManifestStore, root: &Path) -> StepResult<()> {
        let exists = manifest.exists(root).await?;
        let satisfied = match self {
            Precondition::ManifestExists => exists,
            Precondition::ManifestAbsent => !exists,
        };

        if satisfied {
            Ok(())
        } else {
            Err(StepError::PreconditionFailed(*self))
        }
    }
}

/// What a step may use to change the project
pub struct Toolchain<'a> {
    pub runner: &'a dyn CommandRunner,
    pub manifest: ManifestStore,
    pub templates: &'a TemplateInstaller,
}

impl<'a> Toolchain<'a> {
    pub fn new(runner: &'a dyn CommandRunner, templates: &'a TemplateInstaller) -> Self {
        Self {
            runner,
            manifest: ManifestStore::new(),
            templates,
        }
    }

    /// Run a command line in the project root
    pub async fn exec(&self, project: &ProjectContext, command_line: &str) -> StepResult<()> {
        self.runner
            .run(command_line, project.root_path())
            .await
            .map_err(StepError::from)
    }

    /// Install development dependencies
    pub async fn install_dev(&self, project: &ProjectContext, packages: &[&str]) -> StepResult<()> {
        let command_line = format!("{} install --save-dev {}", NPM, packages.join(" "));
        self.exec(project, &command_line).await
    }
}

/// One named unit of project-assembly work
#[async_trait]
pub trait Step: Send + Sync {
    /// Stable kebab-case identifier, reported on failure
    fn name(&self) -> &'static str;

    /// Project state required before [`Step::run`]
    fn preconditions(&self) -> Vec<Precondition> {
        vec![Precondition::ManifestExists]
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()>;
}

/// Create a directory (and parents) inside the project
pub(crate) async fn create_dir(path: PathBuf) -> StepResult<()> {
    fs::create_dir_all(&path)
        .await
        .map_err(|source| StepError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ManifestError;
    use crate::manifest::MANIFEST_FILE;

    #[tokio::test]
    async fn test_preconditions_follow_manifest_presence() {
        let dir = tempfile::tempdir().unwrap();
        let store = ManifestStore::new();

        Precondition::ManifestAbsent.check(&store, dir.path()).await.unwrap();
        assert!(matches!(
            Precondition::ManifestExists.check(&store, dir.path()).await,
            Err(StepError::PreconditionFailed(Precondition::ManifestExists))
        ));

        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        Precondition::ManifestExists.check(&store, dir.path()).await.unwrap();
        assert!(Precondition::ManifestAbsent.check(&store, dir.path()).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_absent_check_does_not_pass_on_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, "").unwrap();

        let result = Precondition::ManifestAbsent
            .check(&ManifestStore::new(), &not_a_dir)
            .await;
        assert!(matches!(
            result,
            Err(StepError::Manifest(ManifestError::Io { .. }))
        ));
    }
}
