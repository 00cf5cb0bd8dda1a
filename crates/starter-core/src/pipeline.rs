//! Project assembly pipeline
//!
//! The pipeline turns a [`Configuration`] into an ordered list of steps,
//! creates the project directory and runs the steps one at a time. The first
//! failure ends the assembly; whatever was already written stays on disk for
//! inspection.
//!
//! ```text
//! NotStarted -> DirectoryCreated -> StepsRunning(0..n) -> Completed
//!                      |                   |
//!                      +-------------------+--> Failed(step)
//! ```

use crate::config::{Addon, Configuration, Language, ProjectContext};
use crate::error::{AssemblyError, StepError};
use crate::runtime::CommandRunner;
use crate::steps::{
    InitNpmProject, SetModuleType, SetupDevRunner, SetupGit, SetupLintConfig, SetupPrettierConfig,
    SetupTailwind, SetupTypeScript, Step, Toolchain,
};
use crate::templates::{TemplateInstaller, TemplateSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name reported when the project directory itself cannot be created
pub const CREATE_DIRECTORY_STEP: &str = "create-project-directory";

/// Where an assembly currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyState {
    NotStarted,
    DirectoryCreated { root: PathBuf },
    StepsRunning { index: usize, total: usize, step: &'static str },
    Completed,
    Failed { step: String },
}

/// Outcome of a successful assembly
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub root_path: PathBuf,
    pub steps: Vec<&'static str>,
}

type Observer = Box<dyn Fn(&AssemblyState) + Send + Sync>;

/// Sequences steps for one configuration against one project directory
pub struct Pipeline {
    runner: Arc<dyn CommandRunner>,
    templates: TemplateInstaller,
    observer: Option<Observer>,
}

impl Pipeline {
    pub fn new(runner: Arc<dyn CommandRunner>, source: TemplateSource) -> Self {
        Self {
            runner,
            templates: TemplateInstaller::new(source),
            observer: None,
        }
    }

    /// Report every state transition to `observer`
    pub fn with_observer(mut self, observer: impl Fn(&AssemblyState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The ordered steps for a configuration
    pub fn plan(config: &Configuration) -> Vec<Box<dyn Step>> {
        let mut steps: Vec<Box<dyn Step>> = vec![Box::new(InitNpmProject)];

        match config.language() {
            Language::JavaScript => steps.push(Box::new(SetModuleType)),
            Language::TypeScript => steps.push(Box::new(SetupTypeScript)),
        }

        if config.has_addon(Addon::Tailwind) {
            steps.push(Box::new(SetupTailwind));
        }

        if !config.single_dev_script() {
            steps.push(Box::new(SetupDevRunner));
        }

        steps.push(Box::new(SetupLintConfig));
        steps.push(Box::new(SetupPrettierConfig));

        // Commits everything above, so it goes last
        if config.has_addon(Addon::Git) {
            steps.push(Box::new(SetupGit));
        }

        steps
    }

    /// Step names in execution order
    pub fn plan_names(config: &Configuration) -> Vec<&'static str> {
        Self::plan(config).iter().map(|s| s.name()).collect()
    }

    fn transition(&self, state: AssemblyState) {
        debug!(?state, "assembly state");
        if let Some(observer) = &self.observer {
            observer(&state);
        }
    }

    fn fail(&self, step: &str, cause: impl Into<StepError>) -> AssemblyError {
        let err = AssemblyError::new(step, cause);
        warn!(step, error = %err.cause, "assembly failed");
        self.transition(AssemblyState::Failed {
            step: step.to_string(),
        });
        err
    }

    /// Create `<base_dir>/<project name>` and run every planned step in it
    pub async fn assemble(
        &self,
        config: &Configuration,
        base_dir: &Path,
    ) -> Result<AssemblyReport, AssemblyError> {
        self.transition(AssemblyState::NotStarted);

        let root = self
            .create_project_dir(config, base_dir)
            .await
            .map_err(|e| self.fail(CREATE_DIRECTORY_STEP, e))?;
        info!(root = %root.display(), "created project directory");
        self.transition(AssemblyState::DirectoryCreated { root: root.clone() });

        let project = ProjectContext::new(root, config.clone());
        let tools = Toolchain::new(self.runner.as_ref(), &self.templates);
        let steps = Self::plan(config);
        let total = steps.len();
        let mut completed = Vec::with_capacity(total);

        for (index, step) in steps.iter().enumerate() {
            let name = step.name();
            self.transition(AssemblyState::StepsRunning {
                index,
                total,
                step: name,
            });

            for precondition in step.preconditions() {
                precondition
                    .check(&tools.manifest, project.root_path())
                    .await
                    .map_err(|e| self.fail(name, e))?;
            }

            step.run(&project, &tools)
                .await
                .map_err(|e| self.fail(name, e))?;

            debug!(step = name, "step finished");
            completed.push(name);
        }

        self.transition(AssemblyState::Completed);
        Ok(AssemblyReport {
            root_path: project.root_path().to_path_buf(),
            steps: completed,
        })
    }

    async fn create_project_dir(
        &self,
        config: &Configuration,
        base_dir: &Path,
    ) -> Result<PathBuf, StepError> {
        let base = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|source| StepError::Io {
                    path: base_dir.to_path_buf(),
                    source,
                })?
                .join(base_dir)
        };

        let root = base.join(config.project_name());
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StepError::Io {
                path: root.clone(),
                source,
            })?;
        Ok(root)
    }
}
