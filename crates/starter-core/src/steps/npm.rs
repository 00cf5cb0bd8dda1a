//! Package manifest steps: project init, module type, parallel dev runner

use super::{Precondition, Step, Toolchain, NPM};
use crate::config::ProjectContext;
use crate::error::StepResult;
use async_trait::async_trait;
use serde_json::Value;

/// Baseline lint/format tooling every project gets
const BASELINE_DEV_DEPENDENCIES: &[&str] = &["eslint", "prettier", "eslint-config-prettier"];

/// `npm init -y` writes a `test` script that only fails
const NPM_PLACEHOLDER_TEST: &str = "echo \"Error: no test specified\"";

/// Creates `package.json` and installs the baseline lint/format tooling
pub struct InitNpmProject;

#[async_trait]
impl Step for InitNpmProject {
    fn name(&self) -> &'static str {
        "init-npm-project"
    }

    fn preconditions(&self) -> Vec<Precondition> {
        vec![Precondition::ManifestAbsent]
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        tools.exec(project, &format!("{} init -y", NPM)).await?;
        tools.manifest.ensure_exists(project.root_path()).await?;
        tools
            .manifest
            .remove_script_if(project.root_path(), "test", |command| {
                command.starts_with(NPM_PLACEHOLDER_TEST)
            })
            .await?;
        tools.install_dev(project, BASELINE_DEV_DEPENDENCIES).await?;
        tools
            .manifest
            .merge_scripts(
                project.root_path(),
                [("format", "prettier --write ."), ("lint", "eslint .")],
            )
            .await?;
        Ok(())
    }
}

/// Marks a JavaScript project as ES modules
pub struct SetModuleType;

#[async_trait]
impl Step for SetModuleType {
    fn name(&self) -> &'static str {
        "set-module-type"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        tools
            .manifest
            .set_field(
                project.root_path(),
                "type",
                Value::String("module".to_string()),
            )
            .await?;
        Ok(())
    }
}

/// Joins fanned-out `dev:*` scripts under a single `dev` entry point
pub struct SetupDevRunner;

#[async_trait]
impl Step for SetupDevRunner {
    fn name(&self) -> &'static str {
        "setup-dev-runner"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        tools.install_dev(project, &["npm-run-all"]).await?;
        tools
            .manifest
            .merge_scripts(project.root_path(), [("dev", "run-p dev:*")])
            .await?;
        Ok(())
    }
}
