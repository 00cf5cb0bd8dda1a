//! Git repository step

use super::{Step, Toolchain};
use crate::config::ProjectContext;
use crate::error::StepResult;
use crate::templates::TemplateKey;
use async_trait::async_trait;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

pub const WORKING_BRANCH: &str = "dev";

/// Commits everything earlier steps produced and switches to the working
/// branch. Runs last.
pub struct SetupGit;

impl SetupGit {
    pub fn commands() -> Vec<String> {
        vec![
            "git init".to_string(),
            "git add .".to_string(),
            format!("git commit -m \"{}\"", INITIAL_COMMIT_MESSAGE),
            format!("git checkout -b {}", WORKING_BRANCH),
        ]
    }
}

#[async_trait]
impl Step for SetupGit {
    fn name(&self) -> &'static str {
        "setup-git"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        let key = TemplateKey::Gitignore;
        tools
            .templates
            .install(key, &project.root_path().join(key.destination()), None)
            .await?;

        for command_line in Self::commands() {
            tools.exec(project, &command_line).await?;
        }
        Ok(())
    }
}
