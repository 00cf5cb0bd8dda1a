//! Lint and formatter configuration steps

use super::{Step, Toolchain};
use crate::config::{Language, ProjectContext};
use crate::error::StepResult;
use crate::templates::TemplateKey;
use async_trait::async_trait;

/// Installs the ESLint ruleset matching the project language
pub struct SetupLintConfig;

impl SetupLintConfig {
    pub fn template(language: Language) -> TemplateKey {
        match language {
            Language::JavaScript => TemplateKey::EslintJs,
            Language::TypeScript => TemplateKey::EslintTs,
        }
    }
}

#[async_trait]
impl Step for SetupLintConfig {
    fn name(&self) -> &'static str {
        "setup-lint-config"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        let key = Self::template(project.language());
        tools
            .templates
            .install(key, &project.root_path().join(key.destination()), None)
            .await?;
        Ok(())
    }
}

/// Installs the Prettier ruleset
pub struct SetupPrettierConfig;

#[async_trait]
impl Step for SetupPrettierConfig {
    fn name(&self) -> &'static str {
        "setup-prettier-config"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        let key = TemplateKey::Prettier;
        tools
            .templates
            .install(key, &project.root_path().join(key.destination()), None)
            .await?;
        Ok(())
    }
}
