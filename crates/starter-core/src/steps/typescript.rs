//! TypeScript toolchain step

use super::{create_dir, Step, Toolchain};
use crate::config::ProjectContext;
use crate::error::StepResult;
use crate::templates::TemplateKey;
use async_trait::async_trait;

const TYPESCRIPT_DEV_DEPENDENCIES: &[&str] = &[
    "typescript",
    "@typescript-eslint/parser",
    "@typescript-eslint/eslint-plugin",
];

const ENTRY_PLACEHOLDER: &str = "console.log(\"Hello, world!\");\n";

/// Installs the compiler, `tsconfig.json`, a `src/` entry file and the build scripts
pub struct SetupTypeScript;

impl SetupTypeScript {
    /// Scripts contributed to `package.json`
    pub fn scripts(single_dev_script: bool) -> Vec<(&'static str, &'static str)> {
        if single_dev_script {
            vec![
                ("build", "tsc"),
                ("dev", "tsc --watch"),
                ("typecheck", "tsc --noEmit"),
            ]
        } else {
            vec![("dev:typescript", "tsc --watch")]
        }
    }
}

#[async_trait]
impl Step for SetupTypeScript {
    fn name(&self) -> &'static str {
        "setup-typescript"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        let root = project.root_path();

        tools.install_dev(project, TYPESCRIPT_DEV_DEPENDENCIES).await?;
        tools
            .templates
            .install(
                TemplateKey::Tsconfig,
                &root.join(TemplateKey::Tsconfig.destination()),
                None,
            )
            .await?;

        let src = root.join("src");
        create_dir(src.clone()).await?;
        let entry = src.join(format!("app.{}", project.language().extension()));
        tools.templates.write_text(&entry, ENTRY_PLACEHOLDER).await?;

        tools
            .manifest
            .merge_scripts(root, Self::scripts(project.single_dev_script()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dev_script_set() {
        let keys: Vec<_> = SetupTypeScript::scripts(true)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["build", "dev", "typecheck"]);
    }

    #[test]
    fn test_fanned_out_script_set() {
        assert_eq!(
            SetupTypeScript::scripts(false),
            vec![("dev:typescript", "tsc --watch")]
        );
    }
}
