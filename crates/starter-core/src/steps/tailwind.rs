//! Tailwind CSS add-on step

use super::{create_dir, Step, Toolchain, NPX};
use crate::config::{Language, ProjectContext};
use crate::error::StepResult;
use async_trait::async_trait;

/// Tailwind 3 still ships the `init` subcommand the setup relies on
const TAILWIND_PACKAGE: &str = "tailwindcss@3";

const PRETTIER_PLUGIN: &str = "prettier-plugin-tailwindcss";

/// Build output directory the HTML shell and watcher agree on
const OUTPUT_DIR: &str = "dist";

const STYLESHEET: &str = "src/styles/styles.css";

const BASE_STYLES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

const EMPTY_CONTENT: &str = "content: []";

const CONTENT_KEY: &str = "content:";

/// Installs Tailwind, points its config at the sources, and adds a stylesheet
/// and HTML shell
pub struct SetupTailwind;

impl SetupTailwind {
    /// Config file produced by `tailwindcss init`
    pub fn config_file(language: Language) -> &'static str {
        match language {
            Language::JavaScript => "tailwind.config.js",
            Language::TypeScript => "tailwind.config.ts",
        }
    }

    fn init_command(language: Language) -> String {
        match language {
            Language::JavaScript => format!("{} tailwindcss init", NPX),
            Language::TypeScript => format!("{} tailwindcss init --ts", NPX),
        }
    }

    /// Replacement for the generated empty `content` array
    pub fn content_globs(language: Language) -> String {
        format!(
            "content: [\"./index.html\", \"./src/**/*.{{html,{}}}\"]",
            language.extension()
        )
    }

    /// Replace the first empty `content` array, whatever whitespace sits
    /// inside or around its brackets
    pub fn fill_content(config: &str, globs: &str) -> Option<String> {
        let mut from = 0;
        while let Some(offset) = config[from..].find(CONTENT_KEY) {
            let start = from + offset;
            let value = config[start + CONTENT_KEY.len()..].trim_start();
            let rest = value
                .strip_prefix('[')
                .and_then(|inner| inner.trim_start().strip_prefix(']'));
            if let Some(rest) = rest {
                let end = config.len() - rest.len();
                return Some(format!("{}{}{}", &config[..start], globs, &config[end..]));
            }
            from = start + CONTENT_KEY.len();
        }
        None
    }

    pub fn watch_command() -> String {
        format!(
            "tailwindcss -i ./{} -o ./{}/styles.css --watch",
            STYLESHEET, OUTPUT_DIR
        )
    }

    /// Scripts contributed to `package.json`
    pub fn scripts(single_dev_script: bool) -> Vec<(&'static str, String)> {
        let key = if single_dev_script { "css" } else { "dev:tailwind" };
        vec![(key, Self::watch_command())]
    }

    /// Minimal page linking the compiled stylesheet
    pub fn html_shell(title: &str, output_dir: &str) -> String {
        format!(
            r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
    <link rel="stylesheet" href="./{output_dir}/styles.css" />
  </head>
  <body>
    <h1 class="text-3xl font-bold underline">Hello, world!</h1>
  </body>
</html>
"#
        )
    }
}

#[async_trait]
impl Step for SetupTailwind {
    fn name(&self) -> &'static str {
        "setup-tailwind"
    }

    async fn run(&self, project: &ProjectContext, tools: &Toolchain<'_>) -> StepResult<()> {
        let root = project.root_path();
        let language = project.language();

        tools.install_dev(project, &[TAILWIND_PACKAGE]).await?;
        tools.exec(project, &Self::init_command(language)).await?;

        let globs = Self::content_globs(language);
        let config_path = root.join(Self::config_file(language));
        tools
            .templates
            .rewrite(&config_path, EMPTY_CONTENT, &|text: &str| {
                Self::fill_content(text, &globs)
            })
            .await?;

        let stylesheet = root.join(STYLESHEET);
        if let Some(styles_dir) = stylesheet.parent() {
            create_dir(styles_dir.to_path_buf()).await?;
        }
        tools.templates.write_text(&stylesheet, BASE_STYLES).await?;

        let html = Self::html_shell(project.config().project_name(), OUTPUT_DIR);
        tools
            .templates
            .write_text(&root.join("index.html"), &html)
            .await?;

        tools
            .manifest
            .merge_scripts(root, Self::scripts(project.single_dev_script()))
            .await?;

        tools.install_dev(project, &[PRETTIER_PLUGIN]).await?;
        Ok(())
    }
}
