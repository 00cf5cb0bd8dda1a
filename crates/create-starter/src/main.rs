//! create-starter - Scaffolding for JavaScript and TypeScript starter projects

use anyhow::Result;
use clap::Parser;
use starter_core::tui::CreateArgs;
use starter_core::{Configuration, Language, ProductConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// create-starter product configuration
#[derive(Clone)]
pub struct StarterConfig;

impl ProductConfig for StarterConfig {
    fn name(&self) -> &'static str {
        "create-starter"
    }

    fn display_name(&self) -> &'static str {
        "Create Starter"
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_STARTER_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://nodejs.org/en/download"
    }

    fn next_steps(&self, dir: &Path, config: &Configuration) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", config.project_name()));
        }

        // Step 2: Start the watchers
        if config.language() == Language::TypeScript || config.use_tailwind() {
            let dev = if config.single_dev_script() && config.language() == Language::JavaScript {
                "npm run css"
            } else {
                "npm run dev"
            };
            steps.push(dev.to_string());
        }

        // Step 3: Lint and format
        steps.push("npm run lint && npm run format".to_string());

        // Step 4: Push the working branch somewhere
        if config.use_git() {
            steps.push("git remote add origin <url> && git push -u origin dev".to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-starter")]
#[command(about = "CLI for scaffolding JavaScript and TypeScript starter projects")]
#[command(version)]
pub struct Args {
    /// Project name; a directory with this name is created in the current directory
    #[arg(short, long)]
    pub name: Option<String>,

    /// Language (js, ts, javascript, typescript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Add Tailwind CSS
    #[arg(long, conflicts_with = "no_tailwind")]
    pub tailwind: bool,

    /// Do not add Tailwind CSS
    #[arg(long = "no-tailwind")]
    pub no_tailwind: bool,

    /// Initialize a Git repository
    #[arg(long, conflicts_with = "no_git")]
    pub git: bool,

    /// Do not initialize a Git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// YAML file with answers (project_name, language, use_tailwind, use_git)
    #[arg(long = "answers")]
    pub answers: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones (for development use).
    /// Falls back to CREATE_STARTER_TEMPLATE_DIR.
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the node/npm/git availability check
    #[arg(long = "skip-tool-check")]
    pub skip_tool_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

/// Collapse a `--flag` / `--no-flag` pair into an optional answer
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.name,
            language: args.language,
            tailwind: toggle(args.tailwind, args.no_tailwind),
            git: toggle(args.git, args.no_git),
            answers_file: args.answers,
            template_dir: args.template_dir,
            skip_tool_check: args.skip_tool_check,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics stay quiet unless RUST_LOG asks for them
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = StarterConfig;

    let result = starter_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use starter_core::Answers;

    fn configuration(language: Language, use_tailwind: bool, use_git: bool) -> Configuration {
        Configuration::resolve(Answers {
            project_name: "demo".to_string(),
            language,
            use_tailwind,
            use_git,
        })
        .unwrap()
    }

    #[test]
    fn test_toggle_pairs() {
        assert_eq!(toggle(true, false), Some(true));
        assert_eq!(toggle(false, true), Some(false));
        assert_eq!(toggle(false, false), None);
    }

    #[test]
    fn test_flags_map_to_create_args() {
        let args = Args::parse_from([
            "create-starter",
            "--name",
            "demo",
            "--language",
            "ts",
            "--tailwind",
            "--no-git",
            "--yes",
        ]);
        let create: CreateArgs = args.into();
        assert_eq!(create.name.as_deref(), Some("demo"));
        assert_eq!(create.language.as_deref(), Some("ts"));
        assert_eq!(create.tailwind, Some(true));
        assert_eq!(create.git, Some(false));
        assert!(create.yes);
    }

    #[test]
    fn test_no_flags_leaves_answers_open() {
        let create: CreateArgs = Args::parse_from(["create-starter"]).into();
        assert!(create.name.is_none());
        assert!(create.tailwind.is_none());
        assert!(create.git.is_none());
        assert!(!create.yes);
    }

    #[test]
    fn test_template_dir_env_is_left_to_the_library() {
        std::env::set_var(StarterConfig.template_dir_env(), "/tmp/starter-templates");
        let create: CreateArgs = Args::parse_from(["create-starter"]).into();
        std::env::remove_var(StarterConfig.template_dir_env());
        assert!(create.template_dir.is_none());

        let create: CreateArgs =
            Args::parse_from(["create-starter", "--template-dir", "/tmp/local"]).into();
        assert_eq!(create.template_dir, Some(PathBuf::from("/tmp/local")));
    }

    #[test]
    fn test_next_steps_follow_configuration() {
        let dir = Path::new("/nonexistent/demo");

        let steps = StarterConfig.next_steps(dir, &configuration(Language::JavaScript, false, false));
        assert_eq!(steps, vec!["cd demo", "npm run lint && npm run format"]);

        let steps = StarterConfig.next_steps(dir, &configuration(Language::JavaScript, true, false));
        assert!(steps.contains(&"npm run css".to_string()));

        let steps = StarterConfig.next_steps(dir, &configuration(Language::TypeScript, true, true));
        assert!(steps.contains(&"npm run dev".to_string()));
        assert!(steps.last().unwrap().contains("git push -u origin dev"));
    }
}
