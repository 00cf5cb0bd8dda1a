//! Charm-style CLI prompts using cliclack

use crate::config::{validate_project_name, Answers, Configuration, Language};
use crate::pipeline::{AssemblyState, Pipeline};
use crate::product::ProductConfig;
use crate::runtime::{check, ProcessRunner};
use crate::templates::TemplateSource;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (directory created under the current directory)
    pub name: Option<String>,

    /// Project language (javascript/js or typescript/ts)
    pub language: Option<String>,

    /// Add Tailwind CSS
    pub tailwind: Option<bool>,

    /// Initialize a Git repository
    pub git: Option<bool>,

    /// YAML file with pre-filled answers
    pub answers_file: Option<PathBuf>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Skip the node/npm/git availability check
    pub skip_tool_check: bool,

    /// Accept defaults for anything not answered by flags (non-interactive mode)
    pub yes: bool,
}

/// Answers known before prompting
#[derive(Debug, Default)]
struct Prefilled {
    name: Option<String>,
    language: Option<Language>,
    tailwind: Option<bool>,
    git: Option<bool>,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;
    debug!(product = config.name(), ?args, "starting");

    // Step 1: Gather answers from file, flags, then prompts
    let prefilled = prefill(&args)?;
    let answers = collect_answers(prefilled, args.yes)?;
    let configuration = Configuration::resolve(answers)?;

    // Step 2: Confirm the target directory
    let base_dir = std::env::current_dir()?;
    check_target(&base_dir.join(configuration.project_name()), args.yes)?;

    // Step 3: Check external tools
    if args.skip_tool_check {
        cliclack::log::info("Skipping tool check")?;
    } else {
        check_tools(config, &configuration, args.yes)?;
    }

    // Step 4: Assemble
    let source = TemplateSource::resolve(args.template_dir.clone(), config.template_dir_env());
    if let TemplateSource::Local(path) = &source {
        cliclack::log::info(format!("Using local templates from {}", path.display()))?;
    }
    let project_dir = assemble(source, &configuration, &base_dir).await?;

    // Step 5: Show next steps
    print_next_steps(config, &project_dir, &configuration)?;

    Ok(())
}

fn prefill(args: &CreateArgs) -> Result<Prefilled> {
    let mut prefilled = match &args.answers_file {
        Some(path) => {
            let answers = Answers::from_yaml_file(path)?;
            cliclack::log::info(format!("Using answers from {}", path.display()))?;
            Prefilled {
                name: Some(answers.project_name),
                language: Some(answers.language),
                tailwind: Some(answers.use_tailwind),
                git: Some(answers.use_git),
            }
        }
        None => Prefilled::default(),
    };

    if let Some(name) = &args.name {
        prefilled.name = Some(name.clone());
    }
    if let Some(language) = &args.language {
        prefilled.language = Some(language.parse::<Language>()?);
    }
    if args.tailwind.is_some() {
        prefilled.tailwind = args.tailwind;
    }
    if args.git.is_some() {
        prefilled.git = args.git;
    }

    Ok(prefilled)
}

fn collect_answers(prefilled: Prefilled, yes: bool) -> Result<Answers> {
    let project_name = match prefilled.name {
        Some(name) => {
            validate_project_name(&name)?;
            cliclack::log::info(format!("Project name: {}", name))?;
            name
        }
        None if yes => anyhow::bail!("A project name is required in non-interactive mode (--name)."),
        None => cliclack::input("Project name")
            .placeholder("my-app")
            .validate(|input: &String| validate_project_name(input))
            .interact()?,
    };

    let language = match prefilled.language {
        Some(language) => language,
        None if yes => Language::default(),
        None => cliclack::select("Which language?")
            .item(Language::JavaScript, Language::JavaScript.display_name(), "")
            .item(Language::TypeScript, Language::TypeScript.display_name(), "")
            .initial_value(Language::default())
            .interact()?,
    };

    let use_tailwind = match prefilled.tailwind {
        Some(value) => value,
        None if yes => false,
        None => cliclack::confirm("Add Tailwind CSS?")
            .initial_value(false)
            .interact()?,
    };

    let use_git = match prefilled.git {
        Some(value) => value,
        None if yes => true,
        None => cliclack::confirm("Initialize a Git repository?")
            .initial_value(true)
            .interact()?,
    };

    let mut summary = vec![language.display_name()];
    if use_tailwind {
        summary.push("Tailwind CSS");
    }
    if use_git {
        summary.push("Git");
    }
    cliclack::log::success(format!("Project setup: {}", summary.join(", ")))?;

    Ok(Answers {
        project_name,
        language,
        use_tailwind,
        use_git,
    })
}

fn check_target(path: &Path, yes: bool) -> Result<()> {
    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "{} already has {} existing items",
                    path.display(),
                    count
                ))?;

                // Auto-confirm with --yes flag
                let confirm = if yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(false)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    } else if path.exists() {
        anyhow::bail!("{} exists and is not a directory", path.display());
    }

    Ok(())
}

fn check_tools<C: ProductConfig>(config: &C, configuration: &Configuration, yes: bool) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check::check_tools(configuration) {
        Ok(tools) => {
            let tool_info: Vec<String> = tools
                .iter()
                .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected tools: {}", tool_info.join(", ")));

            if let Some(node) = tools.iter().find(|t| t.name == "Node.js") {
                if let Some(warning) = node
                    .version
                    .as_deref()
                    .and_then(check::node_version_warning)
                {
                    cliclack::log::warning(warning)?;
                }
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;

            if !yes {
                let open_docs: bool = cliclack::confirm(format!(
                    "Open installation docs ({})?",
                    config.docs_url()
                ))
                .initial_value(false)
                .interact()?;

                if open_docs {
                    open::that(config.docs_url())?;
                }
            }

            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

async fn assemble(source: TemplateSource, configuration: &Configuration, base_dir: &Path) -> Result<PathBuf> {
    let runner = Arc::new(ProcessRunner::new().with_echo(true));
    let pipeline = Pipeline::new(runner, source).with_observer(|state| {
        if let AssemblyState::StepsRunning { index, total, step } = state {
            let _ = cliclack::log::step(format!("[{}/{}] {}", index + 1, total, step));
        }
    });

    match pipeline.assemble(configuration, base_dir).await {
        Ok(report) => {
            cliclack::log::success(format!(
                "Created {} ({} steps)",
                report.root_path.display(),
                report.steps.len()
            ))?;
            Ok(report.root_path)
        }
        Err(e) => {
            cliclack::log::error(format!("{}", e))?;
            cliclack::log::remark(format!(
                "The partially created project was left at {} for inspection. Remove it before retrying.",
                base_dir.join(configuration.project_name()).display()
            ))?;
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    configuration: &Configuration,
) -> Result<()> {
    let steps = config.next_steps(project_dir, configuration);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
