//! Starter Core - assembles new JavaScript and TypeScript projects
//!
//! Given four answers (name, language, Tailwind, Git) the library creates a
//! project directory and runs an ordered list of setup steps inside it:
//! `npm init`, lint and format tooling, optional TypeScript and Tailwind CSS,
//! and finally an optional Git repository on a `dev` branch.
//!
//! # Architecture
//!
//! - **Leaf services**: [`runtime`] runs external commands, [`manifest`]
//!   edits `package.json`, [`templates`] writes static templates
//! - **Steps**: [`steps`] holds one type per unit of setup work
//! - **Orchestration**: [`pipeline`] plans and runs the steps for a
//!   validated [`Configuration`]
//! - **CLI/TUI Interface**: optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use std::sync::Arc;
//! use starter_core::{Answers, Configuration, Language, Pipeline, ProcessRunner, TemplateSource};
//!
//! let config = Configuration::resolve(Answers {
//!     project_name: "demo".to_string(),
//!     language: Language::TypeScript,
//!     use_tailwind: true,
//!     use_git: true,
//! })?;
//!
//! let pipeline = Pipeline::new(Arc::new(ProcessRunner::new()), TemplateSource::Bundled);
//! let report = pipeline.assemble(&config, &std::env::current_dir()?).await?;
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod product;
pub mod runtime;
pub mod steps;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Addon, Answers, Configuration, Language, ProjectContext};
pub use error::{AssemblyError, ManifestError, ProcessFailure, StepError, ValidationError};
pub use manifest::ManifestStore;
pub use pipeline::{AssemblyReport, AssemblyState, Pipeline};
pub use product::ProductConfig;
pub use runtime::{CommandRunner, ProcessRunner};
pub use templates::{TemplateInstaller, TemplateKey, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
