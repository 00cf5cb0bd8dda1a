//! Project configuration: raw answers, validated configuration, and the
//! per-assembly project context

mod context;
mod project;

pub use context::ProjectContext;
pub use project::{validate_project_name, Addon, Answers, Configuration, Language};
