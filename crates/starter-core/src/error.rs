//! Error types for project assembly

use std::path::PathBuf;
use thiserror::Error;

use crate::steps::Precondition;
use crate::templates::TemplateKey;

/// Rejected answers, raised before anything touches the filesystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name must not be empty")]
    EmptyName,

    #[error("project name must not start or end with whitespace")]
    SurroundingWhitespace,

    #[error("project name '{0}' is reserved")]
    ReservedName(String),

    #[error("project name must not end with '.'")]
    TrailingDot,

    #[error("project name contains illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("unknown language '{0}' (expected javascript or typescript)")]
    UnknownLanguage(String),
}

/// Failure of an external command
#[derive(Error, Debug)]
pub enum ProcessFailure {
    #[error("cannot parse command `{command_line}`: {reason}")]
    InvalidCommand {
        command_line: String,
        reason: String,
    },

    #[error("failed to launch `{command_line}`: {source}")]
    Launch {
        command_line: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command_line}` exited with {}", exit_label(.code))]
    Exit {
        command_line: String,
        code: Option<i32>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl ProcessFailure {
    /// The command line that failed
    pub fn command_line(&self) -> &str {
        match self {
            ProcessFailure::InvalidCommand { command_line, .. }
            | ProcessFailure::Launch { command_line, .. }
            | ProcessFailure::Exit { command_line, .. } => command_line,
        }
    }
}

/// Errors from reading or writing `package.json`
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to access manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest {} is malformed: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

/// Errors from reading or writing templates
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template '{key}' from {}: {source}", .path.display())]
    Read {
        key: TemplateKey,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{0}' is not valid UTF-8")]
    NotUtf8(TemplateKey),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain `{anchor}`", .path.display())]
    AnchorNotFound { path: PathBuf, anchor: String },
}

/// Anything a single step can fail with
#[derive(Error, Debug)]
pub enum StepError {
    #[error(transparent)]
    Process(#[from] ProcessFailure),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("precondition not met: {0}")]
    PreconditionFailed(Precondition),
}

/// A failed assembly: the step that broke and why
#[derive(Error, Debug)]
#[error("step '{step}' failed: {cause}")]
pub struct AssemblyError {
    pub step: String,
    #[source]
    pub cause: StepError,
}

impl AssemblyError {
    pub fn new(step: impl Into<String>, cause: impl Into<StepError>) -> Self {
        Self {
            step: step.into(),
            cause: cause.into(),
        }
    }
}

pub type StepResult<T> = Result<T, StepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_failure_names_command() {
        let failure = ProcessFailure::Exit {
            command_line: "npm init -y".to_string(),
            code: Some(1),
        };
        assert_eq!(failure.command_line(), "npm init -y");
        assert_eq!(failure.to_string(), "`npm init -y` exited with status 1");
    }

    #[test]
    fn test_assembly_error_carries_step_name() {
        let err = AssemblyError::new(
            "setup-git",
            ProcessFailure::Exit {
                command_line: "git init".to_string(),
                code: None,
            },
        );
        let message = err.to_string();
        assert!(message.starts_with("step 'setup-git' failed"));
        assert!(message.contains("git init"));
        assert!(message.contains("a signal"));
    }
}
