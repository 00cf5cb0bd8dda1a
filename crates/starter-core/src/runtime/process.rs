//! External command execution
//!
//! Every step shells out through a [`CommandRunner`]. The production
//! [`ProcessRunner`] inherits the terminal so the user sees package-manager
//! and git output live.

use crate::error::ProcessFailure;
use async_trait::async_trait;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Runs one command line in a working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command_line: &str, cwd: &Path) -> Result<(), ProcessFailure>;
}

/// Split a command line into program and arguments.
///
/// Whitespace separates tokens; double-quoted substrings stay together.
/// Apostrophes, backslashes and `#` are ordinary characters.
pub fn tokenize(command_line: &str) -> Result<Vec<String>, ProcessFailure> {
    let tokens = shell_words::split(&escape_literals(command_line)).map_err(|e| {
        ProcessFailure::InvalidCommand {
            command_line: command_line.to_string(),
            reason: e.to_string(),
        }
    })?;

    if tokens.is_empty() {
        return Err(ProcessFailure::InvalidCommand {
            command_line: command_line.to_string(),
            reason: "empty command".to_string(),
        });
    }

    Ok(tokens)
}

/// Escape everything `shell_words` would interpret except double quotes
fn escape_literals(command_line: &str) -> String {
    let mut escaped = String::with_capacity(command_line.len());
    let mut in_quotes = false;

    for c in command_line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '\\' => escaped.push('\\'),
            '\'' | '#' if !in_quotes => escaped.push('\\'),
            _ => {}
        }
        escaped.push(c);
    }

    escaped
}

/// Spawns real child processes with inherited stdio
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    echo: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print each command before running it
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command_line: &str, cwd: &Path) -> Result<(), ProcessFailure> {
        let tokens = tokenize(command_line)?;
        let (program, args) = tokens.split_first().ok_or_else(|| ProcessFailure::InvalidCommand {
            command_line: command_line.to_string(),
            reason: "empty command".to_string(),
        })?;

        if self.echo {
            println!();
            println!("{} {}", "Running:".dimmed(), command_line.yellow());
            println!();
        }
        debug!(command = command_line, cwd = %cwd.display(), "spawning");

        let status = TokioCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| ProcessFailure::Launch {
                command_line: command_line.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessFailure::Exit {
                command_line: command_line.to_string(),
                code: status.code(),
            })
        }
    }
}
