// crates/spark-core/src/process.rs - External Process Runner
//
// Every interaction with git goes through this module. The runner is a trait so
// the workflows above it (repository setup, publishing) can be exercised in tests
// with a scripted fake instead of a real git binary.
//
// CONTRACT:
// - Runs synchronously with the given working directory and extra environment
// - Returns captured stdout on success
// - Any launch failure or non-zero exit becomes a CommandError carrying the
//   exit code and captured stderr
// - Never retries; retry policy belongs to the caller

use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Errors produced when an external command cannot be run or fails
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        /// Exit code, absent when the process was killed by a signal
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandError {
    /// Exit code of the failed command, if it ran and exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Launch { .. } => None,
            Self::Failed { code, .. } => *code,
        }
    }

    /// Captured standard error of the failed command (empty for launch failures)
    pub fn stderr(&self) -> &str {
        match self {
            Self::Launch { .. } => "",
            Self::Failed { stderr, .. } => stderr,
        }
    }
}

/// Result type for process operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Runs external executables
///
/// Implementations must block until the command finishes. The working
/// directory is always explicit; nothing depends on the process cwd.
/// `env` entries are set on top of the inherited environment, later entries
/// winning over earlier ones.
pub trait CommandRunner {
    fn run(
        &self,
        directory: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> CommandResult<Vec<u8>>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        directory: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> CommandResult<Vec<u8>> {
        let command = render_command(program, args);
        debug!(%command, directory = %directory.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .envs(env.iter().copied())
            .current_dir(directory)
            .output()
            .map_err(|source| CommandError::Launch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command,
                status: output.status.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Human-readable form of a command line, used in logs and error messages
fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
