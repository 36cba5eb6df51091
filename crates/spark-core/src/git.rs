// crates/spark-core/src/git.rs - Git Working Copy Operations
//
// Thin, typed wrapper over the handful of git subcommands spark needs. It does
// not implement version control; it only names the invocations and knows how
// to recognise git's "there is nowhere to push to" failure.

use std::path::Path;

use crate::process::{CommandError, CommandResult, CommandRunner};

/// Executable invoked for every git operation
pub const GIT_PROGRAM: &str = "git";

/// Metadata directory marking a working copy
pub const GIT_DIR: &str = ".git";

/// Remote registered when the first push finds none
pub const DEFAULT_REMOTE: &str = "origin";

/// Branch pushed with upstream tracking after registering the remote
pub const DEFAULT_BRANCH: &str = "master";

/// Environment for every git call
///
/// Git translates its messages; `is_missing_remote` reads stderr, so git must
/// speak untranslated English whatever the user's locale is. LANGUAGE would
/// otherwise take precedence over LC_ALL for message catalogs.
pub const GIT_ENV: &[(&str, &str)] = &[("LC_ALL", "C"), ("LANGUAGE", "")];

/// Exit status git uses for fatal errors, including a missing push destination
const GIT_FATAL_EXIT: i32 = 128;

/// Stderr fragments git prints when no usable remote/upstream is configured
const MISSING_REMOTE_MARKERS: &[&str] = &[
    "No configured push destination",
    "has no upstream branch",
    "does not appear to be a git repository",
];

/// A git working copy at a fixed directory
pub struct GitRepository<'a, R: CommandRunner> {
    directory: &'a Path,
    runner: &'a R,
}

impl<'a, R: CommandRunner> GitRepository<'a, R> {
    pub fn new(directory: &'a Path, runner: &'a R) -> Self {
        Self { directory, runner }
    }

    pub fn directory(&self) -> &Path {
        self.directory
    }

    /// Whether the directory already carries git metadata
    pub fn is_initialized(&self) -> bool {
        self.directory.join(GIT_DIR).exists()
    }

    /// `git init`
    pub fn init(&self) -> CommandResult<String> {
        self.git(&["init"])
    }

    /// `git add .`
    pub fn add_all(&self) -> CommandResult<String> {
        self.git(&["add", "."])
    }

    /// `git commit -m <message>`
    pub fn commit(&self, message: &str) -> CommandResult<String> {
        self.git(&["commit", "-m", message])
    }

    /// `git push`
    pub fn push(&self) -> CommandResult<String> {
        self.git(&["push"])
    }

    /// `git remote add <name> <url>`
    pub fn add_remote(&self, name: &str, url: &str) -> CommandResult<String> {
        self.git(&["remote", "add", name, url])
    }

    /// `git push -u <remote> <branch>`
    pub fn push_upstream(&self, remote: &str, branch: &str) -> CommandResult<String> {
        self.git(&["push", "-u", remote, branch])
    }

    fn git(&self, args: &[&str]) -> CommandResult<String> {
        let out = self.runner.run(self.directory, GIT_PROGRAM, args, GIT_ENV)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Whether a failed push means "no remote configured"
///
/// Git reports this with its generic fatal status (128), which it also uses
/// for network and authentication failures, so the stderr text decides. The
/// markers are untranslated git messages; `GitRepository` runs git with
/// `GIT_ENV` so they match under any user locale.
pub fn is_missing_remote(error: &CommandError) -> bool {
    error.exit_code() == Some(GIT_FATAL_EXIT)
        && MISSING_REMOTE_MARKERS
            .iter()
            .any(|marker| error.stderr().contains(marker))
}
