// crates/spark-core/src/repository.rs - Idea Repository Service
//
// Owns the on-disk side of spark: the idea directory, its git working copy,
// and the markdown idea file inside it. It knows HOW to get the storage ready
// and how to append an entry; deciding WHEN is left to the command handlers.
//
// SELF-HEALING SETUP:
// `ensure_ready` runs on every invocation and is guarded purely by existence
// checks. A deleted directory, a missing .git or a removed idea file is
// recreated on the next run; when everything exists it changes nothing.
//
// APPEND-ONLY FILE:
// The idea file is only ever opened in append mode. Existing bytes are never
// rewritten, and a failed write is reported, not rolled back.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::IdeaSettings;
use crate::git::GitRepository;
use crate::idea::{IDEA_FILE_HEADER, Idea};
use crate::process::{CommandError, CommandRunner};

/// Errors from preparing or writing the idea repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to {action} {path}: {source}")]
    FileSystem {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to initialize git repository: {0}")]
    Git(#[from] CommandError),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// What `ensure_ready` had to create on this run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub created_directory: bool,
    pub initialized_git: bool,
    pub created_idea_file: bool,
    /// Output of `git init`, when it ran
    pub git_output: Option<String>,
}

/// The idea directory and the idea file it contains
#[derive(Debug, Clone)]
pub struct IdeaRepository {
    directory: PathBuf,
    idea_file: PathBuf,
}

impl IdeaRepository {
    pub fn new(settings: &IdeaSettings) -> Self {
        Self {
            directory: settings.idea_directory.clone(),
            idea_file: settings.idea_file_path(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn idea_file(&self) -> &Path {
        &self.idea_file
    }

    /// Make sure directory, git working copy and idea file all exist
    ///
    /// STEPS (each skipped when already satisfied):
    /// 1. Create the directory and any missing parents
    /// 2. `git init` if there is no `.git` inside it
    /// 3. Create the idea file with the `# Ideas` header
    pub fn ensure_ready(&self, runner: &impl CommandRunner) -> RepositoryResult<SetupReport> {
        let mut report = SetupReport::default();

        if !self.directory.exists() {
            fs::create_dir_all(&self.directory)
                .map_err(|source| fs_error("create directory", &self.directory, source))?;
            info!(directory = %self.directory.display(), "created idea directory");
            report.created_directory = true;
        }

        let git = GitRepository::new(&self.directory, runner);
        if !git.is_initialized() {
            report.git_output = Some(git.init()?);
            info!(directory = %self.directory.display(), "initialized git repository");
            report.initialized_git = true;
        }

        if !self.idea_file.exists() {
            self.write_new_idea_file()?;
            info!(file = %self.idea_file.display(), "created idea file");
            report.created_idea_file = true;
        }

        Ok(report)
    }

    /// Append one idea as a markdown block at the end of the idea file
    ///
    /// The file is created if it is missing, although `ensure_ready` normally
    /// guarantees it exists. The handle is closed when this returns, on the
    /// error path too.
    pub fn append(&self, idea: &Idea) -> RepositoryResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.idea_file)
            .map_err(|source| fs_error("open", &self.idea_file, source))?;

        file.write_all(idea.to_markdown().as_bytes())
            .map_err(|source| fs_error("append to", &self.idea_file, source))?;

        debug!(file = %self.idea_file.display(), title = %idea.title, "appended idea");
        Ok(())
    }

    /// Open the idea file for reading, e.g. to hand it to a pager
    pub fn open_for_reading(&self) -> RepositoryResult<fs::File> {
        fs::File::open(&self.idea_file).map_err(|source| fs_error("open", &self.idea_file, source))
    }

    fn write_new_idea_file(&self) -> RepositoryResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.idea_file)
            .map_err(|source| fs_error("create", &self.idea_file, source))?;

        file.write_all(IDEA_FILE_HEADER.as_bytes())
            .map_err(|source| fs_error("write header to", &self.idea_file, source))
    }
}

fn fs_error(action: &'static str, path: &Path, source: io::Error) -> RepositoryError {
    RepositoryError::FileSystem {
        action,
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{FakeRunner, failure};
    use tempfile::TempDir;

    fn settings(dir: &Path) -> IdeaSettings {
        IdeaSettings {
            idea_directory: dir.join("nested").join("ideas"),
            idea_file: "README.md".to_string(),
        }
    }

    fn snapshot(repo: &IdeaRepository) -> (bool, String) {
        (
            repo.directory().join(".git").is_dir(),
            fs::read_to_string(repo.idea_file()).unwrap(),
        )
    }

    #[test]
    fn test_fresh_setup_creates_everything() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));
        let runner = FakeRunner::default();

        let report = repo.ensure_ready(&runner).unwrap();

        assert!(report.created_directory);
        assert!(report.initialized_git);
        assert!(report.created_idea_file);
        assert_eq!(runner.calls(), vec!["init"]);
        assert_eq!(fs::read_to_string(repo.idea_file()).unwrap(), "# Ideas\n\n");
    }

    #[test]
    fn test_second_run_is_noop() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));
        let runner = FakeRunner::default();

        repo.ensure_ready(&runner).unwrap();
        let after_first = snapshot(&repo);

        let report = repo.ensure_ready(&runner).unwrap();

        assert_eq!(report, SetupReport::default());
        assert_eq!(snapshot(&repo), after_first);
        assert_eq!(runner.calls(), vec!["init"]);
    }

    #[test]
    fn test_deleted_idea_file_is_recreated() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));
        let runner = FakeRunner::default();

        repo.ensure_ready(&runner).unwrap();
        fs::remove_file(repo.idea_file()).unwrap();

        let report = repo.ensure_ready(&runner).unwrap();

        assert!(!report.created_directory);
        assert!(!report.initialized_git);
        assert!(report.created_idea_file);
        assert_eq!(fs::read_to_string(repo.idea_file()).unwrap(), "# Ideas\n\n");
    }

    #[test]
    fn test_existing_idea_file_keeps_its_content() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        fs::create_dir_all(&settings.idea_directory).unwrap();
        fs::write(settings.idea_file_path(), "# My own header\n").unwrap();

        let repo = IdeaRepository::new(&settings);
        repo.ensure_ready(&FakeRunner::default()).unwrap();

        assert_eq!(
            fs::read_to_string(repo.idea_file()).unwrap(),
            "# My own header\n"
        );
    }

    #[test]
    fn test_git_init_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));
        let runner = FakeRunner::default();
        runner.fail_next("init", failure("init", 1, "permission denied"));

        let err = repo.ensure_ready(&runner).unwrap_err();

        assert!(matches!(err, RepositoryError::Git(_)));
        assert!(!repo.idea_file().exists());
    }

    #[test]
    fn test_append_is_pure_append() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));
        repo.ensure_ready(&FakeRunner::default()).unwrap();
        repo.append(&Idea::new("First", "one")).unwrap();
        let before = fs::read_to_string(repo.idea_file()).unwrap();

        repo.append(&Idea::new("Second", "two\nlines")).unwrap();

        let after = fs::read_to_string(repo.idea_file()).unwrap();
        assert!(after.starts_with(&before));
        assert_eq!(&after[before.len()..], "## Second\n\ntwo\nlines\n\n");
        assert_eq!(
            after,
            "# Ideas\n\n## First\n\none\n\n## Second\n\ntwo\nlines\n\n"
        );
    }

    #[test]
    fn test_append_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let settings = IdeaSettings {
            idea_directory: temp.path().to_path_buf(),
            idea_file: "ideas.md".to_string(),
        };
        let repo = IdeaRepository::new(&settings);

        repo.append(&Idea::new("Lone", "idea")).unwrap();

        assert_eq!(
            fs::read_to_string(repo.idea_file()).unwrap(),
            "## Lone\n\nidea\n\n"
        );
    }

    #[test]
    fn test_append_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let repo = IdeaRepository::new(&settings(temp.path()));

        let err = repo.append(&Idea::new("x", "y")).unwrap_err();
        assert!(matches!(err, RepositoryError::FileSystem { action: "open", .. }));
    }
}
