// crates/spark-core/src/publish.rs - Commit and Push Workflow
//
// STATE MACHINE:
//
//   Staged ──▶ Committed ──▶ Pushed ──────────────────────────▶ done
//                              │
//                              │ missing remote (exit 128 + known stderr)
//                              ▼
//                         RemoteSetup: ask URL, `remote add origin` (best effort)
//                              │
//                              ▼
//                         `push -u origin master` ──▶ done
//
// Any failure not drawn above is fatal. The remote repair happens at most once
// per run; a failed retry is returned as an error, never retried again.
//
// Git's stdout is handed to the caller's sink as soon as each step succeeds,
// so the output of the steps before a failure is never lost.

use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::git::{DEFAULT_BRANCH, DEFAULT_REMOTE, GitRepository, is_missing_remote};
use crate::process::{CommandError, CommandRunner};
use crate::prompt::{Prompt, PromptError};

/// Steps of the publish workflow, used to say where a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Staged,
    Committed,
    Pushed,
    RemoteSetup,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Staged => "staging",
            Self::Committed => "commit",
            Self::Pushed => "push",
            Self::RemoteSetup => "push to new remote",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Git {stage} failed: {source}")]
    Git {
        stage: PublishStage,
        #[source]
        source: CommandError,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl PublishError {
    /// Stage during which the workflow stopped
    pub fn stage(&self) -> PublishStage {
        match self {
            Self::Git { stage, .. } => *stage,
            // the only question asked while publishing is the remote URL
            Self::Prompt(_) => PublishStage::RemoteSetup,
        }
    }
}

/// Result type for publish operations
pub type PublishResult<T> = Result<T, PublishError>;

/// What happened while publishing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// Remote URL registered during RemoteSetup, if that state was entered
    pub remote_added: Option<String>,
}

/// Stage all changes, commit with `message` and push
///
/// When the first push fails because no remote exists, the user is asked for
/// a URL, `origin` is registered, and a single `push -u origin master` is
/// attempted. `on_output` receives the stdout of every successful git step,
/// in order, before the next step starts.
pub fn publish<R: CommandRunner>(
    git: &GitRepository<'_, R>,
    prompt: &mut impl Prompt,
    message: &str,
    on_output: &mut impl FnMut(&str),
) -> PublishResult<PublishReport> {
    let mut report = PublishReport::default();

    on_output(&step(PublishStage::Staged, git.add_all())?);
    on_output(&step(PublishStage::Committed, git.commit(message))?);

    match git.push() {
        Ok(out) => {
            on_output(&out);
            debug!(directory = %git.directory().display(), "pushed");
            return Ok(report);
        }
        Err(e) if is_missing_remote(&e) => {
            info!(error = %e, "no remote configured, asking for one");
        }
        Err(source) => {
            return Err(PublishError::Git {
                stage: PublishStage::Pushed,
                source,
            });
        }
    }

    let url = prompt.ask("Remote repo: ")?;
    // best effort: a stale `origin` or a bad URL surfaces in the push below
    match git.add_remote(DEFAULT_REMOTE, &url) {
        Ok(out) => on_output(&out),
        Err(e) => warn!(error = %e, "could not add remote, pushing anyway"),
    }
    report.remote_added = Some(url);

    on_output(&step(
        PublishStage::RemoteSetup,
        git.push_upstream(DEFAULT_REMOTE, DEFAULT_BRANCH),
    )?);

    Ok(report)
}

fn step(stage: PublishStage, result: Result<String, CommandError>) -> PublishResult<String> {
    result.map_err(|source| PublishError::Git { stage, source })
}
