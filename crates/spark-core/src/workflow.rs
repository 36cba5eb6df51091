// crates/spark-core/src/workflow.rs - Add-an-Idea Workflow
//
// The default `spark` run once settings are known:
//
//   ensure_ready ──▶ ask title/description ──▶ append ──▶ publish
//
// Progress is reported through a caller-supplied sink while the run is still
// going, so git output and notices reach the terminal in the order they
// happen, including the steps before a failure.
//
// A publish failure leaves the appended idea in place. It is already on disk,
// and the next successful run commits it together with the new one.

use std::path::Path;
use tracing::info;

use crate::config::IdeaSettings;
use crate::git::GitRepository;
use crate::idea::Idea;
use crate::process::CommandRunner;
use crate::prompt::Prompt;
use crate::publish::{PublishReport, publish};
use crate::repository::{IdeaRepository, SetupReport};
use crate::{Result, SparkError};

/// Something worth telling the user while an idea is being added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// Stdout of a git command that just succeeded
    GitOutput(&'a str),
    /// The idea file did not exist and was created with its header
    IdeaFileCreated(&'a Path),
}

/// Everything an `add_idea` run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub setup: SetupReport,
    pub idea: Idea,
    pub published: PublishReport,
}

/// Prepare the idea repository, capture one idea, append it and publish it
pub fn add_idea<R: CommandRunner>(
    settings: &IdeaSettings,
    runner: &R,
    prompt: &mut impl Prompt,
    on_progress: &mut impl FnMut(Progress<'_>),
) -> Result<AddOutcome> {
    let repo = IdeaRepository::new(settings);

    let setup = repo.ensure_ready(runner)?;
    if let Some(output) = &setup.git_output {
        on_progress(Progress::GitOutput(output));
    }
    if setup.created_idea_file {
        on_progress(Progress::IdeaFileCreated(repo.idea_file()));
    }

    let idea = Idea::from_prompt(prompt)?;
    repo.append(&idea)?;
    info!(file = %repo.idea_file().display(), title = %idea.title, "idea saved");

    let git = GitRepository::new(repo.directory(), runner);
    let published = publish(&git, prompt, &idea.title, &mut |out: &str| {
        on_progress(Progress::GitOutput(out))
    })
    .map_err(|source| SparkError::Unpublished {
        idea_file: repo.idea_file().to_path_buf(),
        source,
    })?;

    Ok(AddOutcome {
        setup,
        idea,
        published,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{FakeRunner, failure, network_down, no_remote};
    use crate::prompt::testing::ScriptedPrompt;
    use crate::publish::PublishStage;
    use std::fs;
    use tempfile::TempDir;

    fn settings(dir: &Path) -> IdeaSettings {
        IdeaSettings {
            idea_directory: dir.join("ideas"),
            idea_file: "README.md".to_string(),
        }
    }

    /// Progress rendered as plain lines, for order checks
    fn collect(
        settings: &IdeaSettings,
        runner: &FakeRunner,
        prompt: &mut ScriptedPrompt,
    ) -> (Result<AddOutcome>, Vec<String>) {
        let mut events = Vec::new();
        let result = add_idea(settings, runner, prompt, &mut |progress| {
            events.push(match progress {
                Progress::GitOutput(out) => out.trim_end().to_string(),
                Progress::IdeaFileCreated(path) => format!("created {}", path.display()),
            })
        });
        (result, events)
    }

    #[test]
    fn test_fresh_directory_end_to_end() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let runner = FakeRunner::default();
        let mut prompt = ScriptedPrompt::new(&["Kite", "Wind power"]);

        let (result, events) = collect(&settings, &runner, &mut prompt);
        let outcome = result.unwrap();

        assert!(outcome.setup.initialized_git);
        assert_eq!(outcome.idea, Idea::new("Kite", "Wind power"));
        assert_eq!(outcome.published.remote_added, None);
        assert_eq!(
            events,
            vec![
                "ok: init".to_string(),
                format!("created {}", settings.idea_file_path().display()),
                "ok: add .".to_string(),
                "ok: commit -m Kite".to_string(),
                "ok: push".to_string(),
            ]
        );
        assert_eq!(
            fs::read_to_string(settings.idea_file_path()).unwrap(),
            "# Ideas\n\n## Kite\n\nWind power\n\n"
        );
    }

    #[test]
    fn test_missing_remote_asks_after_idea_questions() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner::default();
        runner.fail_next("push", no_remote());
        let mut prompt = ScriptedPrompt::new(&["Kite", "Wind power", "git@example.com:k.git"]);

        let (result, _) = collect(&settings(temp.path()), &runner, &mut prompt);

        assert_eq!(
            result.unwrap().published.remote_added.as_deref(),
            Some("git@example.com:k.git")
        );
        assert_eq!(
            prompt.asked,
            vec!["Idea title: ", "Description: ", "Remote repo: "]
        );
    }

    #[test]
    fn test_push_failure_keeps_idea_and_shows_earlier_output() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let runner = FakeRunner::default();
        runner.fail_next("push", network_down());
        let mut prompt = ScriptedPrompt::new(&["Kite", "Wind power"]);

        let (result, events) = collect(&settings, &runner, &mut prompt);
        let err = result.unwrap_err();

        match &err {
            SparkError::Unpublished { idea_file, source } => {
                assert_eq!(*idea_file, settings.idea_file_path());
                assert_eq!(source.stage(), PublishStage::Pushed);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("but not published"));
        assert_eq!(events[events.len() - 2..], ["ok: add .", "ok: commit -m Kite"]);
        assert!(
            fs::read_to_string(settings.idea_file_path())
                .unwrap()
                .ends_with("## Kite\n\nWind power\n\n")
        );
    }

    #[test]
    fn test_git_init_failure_asks_nothing() {
        let temp = TempDir::new().unwrap();
        let runner = FakeRunner::default();
        runner.fail_next("init", failure("init", 1, "permission denied"));
        let mut prompt = ScriptedPrompt::new(&["Kite", "Wind power"]);

        let (result, events) = collect(&settings(temp.path()), &runner, &mut prompt);

        assert!(matches!(result, Err(SparkError::Repository(_))));
        assert!(prompt.asked.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_closed_input_appends_nothing() {
        let temp = TempDir::new().unwrap();
        let settings = settings(temp.path());
        let runner = FakeRunner::default();
        let mut prompt = ScriptedPrompt::new(&["Kite"]);

        let (result, _) = collect(&settings, &runner, &mut prompt);

        assert!(matches!(result, Err(SparkError::Input(_))));
        assert_eq!(
            fs::read_to_string(settings.idea_file_path()).unwrap(),
            "# Ideas\n\n"
        );
        assert_eq!(runner.calls(), vec!["init"]);
    }
}
