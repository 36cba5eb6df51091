// crates/spark-cli/src/services/pager.rs - Pager Integration Service
//
// The `view` command never renders anything itself: it opens the idea file and
// hands it to a pager as stdin, with the pager drawing straight to the
// terminal.

use anyhow::{Result, anyhow, bail};
use std::env;
use std::fs::File;
use std::process::{Command, Stdio};
use tracing::debug;

/// Pager used when neither SPARK_PAGER nor PAGER is set
const DEFAULT_PAGER: &str = "less";

/// Handles launching the pager
///
/// PAGER SELECTION HIERARCHY:
/// 1. SPARK_PAGER environment variable (spark-specific)
/// 2. PAGER environment variable (standard Unix)
/// 3. `less`
///
/// The chosen value may carry arguments, e.g. `PAGER="less -R"`.
pub struct PagerService;

impl PagerService {
    /// Get the pager command line to use
    pub fn get_pager_command() -> String {
        Self::pick_pager(env::var("SPARK_PAGER").ok(), env::var("PAGER").ok())
    }

    fn pick_pager(spark_pager: Option<String>, pager: Option<String>) -> String {
        spark_pager
            .into_iter()
            .chain(pager)
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAGER.to_string())
    }

    /// Show `input` in the pager and wait for the user to quit it
    ///
    /// The file handle becomes the pager's stdin and is closed when the pager
    /// exits. Stdout and stderr are inherited from the terminal.
    pub fn page(input: File) -> Result<()> {
        let command_line = Self::get_pager_command();
        let mut parts = command_line.split_whitespace();
        let program = parts.next().unwrap_or(DEFAULT_PAGER);
        let args: Vec<&str> = parts.collect();

        debug!(pager = %command_line, "launching pager");
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::from(input))
            .status()
            .map_err(|e| {
                anyhow!(
                    "Failed to launch pager '{}': {}\n\nTips:\n- Check that '{}' is installed and in PATH\n- Set SPARK_PAGER or PAGER environment variable",
                    command_line,
                    e,
                    program
                )
            })?;

        if !status.success() {
            bail!("Pager '{}' exited with {}", command_line, status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_pager_wins() {
        let picked =
            PagerService::pick_pager(Some("bat --plain".to_string()), Some("more".to_string()));
        assert_eq!(picked, "bat --plain");
    }

    #[test]
    fn test_falls_back_to_pager_then_less() {
        assert_eq!(
            PagerService::pick_pager(None, Some("more".to_string())),
            "more"
        );
        assert_eq!(
            PagerService::pick_pager(Some("  ".to_string()), None),
            "less"
        );
        assert_eq!(PagerService::pick_pager(None, None), "less");
    }
}
