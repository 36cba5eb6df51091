// crates/spark-core/src/config.rs - Configuration System
//
// Spark keeps exactly two settings: where the idea repository lives and what
// the idea file inside it is called. They are stored as flat YAML in a single
// per-user file, `~/.spark.yaml` unless overridden.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. --config-file argument or SPARK_CONFIG environment variable (file location)
// 2. Values stored in the config file
// 3. Interactive answers for values still missing (first-run setup)
// 4. Built-in defaults (~/ideas, README.md) when the answer is empty
//
// TWO SHAPES OF THE SAME DATA:
// - SparkConfig: what is on disk, every field optional
// - IdeaSettings: what workflows consume, every field guaranteed present
// Workflows only ever receive IdeaSettings, so "both fields set before any
// workflow runs" is checked once, here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::prompt::{Prompt, PromptResult};

/// Name of the config file inside the home directory
pub const CONFIG_FILE_NAME: &str = ".spark.yaml";

/// Default idea directory name, relative to the home directory
pub const DEFAULT_IDEA_DIRECTORY_NAME: &str = "ideas";

/// Default idea file name
pub const DEFAULT_IDEA_FILE: &str = "README.md";

/// Errors that can occur during configuration loading and saving
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory of the current user")]
    HomeNotFound,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid YAML in {file}: {error}")]
    Parse { file: String, error: String },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("Configuration is missing `{0}`")]
    Incomplete(&'static str),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Persisted configuration, exactly as stored in the YAML file
///
/// Missing keys deserialize to `None`. Empty strings are kept on the struct
/// but treated as missing by every accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkConfig {
    /// Absolute path of the directory holding the idea file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_directory: Option<String>,

    /// File name of the markdown idea file inside `idea_directory`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_file: Option<String>,
}

impl SparkConfig {
    /// Value of a field, with empty strings reported as absent
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        let value = match field {
            ConfigField::IdeaDirectory => self.idea_directory.as_deref(),
            ConfigField::IdeaFile => self.idea_file.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::IdeaDirectory => self.idea_directory = Some(value),
            ConfigField::IdeaFile => self.idea_file = Some(value),
        }
    }

    /// Resolve into settings the workflows can use
    ///
    /// Fails with `Incomplete` if first-run setup has not filled every field.
    pub fn settings(&self) -> ConfigResult<IdeaSettings> {
        let directory = self
            .get(ConfigField::IdeaDirectory)
            .ok_or(ConfigError::Incomplete(ConfigField::IdeaDirectory.key()))?;
        let file = self
            .get(ConfigField::IdeaFile)
            .ok_or(ConfigError::Incomplete(ConfigField::IdeaFile.key()))?;

        Ok(IdeaSettings {
            idea_directory: PathBuf::from(directory),
            idea_file: file.to_string(),
        })
    }
}

/// Fully resolved settings, passed by reference to every workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaSettings {
    pub idea_directory: PathBuf,
    pub idea_file: String,
}

impl IdeaSettings {
    /// `<idea_directory>/<idea_file>`
    pub fn idea_file_path(&self) -> PathBuf {
        self.idea_directory.join(&self.idea_file)
    }
}

/// The configurable fields, in the order they are prompted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    IdeaDirectory,
    IdeaFile,
}

impl ConfigField {
    pub const ALL: [ConfigField; 2] = [ConfigField::IdeaDirectory, ConfigField::IdeaFile];

    /// YAML key of the field
    pub fn key(self) -> &'static str {
        match self {
            Self::IdeaDirectory => "idea_directory",
            Self::IdeaFile => "idea_file",
        }
    }

    /// Question shown to the user, with the value used on an empty answer
    pub fn question(self, default: &str) -> String {
        match self {
            Self::IdeaDirectory => {
                format!("Enter the absolute path to your idea directory [ {default} ]: ")
            }
            Self::IdeaFile => format!("Enter the wanted name of your idea file [ {default} ]: "),
        }
    }
}

/// Built-in defaults, derived from the user's home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub idea_directory: String,
    pub idea_file: String,
}

impl ConfigDefaults {
    pub fn for_home(home: &Path) -> Self {
        Self {
            idea_directory: home.join(DEFAULT_IDEA_DIRECTORY_NAME).display().to_string(),
            idea_file: DEFAULT_IDEA_FILE.to_string(),
        }
    }

    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::IdeaDirectory => &self.idea_directory,
            ConfigField::IdeaFile => &self.idea_file,
        }
    }
}

/// Locate the current user's home directory
pub fn home_dir() -> ConfigResult<PathBuf> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

/// Reads and writes the config file at one fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<home>/.spark.yaml`
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration
    ///
    /// A missing or empty file is not an error: it yields an empty
    /// configuration so first-run setup can fill it in.
    pub fn load(&self) -> ConfigResult<SparkConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file yet");
                return Ok(SparkConfig::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(SparkConfig::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: self.path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Persist the full configuration, creating or overwriting the file
    pub fn save(&self, config: &SparkConfig) -> ConfigResult<()> {
        let content =
            serde_yaml::to_string(config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let write_error = |source| ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&self.path, content).map_err(write_error)?;

        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

/// Fill every missing field by asking the user
///
/// Fields are visited in `ConfigField::ALL` order. Answers are trimmed
/// before they are stored, and an empty (or whitespace-only) answer stores the
/// default shown in the question. Returns whether anything was filled in, so
/// callers only save on change.
pub fn ensure_complete(
    config: &mut SparkConfig,
    defaults: &ConfigDefaults,
    prompt: &mut impl Prompt,
) -> PromptResult<bool> {
    let mut changed = false;

    for field in ConfigField::ALL {
        if config.get(field).is_some() {
            continue;
        }

        let value = ask_field(field, defaults.get(field), prompt)?;
        info!(field = field.key(), value = %value, "configured missing setting");
        config.set(field, value);
        changed = true;
    }

    Ok(changed)
}

/// Ask for every field again, offering the current value as the default
///
/// Answers are trimmed the same way as in `ensure_complete`.
pub fn reconfigure(
    config: &mut SparkConfig,
    defaults: &ConfigDefaults,
    prompt: &mut impl Prompt,
) -> PromptResult<()> {
    for field in ConfigField::ALL {
        let current = config
            .get(field)
            .unwrap_or_else(|| defaults.get(field))
            .to_string();
        let value = ask_field(field, &current, prompt)?;
        config.set(field, value);
    }
    Ok(())
}

/// One config answer, trimmed
///
/// `Prompt` hands back lines verbatim, which is what idea titles and
/// descriptions want. A path or file name with stray spaces around it is
/// never what the user meant, so config fields trim here instead.
fn ask_field(field: ConfigField, default: &str, prompt: &mut impl Prompt) -> PromptResult<String> {
    let answer = prompt.ask(&field.question(default))?;
    let answer = answer.trim();

    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}
