use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{Result, TaskError};
use crate::recommender::DEFAULT_SMOOTHING;
use crate::task::Priority;

pub const DEFAULT_CONFIG_FILE: &str = "prioritask.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// CSV file holding the task table.
    pub tasks_file: PathBuf,
    /// Priority preselected in the form.
    pub default_priority: Priority,
    /// Additive smoothing for the naive Bayes model.
    pub smoothing: f64,
    /// Where the interactive form sends its logs.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from("tasks.csv"),
            default_priority: Priority::Low,
            smoothing: DEFAULT_SMOOTHING,
            log_file: None,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&data).map_err(|e| TaskError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data =
            serde_json::to_string_pretty(self).map_err(|e| TaskError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(TaskError::Config(format!(
                "smoothing must be a positive number, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prioritask.json");
        fs::write(&path, r#"{ "default_priority": "High" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_priority, Priority::High);
        assert_eq!(config.tasks_file, PathBuf::from("tasks.csv"));
        assert_eq!(config.smoothing, 1.0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prioritask.json");
        let config = Config {
            tasks_file: dir.path().join("mine.csv"),
            default_priority: Priority::Medium,
            smoothing: 0.5,
            log_file: Some(dir.path().join("prioritask.log")),
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn rejects_bad_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prioritask.json");

        fs::write(&path, r#"{ "smoothing": 0 }"#).unwrap();
        assert!(matches!(Config::load(&path), Err(TaskError::Config(_))));

        fs::write(&path, r#"{ "default_priority": "Urgent" }"#).unwrap();
        assert!(matches!(Config::load(&path), Err(TaskError::Config(_))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::load(&path), Err(TaskError::Config(_))));
    }
}
