//! Ordered task table backed by a CSV snapshot.
//!
//! The in-memory `Vec` is the source of truth; the file is rewritten in full
//! after every mutation.

use chrono::{DateTime, Local};
use csv::WriterBuilder;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::error::{Result, TaskError};
use crate::task::{Priority, Task};

const HEADER: [&str; 2] = ["description", "priority"];

#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    last_saved: Option<DateTime<Local>>,
}

impl TaskStore {
    /// Reads the table at `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut store = Self {
            path,
            tasks: Vec::new(),
            last_saved: None,
        };

        let file = match fs::File::open(&store.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %store.path.display(), "no task file yet, starting empty");
                return Ok(store);
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        for (row, result) in reader.deserialize::<Task>().enumerate() {
            let task = result?;
            if task.description.trim().is_empty() {
                warn!(row = row + 1, "skipping task with blank description");
                continue;
            }
            store.tasks.push(task);
        }
        info!(path = %store.path.display(), count = store.tasks.len(), "loaded tasks");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    /// Ordered view for display; an empty table is reported as `EmptyStore`.
    pub fn list(&self) -> Result<&[Task]> {
        if self.tasks.is_empty() {
            return Err(TaskError::EmptyStore);
        }
        Ok(&self.tasks)
    }

    pub fn add(&mut self, description: &str, priority: Priority) -> Result<()> {
        if description.trim().is_empty() {
            return Err(TaskError::Validation(
                "Please enter a task description.".to_string(),
            ));
        }
        let mut next = self.tasks.clone();
        next.push(Task::new(description, priority));
        self.commit(next)
    }

    /// Drops every task whose description equals `description` exactly and
    /// returns how many went away. No match leaves the table unchanged.
    pub fn remove(&mut self, description: &str) -> Result<usize> {
        if description.trim().is_empty() {
            return Err(TaskError::Validation(
                "Please enter a task description to remove.".to_string(),
            ));
        }
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.description != description)
            .cloned()
            .collect();
        let removed = self.tasks.len() - next.len();
        self.commit(next)?;
        Ok(removed)
    }

    pub fn persist(&mut self) -> Result<()> {
        self.write(&self.tasks)?;
        self.mark_saved();
        Ok(())
    }

    /// Saves `next` and only then makes it the in-memory table, so a failed
    /// write leaves both memory and disk as they were.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        self.write(&next)?;
        self.tasks = next;
        self.mark_saved();
        Ok(())
    }

    fn mark_saved(&mut self) {
        self.last_saved = Some(Local::now());
        debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
    }

    fn write(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.tmp_path();
        let result = write_csv(&tmp, tasks)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(TaskError::from));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tasks.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_csv(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADER)?;
    for task in tasks {
        writer.serialize(task)?;
    }
    writer.flush()?;
    Ok(())
}
