//! Store and recommender wired together: every mutation persists the table
//! and retrains the model.

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::recommender::{Recommendation, Recommender};
use crate::store::TaskStore;
use crate::task::{Priority, Task};

#[derive(Debug)]
pub struct TaskManager {
    store: TaskStore,
    recommender: Recommender,
}

impl TaskManager {
    pub fn open(config: &Config) -> Result<Self> {
        let store = TaskStore::load(&config.tasks_file)?;
        Ok(Self::with_store(store, Recommender::new(config.smoothing)))
    }

    pub fn with_store(store: TaskStore, mut recommender: Recommender) -> Self {
        recommender.retrain(store.tasks());
        Self { store, recommender }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn add(&mut self, description: &str, priority: Priority) -> Result<()> {
        self.store.add(description, priority)?;
        info!(%priority, total = self.store.len(), "task added");
        self.recommender.retrain(self.store.tasks());
        Ok(())
    }

    pub fn remove(&mut self, description: &str) -> Result<usize> {
        let removed = self.store.remove(description)?;
        info!(removed, total = self.store.len(), "tasks removed");
        self.recommender.retrain(self.store.tasks());
        Ok(removed)
    }

    pub fn list(&self) -> Result<&[Task]> {
        self.store.list()
    }

    pub fn recommend(&self) -> Result<Recommendation> {
        let pick = self.recommender.recommend(self.store.tasks())?;
        info!(probability = pick.probability, "task recommended");
        Ok(pick)
    }
}
