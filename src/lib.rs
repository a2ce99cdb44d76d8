//! A single-user to-do list that can suggest which task to tackle next.
//!
//! Tasks live in a CSV table; after every change a bag-of-words naive Bayes
//! model is retrained on the table and used to rank tasks by how likely they
//! are to be `High` priority.

pub mod config;
pub mod error;
pub mod manager;
pub mod recommender;
pub mod store;
pub mod task;
pub mod ui;

pub use config::Config;
pub use error::{Result, TaskError};
pub use manager::TaskManager;
pub use recommender::{Recommendation, Recommender};
pub use store::TaskStore;
pub use task::{Priority, Task};
