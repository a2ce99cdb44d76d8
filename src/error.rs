use crate::task::Priority;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("No tasks available.")]
    EmptyStore,

    #[error("The recommender has not been trained yet.")]
    UntrainedModel,

    #[error("No task has been labelled {0} yet, so none can be recommended.")]
    ClassNotTrained(Priority),

    #[error("Unknown priority '{0}' (expected Low, Medium or High)")]
    InvalidPriority(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TaskError {
    /// Conditions reported to the user as information rather than failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, TaskError::EmptyStore)
    }

    /// Process exit status for a command that ended with this error.
    pub fn exit_status(&self) -> u8 {
        if self.is_informational() {
            0
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
