//! Ranks tasks by how likely a bag-of-words naive Bayes model, trained on
//! the current table, is to label them `High`.

pub mod naive_bayes;
pub mod vectorizer;

use tracing::{debug, info};

use crate::error::{Result, TaskError};
use crate::task::{Priority, Task};
use naive_bayes::MultinomialNb;
use vectorizer::CountVectorizer;

pub const DEFAULT_SMOOTHING: f64 = 1.0;

#[derive(Debug, Clone)]
struct Pipeline {
    vectorizer: CountVectorizer,
    model: MultinomialNb,
}

#[derive(Debug, Clone)]
enum State {
    Untrained,
    Trained(Pipeline),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub task: Task,
    /// Predicted probability of the `High` label.
    pub probability: f64,
}

#[derive(Debug, Clone)]
pub struct Recommender {
    smoothing: f64,
    state: State,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}

impl Recommender {
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            state: State::Untrained,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, State::Trained(_))
    }

    /// Labels the current model can score, empty while untrained.
    pub fn classes(&self) -> &[Priority] {
        match &self.state {
            State::Trained(p) => p.model.classes(),
            State::Untrained => &[],
        }
    }

    /// Rebuilds the model from scratch. An empty table keeps the current state.
    pub fn retrain(&mut self, tasks: &[Task]) {
        if tasks.is_empty() {
            debug!("no tasks to train on, keeping previous model");
            return;
        }

        let vectorizer = CountVectorizer::fit(tasks.iter().map(|t| t.description.as_str()));
        let samples: Vec<_> = tasks
            .iter()
            .map(|t| vectorizer.transform(&t.description))
            .collect();
        let labels: Vec<Priority> = tasks.iter().map(|t| t.priority).collect();

        if let Some(model) =
            MultinomialNb::fit(&samples, &labels, vectorizer.n_features(), self.smoothing)
        {
            info!(
                tasks = tasks.len(),
                features = vectorizer.n_features(),
                classes = ?model.classes(),
                "recommender retrained"
            );
            self.state = State::Trained(Pipeline { vectorizer, model });
        }
    }

    /// Picks the task with the highest predicted `High` probability.
    /// Ties go to the earliest task.
    pub fn recommend(&self, tasks: &[Task]) -> Result<Recommendation> {
        if tasks.is_empty() {
            return Err(TaskError::EmptyStore);
        }
        let pipeline = match &self.state {
            State::Trained(p) => p,
            State::Untrained => return Err(TaskError::UntrainedModel),
        };
        let high = pipeline
            .model
            .class_index(Priority::High)
            .ok_or(TaskError::ClassNotTrained(Priority::High))?;

        let mut best: Option<(usize, f64)> = None;
        for (idx, task) in tasks.iter().enumerate() {
            let sample = pipeline.vectorizer.transform(&task.description);
            let p = pipeline.model.predict_proba(&sample)[high];
            if best.is_none_or(|(_, top)| p > top) {
                best = Some((idx, p));
            }
        }

        let (idx, probability) = best.ok_or(TaskError::EmptyStore)?;
        Ok(Recommendation {
            task: tasks[idx].clone(),
            probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(rows: &[(&str, Priority)]) -> Vec<Task> {
        rows.iter().map(|(d, p)| Task::new(*d, *p)).collect()
    }

    #[test]
    fn untrained_refuses_to_recommend() {
        let rec = Recommender::default();
        assert!(!rec.is_trained());
        let t = tasks(&[("Fix bug", Priority::High)]);
        assert!(matches!(rec.recommend(&t), Err(TaskError::UntrainedModel)));
    }

    #[test]
    fn empty_table_is_reported_before_model_state() {
        let rec = Recommender::default();
        assert!(matches!(rec.recommend(&[]), Err(TaskError::EmptyStore)));
    }

    #[test]
    fn picks_the_only_high_task() {
        let t = tasks(&[("Fix bug", Priority::High), ("Write docs", Priority::Low)]);
        let mut rec = Recommender::default();
        rec.retrain(&t);

        let pick = rec.recommend(&t).unwrap();
        assert_eq!(pick.task, t[0]);
        assert!((pick.probability - 0.8).abs() < 1e-9);
    }

    #[test]
    fn high_column_is_found_by_label() {
        // Low < Medium < High ordering puts High at index 1 here.
        let t = tasks(&[
            ("tidy desk", Priority::Low),
            ("server outage", Priority::High),
            ("tidy inbox", Priority::Low),
        ]);
        let mut rec = Recommender::default();
        rec.retrain(&t);
        assert_eq!(rec.classes(), &[Priority::Low, Priority::High]);
        assert_eq!(rec.recommend(&t).unwrap().task.description, "server outage");
    }

    #[test]
    fn no_high_examples_is_an_explicit_error() {
        let t = tasks(&[
            ("water plants", Priority::Low),
            ("buy milk", Priority::Low),
            ("call mom", Priority::Low),
        ]);
        let mut rec = Recommender::default();
        rec.retrain(&t);
        assert!(rec.is_trained());
        assert!(matches!(
            rec.recommend(&t),
            Err(TaskError::ClassNotTrained(Priority::High))
        ));
    }

    #[test]
    fn retrain_discards_the_previous_model() {
        let mut rec = Recommender::default();
        rec.retrain(&tasks(&[("Fix bug", Priority::High)]));
        let only_low = tasks(&[("Write docs", Priority::Low)]);
        rec.retrain(&only_low);
        assert_eq!(rec.classes(), &[Priority::Low]);
        assert!(rec.recommend(&only_low).is_err());
    }

    #[test]
    fn retrain_on_empty_keeps_state() {
        let mut rec = Recommender::default();
        rec.retrain(&[]);
        assert!(!rec.is_trained());

        rec.retrain(&tasks(&[("Fix bug", Priority::High)]));
        rec.retrain(&[]);
        assert_eq!(rec.classes(), &[Priority::High]);
    }

    #[test]
    fn ties_go_to_the_earliest_task() {
        let t = tasks(&[
            ("a", Priority::High),
            ("b", Priority::Low),
            ("c", Priority::High),
        ]);
        let mut rec = Recommender::default();
        rec.retrain(&t);
        // single-letter descriptions leave only the priors to go on
        assert_eq!(rec.recommend(&t).unwrap().task.description, "a");
    }

    #[test]
    fn recommendation_is_always_a_stored_task() {
        let t = tasks(&[
            ("deploy hotfix now", Priority::High),
            ("refactor tests", Priority::Medium),
            ("update changelog", Priority::Low),
            ("hotfix review", Priority::Medium),
        ]);
        let mut rec = Recommender::default();
        rec.retrain(&t);
        let pick = rec.recommend(&t).unwrap();
        assert!(t.contains(&pick.task));
        assert!(pick.probability > 0.0 && pick.probability <= 1.0);
    }
}
