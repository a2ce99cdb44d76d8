use super::vectorizer::SparseVec;
use crate::task::Priority;

/// Multinomial naive Bayes over count features with additive smoothing.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: Vec<Priority>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fits on `samples` paired with `labels`. Returns `None` with no samples.
    pub fn fit(
        samples: &[SparseVec],
        labels: &[Priority],
        n_features: usize,
        alpha: f64,
    ) -> Option<Self> {
        debug_assert_eq!(samples.len(), labels.len());
        if samples.is_empty() {
            return None;
        }

        let mut classes: Vec<Priority> = labels.to_vec();
        classes.sort();
        classes.dedup();

        let mut class_count = vec![0.0; classes.len()];
        let mut feature_count = vec![vec![0.0; n_features]; classes.len()];
        for (sample, label) in samples.iter().zip(labels) {
            let c = classes.iter().position(|k| k == label)?;
            class_count[c] += 1.0;
            for &(j, count) in sample {
                feature_count[c][j] += count;
            }
        }

        let total: f64 = class_count.iter().sum();
        let class_log_prior = class_count.iter().map(|n| (n / total).ln()).collect();
        let feature_log_prob = feature_count
            .into_iter()
            .map(|row| {
                let denom = (row.iter().sum::<f64>() + alpha * n_features as f64).ln();
                row.into_iter().map(|n| (n + alpha).ln() - denom).collect()
            })
            .collect();

        Some(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Labels seen in training, one per probability column.
    pub fn classes(&self) -> &[Priority] {
        &self.classes
    }

    pub fn class_index(&self, label: Priority) -> Option<usize> {
        self.classes.iter().position(|&c| c == label)
    }

    /// Posterior over `classes()` for one document.
    pub fn predict_proba(&self, sample: &[(usize, f64)]) -> Vec<f64> {
        let jll: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, flp)| prior + sample.iter().map(|&(j, n)| n * flp[j]).sum::<f64>())
            .collect();

        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        jll.into_iter().map(|v| (v - log_norm).exp()).collect()
    }
}
