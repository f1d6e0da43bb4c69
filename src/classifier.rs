//! Multinomial Naive Bayes intent classifier.
//!
//! Trained once from labeled count vectors; read-only afterwards.
//!
//! # Model
//!
//! - prior: `P(c) = n_c / N`
//! - likelihood: `P(t|c) = (count(t, c) + α) / (total(c) + α·|V|)`
//!
//! Both are stored as natural logarithms. Additive smoothing keeps every
//! likelihood strictly positive, so an unseen (token, intent) pair never
//! zeroes out an intent.
//!
//! # Scoring
//!
//! `score(c) = ln P(c) + Σ count(t) · ln P(t|c)` over the non-zero slots of
//! the input vector. The maximum wins; exact ties go to the intent that was
//! enumerated first at training time, which is first-seen order over the
//! training examples.

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, ClassifierResult};
use crate::vectorize::FeatureVector;

/// Default additive smoothing constant (Laplace smoothing).
pub const DEFAULT_ALPHA: f64 = 1.0;

// ── Prediction ─────────────────────────────────────────────────────────────

/// The winning intent and its unnormalized log score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub intent: String,
    /// Log joint probability `ln P(c) + Σ count · ln P(t|c)`.
    pub score: f64,
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.4})", self.intent, self.score)
    }
}

// ── ClassifierModel ────────────────────────────────────────────────────────

/// Per-intent log priors and per-(intent, token) smoothed log likelihoods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Intent labels in enumeration (tie-break) order.
    intents: Vec<String>,
    /// Training example count per intent, parallel to `intents`.
    example_counts: Vec<u64>,
    log_priors: Vec<f64>,
    /// `log_likelihoods[c][t]`.
    log_likelihoods: Vec<Vec<f64>>,
    vocabulary_len: usize,
    alpha: f64,
}

impl ClassifierModel {
    /// Train with the default smoothing constant.
    pub fn train<S: AsRef<str>>(examples: &[(FeatureVector, S)]) -> ClassifierResult<Self> {
        Self::train_with_alpha(examples, DEFAULT_ALPHA)
    }

    /// Train from labeled count vectors.
    ///
    /// Every vector must have the same non-zero length. Intents are the
    /// distinct labels of `examples`; a label with no example cannot occur
    /// here and so never enters the model.
    pub fn train_with_alpha<S: AsRef<str>>(
        examples: &[(FeatureVector, S)],
        alpha: f64,
    ) -> ClassifierResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ClassifierError::InvalidSmoothing { alpha });
        }
        let Some((first, _)) = examples.first() else {
            return Err(ClassifierError::NoExamples);
        };
        let vocabulary_len = first.len();
        if vocabulary_len == 0 {
            return Err(ClassifierError::EmptyVocabulary);
        }

        let mut intents: Vec<String> = Vec::new();
        let mut example_counts: Vec<u64> = Vec::new();
        let mut token_counts: Vec<Vec<u64>> = Vec::new();

        for (position, (vector, label)) in examples.iter().enumerate() {
            if vector.len() != vocabulary_len {
                return Err(ClassifierError::InconsistentExample {
                    position,
                    expected: vocabulary_len,
                    actual: vector.len(),
                });
            }
            let label = label.as_ref();
            let c = match intents.iter().position(|i| i == label) {
                Some(c) => c,
                None => {
                    intents.push(label.to_string());
                    example_counts.push(0);
                    token_counts.push(vec![0; vocabulary_len]);
                    intents.len() - 1
                }
            };
            example_counts[c] += 1;
            for (t, count) in vector.nonzero() {
                token_counts[c][t] += u64::from(count);
            }
        }

        let total_examples = examples.len() as f64;
        let log_priors: Vec<f64> = example_counts
            .iter()
            .map(|&n| (n as f64 / total_examples).ln())
            .collect();

        let smoothing_mass = alpha * vocabulary_len as f64;
        let log_likelihoods: Vec<Vec<f64>> = token_counts
            .iter()
            .map(|counts| {
                let total: u64 = counts.iter().sum();
                let log_denominator = (total as f64 + smoothing_mass).ln();
                counts
                    .iter()
                    .map(|&n| (n as f64 + alpha).ln() - log_denominator)
                    .collect::<Vec<f64>>()
            })
            .collect();

        Ok(Self {
            intents,
            example_counts,
            log_priors,
            log_likelihoods,
            vocabulary_len,
            alpha,
        })
    }

    /// Best-scoring intent. Never empty: a trained model always has an answer.
    pub fn predict(&self, vector: &FeatureVector) -> ClassifierResult<Prediction> {
        self.check_dimension(vector)?;
        let mut best = 0;
        let mut best_score = self.score(0, vector);
        for c in 1..self.intents.len() {
            let score = self.score(c, vector);
            if score > best_score {
                best = c;
                best_score = score;
            }
        }
        Ok(Prediction {
            intent: self.intents[best].clone(),
            score: best_score,
        })
    }

    /// Every intent with its score, best first. Ties keep enumeration order.
    pub fn rank(&self, vector: &FeatureVector) -> ClassifierResult<Vec<Prediction>> {
        self.check_dimension(vector)?;
        let mut ranked: Vec<Prediction> = self
            .intents
            .iter()
            .enumerate()
            .map(|(c, intent)| Prediction {
                intent: intent.clone(),
                score: self.score(c, vector),
            })
            .collect();
        // Stable sort: equal scores stay in enumeration order.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(ranked)
    }

    fn score(&self, c: usize, vector: &FeatureVector) -> f64 {
        let likelihoods = &self.log_likelihoods[c];
        vector
            .nonzero()
            .fold(self.log_priors[c], |acc, (t, count)| {
                acc + f64::from(count) * likelihoods[t]
            })
    }

    /// Check that the tables fit together so scoring cannot index out of
    /// bounds. Training always produces a valid model; a deserialized one
    /// must be checked.
    pub fn validate(&self) -> ClassifierResult<()> {
        let malformed =
            |reason: String| -> ClassifierResult<()> { Err(ClassifierError::Malformed { reason }) };

        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ClassifierError::InvalidSmoothing { alpha: self.alpha });
        }
        if self.intents.is_empty() {
            return malformed("no intents".into());
        }
        if self.vocabulary_len == 0 {
            return Err(ClassifierError::EmptyVocabulary);
        }
        let n = self.intents.len();
        for (table, len) in [
            ("example counts", self.example_counts.len()),
            ("log priors", self.log_priors.len()),
            ("log likelihoods", self.log_likelihoods.len()),
        ] {
            if len != n {
                return malformed(format!("{table} has {len} entries for {n} intents"));
            }
        }
        for (c, row) in self.log_likelihoods.iter().enumerate() {
            if row.len() != self.vocabulary_len {
                return malformed(format!(
                    "likelihood row for {:?} has {} entries, expected {}",
                    self.intents[c],
                    row.len(),
                    self.vocabulary_len
                ));
            }
            if row.iter().any(|l| !l.is_finite()) {
                return malformed(format!("non-finite likelihood for {:?}", self.intents[c]));
            }
        }
        if self.log_priors.iter().any(|p| p.is_nan()) {
            return malformed("NaN log prior".into());
        }
        Ok(())
    }

    fn check_dimension(&self, vector: &FeatureVector) -> ClassifierResult<()> {
        if vector.len() != self.vocabulary_len {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.vocabulary_len,
                actual: vector.len(),
            });
        }
        Ok(())
    }

    /// Intent labels in enumeration order.
    pub fn intents(&self) -> &[String] {
        &self.intents
    }

    pub fn contains(&self, intent: &str) -> bool {
        self.intent_index(intent).is_some()
    }

    /// Number of training examples that carried `intent`.
    pub fn example_count(&self, intent: &str) -> Option<u64> {
        self.intent_index(intent).map(|c| self.example_counts[c])
    }

    /// `P(c)`, or `None` for an intent absent from the model.
    pub fn prior(&self, intent: &str) -> Option<f64> {
        self.intent_index(intent).map(|c| self.log_priors[c].exp())
    }

    /// `P(t|c)` for a vocabulary index.
    pub fn likelihood(&self, intent: &str, token_index: usize) -> Option<f64> {
        let c = self.intent_index(intent)?;
        self.log_likelihoods[c].get(token_index).map(|l| l.exp())
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary_len
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn intent_index(&self, intent: &str) -> Option<usize> {
        self.intents.iter().position(|i| i == intent)
    }
}
