//! The inference entry point: utterance in, response out.
//!
//! ```text
//! raw text → normalize → count vector → Naive Bayes → intent → response pool
//! ```
//!
//! A [`ChatPipeline`] is immutable once built, so a shared reference can
//! serve concurrent callers. Each caller brings its own random source.

use rand::Rng;

use crate::classifier::Prediction;
use crate::error::ChatResult;
use crate::model::TrainedModel;
use crate::normalize::normalize;
use crate::pack::IntentPack;
use crate::respond::ResponseTable;

// ── IntentMismatch ─────────────────────────────────────────────────────────

/// A disagreement between the intents the model knows and the configured
/// response pools. None of these are fatal: affected intents answer with the
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentMismatch {
    /// The model can predict this intent but no pool is configured.
    MissingResponses { intent: String },
    /// A pool is configured but holds no responses.
    EmptyResponses { intent: String },
    /// A pool is configured for an intent the model never predicts.
    Untrained { intent: String },
}

impl std::fmt::Display for IntentMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingResponses { intent } => write!(f, "{intent}: no response pool"),
            Self::EmptyResponses { intent } => write!(f, "{intent}: empty response pool"),
            Self::Untrained { intent } => write!(f, "{intent}: responses but no training examples"),
        }
    }
}

// ── Explanation ────────────────────────────────────────────────────────────

/// How an utterance was understood: the normalized text, which tokens the
/// vocabulary recognized, and every intent's score.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub normalized: String,
    /// Tokens found in the vocabulary, in utterance order.
    pub known_tokens: Vec<String>,
    /// Tokens dropped as out-of-vocabulary, in utterance order.
    pub unknown_tokens: Vec<String>,
    /// Best first.
    pub ranking: Vec<Prediction>,
}

impl Explanation {
    /// The winning prediction.
    pub fn best(&self) -> Option<&Prediction> {
        self.ranking.first()
    }
}

// ── ChatPipeline ───────────────────────────────────────────────────────────

pub struct ChatPipeline {
    model: TrainedModel,
    responses: ResponseTable,
}

impl ChatPipeline {
    /// Pair a trained model with a response table, logging any mismatch.
    pub fn new(model: TrainedModel, responses: ResponseTable) -> Self {
        let pipeline = Self { model, responses };
        for mismatch in pipeline.audit() {
            tracing::warn!(%mismatch, "intent configuration mismatch, fallback will be used");
        }
        pipeline
    }

    /// Train on a pack's examples and serve its responses.
    pub fn from_pack(pack: &IntentPack, alpha: f64) -> ChatResult<Self> {
        let model = TrainedModel::train(&pack.training_examples(), alpha)?;
        Ok(Self::new(model, pack.response_table()))
    }

    /// Predict the intent of an utterance.
    pub fn classify(&self, utterance: &str) -> ChatResult<Prediction> {
        Ok(self.model.classify(utterance)?)
    }

    /// Answer an utterance with a response from the predicted intent's pool.
    ///
    /// Empty input is not rejected; it is classified on priors alone.
    pub fn respond<R: Rng + ?Sized>(&self, utterance: &str, rng: &mut R) -> ChatResult<&str> {
        let prediction = self.classify(utterance)?;
        Ok(self.responses.select(&prediction.intent, rng))
    }

    /// Break down how an utterance is classified.
    pub fn explain(&self, utterance: &str) -> ChatResult<Explanation> {
        let normalized = normalize(utterance);
        let vocabulary = self.model.vectorizer().vocabulary();
        let (known_tokens, unknown_tokens): (Vec<String>, Vec<String>) = normalized
            .split_whitespace()
            .map(str::to_string)
            .partition(|t| vocabulary.index_of(t).is_some());
        let ranking = self.model.rank(utterance)?;
        Ok(Explanation {
            normalized,
            known_tokens,
            unknown_tokens,
            ranking,
        })
    }

    /// Compare model intents against configured response pools.
    ///
    /// Model-side mismatches come first in model enumeration order, then
    /// untrained pools in label order.
    pub fn audit(&self) -> Vec<IntentMismatch> {
        let classifier = self.model.classifier();
        let mut out: Vec<IntentMismatch> = classifier
            .intents()
            .iter()
            .filter_map(|intent| match self.responses.pool(intent) {
                None => Some(IntentMismatch::MissingResponses {
                    intent: intent.clone(),
                }),
                Some([]) => Some(IntentMismatch::EmptyResponses {
                    intent: intent.clone(),
                }),
                Some(_) => None,
            })
            .collect();
        out.extend(
            self.responses
                .intents()
                .into_iter()
                .filter(|intent| !classifier.contains(intent))
                .map(|intent| IntentMismatch::Untrained {
                    intent: intent.to_string(),
                }),
        );
        out
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn responses(&self) -> &ResponseTable {
        &self.responses
    }
}
