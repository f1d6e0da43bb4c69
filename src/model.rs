//! A trained model: fitted vectorizer plus Naive Bayes classifier.
//!
//! The two halves are only ever built together, so every vector the
//! vectorizer produces matches the classifier's dimension. Persisted with
//! bincode; loading re-checks that invariant.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierModel, Prediction};
use crate::error::{ClassifierResult, ModelError, ModelResult};
use crate::pack::TrainingExample;
use crate::vectorize::{FeatureVector, Vectorizer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    vectorizer: Vectorizer,
    classifier: ClassifierModel,
}

impl TrainedModel {
    /// Fit the vocabulary on every example text, then train the classifier.
    pub fn train(examples: &[TrainingExample], alpha: f64) -> ClassifierResult<Self> {
        let vectorizer = Vectorizer::fit(examples.iter().map(|e| e.text.as_str()));
        let labeled: Vec<(FeatureVector, &str)> = examples
            .iter()
            .map(|e| (vectorizer.transform(&e.text), e.intent.as_str()))
            .collect();
        let classifier = ClassifierModel::train_with_alpha(&labeled, alpha)?;

        tracing::info!(
            examples = examples.len(),
            intents = classifier.intents().len(),
            vocabulary = vectorizer.len(),
            alpha,
            "intent model trained"
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Vectorize raw text against the fitted vocabulary.
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    /// Predict the intent of raw text.
    pub fn classify(&self, text: &str) -> ClassifierResult<Prediction> {
        let prediction = self.classifier.predict(&self.vectorize(text))?;
        tracing::debug!(intent = %prediction.intent, score = prediction.score, "classified");
        Ok(prediction)
    }

    /// Every intent scored against raw text, best first.
    pub fn rank(&self, text: &str) -> ClassifierResult<Vec<Prediction>> {
        self.classifier.rank(&self.vectorize(text))
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &ClassifierModel {
        &self.classifier
    }

    /// Serialize to bytes via bincode.
    pub fn to_bytes(&self) -> ModelResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ModelError::Serialization {
            message: format!("failed to serialize model: {e}"),
        })
    }

    /// Deserialize from bytes via bincode and rebuild lookup tables.
    pub fn from_bytes(bytes: &[u8]) -> ModelResult<Self> {
        let mut model: Self =
            bincode::deserialize(bytes).map_err(|e| ModelError::Serialization {
                message: format!("failed to deserialize model: {e}"),
            })?;
        model.vectorizer.reindex();

        let vocabulary = model.vectorizer.len();
        let classifier = model.classifier.vocabulary_len();
        if vocabulary != classifier {
            return Err(ModelError::Inconsistent {
                vocabulary,
                classifier,
            });
        }
        model
            .classifier
            .validate()
            .map_err(|source| ModelError::Corrupt { source })?;
        Ok(model)
    }

    /// Write the model to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> ModelResult<()> {
        let bytes = self.to_bytes()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ModelError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, bytes).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "model saved");
        Ok(())
    }

    /// Read a model previously written with [`TrainedModel::save`].
    pub fn load(path: &Path) -> ModelResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| ModelError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_bytes(&bytes)
    }
}
