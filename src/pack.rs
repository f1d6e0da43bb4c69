//! Intent packs: TOML-defined training corpora and response tables.
//!
//! A pack lists intents in order, each with example utterances (training
//! data) and candidate responses. One pack, `basic`, is bundled into the
//! binary; others load from disk.
//!
//! Loading decouples the file shape from what the pipeline consumes: a pack
//! flattens into an explicit [`TrainingExample`] list with a fixed intent
//! enumeration, plus a [`ResponseTable`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{PackError, PackResult};
use crate::respond::{DEFAULT_FALLBACK, ResponseTable};

// ── Data model ─────────────────────────────────────────────────────────────

/// One labeled training utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    pub intent: String,
}

/// An intent with its training utterances and response pool.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentSpec {
    pub label: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// A loaded intent pack.
#[derive(Debug, Clone)]
pub struct IntentPack {
    pub name: String,
    pub description: String,
    pub fallback: String,
    /// Intents in file order, duplicate labels merged.
    pub intents: Vec<IntentSpec>,
}

// ── TOML deserialization helpers ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PackToml {
    pack: PackMeta,
    #[serde(default)]
    intent: Vec<IntentSpec>,
}

#[derive(Debug, Deserialize)]
struct PackMeta {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    fallback: Option<String>,
}

// ── Bundled pack ───────────────────────────────────────────────────────────

const BASIC_TOML: &str = include_str!("../data/intents/basic.toml");

impl IntentPack {
    /// The pack compiled into the binary.
    pub fn bundled() -> PackResult<Self> {
        Self::parse(BASIC_TOML)
    }

    /// Load a pack from a TOML file.
    pub fn load(path: &Path) -> PackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse a pack from TOML source.
    pub fn parse(toml_str: &str) -> PackResult<Self> {
        let parsed: PackToml = toml::from_str(toml_str).map_err(|e| PackError::Parse {
            name: "(unknown)".into(),
            message: e.to_string(),
        })?;

        let mut intents: Vec<IntentSpec> = Vec::with_capacity(parsed.intent.len());
        for spec in parsed.intent {
            match intents.iter_mut().find(|i| i.label == spec.label) {
                Some(existing) => {
                    tracing::warn!(
                        pack = %parsed.pack.name,
                        intent = %spec.label,
                        "duplicate intent label, merging"
                    );
                    existing.examples.extend(spec.examples);
                    existing.responses.extend(spec.responses);
                }
                None => intents.push(spec),
            }
        }

        let pack = Self {
            name: parsed.pack.name,
            description: parsed.pack.description,
            fallback: parsed
                .pack
                .fallback
                .unwrap_or_else(|| DEFAULT_FALLBACK.to_string()),
            intents,
        };

        if pack.intents.iter().all(|i| i.examples.is_empty()) {
            return Err(PackError::Empty { name: pack.name });
        }
        Ok(pack)
    }

    /// Flatten into labeled examples, intents in pack order.
    ///
    /// Intents without examples are skipped: they cannot receive a prior.
    pub fn training_examples(&self) -> Vec<TrainingExample> {
        let mut out = Vec::new();
        for spec in &self.intents {
            if spec.examples.is_empty() {
                tracing::warn!(
                    pack = %self.name,
                    intent = %spec.label,
                    "intent has no training examples, excluded from the model"
                );
                continue;
            }
            out.extend(spec.examples.iter().map(|text| TrainingExample {
                text: text.clone(),
                intent: spec.label.clone(),
            }));
        }
        out
    }

    /// Response pools keyed by intent, with the pack's fallback.
    pub fn response_table(&self) -> ResponseTable {
        let mut table = ResponseTable::new(self.fallback.clone());
        for spec in &self.intents {
            table.insert(spec.label.clone(), spec.responses.clone());
        }
        table
    }

    /// Labels of every declared intent, in pack order.
    pub fn labels(&self) -> Vec<&str> {
        self.intents.iter().map(|i| i.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pack_parses() {
        let pack = IntentPack::bundled().unwrap();
        assert_eq!(pack.name, "basic");
        assert_eq!(
            pack.labels(),
            vec![
                "greeting",
                "goodbye",
                "thanks",
                "help_request",
                "joke_request",
                "small_talk",
                "weather_inquiry",
                "time_inquiry",
                "location_inquiry",
                "advice_request",
                "feedback",
            ]
        );
        assert_eq!(pack.fallback, DEFAULT_FALLBACK);
        for intent in &pack.intents {
            assert!(!intent.examples.is_empty(), "{} has no examples", intent.label);
            assert!(!intent.responses.is_empty(), "{} has no responses", intent.label);
        }
    }

    #[test]
    fn training_examples_keep_pack_order() {
        let pack = IntentPack::bundled().unwrap();
        let examples = pack.training_examples();
        assert_eq!(examples.len(), 48);
        assert_eq!(
            examples[0],
            TrainingExample {
                text: "Hello".into(),
                intent: "greeting".into()
            }
        );
        assert_eq!(examples[5].intent, "goodbye");
    }

    #[test]
    fn intents_without_examples_are_skipped() {
        let pack = IntentPack::parse(
            r#"
            [pack]
            name = "partial"
            fallback = "Say again?"

            [[intent]]
            label = "greeting"
            examples = ["Hello"]
            responses = ["Hi!"]

            [[intent]]
            label = "orphan"
            responses = ["Never predicted"]
            "#,
        )
        .unwrap();
        let examples = pack.training_examples();
        assert_eq!(examples.len(), 1);
        assert!(examples.iter().all(|e| e.intent == "greeting"));
        assert_eq!(pack.fallback, "Say again?");
    }

    #[test]
    fn duplicate_labels_merge() {
        let pack = IntentPack::parse(
            r#"
            [pack]
            name = "dup"

            [[intent]]
            label = "greeting"
            examples = ["Hello"]

            [[intent]]
            label = "goodbye"
            examples = ["Bye"]

            [[intent]]
            label = "greeting"
            examples = ["Hi"]
            responses = ["Hey"]
            "#,
        )
        .unwrap();
        assert_eq!(pack.labels(), vec!["greeting", "goodbye"]);
        assert_eq!(pack.intents[0].examples, vec!["Hello", "Hi"]);
        assert_eq!(pack.intents[0].responses, vec!["Hey"]);
    }

    #[test]
    fn pack_without_examples_is_rejected() {
        let err = IntentPack::parse(
            r#"
            [pack]
            name = "hollow"

            [[intent]]
            label = "greeting"
            responses = ["Hi"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PackError::Empty { name } if name == "hollow"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = IntentPack::parse("[pack\nname = 1").unwrap_err();
        assert!(matches!(err, PackError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = IntentPack::load(Path::new("/nonexistent/intents.toml")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }

    #[test]
    fn response_table_covers_declared_intents() {
        let pack = IntentPack::bundled().unwrap();
        let table = pack.response_table();
        for label in pack.labels() {
            assert!(table.has_responses(label));
        }
        assert_eq!(table.pool("goodbye").map(|p| p.len()), Some(8));
    }
}
