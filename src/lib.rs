// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # intent-chat
//!
//! A small intent-classification chatbot. An utterance is normalized,
//! counted against a fitted vocabulary, and classified by multinomial Naive
//! Bayes; the predicted intent selects a response from a configured pool.
//!
//! ## Architecture
//!
//! - **Normalization** (`normalize`): NFKC folding, lowercasing, punctuation stripping
//! - **Vectorization** (`vectorize`): first-seen vocabulary, bag-of-words counts
//! - **Classification** (`classifier`): Laplace-smoothed multinomial Naive Bayes
//! - **Responses** (`respond`): pool lookup with fallback, injectable randomness
//! - **Intent packs** (`pack`): TOML training corpora and response tables
//! - **Pipeline** (`pipeline`): utterance in, response out
//!
//! ## Library usage
//!
//! ```no_run
//! use intent_chat::classifier::DEFAULT_ALPHA;
//! use intent_chat::pack::IntentPack;
//! use intent_chat::pipeline::ChatPipeline;
//!
//! let pack = IntentPack::bundled().unwrap();
//! let pipeline = ChatPipeline::from_pack(&pack, DEFAULT_ALPHA).unwrap();
//! let mut rng = rand::thread_rng();
//! println!("{}", pipeline.respond("Hi there!", &mut rng).unwrap());
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pack;
pub mod pipeline;
pub mod respond;
pub mod session;
pub mod vectorize;
