//! Rich diagnostic error types for intent-chat.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know what went wrong and how
//! to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the chat pipeline.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ChatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Session(#[from] SessionError),
}

// ---------------------------------------------------------------------------
// Classifier errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClassifierError {
    #[error("no training examples: the classifier needs at least one labeled example")]
    #[diagnostic(
        code(chat::classifier::no_examples),
        help("Add at least one intent with one or more example utterances to the intent pack.")
    )]
    NoExamples,

    #[error("empty vocabulary: training examples produced no tokens")]
    #[diagnostic(
        code(chat::classifier::empty_vocabulary),
        help(
            "Every training example normalized to nothing. Examples made only of \
             punctuation or whitespace carry no features; add real words."
        )
    )]
    EmptyVocabulary,

    #[error("training example {position} has length {actual}, expected {expected}")]
    #[diagnostic(
        code(chat::classifier::inconsistent_example),
        help(
            "All training vectors must come from the same fitted vectorizer. \
             Re-vectorize the examples with one vocabulary."
        )
    )]
    InconsistentExample {
        position: usize,
        expected: usize,
        actual: usize,
    },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(chat::classifier::dim_mismatch),
        help(
            "The feature vector was not produced by the vectorizer this model was \
             trained with. Vectorize input with the same fitted vocabulary."
        )
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid smoothing constant: {alpha}")]
    #[diagnostic(
        code(chat::classifier::invalid_smoothing),
        help("The smoothing constant alpha must be finite and strictly positive (default 1.0).")
    )]
    InvalidSmoothing { alpha: f64 },

    #[error("malformed classifier: {reason}")]
    #[diagnostic(
        code(chat::classifier::malformed),
        help(
            "The classifier's tables do not fit together. It was not produced by \
             training; retrain it from an intent pack."
        )
    )]
    Malformed { reason: String },
}

// ---------------------------------------------------------------------------
// Intent pack errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PackError {
    #[error("failed to read intent pack: {path}")]
    #[diagnostic(code(chat::pack::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse intent pack \"{name}\": {message}")]
    #[diagnostic(
        code(chat::pack::parse),
        help(
            "Check the TOML syntax. A pack has a [pack] table with a `name` and one \
             [[intent]] table per intent with `label`, `examples`, and `responses`."
        )
    )]
    Parse { name: String, message: String },

    #[error("intent pack \"{name}\" has no trainable examples")]
    #[diagnostic(
        code(chat::pack::empty),
        help("Give at least one [[intent]] a non-empty `examples` list.")
    )]
    Empty { name: String },
}

// ---------------------------------------------------------------------------
// Model persistence errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("I/O error on model file {path}: {source}")]
    #[diagnostic(
        code(chat::model::io),
        help(
            "A filesystem operation failed. Check that the directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(chat::model::serde),
        help(
            "Failed to serialize or deserialize the model. The file may be corrupted \
             or written by an incompatible version. Retrain with `intent-chat train`."
        )
    )]
    Serialization { message: String },

    #[error("model is inconsistent: vocabulary has {vocabulary} tokens, classifier expects {classifier}")]
    #[diagnostic(
        code(chat::model::inconsistent),
        help("The vectorizer and classifier were not trained together. Retrain the model.")
    )]
    Inconsistent { vocabulary: usize, classifier: usize },

    #[error("model file holds an unusable classifier: {source}")]
    #[diagnostic(
        code(chat::model::corrupt),
        help("The file decoded but its contents are damaged. Retrain with `intent-chat train`.")
    )]
    Corrupt {
        #[source]
        source: ClassifierError,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(code(chat::config::read), help("Ensure the file exists and is readable."))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file: {path}")]
    #[diagnostic(
        code(chat::config::write),
        help("Check that the parent directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    #[diagnostic(
        code(chat::config::parse),
        help("Check the TOML syntax. Known keys: alpha, intents, fallback, seed, bot_name, prompt.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config for {path}: {message}")]
    #[diagnostic(
        code(chat::config::serialize),
        help("Every config value must be representable in TOML; paths must be valid UTF-8.")
    )]
    Serialize { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("chat I/O failed: {source}")]
    #[diagnostic(
        code(chat::session::io),
        help("Reading input or writing a response failed. Check that the terminal or pipe is still open.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning chat results.
pub type ChatResult<T> = std::result::Result<T, ChatError>;

pub type ClassifierResult<T> = std::result::Result<T, ClassifierError>;

pub type PackResult<T> = std::result::Result<T, PackError>;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
