//! Chat configuration, persisted as TOML.
//!
//! Every key is optional. Resolution order: command-line flags, then the
//! config file, then the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::DEFAULT_ALPHA;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Additive smoothing constant for the classifier.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// External intent pack. `None` uses the bundled pack.
    #[serde(default)]
    pub intents: Option<PathBuf>,
    /// Overrides the pack's fallback response.
    #[serde(default)]
    pub fallback: Option<String>,
    /// Seed for reproducible response selection. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Name the REPL prints before each response.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Prompt printed before reading each line.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}
fn default_bot_name() -> String {
    "Chatbot".into()
}
fn default_prompt() -> String {
    "You: ".into()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            intents: None,
            fallback: None,
            seed: None,
            bot_name: default_bot_name(),
            prompt: default_prompt(),
        }
    }
}

impl ChatConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
