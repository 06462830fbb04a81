//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::InvxError;

/// Main configuration for invx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvxConfig {
    /// Line-item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Remote language-model configuration.
    pub llm: LlmConfig,

    /// Input discovery configuration.
    pub input: InputConfig,
}

/// Which extractor turns document text into line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Vendor grammars plus the generic heuristic, no network.
    #[default]
    Local,
    /// A chat-completion model returns the items as JSON.
    Ai,
}

/// Line-item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extractor to use.
    pub mode: ExtractionMode,

    /// Currency for vendor-grammar items when none is detected.
    pub vendor_default_currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::Local,
            vendor_default_currency: "NOK".to_string(),
        }
    }
}

/// Remote language-model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat model name.
    pub model: String,

    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Input discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Document extensions picked up from directories and archives.
    pub extensions: Vec<String>,

    /// File name prefixes to ignore (macOS resource forks).
    pub skip_prefixes: Vec<String>,

    /// Path components to ignore.
    pub skip_dirs: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: ["pdf", "png", "jpg", "jpeg", "tif", "tiff", "webp", "txt"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            skip_prefixes: vec!["._".to_string()],
            skip_dirs: vec!["__MACOSX".to_string()],
        }
    }
}

impl InputConfig {
    /// Whether a path sits in a skipped directory or has a skipped prefix
    /// (`__MACOSX/`, `._name`), whatever its extension.
    pub fn is_junk(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        if normalized
            .split('/')
            .any(|part| self.skip_dirs.iter().any(|d| d == part))
        {
            return true;
        }

        let file_name = normalized.rsplit('/').next().unwrap_or("");
        self.skip_prefixes.iter().any(|p| file_name.starts_with(p.as_str()))
    }

    /// Whether a path (as written in a directory listing or archive) is a
    /// document worth processing.
    pub fn accepts(&self, path: &str) -> bool {
        if self.is_junk(path) {
            return false;
        }

        let normalized = path.replace('\\', "/");
        let file_name = normalized.rsplit('/').next().unwrap_or("");
        match file_name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

impl InvxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InvxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
