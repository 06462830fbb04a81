//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use invx_core::models::{ExtractionMode, InvxConfig};
use invx_core::{LineItemExtractor, LlmExtractor, LocalParser};

use crate::remote::OpenAiClient;

/// Extractor choice on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Vendor grammars and generic heuristic, offline
    Local,
    /// Chat-completion model (needs an API key)
    Ai,
}

impl From<ModeArg> for ExtractionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Local => ExtractionMode::Local,
            ModeArg::Ai => ExtractionMode::Ai,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invx")
        .join("config.json")
}

/// Load the config named on the command line, else the default file if
/// present, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvxConfig> {
    if let Some(path) = config_path {
        return Ok(InvxConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        Ok(InvxConfig::from_file(&default_path)?)
    } else {
        Ok(InvxConfig::default())
    }
}

/// Build the extractor for the effective mode.
pub fn build_extractor(
    config: &InvxConfig,
    mode: Option<ModeArg>,
    api_key: Option<String>,
) -> anyhow::Result<Box<dyn LineItemExtractor>> {
    let mode = mode.map(ExtractionMode::from).unwrap_or(config.extraction.mode);

    match mode {
        ExtractionMode::Local => Ok(Box::new(LocalParser::from_config(&config.extraction))),
        ExtractionMode::Ai => {
            let api_key = match api_key {
                Some(key) => key,
                None => std::env::var(&config.llm.api_key_env).map_err(|_| {
                    anyhow::anyhow!(
                        "AI mode needs an API key: pass --api-key or set {}",
                        config.llm.api_key_env
                    )
                })?,
            };
            let client = OpenAiClient::new(&config.llm, api_key)?;
            Ok(Box::new(LlmExtractor::new(client)))
        }
    }
}
