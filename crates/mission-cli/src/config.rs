//! CLI configuration
//!
//! One TOML file carries both the core [`Settings`] tables and a `[deck]`
//! table for slide export:
//!
//! ```toml
//! [outline]
//! default_title = "Plan"
//!
//! [render]
//! placeholder = "Nothing yet"
//!
//! [deck.content]
//! max_lines_per_slide = 6
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use mission_core::Settings;
use mission_pptx::DeckContract;
use serde::{Deserialize, Serialize};

/// Settings for every command
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub settings: Settings,
    pub deck: DeckContract,
}

impl AppConfig {
    /// Parse and validate a TOML string
    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).context("Invalid configuration")?;
        config
            .deck
            .validate()
            .context("Invalid [deck] configuration")?;
        Ok(config)
    }

    /// Load from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Config from an optional path; defaults when absent
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
