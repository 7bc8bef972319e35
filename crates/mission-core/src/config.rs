//! Core settings
//!
//! Loaded from TOML. Every field has a default, so a partial file (or an
//! empty one) is valid:
//!
//! ```toml
//! [outline]
//! default_title = "Plan"
//!
//! [render]
//! placeholder = "Nothing yet"
//!
//! [gauge]
//! radius = 90.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gauge::{DirectionPalette, GaugeGeometry};
use crate::outline::DEFAULT_SECTION_TITLE;
use crate::screen::DEFAULT_PLACEHOLDER;
use crate::style::{Palette, StyleTable};

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub outline: OutlineSettings,
    pub render: RenderSettings,
    pub styles: StyleTable,
    pub palette: Palette,
    pub gauge: GaugeGeometry,
    pub directions: DirectionPalette,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?)
    }
}

/// Outline parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSettings {
    /// Title of the fallback section for heading-less plans
    pub default_title: String,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_SECTION_TITLE.to_string(),
        }
    }
}

/// Shared renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Text shown for a section without lines
    pub placeholder: String,
    /// Document language tag
    pub locale: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            locale: "en-US".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.outline.default_title, "Lesson Plan");
        assert_eq!(settings.render.placeholder, "—");
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml_str(
            r##"
[outline]
default_title = "Plan"

[gauge]
radius = 90.0

[palette.accents.teal]
border = "#14b8a6"
background = "#f0fdfa"
text = "#0f766e"
"##,
        )
        .unwrap();
        assert_eq!(settings.outline.default_title, "Plan");
        assert_eq!(settings.gauge.radius, 90.0);
        assert_eq!(settings.gauge.cx, 100.0);
        assert_eq!(settings.palette.colors("teal").text, "#0f766e");
        assert_eq!(settings.render.locale, "en-US");
    }

    #[test]
    fn test_custom_style_rules() {
        let settings = Settings::from_toml_str(
            r#"
[[styles.rules]]
keyword = "warm"
icon = "🔥"
accent = "amber"
"#,
        )
        .unwrap();
        assert_eq!(settings.styles.rules.len(), 1);
        assert_eq!(settings.styles.lookup("Warm-up").icon, "🔥");
        assert_eq!(settings.styles.lookup("Other").icon, "📘");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Settings::from_toml_str("[outline\n").is_err());
    }
}
