//! Section style tables
//!
//! Pure lookup tables handed to renderers: [`StyleTable`] maps a section
//! title to an icon and accent name, [`Palette`] maps an accent name to
//! concrete colours. Both load from TOML and have built-in defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Icon and accent for one title keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStyle {
    /// Case-insensitive substring matched against the section title
    pub keyword: String,
    pub icon: String,
    pub accent: String,
}

impl SectionStyle {
    pub fn new(keyword: &str, icon: &str, accent: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            icon: icon.to_string(),
            accent: accent.to_string(),
        }
    }
}

/// Title keyword to style lookup, first match wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub rules: Vec<SectionStyle>,
    /// Used when no keyword matches
    pub fallback: SectionStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            rules: vec![
                SectionStyle::new("objective", "🎯", "blue"),
                SectionStyle::new("material", "🧰", "amber"),
                SectionStyle::new("outline", "🗓️", "violet"),
                SectionStyle::new("assessment", "✅", "emerald"),
                SectionStyle::new("differentiation", "🧩", "pink"),
                SectionStyle::new("homework", "📝", "sky"),
                SectionStyle::new("extension", "🚀", "sky"),
                SectionStyle::new("standard", "📐", "blue"),
            ],
            fallback: SectionStyle::new("", "📘", "zinc"),
        }
    }
}

impl StyleTable {
    /// Style for a section title
    pub fn lookup(&self, title: &str) -> &SectionStyle {
        let title = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| !rule.keyword.is_empty() && title.contains(&rule.keyword.to_lowercase()))
            .unwrap_or(&self.fallback)
    }
}

/// Concrete colours for one accent, as `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColors {
    pub border: String,
    pub background: String,
    pub text: String,
}

impl AccentColors {
    pub fn new(border: &str, background: &str, text: &str) -> Self {
        Self {
            border: border.to_string(),
            background: background.to_string(),
            text: text.to_string(),
        }
    }

    /// Text colour without the leading `#`, as OOXML wants it
    pub fn text_hex(&self) -> &str {
        self.text.trim_start_matches('#')
    }
}

/// Accent name to colour lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub accents: BTreeMap<String, AccentColors>,
    pub fallback: AccentColors,
}

impl Default for Palette {
    fn default() -> Self {
        let accents = [
            ("blue", AccentColors::new("#3b82f6", "#eff6ff", "#1d4ed8")),
            ("amber", AccentColors::new("#f59e0b", "#fffbeb", "#b45309")),
            ("violet", AccentColors::new("#8b5cf6", "#f5f3ff", "#6d28d9")),
            ("emerald", AccentColors::new("#10b981", "#ecfdf5", "#047857")),
            ("pink", AccentColors::new("#ec4899", "#fdf2f8", "#be185d")),
            ("sky", AccentColors::new("#0ea5e9", "#f0f9ff", "#0369a1")),
        ]
        .into_iter()
        .map(|(name, colors)| (name.to_string(), colors))
        .collect();

        Self {
            accents,
            fallback: AccentColors::new("#71717a", "#fafafa", "#3f3f46"),
        }
    }
}

impl Palette {
    pub fn colors(&self, accent: &str) -> &AccentColors {
        self.accents.get(accent).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = StyleTable::default();
        assert_eq!(table.lookup("Learning OBJECTIVES").accent, "blue");
        assert_eq!(table.lookup("Materials Needed").icon, "🧰");
    }

    #[test]
    fn test_lookup_fallback() {
        let table = StyleTable::default();
        assert_eq!(table.lookup("Closing Thoughts").accent, "zinc");
    }

    #[test]
    fn test_first_rule_wins() {
        let table = StyleTable {
            rules: vec![
                SectionStyle::new("plan", "1", "blue"),
                SectionStyle::new("lesson", "2", "pink"),
            ],
            ..Default::default()
        };
        assert_eq!(table.lookup("Lesson Plan").icon, "1");
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.colors("emerald").border, "#10b981");
        assert_eq!(palette.colors("zinc").text_hex(), "3f3f46");
    }
}
