//! Consensus signal records
//!
//! A [`Signal`] is one snapshot of the consensus detector for a topic: three
//! source sub-scores in `-100..=100`, and a consensus score in `0..=100`
//! paired with a categorical [`Direction`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market direction of a consensus signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
    Mixed,
    /// Also used for unrecognised direction strings
    #[default]
    #[serde(other)]
    Neutral,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Bullish,
        Direction::Bearish,
        Direction::Mixed,
        Direction::Neutral,
    ];

    /// Decode a stored direction string; unknown values read as neutral
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Mixed => "mixed",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction string is not one of the four known values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signal direction '{}'", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bullish" => Ok(Self::Bullish),
            "bearish" => Ok(Self::Bearish),
            "mixed" => Ok(Self::Mixed),
            "neutral" => Ok(Self::Neutral),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// Conviction of a consensus signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    #[default]
    #[serde(other)]
    Weak,
}

impl Strength {
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

/// The three inputs blended into a consensus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Social,
    News,
    Momentum,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Social, SourceKind::News, SourceKind::Momentum];

    pub fn label(self) -> &'static str {
        match self {
            Self::Social => "Social Sentiment",
            Self::News => "News Coverage",
            Self::Momentum => "Momentum",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Social => "𝕏",
            Self::News => "📰",
            Self::Momentum => "📈",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Social => "X/Twitter discourse",
            Self::News => "Media narrative",
            Self::Momentum => "Price & volume trend",
        }
    }
}

/// One consensus snapshot for a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub topic_name: String,
    pub timestamp: DateTime<Utc>,
    pub social_score: i32,
    #[serde(default)]
    pub social_summary: String,
    pub news_score: i32,
    #[serde(default)]
    pub news_summary: String,
    pub momentum_score: i32,
    #[serde(default)]
    pub momentum_summary: String,
    pub consensus_score: f64,
    pub direction: Direction,
    pub strength: Strength,
    #[serde(default)]
    pub explanation: String,
}

impl Signal {
    /// Sub-score and summary for one source
    pub fn source(&self, kind: SourceKind) -> (i32, &str) {
        match kind {
            SourceKind::Social => (self.social_score, &self.social_summary),
            SourceKind::News => (self.news_score, &self.news_summary),
            SourceKind::Momentum => (self.momentum_score, &self.momentum_summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("bullish".parse::<Direction>(), Ok(Direction::Bullish));
        assert_eq!(" Bearish ".parse::<Direction>(), Ok(Direction::Bearish));
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::parse_lenient("sideways"), Direction::Neutral);
    }

    #[test]
    fn test_unknown_direction_json() {
        let direction: Direction = serde_json::from_str("\"sideways\"").unwrap();
        assert_eq!(direction, Direction::Neutral);
    }

    #[test]
    fn test_signal_decode() {
        let json = r#"{
            "topicName": "NVDA",
            "timestamp": "2025-03-01T09:00:00Z",
            "socialScore": 45,
            "socialSummary": "Upbeat",
            "newsScore": -10,
            "newsSummary": "Mixed coverage",
            "momentumScore": 30,
            "momentumSummary": "Rising volume",
            "consensusScore": 62,
            "direction": "bullish",
            "strength": "moderate",
            "explanation": "Social and momentum agree"
        }"#;
        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.direction, Direction::Bullish);
        assert_eq!(signal.strength, Strength::Moderate);
        assert_eq!(signal.source(SourceKind::News), (-10, "Mixed coverage"));
    }

    #[test]
    fn test_source_meta() {
        assert_eq!(SourceKind::Social.label(), "Social Sentiment");
        assert_eq!(SourceKind::Momentum.description(), "Price & volume trend");
    }
}
