//! Consensus signal gauge
//!
//! Maps a consensus score (`0..=100`) and a [`Direction`] onto a
//! semicircular gauge. Angles are in the gauge frame: `0` is full bear
//! (left), `90` is centre (up), `180` is full bull (right).
//!
//! ```
//! use mission_ast::Direction;
//! use mission_core::gauge::{needle_angle, needle_offset};
//!
//! assert_eq!(needle_offset(50.0, Direction::Bullish), 45.0);
//! assert_eq!(needle_angle(50.0, Direction::Bearish), 45.0);
//! ```

use mission_ast::{Direction, Strength};
use serde::{Deserialize, Serialize};

/// Scores at or below this draw no fill arc
pub const MIN_FILL_SCORE: f64 = 2.0;

/// Gauge centre angle
pub const CENTER_ANGLE: f64 = 90.0;

/// Maximum needle swing for a mixed signal
pub const MIXED_WOBBLE: f64 = 20.0;

/// Degrees from centre for a score and direction.
///
/// Bearish is never positive, bullish never negative, neutral always zero.
/// Mixed always wobbles towards bull regardless of the sub-scores.
pub fn needle_offset(score: f64, direction: Direction) -> f64 {
    let pct = clamp_score(score) / 100.0;
    match direction {
        Direction::Bullish => pct * 90.0,
        Direction::Bearish => -pct * 90.0,
        Direction::Mixed => pct * MIXED_WOBBLE,
        Direction::Neutral => 0.0,
    }
}

/// Needle angle in the gauge frame
pub fn needle_angle(score: f64, direction: Direction) -> f64 {
    CENTER_ANGLE + needle_offset(score, direction)
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Angular span of the filled arc, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillArc {
    pub start: f64,
    pub end: f64,
}

/// The filled arc for a reading, or `None` when the score is too weak.
///
/// The arc starts at centre. For bearish signals the sweep is flipped:
/// it runs from `90 - offset` back to centre.
pub fn fill_arc(score: f64, direction: Direction) -> Option<FillArc> {
    if clamp_score(score) <= MIN_FILL_SCORE {
        return None;
    }
    let offset = needle_offset(score, direction);
    let (from, to) = match direction {
        Direction::Bearish => (CENTER_ANGLE - offset, CENTER_ANGLE),
        _ => (CENTER_ANGLE, CENTER_ANGLE + offset),
    };
    Some(FillArc {
        start: from.min(to),
        end: from.max(to),
    })
}

/// SVG geometry of the gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke: f64,
    /// How far the needle tip stops short of the arc
    pub needle_inset: f64,
}

impl Default for GaugeGeometry {
    fn default() -> Self {
        Self {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
            stroke: 18.0,
            needle_inset: 8.0,
        }
    }
}

impl GaugeGeometry {
    /// Point on a circle of `radius` at a gauge-frame angle
    pub fn point(&self, angle_deg: f64, radius: f64) -> (f64, f64) {
        let rad = (180.0 - angle_deg).to_radians();
        (self.cx + radius * rad.cos(), self.cy - radius * rad.sin())
    }

    /// SVG path for the arc between two gauge-frame angles
    pub fn arc_path(&self, start_deg: f64, end_deg: f64, radius: f64) -> String {
        let (x1, y1) = self.point(start_deg, radius);
        let (x2, y2) = self.point(end_deg, radius);
        format!(
            "M {} {} A {} {} 0 0 1 {} {}",
            coord(x1),
            coord(y1),
            coord(radius),
            coord(radius),
            coord(x2),
            coord(y2)
        )
    }

    /// Needle tip for a gauge-frame angle
    pub fn needle_tip(&self, angle_deg: f64) -> (f64, f64) {
        self.point(angle_deg, self.radius - self.needle_inset)
    }
}

/// Format a coordinate with at most two decimals
fn coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Colours for one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionColors {
    /// Needle and arc colour
    pub fill: String,
    /// Soft glow behind the score
    pub glow: String,
}

/// Direction to colour lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionPalette {
    pub bullish: DirectionColors,
    pub bearish: DirectionColors,
    pub mixed: DirectionColors,
    pub neutral: DirectionColors,
}

impl Default for DirectionPalette {
    fn default() -> Self {
        let colors = |fill: &str, glow: &str| DirectionColors {
            fill: fill.to_string(),
            glow: glow.to_string(),
        };
        Self {
            bullish: colors("#10b981", "rgba(16,185,129,0.4)"),
            bearish: colors("#ef4444", "rgba(239,68,68,0.4)"),
            mixed: colors("#f59e0b", "rgba(245,158,11,0.4)"),
            neutral: colors("#71717a", "rgba(113,113,122,0.3)"),
        }
    }
}

impl DirectionPalette {
    pub fn colors(&self, direction: Direction) -> &DirectionColors {
        match direction {
            Direction::Bullish => &self.bullish,
            Direction::Bearish => &self.bearish,
            Direction::Mixed => &self.mixed,
            Direction::Neutral => &self.neutral,
        }
    }
}

/// Light or dark gauge chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeTheme {
    #[default]
    Light,
    Dark,
}

impl GaugeTheme {
    fn track(self) -> &'static str {
        match self {
            Self::Light => "#e4e4e7",
            Self::Dark => "#27272a",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Light => "#a1a1aa",
            Self::Dark => "#52525b",
        }
    }

    fn dot(self) -> &'static str {
        match self {
            Self::Light => "#d4d4d8",
            Self::Dark => "#3f3f46",
        }
    }
}

/// Everything needed to draw one gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeReading {
    pub score: f64,
    pub direction: Direction,
    pub offset: f64,
    pub angle: f64,
    pub tip: (f64, f64),
    pub fill: Option<FillArc>,
    pub fill_path: Option<String>,
    pub color: String,
    #[serde(skip)]
    geometry: GaugeGeometry,
    #[serde(skip)]
    theme: GaugeTheme,
}

impl GaugeReading {
    /// Reading with default geometry and colours
    pub fn new(score: f64, direction: Direction) -> Self {
        Self::with(
            score,
            direction,
            GaugeGeometry::default(),
            &DirectionPalette::default(),
        )
    }

    pub fn with(
        score: f64,
        direction: Direction,
        geometry: GaugeGeometry,
        palette: &DirectionPalette,
    ) -> Self {
        let offset = needle_offset(score, direction);
        let angle = CENTER_ANGLE + offset;
        let fill = fill_arc(score, direction);
        Self {
            score: clamp_score(score),
            direction,
            offset,
            angle,
            tip: geometry.needle_tip(angle),
            fill,
            fill_path: fill.map(|arc| geometry.arc_path(arc.start, arc.end, geometry.radius)),
            color: palette.colors(direction).fill.clone(),
            geometry,
            theme: GaugeTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: GaugeTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Standalone SVG drawing of the gauge
    pub fn to_svg(&self) -> String {
        let g = &self.geometry;
        let (cx, cy) = (coord(g.cx), coord(g.cy));
        let width = coord(g.cx * 2.0);
        let height = coord(g.cy + 15.0);
        let label = self.theme.label();
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = width,
            h = height
        ));
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>\n",
            g.arc_path(0.0, 180.0, g.radius),
            self.theme.track(),
            coord(g.stroke)
        ));
        for (x, y, text) in [
            (g.cx - 86.0, g.cy + 8.0, "BEAR"),
            (g.cx, g.cy - 78.0, "NEUTRAL"),
            (g.cx + 86.0, g.cy + 8.0, "BULL"),
        ] {
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"9\" fill=\"{}\" text-anchor=\"middle\">{}</text>\n",
                coord(x),
                coord(y),
                label,
                text
            ));
        }
        if let Some(path) = &self.fill_path {
            svg.push_str(&format!(
                "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>\n",
                path,
                self.color,
                coord(g.stroke)
            ));
        }
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"3\" fill=\"{}\"/>\n",
            cx,
            cy,
            self.theme.dot()
        ));
        svg.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"2.5\" stroke-linecap=\"round\"/>\n",
            cx,
            cy,
            coord(self.tip.0),
            coord(self.tip.1),
            self.color
        ));
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"5\" fill=\"{}\" opacity=\"0.9\"/>\n",
            cx, cy, self.color
        ));
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"4\" fill=\"{}\" opacity=\"0.3\"/>\n",
            coord(self.tip.0),
            coord(self.tip.1),
            self.color
        ));
        svg.push_str("</svg>\n");
        svg
    }
}

/// `Strong · 72` style label
pub fn strength_label(strength: Strength, score: f64) -> String {
    format!("{} · {}", strength.label(), score.round() as i64)
}

/// Tone of a single source sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTone {
    Bullish,
    Bearish,
    Neutral,
}

impl SourceTone {
    /// Sub-scores within 20 of zero read as neutral
    pub fn for_score(score: i32) -> Self {
        if score >= 20 {
            Self::Bullish
        } else if score <= -20 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Bullish => "#10b981",
            Self::Bearish => "#ef4444",
            Self::Neutral => "#f59e0b",
        }
    }
}

/// Centred bar for a source sub-score in `-100..=100`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBar {
    pub score: i32,
    pub tone: SourceTone,
    /// Score mapped onto `0..=100`
    pub position_pct: f64,
    /// Left edge of the fill, percent of bar width
    pub left_pct: f64,
    /// Fill width, percent of bar width
    pub width_pct: f64,
}

impl SourceBar {
    pub fn from_score(score: i32) -> Self {
        let score = score.clamp(-100, 100);
        let position_pct = f64::from(score + 100) / 2.0;
        Self {
            score,
            tone: SourceTone::for_score(score),
            position_pct,
            left_pct: if score >= 0 { 50.0 } else { position_pct },
            width_pct: f64::from(score.abs()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_by_direction() {
        assert_eq!(needle_offset(100.0, Direction::Bullish), 90.0);
        assert_eq!(needle_offset(100.0, Direction::Bearish), -90.0);
        assert_eq!(needle_offset(50.0, Direction::Mixed), 10.0);
        assert_eq!(needle_offset(80.0, Direction::Neutral), 0.0);
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(needle_offset(250.0, Direction::Bullish), 90.0);
        assert_eq!(needle_offset(-40.0, Direction::Bearish), 0.0);
        assert_eq!(needle_offset(f64::NAN, Direction::Bullish), 0.0);
    }

    #[test]
    fn test_fill_suppressed_for_weak_scores() {
        assert!(fill_arc(2.0, Direction::Bullish).is_none());
        assert!(fill_arc(0.0, Direction::Bearish).is_none());
        assert!(fill_arc(2.5, Direction::Bullish).is_some());
    }

    #[test]
    fn test_fill_spans() {
        let bull = fill_arc(50.0, Direction::Bullish).unwrap();
        assert_eq!((bull.start, bull.end), (90.0, 135.0));

        let bear = fill_arc(50.0, Direction::Bearish).unwrap();
        assert_eq!((bear.start, bear.end), (90.0, 135.0));

        let neutral = fill_arc(50.0, Direction::Neutral).unwrap();
        assert_eq!((neutral.start, neutral.end), (90.0, 90.0));
    }

    #[test]
    fn test_arc_path_track() {
        let g = GaugeGeometry::default();
        assert_eq!(g.arc_path(0.0, 180.0, 80.0), "M 20 100 A 80 80 0 0 1 180 100");
    }

    #[test]
    fn test_needle_tip() {
        let g = GaugeGeometry::default();
        let (x, y) = g.needle_tip(90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 28.0).abs() < 1e-9);

        let (x, y) = g.needle_tip(180.0);
        assert!((x - 172.0).abs() < 1e-9);
        assert!((y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_coord_format() {
        assert_eq!(coord(20.0), "20");
        assert_eq!(coord(100.00000000000001), "100");
        assert_eq!(coord(43.456), "43.46");
        assert_eq!(coord(-0.001), "0");
    }

    #[test]
    fn test_reading_svg() {
        let reading = GaugeReading::new(72.0, Direction::Bullish);
        assert_eq!(reading.color, "#10b981");
        let svg = reading.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("BULL"));
        assert_eq!(svg.matches("<path").count(), 2);

        let weak = GaugeReading::new(1.0, Direction::Bullish).to_svg();
        assert_eq!(weak.matches("<path").count(), 1);
        assert!(weak.contains("<line"));
    }

    #[test]
    fn test_dark_theme_track() {
        let svg = GaugeReading::new(40.0, Direction::Mixed)
            .with_theme(GaugeTheme::Dark)
            .to_svg();
        assert!(svg.contains("#27272a"));
    }

    #[test]
    fn test_strength_label() {
        assert_eq!(strength_label(Strength::Strong, 72.0), "Strong · 72");
        assert_eq!(strength_label(Strength::Weak, 3.4), "Weak · 3");
    }

    #[test]
    fn test_source_bar() {
        let bar = SourceBar::from_score(-40);
        assert_eq!(bar.tone, SourceTone::Bearish);
        assert_eq!(bar.position_pct, 30.0);
        assert_eq!(bar.left_pct, 30.0);
        assert_eq!(bar.width_pct, 20.0);

        let bar = SourceBar::from_score(10);
        assert_eq!(bar.tone, SourceTone::Neutral);
        assert_eq!(bar.left_pct, 50.0);
        assert_eq!(bar.width_pct, 5.0);

        assert_eq!(SourceBar::from_score(20).tone, SourceTone::Bullish);
        assert_eq!(SourceBar::from_score(500).score, 100);
    }
}
