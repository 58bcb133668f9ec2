// Canonical vocabularies for free-text charting fields.
//
// `normalize_pitch_type` is the only place pitch-type labels are decided;
// profiles, team summaries and notes all go through it.

use serde::{Serialize, Serializer};
use std::fmt;

/// Label used when a pitch type is blank.
pub const UNKNOWN_PITCH: &str = "Unknown";

/// How a raw, lowercased pitch type is compared against a rule's pattern.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Contains(&'static str),
    Exact(&'static str),
}

/// Ordered rules; the first match wins.
const PITCH_TYPE_RULES: &[(Rule, &str)] = &[
    (Rule::Contains("two seam"), "Two Seam"),
    (Rule::Exact("2 seam fast ball"), "Two Seam"),
    (Rule::Contains("cut"), "Cutter"),
    (Rule::Exact("fast ball"), "Fastball"),
    (Rule::Exact("fastball"), "Fastball"),
    (Rule::Exact("slider"), "Slider"),
    (Rule::Exact("curveball"), "Curveball"),
    (Rule::Exact("curve"), "Curveball"),
    (Rule::Exact("breaking ball"), "Breaking Ball"),
    (Rule::Exact("change up"), "Changeup"),
    (Rule::Exact("changeup"), "Changeup"),
    (Rule::Exact("splitter"), "Splitter"),
];

/// Map a charted pitch type onto the canonical label set.
///
/// Matching is case-insensitive on the trimmed input. Unmatched input is
/// passed through (trimmed); blank input becomes `"Unknown"`.
pub fn normalize_pitch_type(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_PITCH.to_string();
    }
    let t = trimmed.to_lowercase();
    for (rule, label) in PITCH_TYPE_RULES {
        let hit = match rule {
            Rule::Contains(p) => t.contains(p),
            Rule::Exact(p) => t == *p,
        };
        if hit {
            return (*label).to_string();
        }
    }
    trimmed.to_string()
}

// ---------------------------------------------------------------------------
// Home team marker
// ---------------------------------------------------------------------------

/// The user's own team: a display name plus the case-insensitive pattern
/// that identifies it in team-name columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeTeam {
    pub name: String,
    marker: String,
}

impl HomeTeam {
    pub fn new(name: impl Into<String>, marker: impl AsRef<str>) -> Self {
        Self {
            name: name.into(),
            marker: marker.as_ref().trim().to_lowercase(),
        }
    }

    /// True if `team` contains the home marker, ignoring case.
    pub fn is_home(&self, team: &str) -> bool {
        !self.marker.is_empty() && team.to_lowercase().contains(&self.marker)
    }

    /// Lowercased marker, for keyword checks on lowercased questions.
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

// ---------------------------------------------------------------------------
// Handedness
// ---------------------------------------------------------------------------

/// Throwing or batting hand. Serializes as the charted letter ("R", "L")
/// or an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hand {
    Right,
    Left,
    #[default]
    Unknown,
}

impl Hand {
    /// Parse a charted hand ("R", "l", " R "). Anything else is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "R" => Hand::Right,
            "L" => Hand::Left,
            _ => Hand::Unknown,
        }
    }

    /// Platoon splits put right-handers on one side and everyone else
    /// (left, switch, unknown) on the other.
    pub fn is_right(&self) -> bool {
        matches!(self, Hand::Right)
    }

    pub fn pitcher_label(&self) -> &'static str {
        match self {
            Hand::Right => "RHP",
            Hand::Left => "LHP",
            Hand::Unknown => "?",
        }
    }

    pub fn hitter_label(&self) -> &'static str {
        match self {
            Hand::Right => "RHH",
            Hand::Left => "LHH",
            Hand::Unknown => "?",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Hand::Right => "R",
            Hand::Left => "L",
            Hand::Unknown => "",
        };
        f.write_str(s)
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastball_variants() {
        assert_eq!(normalize_pitch_type("fastball"), "Fastball");
        assert_eq!(normalize_pitch_type(" Fast Ball "), "Fastball");
        assert_eq!(normalize_pitch_type("FASTBALL"), "Fastball");
    }

    #[test]
    fn two_seam_wins_over_fastball() {
        assert_eq!(normalize_pitch_type("Two Seam Fastball"), "Two Seam");
        assert_eq!(normalize_pitch_type("2 Seam Fast Ball"), "Two Seam");
    }

    #[test]
    fn substring_rules() {
        assert_eq!(normalize_pitch_type("Cut Fastball"), "Cutter");
        assert_eq!(normalize_pitch_type("cutter"), "Cutter");
    }

    #[test]
    fn exact_rules_do_not_match_substrings() {
        // "slider" is an exact rule, so a longer label passes through.
        assert_eq!(normalize_pitch_type("Slider/Sweeper"), "Slider/Sweeper");
        assert_eq!(normalize_pitch_type("Curve"), "Curveball");
        assert_eq!(normalize_pitch_type("change up"), "Changeup");
        assert_eq!(normalize_pitch_type("Breaking Ball"), "Breaking Ball");
        assert_eq!(normalize_pitch_type("splitter"), "Splitter");
    }

    #[test]
    fn unmatched_passes_through_trimmed() {
        assert_eq!(normalize_pitch_type("Knuckleball"), "Knuckleball");
        assert_eq!(normalize_pitch_type("  Knuckleball "), "Knuckleball");
    }

    #[test]
    fn blank_is_unknown() {
        assert_eq!(normalize_pitch_type(""), "Unknown");
        assert_eq!(normalize_pitch_type("   "), "Unknown");
    }

    #[test]
    fn home_marker_is_case_insensitive_substring() {
        let home = HomeTeam::new("Moeller", "Moeller");
        assert!(home.is_home("Moeller"));
        assert!(home.is_home("Archbishop MOELLER HS"));
        assert!(!home.is_home("Elder"));
        assert!(!home.is_home(""));
    }

    #[test]
    fn empty_marker_matches_nothing() {
        let home = HomeTeam::new("Us", "  ");
        assert!(!home.is_home("Anyone"));
    }

    #[test]
    fn hand_parsing() {
        assert_eq!(Hand::parse("R"), Hand::Right);
        assert_eq!(Hand::parse(" l "), Hand::Left);
        assert_eq!(Hand::parse("S"), Hand::Unknown);
        assert!(!Hand::parse("").is_right());
        assert_eq!(Hand::Left.pitcher_label(), "LHP");
        assert_eq!(Hand::Right.hitter_label(), "RHH");
    }
}
