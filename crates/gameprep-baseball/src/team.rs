// Team summary: an opponent's pitching staff at a coarse grain.

use crate::classify::StatsSnapshot;
use crate::normalize::{normalize_pitch_type, Hand};
use crate::stats::{shares, PitchShare, Tally};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    /// Every pitch attributed to the team, pitching or batting.
    pub total_pitches: u32,
    /// Most pitches first, then by name.
    pub pitchers: Vec<TeamPitcherLine>,
    /// Share of the team's own pitches, most used first.
    pub pitch_mix: Vec<PitchShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPitcherLine {
    pub name: String,
    pub hand: Hand,
    pub pitches: u32,
    /// Distinct (date, inning) pairs pitched.
    pub est_innings: u32,
}

#[derive(Default)]
struct PitcherTally<'a> {
    hand: Hand,
    pitches: u32,
    innings: HashSet<(&'a str, &'a str)>,
}

/// `None` when no pitches are attributed to `team`.
pub fn compute_team_summary(snapshot: &StatsSnapshot, team: &str) -> Option<TeamSummary> {
    let rows = snapshot.opponent_teams.get(team).filter(|r| !r.is_empty())?;
    let wanted = team.to_lowercase();

    let mut pitchers: HashMap<&str, PitcherTally> = HashMap::new();
    let mut mix: Tally<u32> = Tally::new();
    for row in rows {
        if !row.pitcher.is_empty() && row.pitcher_team.to_lowercase() == wanted {
            let p = pitchers.entry(row.pitcher.as_str()).or_insert_with(|| PitcherTally {
                hand: Hand::parse(&row.pitcher_hand),
                ..Default::default()
            });
            p.pitches += 1;
            p.innings.insert((row.date.as_str(), row.inning.as_str()));
        }
        if !snapshot.home().is_home(&row.pitcher_team) && !row.pitch_type.trim().is_empty() {
            *mix.entry(&normalize_pitch_type(&row.pitch_type)) += 1;
        }
    }

    let mut lines: Vec<TeamPitcherLine> = pitchers
        .into_iter()
        .map(|(name, t)| TeamPitcherLine {
            name: name.to_string(),
            hand: t.hand,
            pitches: t.pitches,
            est_innings: t.innings.len() as u32,
        })
        .collect();
    lines.sort_by(|a, b| b.pitches.cmp(&a.pitches).then_with(|| a.name.cmp(&b.name)));

    Some(TeamSummary {
        team: team.to_string(),
        total_pitches: rows.len() as u32,
        pitchers: lines,
        pitch_mix: shares(&mix),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::HomeTeam;
    use crate::record::PitchRecord;
    use crate::season::SeasonFilter;

    fn row(pitcher: &str, p_team: &str, b_team: &str, inning: &str, pitch_type: &str) -> PitchRecord {
        PitchRecord {
            date: "4/1/2024".into(),
            inning: inning.into(),
            pitcher: pitcher.into(),
            pitcher_team: p_team.into(),
            pitcher_hand: "L".into(),
            batter: "Someone".into(),
            batter_team: b_team.into(),
            pitch_type: pitch_type.into(),
            ..Default::default()
        }
    }

    fn snapshot(records: &[PitchRecord]) -> StatsSnapshot {
        StatsSnapshot::build(records, &HomeTeam::new("Moeller", "moeller"), SeasonFilter::All)
    }

    #[test]
    fn unknown_team_is_none() {
        let s = snapshot(&[row("Ace", "Elder", "Moeller", "1", "Fastball")]);
        assert!(compute_team_summary(&s, "St. X").is_none());
    }

    #[test]
    fn pitchers_and_innings() {
        let s = snapshot(&[
            row("Ace", "Elder", "Moeller", "1", "fastball"),
            row("Ace", "Elder", "Moeller", "1", "Slider"),
            row("Ace", "Elder", "Moeller", "2", "Fast Ball"),
            row("Pen", "Elder", "Moeller", "7", "Curve"),
            // Elder batting against us.
            row("Doe", "Moeller", "Elder", "3", "Changeup"),
        ]);
        let t = compute_team_summary(&s, "Elder").unwrap();
        assert_eq!(t.total_pitches, 5);
        assert_eq!(t.pitchers.len(), 2);
        assert_eq!(t.pitchers[0].name, "Ace");
        assert_eq!(t.pitchers[0].pitches, 3);
        assert_eq!(t.pitchers[0].est_innings, 2);
        assert_eq!(t.pitchers[0].hand, Hand::Left);
        assert_eq!(t.pitchers[1].est_innings, 1);
    }

    #[test]
    fn pitch_mix_is_normalized_and_excludes_home_pitching() {
        let s = snapshot(&[
            row("Ace", "Elder", "Moeller", "1", "fastball"),
            row("Ace", "Elder", "Moeller", "1", "Fast Ball"),
            row("Ace", "Elder", "Moeller", "1", "Slider"),
            row("Ace", "Elder", "Moeller", "1", "  "),
            row("Doe", "Moeller", "Elder", "3", "Changeup"),
        ]);
        let t = compute_team_summary(&s, "Elder").unwrap();
        assert_eq!(t.pitch_mix.len(), 2);
        assert_eq!(t.pitch_mix[0].pitch_type, "Fastball");
        assert_eq!(t.pitch_mix[0].pct.to_string(), "66.7%");
        assert_eq!(t.pitch_mix[1].pct.to_string(), "33.3%");
    }

    #[test]
    fn ties_order_by_name() {
        let s = snapshot(&[
            row("Zed", "Elder", "Moeller", "1", "Fastball"),
            row("Abe", "Elder", "Moeller", "2", "Fastball"),
        ]);
        let t = compute_team_summary(&s, "Elder").unwrap();
        assert_eq!(t.pitchers[0].name, "Abe");
    }
}
