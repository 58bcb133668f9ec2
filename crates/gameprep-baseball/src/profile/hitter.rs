// Hitter profile: the same pitches seen from the batter's box.

use super::{sample_warning, PaTracker};
use crate::normalize::{normalize_pitch_type, Hand};
use crate::pitch::{is_swing, is_whiff, AttackZone, CountSituation};
use crate::record::PitchRecord;
use crate::stats::{Average, Percent, Tally};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitterProfile {
    pub name: String,
    pub hand: Hand,
    /// Set when the profile is handed out with its team attached (e.g. an
    /// opponent batter lookup).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub total_pitches: u32,
    pub total_pa: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub avg: Average,
    pub k_rate: Percent,
    pub bb_rate: Percent,
    pub chase_pitches: u32,
    pub chase_swings: u32,
    pub chase_rate: Percent,
    /// Most seen first.
    pub results_by_pitch_type: Vec<PitchTypeResult>,
    pub vs_rhp: HandSplit,
    pub vs_lhp: HandSplit,
    /// Every situation is present, keyed by the count on the pitch that
    /// ended the plate appearance.
    pub by_count: BTreeMap<CountSituation, CountLine>,
    pub sample_warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PitchTypeResult {
    pub pitch_type: String,
    pub pitches: u32,
    pub swings: u32,
    pub whiffs: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub chase_pitches: u32,
    pub chase_swings: u32,
    pub avg: Average,
    pub whiff_rate: Percent,
    pub chase_rate: Percent,
}

/// Results against one pitcher handedness. `k_rate` is per at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandSplit {
    pub at_bats: u32,
    pub hits: u32,
    pub strikeouts: u32,
    pub avg: Average,
    pub k_rate: Percent,
}

/// Results of plate appearances that ended in a count situation. `k_rate`
/// is per at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountLine {
    pub at_bats: u32,
    pub hits: u32,
    pub strikeouts: u32,
    pub avg: Average,
    pub k_rate: Percent,
}

#[derive(Debug, Default, Clone, Copy)]
struct AbTally {
    at_bats: u32,
    hits: u32,
    strikeouts: u32,
}

impl AbTally {
    fn split(&self) -> HandSplit {
        HandSplit {
            at_bats: self.at_bats,
            hits: self.hits,
            strikeouts: self.strikeouts,
            avg: Average::of(self.hits, self.at_bats),
            k_rate: Percent::of(self.strikeouts, self.at_bats),
        }
    }

    fn line(&self) -> CountLine {
        CountLine {
            at_bats: self.at_bats,
            hits: self.hits,
            strikeouts: self.strikeouts,
            avg: Average::of(self.hits, self.at_bats),
            k_rate: Percent::of(self.strikeouts, self.at_bats),
        }
    }
}

/// Fold one hitter's pitches into a profile. `None` for no pitches.
pub fn compute_hitter_profile(pitches: &[PitchRecord], name: &str, hand: Hand) -> Option<HitterProfile> {
    if pitches.is_empty() {
        return None;
    }

    let mut types: Tally<PitchTypeResult> = Tally::new();
    let (mut chase_pitches, mut chase_swings) = (0u32, 0u32);
    let mut pas = PaTracker::new();
    let (mut at_bats, mut hits, mut ks, mut bbs) = (0u32, 0u32, 0u32, 0u32);
    let mut vs_rhp = AbTally::default();
    let mut vs_lhp = AbTally::default();
    let mut by_count: BTreeMap<CountSituation, AbTally> = CountSituation::ALL
        .iter()
        .map(|s| (*s, AbTally::default()))
        .collect();

    for row in pitches {
        let pt = normalize_pitch_type(&row.pitch_type);
        let swing = is_swing(&row.pitch_result);

        let t = types.entry(&pt);
        t.pitches += 1;
        if swing {
            t.swings += 1;
        }
        if is_whiff(&row.pitch_result) {
            t.whiffs += 1;
        }
        if AttackZone::parse(&row.attack_zone).is_some_and(|z| z.is_chase()) {
            chase_pitches += 1;
            t.chase_pitches += 1;
            if swing {
                chase_swings += 1;
                t.chase_swings += 1;
            }
        }

        let Some(outcome) = pas.outcome(row) else {
            continue;
        };
        let official = outcome.is_official_at_bat();
        let hit = outcome.is_hit();
        let k = outcome.is_strikeout();

        if official {
            at_bats += 1;
            t.at_bats += 1;
        }
        if hit {
            hits += 1;
            t.hits += 1;
        }
        if k {
            ks += 1;
        }
        if outcome.is_walk() {
            bbs += 1;
        }

        let split = if Hand::parse(&row.pitcher_hand).is_right() {
            &mut vs_rhp
        } else {
            &mut vs_lhp
        };
        let situations = CountSituation::for_count(row.balls, row.strikes);
        for tally in std::iter::once(split).chain(
            by_count
                .iter_mut()
                .filter(|(s, _)| situations.contains(s))
                .map(|(_, t)| t),
        ) {
            if official {
                tally.at_bats += 1;
            }
            if hit {
                tally.hits += 1;
            }
            if k {
                tally.strikeouts += 1;
            }
        }
    }

    let results_by_pitch_type = types
        .sorted_desc_by(|t| t.pitches)
        .into_iter()
        .map(|(label, t)| PitchTypeResult {
            pitch_type: label.to_string(),
            avg: Average::of(t.hits, t.at_bats),
            whiff_rate: Percent::of(t.whiffs, t.swings),
            chase_rate: Percent::of(t.chase_swings, t.chase_pitches),
            ..t.clone()
        })
        .collect();

    let total_pa = pas.count();
    Some(HitterProfile {
        name: name.to_string(),
        hand,
        team: None,
        total_pitches: pitches.len() as u32,
        total_pa,
        at_bats,
        hits,
        avg: Average::of(hits, at_bats),
        k_rate: Percent::of(ks, total_pa),
        bb_rate: Percent::of(bbs, total_pa),
        chase_pitches,
        chase_swings,
        chase_rate: Percent::of(chase_swings, chase_pitches),
        results_by_pitch_type,
        vs_rhp: vs_rhp.split(),
        vs_lhp: vs_lhp.split(),
        by_count: by_count.iter().map(|(s, t)| (*s, t.line())).collect(),
        sample_warning: sample_warning(pitches.len()),
    })
}

impl HitterProfile {
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn result_for(&self, pitch_type: &str) -> Option<&PitchTypeResult> {
        self.results_by_pitch_type
            .iter()
            .find(|r| r.pitch_type == pitch_type)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(pa: &str, balls: u8, strikes: u8, pitch_type: &str, result: &str, zone: &str, ab: &str) -> PitchRecord {
        PitchRecord {
            date: "4/1/2024".into(),
            inning: "2".into(),
            half: "Bottom".into(),
            pitcher: "Ace".into(),
            pitcher_team: "Elder".into(),
            pitcher_hand: "R".into(),
            batter: "Jones".into(),
            batter_team: "Moeller".into(),
            batter_hand: "L".into(),
            pitch_type: pitch_type.into(),
            balls,
            strikes,
            pitch_result: result.into(),
            attack_zone: zone.into(),
            at_bat_result: ab.into(),
            pa_of_inning: pa.into(),
            ..Default::default()
        }
    }

    fn two_pas() -> Vec<PitchRecord> {
        vec![
            seen("1", 0, 0, "Fastball", "Ball", "Chase", ""),
            seen("1", 1, 0, "Slider", "Swing and Miss", "Waste", ""),
            seen("1", 1, 1, "Slider", "Foul", "Shadow", ""),
            seen("1", 1, 2, "Slider", "Swing and Miss", "Chase", "Strike Out"),
            seen("2", 0, 0, "Fastball", "In Play", "Heart", "2B"),
        ]
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(compute_hitter_profile(&[], "Jones", Hand::Left), None);
    }

    #[test]
    fn totals_and_rates() {
        let h = compute_hitter_profile(&two_pas(), "Jones", Hand::Left).unwrap();
        assert_eq!(h.total_pitches, 5);
        assert_eq!(h.total_pa, 2);
        assert_eq!(h.at_bats, 2);
        assert_eq!(h.hits, 1);
        assert_eq!(h.avg.to_string(), "0.500");
        assert_eq!(h.k_rate.to_string(), "50.0%");
        assert_eq!(h.bb_rate.to_string(), "0.0%");
        assert_eq!(h.team, None);
    }

    #[test]
    fn chase_counts_chase_and_waste_only() {
        let h = compute_hitter_profile(&two_pas(), "Jones", Hand::Left).unwrap();
        assert_eq!(h.chase_pitches, 3);
        assert_eq!(h.chase_swings, 2);
        assert_eq!(h.chase_rate.to_string(), "66.7%");

        let slider = h.result_for("Slider").unwrap();
        assert_eq!(slider.pitches, 3);
        assert_eq!(slider.swings, 3);
        assert_eq!(slider.whiffs, 2);
        assert_eq!(slider.chase_rate.to_string(), "100.0%");
        assert_eq!(slider.avg.to_string(), "0.000");

        let fb = h.result_for("Fastball").unwrap();
        assert_eq!(fb.chase_rate.to_string(), "0.0%");
        assert_eq!(fb.avg.to_string(), "1.000");
    }

    #[test]
    fn by_count_uses_the_final_pitch_count() {
        let h = compute_hitter_profile(&two_pas(), "Jones", Hand::Left).unwrap();
        assert_eq!(h.by_count.len(), 5);
        let two = &h.by_count[&CountSituation::TwoStrikes];
        assert_eq!((two.at_bats, two.strikeouts), (1, 1));
        assert_eq!(two.k_rate.to_string(), "100.0%");
        let first = &h.by_count[&CountSituation::FirstPitch];
        assert_eq!((first.at_bats, first.hits), (1, 1));
        assert_eq!(h.by_count[&CountSituation::Even].hits, 1);
        assert_eq!(h.by_count[&CountSituation::PitcherAhead].strikeouts, 1);
        assert_eq!(h.by_count[&CountSituation::HitterAhead].avg.to_string(), "N/A");
    }

    #[test]
    fn platoon_split_by_pitcher_hand() {
        let mut pitches = two_pas();
        let mut lefty = seen("3", 3, 1, "Curveball", "Ball", "Waste", "BB");
        lefty.pitcher = "Southpaw".into();
        lefty.pitcher_hand = "L".into();
        pitches.push(lefty);
        let h = compute_hitter_profile(&pitches, "Jones", Hand::Left).unwrap();
        assert_eq!(h.vs_rhp.at_bats, 2);
        assert_eq!(h.vs_rhp.avg.to_string(), "0.500");
        assert_eq!(h.vs_lhp.at_bats, 0);
        assert_eq!(h.vs_lhp.avg.to_string(), "N/A");
        assert_eq!(h.vs_lhp.k_rate.to_string(), "N/A");
        assert_eq!(h.bb_rate.to_string(), "33.3%");
    }

    #[test]
    fn duplicate_pa_rows_count_once() {
        let mut pitches = two_pas();
        pitches.push(seen("2", 0, 1, "Slider", "In Play", "Heart", "HR"));
        let h = compute_hitter_profile(&pitches, "Jones", Hand::Left).unwrap();
        assert_eq!(h.total_pa, 2);
        assert_eq!(h.hits, 1);
        assert!(h.at_bats <= h.total_pa);
    }

    #[test]
    fn team_is_serialized_only_when_set() {
        let h = compute_hitter_profile(&two_pas(), "Jones", Hand::Left).unwrap();
        let json = serde_json::to_value(&h).unwrap();
        assert!(json.get("team").is_none());
        let json = serde_json::to_value(h.with_team("Elder")).unwrap();
        assert_eq!(json["team"], "Elder");
        assert_eq!(json["by_count"]["two_strikes"]["k_rate"], "100.0%");
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let pitches = two_pas();
        assert_eq!(
            compute_hitter_profile(&pitches, "Jones", Hand::Left),
            compute_hitter_profile(&pitches, "Jones", Hand::Left)
        );
    }
}
