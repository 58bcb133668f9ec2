// Pitcher profile: what a pitcher throws, when, where, and how hitters
// fared against him.

use super::{sample_warning, PaTracker};
use crate::normalize::{normalize_pitch_type, Hand};
use crate::pitch::{is_strike, is_swing, is_whiff, AttackZone, CountSituation};
use crate::record::PitchRecord;
use crate::stats::{shares, Average, Percent, PitchShare, Tally, VeloStats};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherProfile {
    pub name: String,
    pub team: String,
    pub hand: Hand,
    pub total_pitches: u32,
    pub total_pa: u32,
    /// Most used first; ties keep first-seen order.
    pub pitch_mix: Vec<PitchMixEntry>,
    /// Only situations with at least one pitch are present.
    pub pitch_mix_by_count: BTreeMap<CountSituation, Vec<PitchShare>>,
    pub zones: ZoneCounts,
    pub zone_profile: ZoneProfile,
    pub k_rate: Percent,
    pub bb_rate: Percent,
    pub hr_rate: Percent,
    pub first_pitch_strike: Percent,
    pub vs_rhh: PlatoonSplit,
    pub vs_lhh: PlatoonSplit,
    pub sample_warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchMixEntry {
    pub pitch_type: String,
    pub count: u32,
    pub pct: Percent,
    pub velo: Option<VeloStats>,
    pub swings: u32,
    pub whiffs: u32,
    pub whiff_rate: Percent,
}

/// Raw tallies of the four recognized attack-zone labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ZoneCounts {
    pub heart: u32,
    pub shadow: u32,
    pub chase: u32,
    pub waste: u32,
}

impl ZoneCounts {
    pub fn add(&mut self, zone: AttackZone) {
        match zone {
            AttackZone::Heart => self.heart += 1,
            AttackZone::Shadow => self.shadow += 1,
            AttackZone::Chase => self.chase += 1,
            AttackZone::Waste => self.waste += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.heart + self.shadow + self.chase + self.waste
    }
}

/// Zone shares over the zone-classified total. `zone_rate` is Heart + Shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneProfile {
    pub zone_rate: Percent,
    pub heart: Percent,
    pub shadow: Percent,
    pub chase: Percent,
    pub waste: Percent,
}

impl From<&ZoneCounts> for ZoneProfile {
    fn from(z: &ZoneCounts) -> Self {
        let total = z.total();
        ZoneProfile {
            zone_rate: Percent::of(z.heart + z.shadow, total),
            heart: Percent::of(z.heart, total),
            shadow: Percent::of(z.shadow, total),
            chase: Percent::of(z.chase, total),
            waste: Percent::of(z.waste, total),
        }
    }
}

/// Plate-appearance results against one batter handedness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatoonSplit {
    pub pa: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub avg: Average,
    pub k_rate: Percent,
    pub bb_rate: Percent,
}

#[derive(Debug, Default)]
struct SplitTally {
    pa: u32,
    at_bats: u32,
    hits: u32,
    strikeouts: u32,
    walks: u32,
    home_runs: u32,
}

impl SplitTally {
    fn finish(&self) -> PlatoonSplit {
        PlatoonSplit {
            pa: self.pa,
            at_bats: self.at_bats,
            hits: self.hits,
            home_runs: self.home_runs,
            avg: Average::of(self.hits, self.at_bats),
            k_rate: Percent::of(self.strikeouts, self.pa),
            bb_rate: Percent::of(self.walks, self.pa),
        }
    }
}

#[derive(Debug, Default)]
struct TypeTally {
    count: u32,
    velos: Vec<f64>,
    swings: u32,
    whiffs: u32,
}

/// Fold one pitcher's pitches into a profile. `None` for no pitches.
///
/// Pitch-level tallies use every pitch; plate-appearance tallies use the
/// first pitch of each PA that carries an at-bat result.
pub fn compute_pitcher_profile(
    pitches: &[PitchRecord],
    name: &str,
    hand: Hand,
    team: &str,
) -> Option<PitcherProfile> {
    if pitches.is_empty() {
        return None;
    }
    let total = pitches.len() as u32;

    let mut types: Tally<TypeTally> = Tally::new();
    let mut by_count: BTreeMap<CountSituation, Tally<u32>> = BTreeMap::new();
    let mut zones = ZoneCounts::default();
    let mut first_pitches = 0u32;
    let mut first_pitch_strikes = 0u32;

    let mut pas = PaTracker::new();
    let (mut ks, mut bbs, mut hrs) = (0u32, 0u32, 0u32);
    let mut vs_rhh = SplitTally::default();
    let mut vs_lhh = SplitTally::default();

    for row in pitches {
        let pt = normalize_pitch_type(&row.pitch_type);
        let result = row.pitch_result.as_str();

        let t = types.entry(&pt);
        t.count += 1;
        if let Some(v) = row.usable_velocity() {
            t.velos.push(v);
        }
        if is_swing(result) {
            t.swings += 1;
        }
        if is_whiff(result) {
            t.whiffs += 1;
        }

        for situation in CountSituation::for_count(row.balls, row.strikes) {
            *by_count.entry(situation).or_default().entry(&pt) += 1;
        }
        if let Some(zone) = AttackZone::parse(&row.attack_zone) {
            zones.add(zone);
        }
        if row.balls == 0 && row.strikes == 0 {
            first_pitches += 1;
            if is_strike(result) {
                first_pitch_strikes += 1;
            }
        }

        if let Some(outcome) = pas.outcome(row) {
            if outcome.is_strikeout() {
                ks += 1;
            }
            if outcome.is_walk() {
                bbs += 1;
            }
            if outcome.is_home_run() {
                hrs += 1;
            }
            let split = if Hand::parse(&row.batter_hand).is_right() {
                &mut vs_rhh
            } else {
                &mut vs_lhh
            };
            split.pa += 1;
            if outcome.is_official_at_bat() {
                split.at_bats += 1;
            }
            if outcome.is_hit() {
                split.hits += 1;
            }
            if outcome.is_strikeout() {
                split.strikeouts += 1;
            }
            if outcome.is_walk() {
                split.walks += 1;
            }
            if outcome.is_home_run() {
                split.home_runs += 1;
            }
        }
    }

    let pitch_mix = types
        .sorted_desc_by(|t| t.count)
        .into_iter()
        .map(|(label, t)| PitchMixEntry {
            pitch_type: label.to_string(),
            count: t.count,
            pct: Percent::of(t.count, total),
            velo: VeloStats::from_samples(&t.velos),
            swings: t.swings,
            whiffs: t.whiffs,
            whiff_rate: Percent::of(t.whiffs, t.swings),
        })
        .collect();

    let pitch_mix_by_count = by_count
        .iter()
        .filter(|(_, tally)| !tally.is_empty())
        .map(|(situation, tally)| (*situation, shares(tally)))
        .collect();

    let total_pa = pas.count();
    Some(PitcherProfile {
        name: name.to_string(),
        team: team.to_string(),
        hand,
        total_pitches: total,
        total_pa,
        pitch_mix,
        pitch_mix_by_count,
        zone_profile: ZoneProfile::from(&zones),
        zones,
        k_rate: Percent::of(ks, total_pa),
        bb_rate: Percent::of(bbs, total_pa),
        hr_rate: Percent::of(hrs, total_pa),
        first_pitch_strike: Percent::of(first_pitch_strikes, first_pitches),
        vs_rhh: vs_rhh.finish(),
        vs_lhh: vs_lhh.finish(),
        sample_warning: sample_warning(pitches.len()),
    })
}

impl PitcherProfile {
    pub fn mix_entry(&self, pitch_type: &str) -> Option<&PitchMixEntry> {
        self.pitch_mix.iter().find(|e| e.pitch_type == pitch_type)
    }

    /// Most thrown pitch in a count situation.
    pub fn top_pitch_in(&self, situation: CountSituation) -> Option<&PitchShare> {
        self.pitch_mix_by_count.get(&situation)?.first()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(balls: u8, strikes: u8, pitch_type: &str, result: &str, ab: &str) -> PitchRecord {
        PitchRecord {
            date: "4/1/2024".into(),
            inning: "1".into(),
            half: "Top".into(),
            pitcher: "Doe".into(),
            pitcher_team: "Moeller".into(),
            pitcher_hand: "R".into(),
            batter: "Jones".into(),
            batter_team: "Rival".into(),
            batter_hand: "L".into(),
            pitch_type: pitch_type.into(),
            balls,
            strikes,
            pitch_result: result.into(),
            at_bat_result: ab.into(),
            pa_of_inning: "1".into(),
            ..Default::default()
        }
    }

    fn doe_jones_pa() -> Vec<PitchRecord> {
        let mut first = row(0, 0, "fastball", "Called Strike", "");
        first.velocity = Some(82.0);
        vec![
            first,
            row(0, 1, "slider", "Swing and Miss", ""),
            row(0, 2, "slider", "In Play", "1B"),
        ]
    }

    #[test]
    fn empty_input_is_none() {
        assert_eq!(compute_pitcher_profile(&[], "Doe", Hand::Right, "Moeller"), None);
    }

    #[test]
    fn three_pitch_plate_appearance() {
        let p = compute_pitcher_profile(&doe_jones_pa(), "Doe", Hand::Right, "Moeller").unwrap();
        assert_eq!(p.total_pitches, 3);
        assert_eq!(p.total_pa, 1);
        assert_eq!(p.pitch_mix[0].pitch_type, "Slider");
        assert_eq!(p.pitch_mix[0].count, 2);
        assert_eq!(p.mix_entry("Fastball").unwrap().count, 1);

        let two = &p.pitch_mix_by_count[&CountSituation::TwoStrikes];
        assert_eq!(two.len(), 1);
        assert_eq!(two[0].pitch_type, "Slider");
        assert_eq!(two[0].pct.to_string(), "100.0%");

        // Jones bats left: the single lands in the LHH split.
        assert_eq!(p.vs_rhh.hits, 0);
        assert_eq!(p.vs_rhh.avg.to_string(), "N/A");
        assert_eq!(p.vs_lhh.hits, 1);
        assert_eq!(p.vs_lhh.avg.to_string(), "1.000");

        assert_eq!(p.first_pitch_strike.to_string(), "100.0%");
        assert_eq!(p.k_rate.to_string(), "0.0%");
        assert_eq!(p.sample_warning.as_deref(), Some("Small sample: only 3 pitches"));
    }

    #[test]
    fn whiff_rate_and_velocity_per_type() {
        let p = compute_pitcher_profile(&doe_jones_pa(), "Doe", Hand::Right, "Moeller").unwrap();
        let slider = p.mix_entry("Slider").unwrap();
        assert_eq!(slider.swings, 2);
        assert_eq!(slider.whiffs, 1);
        assert_eq!(slider.whiff_rate.to_string(), "50.0%");
        assert_eq!(slider.velo, None);

        let fb = p.mix_entry("Fastball").unwrap();
        assert_eq!(fb.whiff_rate.to_string(), "N/A");
        assert_eq!(fb.velo.unwrap().avg, 82.0);
    }

    #[test]
    fn first_pitch_is_also_even() {
        let p = compute_pitcher_profile(&doe_jones_pa(), "Doe", Hand::Right, "Moeller").unwrap();
        assert_eq!(
            p.top_pitch_in(CountSituation::FirstPitch).unwrap().pitch_type,
            "Fastball"
        );
        assert_eq!(p.top_pitch_in(CountSituation::Even).unwrap().pitch_type, "Fastball");
        assert!(p.top_pitch_in(CountSituation::HitterAhead).is_none());
    }

    #[test]
    fn duplicate_pa_rows_count_once() {
        let mut pitches = doe_jones_pa();
        // A second row for the same PA with a different recorded result.
        pitches.push(row(1, 2, "curve", "Swing and Miss", "Strike Out"));
        let p = compute_pitcher_profile(&pitches, "Doe", Hand::Right, "Moeller").unwrap();
        assert_eq!(p.total_pa, 1);
        assert_eq!(p.k_rate.to_string(), "0.0%");
        assert_eq!(p.vs_lhh.pa + p.vs_rhh.pa, 1);
    }

    #[test]
    fn zero_and_bad_velocity_only_leave_velo_stats() {
        let mut a = row(1, 0, "Fastball", "Ball", "");
        a.velocity = Some(0.0);
        let mut b = row(1, 1, "Fastball", "Ball", "");
        b.velocity = None;
        let mut c = row(2, 1, "Fastball", "Ball", "");
        c.velocity = Some(84.0);
        let p = compute_pitcher_profile(&[a, b, c], "Doe", Hand::Right, "X").unwrap();
        let fb = p.mix_entry("Fastball").unwrap();
        assert_eq!(fb.count, 3);
        let velo = fb.velo.unwrap();
        assert_eq!(velo.samples, 1);
        assert_eq!(velo.avg, 84.0);
    }

    #[test]
    fn counts_sum_to_totals() {
        let mut pitches = doe_jones_pa();
        let mut odd = row(1, 0, "Knuckler", "Ball", "");
        odd.attack_zone = "Nowhere".into();
        pitches.push(odd);
        for (i, z) in ["Heart", "Shadow", "Chase"].iter().enumerate() {
            pitches[i].attack_zone = z.to_string();
        }
        let p = compute_pitcher_profile(&pitches, "Doe", Hand::Right, "X").unwrap();
        assert_eq!(p.pitch_mix.iter().map(|e| e.count).sum::<u32>(), p.total_pitches);
        assert_eq!(p.zones.total(), 3);
        assert_eq!(p.zone_profile.zone_rate.to_string(), "66.7%");
        assert_eq!(p.zone_profile.waste.to_string(), "0.0%");
    }

    #[test]
    fn no_zone_labels_is_not_applicable() {
        let p = compute_pitcher_profile(&doe_jones_pa(), "Doe", Hand::Right, "X").unwrap();
        assert_eq!(p.zone_profile.zone_rate.to_string(), "N/A");
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let pitches = doe_jones_pa();
        let a = compute_pitcher_profile(&pitches, "Doe", Hand::Right, "Moeller");
        let b = compute_pitcher_profile(&pitches, "Doe", Hand::Right, "Moeller");
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
