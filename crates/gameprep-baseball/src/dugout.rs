// Dugout stats for a hitter (or a whole lineup): what happens to pitches
// in each count, detailed platoon lines with wOBA, and a 3x3 zone grid.

use crate::normalize::Hand;
use crate::pitch::{CountSituation, PaOutcome, PitchOutcome};
use crate::profile::PaTracker;
use crate::record::PitchRecord;
use crate::stats::{Average, Percent};
use serde::Serialize;
use std::collections::BTreeMap;

/// wOBA linear weights.
const WOBA_BB: f64 = 0.69;
const WOBA_HBP: f64 = 0.72;
const WOBA_1B: f64 = 0.89;
const WOBA_2B: f64 = 1.27;
const WOBA_3B: f64 = 1.62;
const WOBA_HR: f64 = 2.10;

/// A zone cell needs this many at-bats before it is called hot or cold.
pub const MIN_ZONE_AT_BATS: u32 = 3;
pub const HOT_ZONE_AVG: f64 = 0.300;
pub const COLD_ZONE_AVG: f64 = 0.150;

/// Catcher's view, cells 1-9 left to right, top to bottom.
const ZONE_NAMES: [&str; 9] = [
    "up-in", "up-mid", "up-away", "mid-in", "middle", "mid-away", "low-in", "low-mid", "low-away",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DugoutStats {
    /// Only situations with at least one pitch are present.
    pub outcomes_by_count: BTreeMap<CountSituation, OutcomeMix>,
    pub vs_rhp: DetailedSplit,
    pub vs_lhp: DetailedSplit,
    /// Always nine cells, in cell order.
    pub zone_grid: Vec<ZoneCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeMix {
    pub total: u32,
    pub looking: u32,
    pub whiff: u32,
    pub foul: u32,
    pub in_play: u32,
    pub ball: u32,
}

impl OutcomeMix {
    fn add(&mut self, outcome: PitchOutcome) {
        self.total += 1;
        match outcome {
            PitchOutcome::Looking => self.looking += 1,
            PitchOutcome::Whiff => self.whiff += 1,
            PitchOutcome::Foul => self.foul += 1,
            PitchOutcome::InPlay => self.in_play += 1,
            PitchOutcome::Ball => self.ball += 1,
            PitchOutcome::Other => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DetailedSplit {
    pub pitches: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub strikeouts: u32,
    /// BB, HBP and IBB.
    pub walks: u32,
    pub hbp: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub outs: u32,
    pub xbh: u32,
    pub avg: Average,
    pub k_rate: Percent,
    pub woba: Average,
}

impl DetailedSplit {
    fn record(&mut self, outcome: PaOutcome) {
        if outcome.is_official_at_bat() {
            self.at_bats += 1;
        }
        if outcome.is_hit() {
            self.hits += 1;
        }
        if outcome.is_strikeout() {
            self.strikeouts += 1;
        }
        if outcome.is_walk() {
            self.walks += 1;
        }
        if outcome.is_out() {
            self.outs += 1;
        }
        match outcome {
            PaOutcome::HitByPitch => self.hbp += 1,
            PaOutcome::Single => self.singles += 1,
            PaOutcome::Double => self.doubles += 1,
            PaOutcome::Triple => self.triples += 1,
            PaOutcome::HomeRun => self.home_runs += 1,
            _ => {}
        }
    }

    fn finish(mut self) -> Self {
        self.xbh = self.doubles + self.triples + self.home_runs;
        self.avg = Average::of(self.hits, self.at_bats);
        self.k_rate = Percent::of(self.strikeouts, self.at_bats);
        self.woba = self.compute_woba();
        self
    }

    // HBP sits in both `walks` and `hbp`, so it is weighted twice.
    fn compute_woba(&self) -> Average {
        let num = WOBA_BB * self.walks as f64
            + WOBA_HBP * self.hbp as f64
            + WOBA_1B * self.singles as f64
            + WOBA_2B * self.doubles as f64
            + WOBA_3B * self.triples as f64
            + WOBA_HR * self.home_runs as f64;
        let den = self.walks
            + self.hbp
            + self.singles
            + self.doubles
            + self.triples
            + self.home_runs
            + self.outs;
        Average::from_ratio(num, den as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heat {
    Hot,
    Cold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCell {
    pub cell: u8,
    pub name: &'static str,
    pub at_bats: u32,
    pub hits: u32,
    pub avg: Average,
    pub heat: Option<Heat>,
}

impl ZoneCell {
    fn new(cell: u8, at_bats: u32, hits: u32) -> Self {
        let heat = if at_bats < MIN_ZONE_AT_BATS {
            None
        } else {
            let avg = hits as f64 / at_bats as f64;
            if avg >= HOT_ZONE_AVG {
                Some(Heat::Hot)
            } else if avg < COLD_ZONE_AVG {
                Some(Heat::Cold)
            } else {
                None
            }
        };
        ZoneCell {
            cell,
            name: ZONE_NAMES[usize::from(cell - 1)],
            at_bats,
            hits,
            avg: Average::of(hits, at_bats),
            heat,
        }
    }
}

/// Fold a hitter's (or lineup's) pitches into dugout stats.
pub fn compute_dugout_stats(pitches: &[PitchRecord]) -> DugoutStats {
    let mut outcomes: BTreeMap<CountSituation, OutcomeMix> = BTreeMap::new();
    let mut vs_rhp = DetailedSplit::default();
    let mut vs_lhp = DetailedSplit::default();
    let mut zones = [(0u32, 0u32); 9];
    let mut pas = PaTracker::new();

    for row in pitches {
        let outcome = PitchOutcome::classify(&row.pitch_result);
        for situation in CountSituation::for_count(row.balls, row.strikes) {
            outcomes.entry(situation).or_default().add(outcome);
        }

        let split = if Hand::parse(&row.pitcher_hand).is_right() {
            &mut vs_rhp
        } else {
            &mut vs_lhp
        };
        split.pitches += 1;

        if let Some(pa) = pas.outcome(row) {
            split.record(pa);
            if let Some(cell) = row.zone_cell() {
                if pa.is_official_at_bat() {
                    let z = &mut zones[usize::from(cell - 1)];
                    z.0 += 1;
                    if pa.is_hit() {
                        z.1 += 1;
                    }
                }
            }
        }
    }

    DugoutStats {
        outcomes_by_count: outcomes,
        vs_rhp: vs_rhp.finish(),
        vs_lhp: vs_lhp.finish(),
        zone_grid: zones
            .iter()
            .enumerate()
            .map(|(i, (ab, h))| ZoneCell::new(i as u8 + 1, *ab, *h))
            .collect(),
    }
}

impl DugoutStats {
    pub fn hot_zones(&self) -> Vec<&'static str> {
        self.zones_with(Heat::Hot)
    }

    pub fn cold_zones(&self) -> Vec<&'static str> {
        self.zones_with(Heat::Cold)
    }

    fn zones_with(&self, heat: Heat) -> Vec<&'static str> {
        self.zone_grid
            .iter()
            .filter(|c| c.heat == Some(heat))
            .map(|c| c.name)
            .collect()
    }

    pub fn has_zone_data(&self) -> bool {
        self.zone_grid.iter().any(|c| c.at_bats > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pa_end(pa: u32, hand: &str, location: &str, result: &str) -> PitchRecord {
        PitchRecord {
            date: "4/1/2024".into(),
            inning: "1".into(),
            half: "Top".into(),
            pitcher: "Ace".into(),
            pitcher_hand: hand.into(),
            batter: "Jones".into(),
            pitch_result: "In Play".into(),
            location: location.into(),
            at_bat_result: result.into(),
            pa_of_inning: pa.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn outcome_mix_per_situation() {
        let pitches = vec![
            PitchRecord {
                pitch_result: "Called Strike Looking".into(),
                ..Default::default()
            },
            PitchRecord {
                strikes: 1,
                pitch_result: "Swing and Miss".into(),
                ..Default::default()
            },
            PitchRecord {
                strikes: 2,
                pitch_result: "Ball".into(),
                ..Default::default()
            },
        ];
        let d = compute_dugout_stats(&pitches);
        let first = d.outcomes_by_count[&CountSituation::FirstPitch];
        assert_eq!((first.total, first.looking), (1, 1));
        let even = d.outcomes_by_count[&CountSituation::Even];
        assert_eq!(even.total, 1);
        let ahead = d.outcomes_by_count[&CountSituation::PitcherAhead];
        assert_eq!((ahead.total, ahead.whiff, ahead.ball), (2, 1, 1));
        assert!(!d.outcomes_by_count.contains_key(&CountSituation::HitterAhead));
    }

    #[test]
    fn detailed_split_and_woba() {
        let pitches = vec![
            pa_end(1, "R", "", "1B"),
            pa_end(2, "R", "", "HR"),
            pa_end(3, "R", "", "Ground Out"),
            pa_end(4, "R", "", "HBP"),
            pa_end(5, "L", "", "Strike Out"),
        ];
        let d = compute_dugout_stats(&pitches);
        let r = &d.vs_rhp;
        assert_eq!(r.pitches, 4);
        assert_eq!((r.at_bats, r.hits, r.xbh), (3, 2, 1));
        assert_eq!((r.walks, r.hbp, r.outs), (1, 1, 1));
        assert_eq!(r.avg.to_string(), "0.667");
        // (.69 + .72 + .89 + 2.10) / (1 + 1 + 1 + 1 + 1)
        assert_eq!(r.woba.to_string(), "0.880");

        let l = &d.vs_lhp;
        assert_eq!((l.at_bats, l.strikeouts, l.outs), (1, 1, 1));
        assert_eq!(l.k_rate.to_string(), "100.0%");
        assert_eq!(l.woba.to_string(), "0.000");
    }

    #[test]
    fn empty_split_is_not_applicable() {
        let d = compute_dugout_stats(&[pa_end(1, "R", "", "1B")]);
        assert_eq!(d.vs_lhp.avg.to_string(), "N/A");
        assert_eq!(d.vs_lhp.k_rate.to_string(), "N/A");
        assert_eq!(d.vs_lhp.woba.to_string(), "N/A");
    }

    #[test]
    fn zone_grid_hot_and_cold() {
        let mut pitches = Vec::new();
        let mut pa = 0;
        for result in ["1B", "Fly Out", "2B"] {
            pa += 1;
            pitches.push(pa_end(pa, "R", "1", result));
        }
        for result in ["Ground Out", "Strike Out", "Fly Out", "1B"] {
            pa += 1;
            pitches.push(pa_end(pa, "R", "9", result));
        }
        // Walks are not at-bats and never reach the grid.
        pa += 1;
        pitches.push(pa_end(pa, "R", "5", "BB"));
        // Two at-bats is not enough to call a zone.
        for result in ["Ground Out", "Fly Out"] {
            pa += 1;
            pitches.push(pa_end(pa, "R", "7", result));
        }

        let d = compute_dugout_stats(&pitches);
        assert_eq!(d.zone_grid.len(), 9);
        assert_eq!(d.zone_grid[0].heat, Some(Heat::Hot));
        assert_eq!(d.zone_grid[8].at_bats, 4);
        assert_eq!(d.zone_grid[8].avg.to_string(), "0.250");
        assert_eq!(d.zone_grid[8].heat, None);
        assert_eq!(d.zone_grid[4].at_bats, 0);
        assert_eq!(d.zone_grid[6].heat, None);
        assert_eq!(d.hot_zones(), vec!["up-in"]);
        assert!(d.cold_zones().is_empty());
        assert!(d.has_zone_data());
    }

    #[test]
    fn cold_zone() {
        let pitches: Vec<_> = (1..=3)
            .map(|pa| pa_end(pa, "L", "6", "Strike Out"))
            .collect();
        let d = compute_dugout_stats(&pitches);
        assert_eq!(d.cold_zones(), vec!["mid-away"]);
    }
}
