// Per-entity profiles folded from pitch records.

pub mod aggregate;
pub mod hitter;
pub mod pitcher;

pub use aggregate::{compute_lineup_profile, compute_staff_profile, LineupProfile, StaffProfile};
pub use hitter::{compute_hitter_profile, CountLine, HandSplit, HitterProfile, PitchTypeResult};
pub use pitcher::{
    compute_pitcher_profile, PitchMixEntry, PitcherProfile, PlatoonSplit, ZoneCounts, ZoneProfile,
};

use crate::pitch::{PaKey, PaOutcome};
use crate::record::PitchRecord;
use std::collections::HashSet;

/// Profiles built from fewer pitches than this carry a sample warning.
pub const SMALL_SAMPLE_PITCHES: usize = 30;

pub fn sample_warning(total_pitches: usize) -> Option<String> {
    (total_pitches < SMALL_SAMPLE_PITCHES)
        .then(|| format!("Small sample: only {} pitches", total_pitches))
}

/// Counts each plate appearance once: the first pitch in input order that
/// carries an at-bat result for a given `PaKey` yields the outcome, every
/// later pitch with that key yields nothing.
#[derive(Debug, Default)]
pub(crate) struct PaTracker {
    seen: HashSet<PaKey>,
}

impl PaTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn outcome(&mut self, r: &PitchRecord) -> Option<PaOutcome> {
        let outcome = PaOutcome::parse(&r.at_bat_result)?;
        self.seen.insert(PaKey::of(r)).then_some(outcome)
    }

    pub(crate) fn count(&self) -> u32 {
        self.seen.len() as u32
    }
}
