// Team-level aggregates: a whole staff folded as if it were one pitcher, a
// whole lineup folded as if it were one hitter.

use super::{
    compute_hitter_profile, compute_pitcher_profile, HitterProfile, PitchTypeResult, PitcherProfile,
};
use crate::classify::EntityEntry;
use crate::dugout::{compute_dugout_stats, DetailedSplit};
use crate::normalize::Hand;
use crate::record::PitchRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffProfile {
    pub team: String,
    pub arms: u32,
    pub profile: PitcherProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupProfile {
    pub team: String,
    pub hitters: u32,
    pub extra_base_hits: u32,
    pub profile: HitterProfile,
    pub vs_rhp: DetailedSplit,
    pub vs_lhp: DetailedSplit,
}

fn concat<'a>(entries: impl IntoIterator<Item = &'a EntityEntry>) -> (u32, Vec<PitchRecord>) {
    let mut count = 0;
    let mut pitches = Vec::new();
    for e in entries {
        count += 1;
        pitches.extend(e.pitches.iter().cloned());
    }
    (count, pitches)
}

/// `None` when the team has no pitchers or they threw no pitches.
pub fn compute_staff_profile<'a>(
    team: &str,
    pitchers: impl IntoIterator<Item = &'a EntityEntry>,
) -> Option<StaffProfile> {
    let (arms, pitches) = concat(pitchers);
    let profile = compute_pitcher_profile(&pitches, team, Hand::Unknown, team)?;
    Some(StaffProfile {
        team: team.to_string(),
        arms,
        profile,
    })
}

/// `None` when the team has no hitters or they saw no pitches.
pub fn compute_lineup_profile<'a>(
    team: &str,
    hitters: impl IntoIterator<Item = &'a EntityEntry>,
) -> Option<LineupProfile> {
    let (count, pitches) = concat(hitters);
    let profile = compute_hitter_profile(&pitches, team, Hand::Unknown)?.with_team(team);
    let dugout = compute_dugout_stats(&pitches);
    let extra_base_hits = dugout.vs_rhp.xbh + dugout.vs_lhp.xbh;
    Some(LineupProfile {
        team: team.to_string(),
        hitters: count,
        extra_base_hits,
        profile,
        vs_rhp: dugout.vs_rhp,
        vs_lhp: dugout.vs_lhp,
    })
}

impl LineupProfile {
    /// Pitch types the lineup has enough at-bats against to judge, best
    /// average first.
    pub fn judged_pitch_types(&self, min_at_bats: u32) -> Vec<&PitchTypeResult> {
        let mut judged: Vec<_> = self
            .profile
            .results_by_pitch_type
            .iter()
            .filter(|r| r.at_bats >= min_at_bats)
            .collect();
        judged.sort_by(|a, b| {
            let a = a.avg.value().unwrap_or(0.0);
            let b = b.avg.value().unwrap_or(0.0);
            b.total_cmp(&a)
        });
        judged
    }
}
