// Quick-look cards: the zero-cost answer path.
//
// A card is pure computed data plus scouting notes, built without any
// explainer call. `quick_look` returns `None` when the question does not
// name a player or team with data, and the caller falls back to routing.

use crate::classify::{EntityEntry, StatsSnapshot};
use crate::dugout::{compute_dugout_stats, DugoutStats};
use crate::notes::{
    coach_notes, hitting_plan, lineup_overview, pitching_plan, relay_to_hitter, staff_overview,
};
use crate::profile::{
    compute_hitter_profile, compute_lineup_profile, compute_pitcher_profile, compute_staff_profile,
    HitterProfile, LineupProfile, PitcherProfile, StaffProfile,
};
use crate::router::{Signals, HITTING_KEYWORDS};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum QuickLook {
    Pitcher(PitcherCard),
    Hitter(HitterCard),
    TeamPitching(TeamPitchingCard),
    TeamHitting(TeamHittingCard),
}

impl QuickLook {
    pub fn kind(&self) -> &'static str {
        match self {
            QuickLook::Pitcher(_) => "pitcher",
            QuickLook::Hitter(_) => "hitter",
            QuickLook::TeamPitching(_) => "team_pitching",
            QuickLook::TeamHitting(_) => "team_hitting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherCard {
    pub profile: PitcherProfile,
    /// Relay to the hitter walking up.
    pub relay: Vec<String>,
    pub hitting_plan: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitterCard {
    pub profile: HitterProfile,
    pub dugout: DugoutStats,
    pub coach_notes: Vec<String>,
    pub pitching_plan: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPitchingCard {
    pub team: String,
    pub staff: StaffProfile,
    pub overview: Vec<String>,
    /// Most pitches thrown first.
    pub pitchers: Vec<PitcherCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHittingCard {
    pub team: String,
    pub lineup: LineupProfile,
    pub overview: Vec<String>,
    /// Most pitches seen first.
    pub hitters: Vec<HitterCard>,
}

// ---------------------------------------------------------------------------
// Card builders
// ---------------------------------------------------------------------------

pub fn pitcher_card(name: &str, entry: &EntityEntry) -> Option<PitcherCard> {
    let profile = compute_pitcher_profile(&entry.pitches, name, entry.hand, &entry.team)?;
    Some(PitcherCard {
        relay: relay_to_hitter(&profile),
        hitting_plan: hitting_plan(&profile),
        profile,
    })
}

/// `team` is attached to the profile for opponent batters.
pub fn hitter_card(name: &str, entry: &EntityEntry, team: Option<&str>) -> Option<HitterCard> {
    let mut profile = compute_hitter_profile(&entry.pitches, name, entry.hand)?;
    if let Some(team) = team {
        profile = profile.with_team(team);
    }
    let dugout = compute_dugout_stats(&entry.pitches);
    Some(HitterCard {
        coach_notes: coach_notes(&profile, &dugout),
        pitching_plan: pitching_plan(&profile, &dugout),
        profile,
        dugout,
    })
}

fn by_pitches_desc<'a>(
    entries: impl Iterator<Item = (&'a String, &'a EntityEntry)>,
) -> Vec<(&'a String, &'a EntityEntry)> {
    let mut v: Vec<_> = entries.filter(|(_, e)| !e.pitches.is_empty()).collect();
    // Stable: ties keep name order.
    v.sort_by(|a, b| b.1.pitches.len().cmp(&a.1.pitches.len()));
    v
}

/// Staff summary plus one card per pitcher on the opponent `team`.
pub fn team_pitching_card(snapshot: &StatsSnapshot, team: &str) -> Option<TeamPitchingCard> {
    let entries = by_pitches_desc(snapshot.team_pitchers(team));
    let staff = compute_staff_profile(team, entries.iter().map(|(_, e)| *e))?;
    Some(TeamPitchingCard {
        team: team.to_string(),
        overview: staff_overview(&staff),
        staff,
        pitchers: entries
            .iter()
            .filter_map(|(name, e)| pitcher_card(name, e))
            .collect(),
    })
}

/// Lineup summary plus one card per hitter. The home team uses our own
/// hitters; any other name is looked up among opponent batters.
pub fn team_hitting_card(snapshot: &StatsSnapshot, team: &str) -> Option<TeamHittingCard> {
    let home = snapshot.home().is_home(team);
    let entries = if home {
        by_pitches_desc(snapshot.home_hitters.iter())
    } else {
        by_pitches_desc(snapshot.team_batters(team))
    };
    let lineup = compute_lineup_profile(team, entries.iter().map(|(_, e)| *e))?;
    Some(TeamHittingCard {
        team: team.to_string(),
        overview: lineup_overview(&lineup),
        lineup,
        hitters: entries
            .iter()
            .filter_map(|(name, e)| hitter_card(name, e, (!home).then_some(e.team.as_str())))
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

fn home_hitter(snapshot: &StatsSnapshot, name: &str) -> Option<QuickLook> {
    let e = snapshot.home_hitters.get(name)?;
    hitter_card(name, e, None).map(QuickLook::Hitter)
}

fn opponent_batter(snapshot: &StatsSnapshot, name: &str) -> Option<QuickLook> {
    let e = snapshot.opponent_batters.get(name)?;
    hitter_card(name, e, Some(e.team.as_str())).map(QuickLook::Hitter)
}

/// Card for the first thing the question names, in this order:
///
/// 1. With a hitting keyword: our hitter, their batter, a team's lineup,
///    then our own lineup when the question says "our" or the home marker.
/// 2. Our hitter, then their batter.
/// 3. Their pitcher, then ours.
/// 4. A team's pitching staff.
pub fn quick_look(snapshot: &StatsSnapshot, question: &str) -> Option<QuickLook> {
    let s = Signals::read(snapshot, question);

    let card = if s.mentions_any(HITTING_KEYWORDS) {
        if let Some(name) = s.home_hitter {
            home_hitter(snapshot, name)
        } else if let Some(name) = s.opponent_batter {
            opponent_batter(snapshot, name)
        } else if let Some(team) = s.team {
            team_hitting_card(snapshot, team).map(QuickLook::TeamHitting)
        } else if s.mentions_any(&["our"]) || s.mentions_home_word() {
            team_hitting_card(snapshot, &snapshot.home().name).map(QuickLook::TeamHitting)
        } else {
            None
        }
    } else {
        None
    };
    if card.is_some() {
        return card;
    }

    let card = if let Some(name) = s.home_hitter {
        home_hitter(snapshot, name)
    } else if let Some(name) = s.opponent_batter {
        opponent_batter(snapshot, name)
    } else if let Some(name) = s.opponent_pitcher {
        let e = snapshot.opponent_pitchers.get(name)?;
        pitcher_card(name, e).map(QuickLook::Pitcher)
    } else if let Some(name) = s.home_pitcher {
        let e = snapshot.home_pitchers.get(name)?;
        pitcher_card(name, e).map(QuickLook::Pitcher)
    } else if let Some(team) = s.team {
        team_pitching_card(snapshot, team).map(QuickLook::TeamPitching)
    } else {
        None
    };
    debug!(
        "quick look for {:?}: {}",
        question,
        card.as_ref().map_or("none", QuickLook::kind)
    );
    card
}
