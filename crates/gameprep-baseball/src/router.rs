// Question routing.
//
// A question is read once into `Signals` (lowercased text plus the best
// name match in each bucket), then checked against an ordered rule table.
// The first rule whose predicate holds builds the context. Multi-signal
// intents come first, then a team named without any player, then
// single-entity matches, then broad keyword buckets. A team mention always
// lands in one of the first three team rules or a player rule, so no team
// catch-all follows the keyword buckets.

use crate::classify::{EntityBucket, EntityEntry, StatsSnapshot};
use crate::matcher::find_best_match;
use crate::profile::{compute_hitter_profile, compute_pitcher_profile, HitterProfile, PitcherProfile};
use crate::team::{compute_team_summary, TeamSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub type PitcherProfiles = BTreeMap<String, PitcherProfile>;
pub type HitterProfiles = BTreeMap<String, HitterProfile>;

// ---------------------------------------------------------------------------
// Context payloads
// ---------------------------------------------------------------------------

/// What the router hands to the explainer. Serializes as
/// `{"type": "<kind>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RoutedContext {
    GamePlan(TeamDossier),
    OpponentBatters(TeamBatters),
    OpponentTeam(TeamDossier),
    OpponentPitcher(PitcherMatchup),
    OpponentBatter(BatterMatchup),
    HomePitcher(SinglePitcher),
    HomeHitter(SingleHitter),
    HomePitchingStaff(HomeStaff),
    HomeHitters(HomeLineup),
    General(GeneralContext),
}

impl RoutedContext {
    pub fn kind(&self) -> &'static str {
        match self {
            RoutedContext::GamePlan(_) => "game_plan",
            RoutedContext::OpponentBatters(_) => "opponent_batters",
            RoutedContext::OpponentTeam(_) => "opponent_team",
            RoutedContext::OpponentPitcher(_) => "opponent_pitcher",
            RoutedContext::OpponentBatter(_) => "opponent_batter",
            RoutedContext::HomePitcher(_) => "home_pitcher",
            RoutedContext::HomeHitter(_) => "home_hitter",
            RoutedContext::HomePitchingStaff(_) => "home_pitching_staff",
            RoutedContext::HomeHitters(_) => "home_hitters",
            RoutedContext::General(_) => "general",
        }
    }
}

/// Everything about one opponent plus our hitters for matchups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDossier {
    pub team_summary: Option<TeamSummary>,
    pub opponent_pitchers: PitcherProfiles,
    pub opponent_batters: HitterProfiles,
    pub home_hitters: HitterProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBatters {
    pub team_summary: Option<TeamSummary>,
    pub opponent_batters: HitterProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitcherMatchup {
    pub pitcher: Option<PitcherProfile>,
    pub home_hitters: HitterProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterMatchup {
    pub batter: Option<HitterProfile>,
    pub home_pitchers: PitcherProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinglePitcher {
    pub pitcher: Option<PitcherProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleHitter {
    pub hitter: Option<HitterProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeStaff {
    pub home_pitchers: PitcherProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeLineup {
    pub home_hitters: HitterProfiles,
}

/// Fallback: the roster and every summary, for open-ended questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralContext {
    pub available_teams: Vec<String>,
    pub home_hitters: Vec<String>,
    pub home_pitchers: Vec<String>,
    pub team_summaries: BTreeMap<String, TeamSummary>,
    pub home_hitter_profiles: HitterProfiles,
}

// ---------------------------------------------------------------------------
// Profile collections
// ---------------------------------------------------------------------------

fn pitcher_profiles<'a>(entries: impl Iterator<Item = (&'a String, &'a EntityEntry)>) -> PitcherProfiles {
    entries
        .filter_map(|(name, e)| {
            compute_pitcher_profile(&e.pitches, name, e.hand, &e.team).map(|p| (name.clone(), p))
        })
        .collect()
}

fn hitter_profiles<'a>(entries: impl Iterator<Item = (&'a String, &'a EntityEntry)>) -> HitterProfiles {
    entries
        .filter_map(|(name, e)| compute_hitter_profile(&e.pitches, name, e.hand).map(|p| (name.clone(), p)))
        .collect()
}

pub fn team_pitcher_profiles(snapshot: &StatsSnapshot, team: &str) -> PitcherProfiles {
    pitcher_profiles(snapshot.team_pitchers(team))
}

pub fn team_batter_profiles(snapshot: &StatsSnapshot, team: &str) -> HitterProfiles {
    hitter_profiles(snapshot.team_batters(team))
}

pub fn home_pitcher_profiles(snapshot: &StatsSnapshot) -> PitcherProfiles {
    pitcher_profiles(snapshot.home_pitchers.iter())
}

pub fn home_hitter_profiles(snapshot: &StatsSnapshot) -> HitterProfiles {
    hitter_profiles(snapshot.home_hitters.iter())
}

fn pitcher_in(bucket: &EntityBucket, name: &str) -> Option<PitcherProfile> {
    let e = bucket.get(name)?;
    compute_pitcher_profile(&e.pitches, name, e.hand, &e.team)
}

fn hitter_in(bucket: &EntityBucket, name: &str) -> Option<HitterProfile> {
    let e = bucket.get(name)?;
    compute_hitter_profile(&e.pitches, name, e.hand)
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// A question as the rules see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signals<'a> {
    pub question: String,
    pub opponent_pitcher: Option<&'a str>,
    pub opponent_batter: Option<&'a str>,
    pub home_pitcher: Option<&'a str>,
    pub home_hitter: Option<&'a str>,
    pub team: Option<&'a str>,
    home_marker: String,
}

impl<'a> Signals<'a> {
    pub fn read(snapshot: &'a StatsSnapshot, question: &str) -> Self {
        let q = question.to_lowercase();
        Signals {
            opponent_pitcher: find_best_match(&q, snapshot.opponent_pitcher_list()),
            opponent_batter: find_best_match(&q, snapshot.opponent_batter_list()),
            home_pitcher: find_best_match(&q, snapshot.home_pitcher_list()),
            home_hitter: find_best_match(&q, snapshot.home_hitter_list()),
            team: find_best_match(&q, snapshot.team_list()),
            home_marker: snapshot.home().marker().to_string(),
            question: q,
        }
    }

    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.question.contains(*k))
    }

    /// "<marker> <suffix>", e.g. "moeller pitch". Never matches when the
    /// marker is empty.
    pub fn mentions_home(&self, suffix: &str) -> bool {
        !self.home_marker.is_empty()
            && self
                .question
                .contains(&format!("{} {}", self.home_marker, suffix))
    }

    pub fn mentions_home_word(&self) -> bool {
        !self.home_marker.is_empty() && self.question.contains(&self.home_marker)
    }

    fn any_player(&self) -> bool {
        self.opponent_pitcher.is_some()
            || self.opponent_batter.is_some()
            || self.home_pitcher.is_some()
            || self.home_hitter.is_some()
    }
}

pub const GAME_PLAN_KEYWORDS: &[&str] =
    &["game plan", "scouting report", "prepare for", "prep for", "facing"];
pub const HITTING_KEYWORDS: &[&str] = &["batter", "hitter", "lineup", "hitting"];
const HOME_STAFF_KEYWORDS: &[&str] = &["our pitch", "our staff", "our arm"];
const HOME_HITTERS_KEYWORDS: &[&str] = &[
    "our hitter",
    "our batter",
    "our lineup",
    "our team",
    "chase rate",
    "weakness",
    "our lefties",
    "our righties",
    "our guys",
    "breaking ball",
];

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

struct Rule {
    name: &'static str,
    matches: fn(&Signals) -> bool,
    build: fn(&StatsSnapshot, &Signals) -> Option<RoutedContext>,
}

fn dossier(snapshot: &StatsSnapshot, team: &str) -> TeamDossier {
    TeamDossier {
        team_summary: compute_team_summary(snapshot, team),
        opponent_pitchers: team_pitcher_profiles(snapshot, team),
        opponent_batters: team_batter_profiles(snapshot, team),
        home_hitters: home_hitter_profiles(snapshot),
    }
}

const RULES: &[Rule] = &[
    Rule {
        name: "game plan",
        matches: |s| s.team.is_some() && s.mentions_any(GAME_PLAN_KEYWORDS),
        build: |snap, s| Some(RoutedContext::GamePlan(dossier(snap, s.team?))),
    },
    Rule {
        name: "opponent lineup",
        matches: |s| s.team.is_some() && s.mentions_any(HITTING_KEYWORDS),
        build: |snap, s| {
            let team = s.team?;
            Some(RoutedContext::OpponentBatters(TeamBatters {
                team_summary: compute_team_summary(snap, team),
                opponent_batters: team_batter_profiles(snap, team),
            }))
        },
    },
    Rule {
        name: "team only",
        matches: |s| s.team.is_some() && !s.any_player(),
        build: |snap, s| Some(RoutedContext::OpponentTeam(dossier(snap, s.team?))),
    },
    Rule {
        name: "opponent pitcher",
        matches: |s| s.opponent_pitcher.is_some(),
        build: |snap, s| {
            Some(RoutedContext::OpponentPitcher(PitcherMatchup {
                pitcher: pitcher_in(&snap.opponent_pitchers, s.opponent_pitcher?),
                home_hitters: home_hitter_profiles(snap),
            }))
        },
    },
    Rule {
        name: "opponent batter",
        matches: |s| s.opponent_batter.is_some(),
        build: |snap, s| {
            let name = s.opponent_batter?;
            let team = snap.opponent_batters.get(name)?.team.clone();
            Some(RoutedContext::OpponentBatter(BatterMatchup {
                batter: hitter_in(&snap.opponent_batters, name).map(|h| h.with_team(team)),
                home_pitchers: home_pitcher_profiles(snap),
            }))
        },
    },
    Rule {
        name: "home pitcher",
        matches: |s| s.home_pitcher.is_some(),
        build: |snap, s| {
            Some(RoutedContext::HomePitcher(SinglePitcher {
                pitcher: pitcher_in(&snap.home_pitchers, s.home_pitcher?),
            }))
        },
    },
    Rule {
        name: "home hitter",
        matches: |s| s.home_hitter.is_some(),
        build: |snap, s| {
            Some(RoutedContext::HomeHitter(SingleHitter {
                hitter: hitter_in(&snap.home_hitters, s.home_hitter?),
            }))
        },
    },
    Rule {
        name: "home staff",
        matches: |s| s.mentions_any(HOME_STAFF_KEYWORDS) || s.mentions_home("pitch"),
        build: |snap, _| {
            Some(RoutedContext::HomePitchingStaff(HomeStaff {
                home_pitchers: home_pitcher_profiles(snap),
            }))
        },
    },
    Rule {
        name: "home hitters",
        matches: |s| s.mentions_any(HOME_HITTERS_KEYWORDS) || s.mentions_home("hitter"),
        build: |snap, _| {
            Some(RoutedContext::HomeHitters(HomeLineup {
                home_hitters: home_hitter_profiles(snap),
            }))
        },
    },
];

fn general(snapshot: &StatsSnapshot) -> RoutedContext {
    RoutedContext::General(GeneralContext {
        available_teams: snapshot.team_list().to_vec(),
        home_hitters: snapshot.home_hitter_list().to_vec(),
        home_pitchers: snapshot.home_pitcher_list().to_vec(),
        team_summaries: snapshot
            .team_list()
            .iter()
            .filter_map(|t| compute_team_summary(snapshot, t).map(|s| (t.clone(), s)))
            .collect(),
        home_hitter_profiles: home_hitter_profiles(snapshot),
    })
}

/// Route a free-text question to the context that answers it. Never fails:
/// a question nothing recognises gets the general context.
pub fn route_question(snapshot: &StatsSnapshot, question: &str) -> RoutedContext {
    let signals = Signals::read(snapshot, question);
    for rule in RULES {
        if !(rule.matches)(&signals) {
            continue;
        }
        if let Some(ctx) = (rule.build)(snapshot, &signals) {
            debug!(rule = rule.name, kind = ctx.kind(), "question routed");
            return ctx;
        }
    }
    debug!(kind = "general", "question routed");
    general(snapshot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
