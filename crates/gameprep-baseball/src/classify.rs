// Entity classification.
//
// A `StatsSnapshot` is built once per season filter and never mutated; a
// season change builds a new one. Every profile, summary and routing call
// reads from a snapshot.

use crate::normalize::{Hand, HomeTeam};
use crate::record::PitchRecord;
use crate::season::{filter_records, SeasonFilter};
use std::collections::BTreeMap;
use tracing::debug;

/// A named pitcher or hitter with the attributes seen on their first record.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEntry {
    pub team: String,
    pub hand: Hand,
    pub pitches: Vec<PitchRecord>,
}

/// Name → entry, iterated in sorted name order.
pub type EntityBucket = BTreeMap<String, EntityEntry>;

/// Team name → every pitch involving that team against the home side.
pub type TeamBucket = BTreeMap<String, Vec<PitchRecord>>;

#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    home: HomeTeam,
    season: SeasonFilter,
    total_pitches: usize,
    pub opponent_pitchers: EntityBucket,
    pub opponent_batters: EntityBucket,
    pub home_pitchers: EntityBucket,
    pub home_hitters: EntityBucket,
    pub opponent_teams: TeamBucket,
    team_list: Vec<String>,
    home_pitcher_list: Vec<String>,
    home_hitter_list: Vec<String>,
    opponent_pitcher_list: Vec<String>,
    opponent_batter_list: Vec<String>,
}

fn push_entity(bucket: &mut EntityBucket, name: &str, team: &str, hand: &str, row: &PitchRecord) {
    bucket
        .entry(name.to_string())
        .or_insert_with(|| EntityEntry {
            team: team.to_string(),
            hand: Hand::parse(hand),
            pitches: Vec::new(),
        })
        .pitches
        .push(row.clone());
}

impl StatsSnapshot {
    /// Classify the records that fall in `season`.
    ///
    /// Each record lands in at most one pitcher bucket and at most one
    /// batter bucket, decided independently by the pitcher-team and
    /// batter-team columns.
    pub fn build(records: &[PitchRecord], home: &HomeTeam, season: SeasonFilter) -> Self {
        let rows = filter_records(records, season);

        let mut opponent_pitchers = EntityBucket::new();
        let mut opponent_batters = EntityBucket::new();
        let mut home_pitchers = EntityBucket::new();
        let mut home_hitters = EntityBucket::new();
        let mut opponent_teams = TeamBucket::new();

        for row in &rows {
            let home_pitching = home.is_home(&row.pitcher_team);
            let home_batting = home.is_home(&row.batter_team);

            if !row.pitcher.is_empty() {
                if home_pitching {
                    push_entity(&mut home_pitchers, &row.pitcher, &home.name, &row.pitcher_hand, row);
                } else {
                    push_entity(
                        &mut opponent_pitchers,
                        &row.pitcher,
                        &row.pitcher_team,
                        &row.pitcher_hand,
                        row,
                    );
                }
            }

            if !row.batter.is_empty() {
                if home_batting {
                    push_entity(&mut home_hitters, &row.batter, &home.name, &row.batter_hand, row);
                } else {
                    push_entity(
                        &mut opponent_batters,
                        &row.batter,
                        &row.batter_team,
                        &row.batter_hand,
                        row,
                    );
                }
            }

            // The non-home side of a home game; skipped when neither or
            // both sides are home.
            let opponent = if home_pitching {
                Some(&row.batter_team)
            } else if home_batting {
                Some(&row.pitcher_team)
            } else {
                None
            };
            if let Some(team) = opponent {
                if !team.is_empty() && !home.is_home(team) {
                    opponent_teams.entry(team.clone()).or_default().push(row.clone());
                }
            }
        }

        let snapshot = StatsSnapshot {
            home: home.clone(),
            season,
            total_pitches: rows.len(),
            team_list: opponent_teams.keys().cloned().collect(),
            home_pitcher_list: home_pitchers.keys().cloned().collect(),
            home_hitter_list: home_hitters.keys().cloned().collect(),
            opponent_pitcher_list: opponent_pitchers.keys().cloned().collect(),
            opponent_batter_list: opponent_batters.keys().cloned().collect(),
            opponent_pitchers,
            opponent_batters,
            home_pitchers,
            home_hitters,
            opponent_teams,
        };
        debug!(
            season = %season,
            pitches = snapshot.total_pitches,
            teams = snapshot.team_list.len(),
            opponent_pitchers = snapshot.opponent_pitchers.len(),
            opponent_batters = snapshot.opponent_batters.len(),
            home_pitchers = snapshot.home_pitchers.len(),
            home_hitters = snapshot.home_hitters.len(),
            "built stats snapshot"
        );
        snapshot
    }

    pub fn home(&self) -> &HomeTeam {
        &self.home
    }

    pub fn season(&self) -> SeasonFilter {
        self.season
    }

    /// Pitches in the filtered set, classified or not.
    pub fn total_pitches(&self) -> usize {
        self.total_pitches
    }

    pub fn team_list(&self) -> &[String] {
        &self.team_list
    }

    pub fn home_pitcher_list(&self) -> &[String] {
        &self.home_pitcher_list
    }

    pub fn home_hitter_list(&self) -> &[String] {
        &self.home_hitter_list
    }

    pub fn opponent_pitcher_list(&self) -> &[String] {
        &self.opponent_pitcher_list
    }

    pub fn opponent_batter_list(&self) -> &[String] {
        &self.opponent_batter_list
    }

    /// Every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.opponent_pitchers.is_empty()
            && self.opponent_batters.is_empty()
            && self.home_pitchers.is_empty()
            && self.home_hitters.is_empty()
            && self.opponent_teams.is_empty()
    }

    /// Opponent pitchers whose team equals `team`, ignoring case.
    pub fn team_pitchers<'a>(&'a self, team: &str) -> impl Iterator<Item = (&'a String, &'a EntityEntry)> {
        let team = team.to_lowercase();
        self.opponent_pitchers
            .iter()
            .filter(move |(_, e)| e.team.to_lowercase() == team)
    }

    /// Opponent batters whose team equals `team`, ignoring case.
    pub fn team_batters<'a>(&'a self, team: &str) -> impl Iterator<Item = (&'a String, &'a EntityEntry)> {
        let team = team.to_lowercase();
        self.opponent_batters
            .iter()
            .filter(move |(_, e)| e.team.to_lowercase() == team)
    }

    /// A hitter from either side, home first.
    pub fn hitter(&self, name: &str) -> Option<&EntityEntry> {
        self.home_hitters
            .get(name)
            .or_else(|| self.opponent_batters.get(name))
    }

    /// A pitcher from either side, opponents first.
    pub fn pitcher(&self, name: &str) -> Option<&EntityEntry> {
        self.opponent_pitchers
            .get(name)
            .or_else(|| self.home_pitchers.get(name))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
