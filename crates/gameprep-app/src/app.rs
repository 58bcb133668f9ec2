// Application state: the full dataset, the configuration and the snapshot
// for the current season.
//
// Answering a question follows the same two paths in every front end:
// 1. Dugout mode tries a quick-look card first (no explainer call)
// 2. Otherwise the router picks a context and the coach message is built

use crate::config::Config;
use gameprep_baseball::{
    load_pitches, quick_look, route_question, seasons_in, PitchRecord, QuickLook, RoutedContext,
    SeasonFilter, StatsSnapshot,
};
use gameprep_llm::{build_coach_message, build_request_body, system_prompt};

use anyhow::Context;
use std::path::Path;
use tracing::info;

/// How a question should be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Cards first; the explainer only when no card applies.
    #[default]
    Dugout,
    /// Always route to the explainer.
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Computed card, nothing to send.
    Card(QuickLook),
    /// Context and message for the explainer.
    Explain {
        context: RoutedContext,
        message: String,
    },
}

/// A named entity for the roster listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub kind: &'static str,
}

pub struct GamePrep {
    records: Vec<PitchRecord>,
    config: Config,
    snapshot: StatsSnapshot,
}

impl GamePrep {
    /// Build state over `records` for the configured season.
    pub fn new(config: Config, records: Vec<PitchRecord>) -> Self {
        let snapshot = StatsSnapshot::build(&records, &config.home_team(), config.season);
        Self {
            records,
            config,
            snapshot,
        }
    }

    /// Load the configured dataset (relative to `base_dir`) and build state.
    pub fn load(config: Config, base_dir: &Path) -> anyhow::Result<Self> {
        let path = base_dir.join(&config.data.pitches);
        let records = load_pitches(&path)
            .with_context(|| format!("failed to load pitch data from {}", path.display()))?;
        let app = Self::new(config, records);
        info!("{}", app.status_line());
        Ok(app)
    }

    /// Rebuild the snapshot for `season`. The old snapshot is replaced whole.
    pub fn set_season(&mut self, season: SeasonFilter) {
        self.snapshot = StatsSnapshot::build(&self.records, &self.config.home_team(), season);
        self.config.season = season;
        info!("Season set to {}: {}", season, self.status_line());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> &StatsSnapshot {
        &self.snapshot
    }

    pub fn records(&self) -> &[PitchRecord] {
        &self.records
    }

    /// Seasons present in the whole dataset, oldest first.
    pub fn seasons(&self) -> Vec<i32> {
        seasons_in(&self.records)
    }

    /// "N pitches | T teams | P pitchers | H hitters" for the current season.
    pub fn status_line(&self) -> String {
        let s = &self.snapshot;
        format!(
            "{} pitches | {} teams | {} pitchers | {} hitters",
            thousands(s.total_pitches()),
            s.team_list().len(),
            s.home_pitcher_list().len(),
            s.home_hitter_list().len()
        )
    }

    /// Every name a question can refer to, teams first.
    pub fn roster(&self) -> Vec<RosterEntry> {
        let s = &self.snapshot;
        let groups: [(&'static str, &[String]); 5] = [
            ("team", s.team_list()),
            ("pitcher", s.home_pitcher_list()),
            ("hitter", s.home_hitter_list()),
            ("opp pitcher", s.opponent_pitcher_list()),
            ("opp batter", s.opponent_batter_list()),
        ];
        groups
            .into_iter()
            .flat_map(|(kind, names)| {
                names.iter().map(move |n| RosterEntry {
                    name: n.clone(),
                    kind,
                })
            })
            .collect()
    }

    pub fn ask(&self, question: &str, mode: Mode) -> anyhow::Result<Answer> {
        if mode == Mode::Dugout {
            if let Some(card) = quick_look(&self.snapshot, question) {
                info!("Answered with {} card", card.kind());
                return Ok(Answer::Card(card));
            }
        }
        let context = route_question(&self.snapshot, question);
        let message =
            build_coach_message(question, &context).context("failed to serialize context")?;
        info!(
            "Routed question to {} ({} bytes)",
            context.kind(),
            message.len()
        );
        Ok(Answer::Explain { context, message })
    }

    /// Full request body for the explainer, always via the router.
    pub fn request_body(&self, question: &str) -> anyhow::Result<serde_json::Value> {
        let context = route_question(&self.snapshot, question);
        let message =
            build_coach_message(question, &context).context("failed to serialize context")?;
        let llm = &self.config.llm;
        Ok(build_request_body(
            &llm.model,
            llm.max_tokens,
            &system_prompt(&self.config.team.name),
            &message,
        ))
    }
}

/// 12345 -> "12,345".
fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
