// Pitch- and plate-appearance-level vocabulary: pitch results, attack
// zones, at-bat outcomes, count situations and the plate-appearance key.

use crate::record::PitchRecord;
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Pitch result predicates
// ---------------------------------------------------------------------------

/// Any result containing "Swing", "Foul" or "In Play" is a swing.
pub fn is_swing(result: &str) -> bool {
    result.contains("Swing") || result.contains("Foul") || result.contains("In Play")
}

pub fn is_whiff(result: &str) -> bool {
    result.contains("Swing and Miss")
}

/// Called or swinging strike, as counted for first-pitch strike rate.
pub fn is_strike(result: &str) -> bool {
    result.contains("Strike")
}

/// Coarse outcome of a single pitch, used by the dugout outcome table.
/// Categories are checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchOutcome {
    Looking,
    Whiff,
    Foul,
    InPlay,
    Ball,
    Other,
}

impl PitchOutcome {
    pub fn classify(result: &str) -> Self {
        if result.contains("Looking") {
            PitchOutcome::Looking
        } else if is_whiff(result) {
            PitchOutcome::Whiff
        } else if result.contains("Foul") {
            PitchOutcome::Foul
        } else if result.contains("In Play") {
            PitchOutcome::InPlay
        } else if result.contains("Ball") {
            PitchOutcome::Ball
        } else {
            PitchOutcome::Other
        }
    }
}

// ---------------------------------------------------------------------------
// Attack zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttackZone {
    Heart,
    Shadow,
    Chase,
    Waste,
}

impl AttackZone {
    /// Exact, case-sensitive match on the four charted labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Heart" => Some(AttackZone::Heart),
            "Shadow" => Some(AttackZone::Shadow),
            "Chase" => Some(AttackZone::Chase),
            "Waste" => Some(AttackZone::Waste),
            _ => None,
        }
    }

    /// Chase and Waste are outside the strike zone.
    pub fn is_chase(&self) -> bool {
        matches!(self, AttackZone::Chase | AttackZone::Waste)
    }
}

// ---------------------------------------------------------------------------
// Plate-appearance outcomes
// ---------------------------------------------------------------------------

/// Terminal outcome of a plate appearance, parsed from `AtBatResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaOutcome {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    HitByPitch,
    IntentionalWalk,
    Strikeout,
    Sacrifice,
    CatchersInterference,
    /// Ground out, fly out, line out, double play, infield fly, fielder's choice.
    BattedOut,
    /// Anything else (e.g. "Error"): an official at-bat but neither hit nor out.
    Other,
}

impl PaOutcome {
    /// `None` for a blank result, meaning the pitch did not end the PA.
    pub fn parse(s: &str) -> Option<Self> {
        let outcome = match s.trim() {
            "" => return None,
            "1B" => PaOutcome::Single,
            "2B" => PaOutcome::Double,
            "3B" => PaOutcome::Triple,
            "HR" => PaOutcome::HomeRun,
            "BB" => PaOutcome::Walk,
            "HBP" => PaOutcome::HitByPitch,
            "IBB" => PaOutcome::IntentionalWalk,
            "Strike Out" => PaOutcome::Strikeout,
            "Sacrifice" => PaOutcome::Sacrifice,
            "Catchers Interference" => PaOutcome::CatchersInterference,
            "Ground Out" | "Fly Out" | "Line Out" | "Double Play" | "Infield Fly"
            | "Fielders Choice" => PaOutcome::BattedOut,
            _ => PaOutcome::Other,
        };
        Some(outcome)
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            PaOutcome::Single | PaOutcome::Double | PaOutcome::Triple | PaOutcome::HomeRun
        )
    }

    pub fn is_extra_base_hit(&self) -> bool {
        matches!(self, PaOutcome::Double | PaOutcome::Triple | PaOutcome::HomeRun)
    }

    /// Official at-bat: everything except walks, HBP, sacrifices and
    /// catcher's interference.
    pub fn is_official_at_bat(&self) -> bool {
        !matches!(
            self,
            PaOutcome::Walk
                | PaOutcome::HitByPitch
                | PaOutcome::IntentionalWalk
                | PaOutcome::Sacrifice
                | PaOutcome::CatchersInterference
        )
    }

    /// BB, HBP and IBB all count toward walk rate.
    pub fn is_walk(&self) -> bool {
        matches!(
            self,
            PaOutcome::Walk | PaOutcome::HitByPitch | PaOutcome::IntentionalWalk
        )
    }

    pub fn is_strikeout(&self) -> bool {
        matches!(self, PaOutcome::Strikeout)
    }

    pub fn is_home_run(&self) -> bool {
        matches!(self, PaOutcome::HomeRun)
    }

    /// Outs that enter the wOBA denominator.
    pub fn is_out(&self) -> bool {
        matches!(self, PaOutcome::BattedOut | PaOutcome::Strikeout)
    }
}

// ---------------------------------------------------------------------------
// Count situations
// ---------------------------------------------------------------------------

/// Count situation a pitch was thrown in.
///
/// `FirstPitch` (0-0) and `TwoStrikes` overlap with exactly one of
/// `PitcherAhead`, `Even` or `HitterAhead`, so a single pitch can fall into
/// two situations. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountSituation {
    FirstPitch,
    PitcherAhead,
    Even,
    HitterAhead,
    TwoStrikes,
}

impl CountSituation {
    pub const ALL: [CountSituation; 5] = [
        CountSituation::FirstPitch,
        CountSituation::PitcherAhead,
        CountSituation::Even,
        CountSituation::HitterAhead,
        CountSituation::TwoStrikes,
    ];

    /// Every situation that applies to a `balls`-`strikes` count.
    pub fn for_count(balls: u8, strikes: u8) -> Vec<CountSituation> {
        let mut out = Vec::with_capacity(2);
        if balls == 0 && strikes == 0 {
            out.push(CountSituation::FirstPitch);
        }
        if strikes == 2 {
            out.push(CountSituation::TwoStrikes);
        }
        out.push(if strikes > balls {
            CountSituation::PitcherAhead
        } else if balls > strikes {
            CountSituation::HitterAhead
        } else {
            CountSituation::Even
        });
        out
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountSituation::FirstPitch => "1st Pitch",
            CountSituation::PitcherAhead => "Pitcher Ahead",
            CountSituation::Even => "Even",
            CountSituation::HitterAhead => "Hitter Ahead",
            CountSituation::TwoStrikes => "2 Strikes",
        }
    }
}

impl fmt::Display for CountSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Plate-appearance key
// ---------------------------------------------------------------------------

/// Identity of the plate appearance a pitch belongs to. Every pitch of one
/// PA shares the same key, so PA-level tallies dedupe on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaKey {
    date: String,
    inning: String,
    half: String,
    pitcher: String,
    batter: String,
    pa_of_inning: String,
}

impl PaKey {
    pub fn of(r: &PitchRecord) -> Self {
        PaKey {
            date: r.date.clone(),
            inning: r.inning.clone(),
            half: r.half.clone(),
            pitcher: r.pitcher.clone(),
            batter: r.batter.clone(),
            pa_of_inning: r.pa_of_inning.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
