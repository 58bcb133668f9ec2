// Game-prep analytics over pitch-by-pitch scouting data.
//
// Records are loaded and normalized once, classified into a season
// snapshot, and every profile, summary, card and routed context is a pure
// function of that snapshot.

pub mod classify;
pub mod dugout;
pub mod matcher;
pub mod normalize;
pub mod notes;
pub mod pitch;
pub mod profile;
pub mod quick_look;
pub mod record;
pub mod router;
pub mod season;
pub mod stats;
pub mod team;

pub use classify::{EntityEntry, StatsSnapshot};
pub use matcher::{best_match, find_best_match, MatchKind, NameMatch};
pub use normalize::{normalize_pitch_type, Hand, HomeTeam};
pub use profile::{compute_hitter_profile, compute_pitcher_profile, HitterProfile, PitcherProfile};
pub use quick_look::{quick_look, QuickLook};
pub use record::{load_pitches, load_pitches_from_reader, LoadError, PitchRecord};
pub use router::{route_question, RoutedContext};
pub use season::{seasons_in, SeasonFilter};
pub use team::{compute_team_summary, TeamSummary};
