// End-to-end: load the charting fixture, classify by season, profile and route.

use gameprep_baseball::{
    compute_hitter_profile, compute_pitcher_profile, compute_team_summary, load_pitches,
    quick_look, route_question, seasons_in, HomeTeam, PitchRecord, QuickLook, RoutedContext,
    SeasonFilter, StatsSnapshot,
};
use std::path::Path;

fn records() -> Vec<PitchRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pitches.csv");
    load_pitches(&path).expect("fixture loads")
}

fn snapshot(season: SeasonFilter) -> StatsSnapshot {
    StatsSnapshot::build(&records(), &HomeTeam::new("Moeller", "moeller"), season)
}

#[test]
fn loads_every_row_and_lists_seasons() {
    let records = records();
    assert_eq!(records.len(), 14);
    assert_eq!(seasons_in(&records), vec![2023, 2024]);
    // "n/a" velocity is kept as a pitch with no velocity.
    assert!(records[12].velocity.is_none());
}

#[test]
fn classification_across_seasons() {
    let all = snapshot(SeasonFilter::All);
    assert_eq!(all.team_list(), ["Elder", "St. Xavier"]);
    assert_eq!(all.opponent_pitcher_list(), ["Ben Cole", "Tom Ace"]);
    assert_eq!(all.opponent_batter_list(), ["Rick Hale"]);
    assert_eq!(all.home_pitcher_list(), ["John Doe"]);
    assert_eq!(all.home_hitter_list(), ["Max Green", "Sam Jones"]);

    let y2024 = snapshot(SeasonFilter::Year(2024));
    assert_eq!(y2024.team_list(), ["Elder"]);
    assert!(!y2024.opponent_pitchers.contains_key("Ben Cole"));
    assert_eq!(y2024.total_pitches(), 10);
}

#[test]
fn pitcher_profile_from_fixture() {
    let s = snapshot(SeasonFilter::All);
    let ace = &s.opponent_pitchers["Tom Ace"];
    let p = compute_pitcher_profile(&ace.pitches, "Tom Ace", ace.hand, &ace.team).unwrap();
    assert_eq!(p.total_pitches, 7);
    assert_eq!(p.total_pa, 2);
    assert_eq!(p.k_rate.to_string(), "50.0%");

    let fb = &p.pitch_mix[0];
    assert_eq!(fb.pitch_type, "Fastball");
    assert_eq!(fb.count, 3);
    let velo = fb.velo.unwrap();
    assert!((velo.avg - 82.3).abs() < 1e-9);
    // One slider has a blank velocity.
    assert_eq!(p.mix_entry("Slider").unwrap().velo.unwrap().samples, 2);
}

#[test]
fn hitter_profile_spans_seasons() {
    let s = snapshot(SeasonFilter::All);
    let jones = &s.home_hitters["Sam Jones"];
    let h = compute_hitter_profile(&jones.pitches, "Sam Jones", jones.hand).unwrap();
    assert_eq!(h.total_pitches, 5);
    assert_eq!(h.at_bats, 2);
    assert_eq!(h.hits, 2);
    assert_eq!(h.avg.to_string(), "1.000");
    assert!(h.sample_warning.is_some());
}

#[test]
fn team_summary_from_fixture() {
    let s = snapshot(SeasonFilter::All);
    let t = compute_team_summary(&s, "Elder").unwrap();
    assert_eq!(t.total_pitches, 10);
    assert_eq!(t.pitchers.len(), 1);
    assert_eq!(t.pitchers[0].name, "Tom Ace");
    assert_eq!(t.pitchers[0].est_innings, 1);
    let labels: Vec<_> = t.pitch_mix.iter().map(|m| m.pitch_type.as_str()).collect();
    assert_eq!(labels, ["Fastball", "Slider", "Curveball"]);
}

#[test]
fn routing_from_fixture() {
    let s = snapshot(SeasonFilter::All);
    match route_question(&s, "Game plan for Elder") {
        RoutedContext::GamePlan(d) => {
            assert_eq!(d.team_summary.unwrap().team, "Elder");
            assert!(d.opponent_pitchers.contains_key("Tom Ace"));
            assert!(d.opponent_batters.contains_key("Rick Hale"));
            assert_eq!(d.home_hitters.len(), 2);
        }
        other => panic!("unexpected {}", other.kind()),
    }
    assert_eq!(
        route_question(&s, "how do we pitch rick hale").kind(),
        "opponent_batter"
    );
}

#[test]
fn empty_season_yields_nothing() {
    let s = snapshot(SeasonFilter::Year(2025));
    assert!(s.is_empty());
    assert!(s.team_list().is_empty());
    assert!(compute_team_summary(&s, "Elder").is_none());
    assert!(quick_look(&s, "tom ace").is_none());
    assert_eq!(route_question(&s, "game plan for elder").kind(), "general");
}

#[test]
fn quick_look_from_fixture() {
    let s = snapshot(SeasonFilter::All);
    match quick_look(&s, "how is jones hitting") {
        Some(QuickLook::Hitter(card)) => {
            assert_eq!(card.profile.name, "Sam Jones");
            assert!(card.dugout.has_zone_data());
        }
        other => panic!("unexpected {:?}", other.map(|c| c.kind())),
    }
}
