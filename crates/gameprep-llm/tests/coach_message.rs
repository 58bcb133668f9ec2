// Route a question over a small dataset and build the full request.

use gameprep_baseball::{load_pitches_from_reader, route_question, HomeTeam, SeasonFilter, StatsSnapshot};
use gameprep_llm::{build_coach_message, build_request_body, system_prompt, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

const CSV: &str = "\
Date,Inning,Top/Bottom,Pitcher,PitcherTeam,PitcherHand,Batter,BatterTeam,Batter Hand,PitchType,PitchVelo,Balls,Strikes,PitchResult,AttackZone,Location,AtBatResult,PAofInning
4/2/2024,1,Top,Tom Ace,Elder,R,Sam Jones,Moeller,L,Fastball,82,0,0,Called Strike,Heart,5,,1
4/2/2024,1,Top,Tom Ace,Elder,R,Sam Jones,Moeller,L,Slider,74,0,1,In Play,Heart,5,1B,1
";

fn snapshot() -> StatsSnapshot {
    let records = load_pitches_from_reader(CSV.as_bytes()).unwrap();
    StatsSnapshot::build(&records, &HomeTeam::new("Moeller", "moeller"), SeasonFilter::All)
}

#[test]
fn pitcher_question_becomes_a_request() {
    let s = snapshot();
    let question = "What does Ace throw with two strikes?";
    let ctx = route_question(&s, question);
    assert_eq!(ctx.kind(), "opponent_pitcher");

    let message = build_coach_message(question, &ctx).unwrap();
    assert!(message.starts_with(
        "Here is the relevant data (context type: opponent_pitcher). Coach's question: \"What does Ace throw with two strikes?\"\n\n"
    ));

    let (_, json) = message.split_once("\n\n").unwrap();
    let data: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(data["pitcher"]["name"], "Tom Ace");
    assert_eq!(data["pitcher"]["total_pitches"], 2);
    assert!(data["home_hitters"]["Sam Jones"].is_object());

    let body = build_request_body(DEFAULT_MODEL, DEFAULT_MAX_TOKENS, &system_prompt("Moeller"), &message);
    assert_eq!(body["messages"][0]["content"], message.as_str());
}
