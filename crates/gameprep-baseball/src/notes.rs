// Scouting notes: short plain-text bullets derived from profiles.
//
// Every function here is pure and returns the bullets in reading order;
// an empty list means there was nothing worth saying.

use crate::dugout::DugoutStats;
use crate::pitch::CountSituation;
use crate::profile::{
    HitterProfile, LineupProfile, PitchMixEntry, PitchTypeResult, PitcherProfile, StaffProfile,
};
use crate::stats::{Average, Percent};
use std::cmp::Ordering;

/// A pitch type needs this many pitches seen before a hitter is judged on it.
const MIN_PITCHES_SEEN: u32 = 5;
/// Lineup pitch-type calls need this many at-bats.
const MIN_LINEUP_AT_BATS: u32 = 5;
/// Staff put-away and hittable calls need this many swings.
const MIN_STAFF_SWINGS: u32 = 10;
/// AVG gap between sides before a platoon edge is called.
const PLATOON_GAP: f64 = 0.050;

const CHASE_HIGH: f64 = 30.0;
const CHASE_LOW: f64 = 20.0;
const CHASE_STAY_IN_ZONE: f64 = 15.0;
const LINEUP_CHASE_LOW: f64 = 22.0;
const ZONE_RATE_HIGH: f64 = 60.0;
const ZONE_RATE_LOW: f64 = 45.0;
const FIRST_STRIKE_HIGH: f64 = 65.0;
const FIRST_STRIKE_LOW: f64 = 50.0;
const DAMAGE_AVG: f64 = 0.300;
const DAMAGE_WHIFF: f64 = 30.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Positive value of a rate, if it has one.
fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|x| *x > 0.0)
}

fn desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0).total_cmp(&a.unwrap_or(0.0))
}

/// Which side has the platoon edge, by more than `PLATOON_GAP`.
#[derive(Debug, PartialEq)]
enum Edge {
    Right,
    Left,
}

fn platoon_edge(right: Average, left: Average) -> Option<Edge> {
    let (r, l) = (positive(right.value())?, positive(left.value())?);
    if r > l + PLATOON_GAP {
        Some(Edge::Right)
    } else if l > r + PLATOON_GAP {
        Some(Edge::Left)
    } else {
        None
    }
}

/// Pitch mix entries with a whiff rate, lowest whiff rate first.
fn by_whiff_asc(p: &PitcherProfile) -> Vec<&PitchMixEntry> {
    let mut v: Vec<_> = p
        .pitch_mix
        .iter()
        .filter(|e| e.whiff_rate.is_applicable())
        .collect();
    v.sort_by(|a, b| desc(b.whiff_rate.value(), a.whiff_rate.value()));
    v
}

fn first_pitch_note(p: &PitcherProfile) -> Option<String> {
    let top = p.top_pitch_in(CountSituation::FirstPitch)?;
    Some(format!(
        "Sit {} first pitch: throws it {} of the time",
        top.pitch_type, top.pct
    ))
}

/// Pitch types a hitter has seen enough of, ordered by `key` descending.
fn judged<'a>(
    h: &'a HitterProfile,
    key: impl Fn(&PitchTypeResult) -> Option<f64>,
) -> Vec<&'a PitchTypeResult> {
    let mut v: Vec<_> = h
        .results_by_pitch_type
        .iter()
        .filter(|r| r.pitches >= MIN_PITCHES_SEEN && key(*r).is_some())
        .collect();
    v.sort_by(|a, b| desc(key(*a), key(*b)));
    v
}

fn attack_note(r: &PitchTypeResult) -> String {
    format!("Hits {} against {}: look to attack it", r.avg, r.pitch_type)
}

fn struggle_note(r: &PitchTypeResult) -> String {
    format!(
        "Struggles with {}: {} whiff rate, shorten up",
        r.pitch_type, r.whiff_rate
    )
}

// ---------------------------------------------------------------------------
// Pitcher notes
// ---------------------------------------------------------------------------

/// What a hitter needs to hear before facing this pitcher.
pub fn relay_to_hitter(p: &PitcherProfile) -> Vec<String> {
    let mut notes = Vec::new();
    notes.extend(first_pitch_note(p));

    if let Some(top) = p.top_pitch_in(CountSituation::TwoStrikes) {
        let whiff = p
            .mix_entry(&top.pitch_type)
            .map_or(Percent::not_applicable(), |e| e.whiff_rate);
        notes.push(format!(
            "With 2 strikes, protect against the {} ({}): {} whiff rate",
            top.pitch_type, top.pct, whiff
        ));
    }
    if let Some(top) = p.top_pitch_in(CountSituation::HitterAhead) {
        notes.push(format!(
            "When behind in count, he goes {} ({}); be ready to drive it",
            top.pitch_type, top.pct
        ));
    }
    if let Some(easiest) = by_whiff_asc(p).first() {
        notes.push(format!(
            "Most hittable pitch: {} (only {} whiff rate)",
            easiest.pitch_type, easiest.whiff_rate
        ));
    }
    match platoon_edge(p.vs_rhh.avg, p.vs_lhh.avg) {
        Some(Edge::Right) => notes.push(format!(
            "Hitters hit {} vs him from the right side; RHH have the edge",
            p.vs_rhh.avg
        )),
        Some(Edge::Left) => notes.push(format!(
            "Hitters hit {} vs him from the left side; LHH have the edge",
            p.vs_lhh.avg
        )),
        None => {}
    }
    notes
}

/// A full plan for hitting against this pitcher.
pub fn hitting_plan(p: &PitcherProfile) -> Vec<String> {
    let mut notes = Vec::new();
    notes.extend(first_pitch_note(p));

    let by_whiff = by_whiff_asc(p);
    if let (Some(easiest), Some(toughest)) = (by_whiff.first(), by_whiff.last()) {
        notes.push(format!(
            "Most hittable: {}, only {} whiff rate; look to drive it",
            easiest.pitch_type, easiest.whiff_rate
        ));
        if toughest.pitch_type != easiest.pitch_type {
            notes.push(format!(
                "Toughest pitch: {}, {} whiff rate; shorten up or lay off",
                toughest.pitch_type, toughest.whiff_rate
            ));
        }
    }
    if let Some(top) = p.top_pitch_in(CountSituation::HitterAhead) {
        notes.push(format!(
            "When behind in count, expect {} ({}); be ready to attack",
            top.pitch_type, top.pct
        ));
    }
    if let Some(top) = p.top_pitch_in(CountSituation::TwoStrikes) {
        notes.push(format!(
            "With 2 strikes, protect against {} ({}); don't get caught looking",
            top.pitch_type, top.pct
        ));
    }

    let zp = &p.zone_profile;
    match positive(zp.zone_rate.value()) {
        Some(z) if z > ZONE_RATE_HIGH => notes.push(format!(
            "Lives in the zone ({}); be aggressive early",
            zp.zone_rate
        )),
        Some(z) if z < ZONE_RATE_LOW => notes.push(format!(
            "Works off the plate ({} chase zone); be patient and take pitches",
            zp.chase
        )),
        _ => {}
    }

    match positive(p.first_pitch_strike.value()) {
        Some(f) if f > FIRST_STRIKE_HIGH => notes.push(format!(
            "Gets ahead often ({} first pitch strike); be ready to swing early",
            p.first_pitch_strike
        )),
        Some(f) if f < FIRST_STRIKE_LOW => notes.push(format!(
            "Struggles to get ahead ({} first pitch strike); take the first pitch",
            p.first_pitch_strike
        )),
        _ => {}
    }

    match platoon_edge(p.vs_rhh.avg, p.vs_lhh.avg) {
        Some(Edge::Right) => notes.push(format!(
            "Hittable from the right side: RHH hit {}",
            p.vs_rhh.avg
        )),
        Some(Edge::Left) => notes.push(format!(
            "Hittable from the left side: LHH hit {}",
            p.vs_lhh.avg
        )),
        None => {}
    }
    notes
}

/// Staff-wide tendencies for a team pitching card.
pub fn staff_overview(s: &StaffProfile) -> Vec<String> {
    let p = &s.profile;
    let mut notes = vec![format!(
        "Staff K rate: {} | BB rate: {} | 1st pitch strike: {}",
        p.k_rate, p.bb_rate, p.first_pitch_strike
    )];

    if let Some(primary) = p.pitch_mix.first() {
        let velo = primary
            .velo
            .map_or_else(|| "?".to_string(), |v| format!("{:.1}", v.avg));
        notes.push(format!(
            "Staff throws {} most ({}) at avg {} mph",
            primary.pitch_type, primary.pct, velo
        ));
    }

    notes.push(format!(
        "Hitters vs staff: RHH {} | LHH {}",
        p.vs_rhh.avg, p.vs_lhh.avg
    ));

    let swung: Vec<&PitchMixEntry> = p
        .pitch_mix
        .iter()
        .filter(|e| e.swings >= MIN_STAFF_SWINGS)
        .collect();
    let mut put_away = swung.clone();
    put_away.sort_by(|a, b| desc(a.whiff_rate.value(), b.whiff_rate.value()));
    if let Some(best) = put_away.first() {
        notes.push(format!(
            "Best put-away pitch: {} ({} whiff rate)",
            best.pitch_type, best.whiff_rate
        ));
    }
    let mut hittable = swung;
    hittable.sort_by(|a, b| desc(b.whiff_rate.value(), a.whiff_rate.value()));
    if let Some(weak) = hittable.first() {
        if put_away.first().map(|b| &b.pitch_type) != Some(&weak.pitch_type) {
            notes.push(format!(
                "Most hittable pitch: {} (only {} whiff rate)",
                weak.pitch_type, weak.whiff_rate
            ));
        }
    }
    notes
}

// ---------------------------------------------------------------------------
// Hitter notes
// ---------------------------------------------------------------------------

/// What the coach tells this hitter.
pub fn coach_notes(h: &HitterProfile, d: &DugoutStats) -> Vec<String> {
    let mut notes = Vec::new();

    let hittable = judged(h, |r| r.avg.value());
    let struggles = judged(h, |r| r.whiff_rate.value());
    match (hittable.first(), struggles.first()) {
        (Some(best), Some(worst)) if best.pitch_type == worst.pitch_type => {
            let avg = best.avg.value().unwrap_or(0.0);
            let whiff = best.whiff_rate.value().unwrap_or(0.0);
            if avg >= DAMAGE_AVG && whiff >= DAMAGE_WHIFF {
                notes.push(format!(
                    "Swings and misses at {} often ({} whiff) but does damage when contact is made ({} AVG); shorten up to make contact",
                    best.pitch_type, best.whiff_rate, best.avg
                ));
            } else if avg >= DAMAGE_AVG {
                notes.push(attack_note(best));
            } else {
                notes.push(struggle_note(worst));
            }
            if let Some(next) = hittable.get(1) {
                notes.push(attack_note(next));
            }
            if let Some(next) = struggles.get(1) {
                notes.push(struggle_note(next));
            }
        }
        (best, worst) => {
            notes.extend(best.map(|r| attack_note(r)));
            notes.extend(worst.map(|r| struggle_note(r)));
        }
    }

    match positive(h.chase_rate.value()) {
        Some(c) if c > CHASE_HIGH => notes.push(format!(
            "Chasing {} of pitches out of zone; be more selective",
            h.chase_rate
        )),
        Some(c) if c <= CHASE_LOW => notes.push(format!(
            "Disciplined eye: only chasing {} out of zone",
            h.chase_rate
        )),
        _ => {}
    }

    match platoon_edge(d.vs_rhp.avg, d.vs_lhp.avg) {
        Some(Edge::Right) => notes.push(format!(
            "Better vs RHP ({}) than LHP ({})",
            d.vs_rhp.avg, d.vs_lhp.avg
        )),
        Some(Edge::Left) => notes.push(format!(
            "Better vs LHP ({}) than RHP ({})",
            d.vs_lhp.avg, d.vs_rhp.avg
        )),
        None => {}
    }

    let hot = d.hot_zones();
    if !hot.is_empty() {
        notes.push(format!("Hot zones: {}", hot.join(", ")));
    }
    let cold = d.cold_zones();
    if !cold.is_empty() {
        notes.push(format!("Cold zones: {}", cold.join(", ")));
    }
    notes
}

/// How our pitchers should attack this hitter.
pub fn pitching_plan(h: &HitterProfile, d: &DugoutStats) -> Vec<String> {
    let mut notes = Vec::new();

    let by_whiff = judged(h, |r| r.whiff_rate.value());
    let by_avg = judged(h, |r| r.avg.value());

    if let Some(best) = by_whiff.first() {
        notes.push(format!(
            "Attack with {}: {} whiff rate",
            best.pitch_type, best.whiff_rate
        ));
    }
    if let Some(avoid) = by_avg.first() {
        let same = by_whiff
            .first()
            .is_some_and(|w| w.pitch_type == avoid.pitch_type);
        if !same {
            notes.push(format!(
                "Avoid {}: hits {} against it",
                avoid.pitch_type, avoid.avg
            ));
        } else if let Some(next) = by_avg.get(1) {
            notes.push(format!(
                "Be careful with {}: hits {} against it",
                next.pitch_type, next.avg
            ));
        }
    }

    let cold = d.cold_zones();
    if !cold.is_empty() {
        notes.push(format!("Locate to {}: cold zones", cold.join(", ")));
    }
    let hot = d.hot_zones();
    if !hot.is_empty() {
        notes.push(format!("Stay away from {}: hot zones", hot.join(", ")));
    }

    match positive(h.chase_rate.value()) {
        Some(c) if c > CHASE_HIGH => notes.push(format!(
            "Expand the zone: chases {} out of zone",
            h.chase_rate
        )),
        Some(c) if c <= CHASE_STAY_IN_ZONE => notes.push(format!(
            "Don't waste pitches: only chases {}, stay in the zone",
            h.chase_rate
        )),
        _ => {}
    }

    if let Some(putaway) = by_whiff.first() {
        notes.push(format!("Put-away pitch: {} with 2 strikes", putaway.pitch_type));
    }

    match platoon_edge(d.vs_rhp.avg, d.vs_lhp.avg) {
        Some(Edge::Right) => notes.push(format!(
            "Weaker vs LHP ({}); get a lefty if possible",
            d.vs_lhp.avg
        )),
        Some(Edge::Left) => notes.push(format!(
            "Weaker vs RHP ({}); get a righty if possible",
            d.vs_rhp.avg
        )),
        None => {}
    }
    notes
}

/// Lineup-wide tendencies for a team hitting card.
pub fn lineup_overview(l: &LineupProfile) -> Vec<String> {
    let h = &l.profile;
    let mut notes = vec![
        format!(
            "Team batting {} with {} XBH across {} plate appearances",
            h.avg, l.extra_base_hits, h.total_pa
        ),
        format!("Strikeout rate: {} | Walk rate: {}", h.k_rate, h.bb_rate),
    ];

    match positive(h.chase_rate.value()) {
        Some(c) if c > CHASE_HIGH => notes.push(format!(
            "Team chasing {} out of zone; need more discipline",
            h.chase_rate
        )),
        Some(c) if c <= LINEUP_CHASE_LOW => notes.push(format!(
            "Disciplined lineup: only chasing {} out of zone",
            h.chase_rate
        )),
        Some(_) => notes.push(format!("Team chase rate: {}", h.chase_rate)),
        None => {}
    }

    notes.push(format!(
        "vs RHP: {} AVG / {} wOBA | vs LHP: {} AVG / {} wOBA",
        l.vs_rhp.avg, l.vs_rhp.woba, l.vs_lhp.avg, l.vs_lhp.woba
    ));

    let judged = l.judged_pitch_types(MIN_LINEUP_AT_BATS);
    if let Some(best) = judged.first() {
        notes.push(format!("Best against {}: hitting {}", best.pitch_type, best.avg));
    }
    if judged.len() > 1 {
        if let Some(worst) = judged.last() {
            notes.push(format!(
                "Weakest against {}: hitting {} ({} whiff)",
                worst.pitch_type, worst.avg, worst.whiff_rate
            ));
        }
    }
    notes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
