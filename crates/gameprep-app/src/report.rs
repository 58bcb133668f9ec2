// Plain-text rendering of quick-look cards and the roster for the terminal.

use crate::app::RosterEntry;
use gameprep_baseball::dugout::{DugoutStats, Heat};
use gameprep_baseball::pitch::CountSituation;
use gameprep_baseball::quick_look::{HitterCard, PitcherCard, TeamHittingCard, TeamPitchingCard};
use gameprep_baseball::QuickLook;

/// Render any card. Players seen on fewer than `small_sample` pitches get a
/// warning line under their header.
pub fn render_card(card: &QuickLook, small_sample: usize) -> String {
    match card {
        QuickLook::Pitcher(c) => render_pitcher(c, small_sample),
        QuickLook::Hitter(c) => render_hitter(c, small_sample),
        QuickLook::TeamPitching(c) => render_team_pitching(c, small_sample),
        QuickLook::TeamHitting(c) => render_team_hitting(c, small_sample),
    }
}

/// One "kind: name" line per entry.
pub fn render_roster(entries: &[RosterEntry]) -> String {
    let width = entries.iter().map(|e| e.kind.len()).max().unwrap_or(0);
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!("{:<width$}  {}\n", e.kind, e.name, width = width));
    }
    out
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_line(out: &mut String, pitches: u32, small_sample: usize) {
    if (pitches as usize) < small_sample {
        out.push_str(&format!("  ! Small sample: only {} pitches\n", pitches));
    }
}

fn bullets(out: &mut String, title: &str, notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    out.push_str(&format!("  {}:\n", title));
    for n in notes {
        out.push_str(&format!("    - {}\n", n));
    }
}

// ---------------------------------------------------------------------------
// Pitcher card
// ---------------------------------------------------------------------------

fn render_pitcher(c: &PitcherCard, small_sample: usize) -> String {
    let p = &c.profile;
    let mut out = format!(
        "{} ({}, {}) | {} pitches, {} PA\n",
        p.name,
        p.team,
        p.hand.pitcher_label(),
        p.total_pitches,
        p.total_pa
    );
    sample_line(&mut out, p.total_pitches, small_sample);

    out.push_str(&format!(
        "  K {} | BB {} | HR {} | 1st pitch strike {} | zone {}\n",
        p.k_rate, p.bb_rate, p.hr_rate, p.first_pitch_strike, p.zone_profile.zone_rate
    ));
    out.push_str(&format!(
        "  vs RHH {} ({} AB) | vs LHH {} ({} AB)\n",
        p.vs_rhh.avg, p.vs_rhh.at_bats, p.vs_lhh.avg, p.vs_lhh.at_bats
    ));

    out.push_str("  Pitch mix:\n");
    for e in &p.pitch_mix {
        let velo = e
            .velo
            .map_or_else(|| "-".to_string(), |v| format!("{:.1} (max {:.0})", v.avg, v.max));
        out.push_str(&format!(
            "    {:<14} {:>3}  {:>6}  velo {:<16} whiff {}\n",
            e.pitch_type, e.count, e.pct.to_string(), velo, e.whiff_rate
        ));
    }

    out.push_str("  By count:\n");
    for situation in CountSituation::ALL {
        let Some(shares) = p.pitch_mix_by_count.get(&situation) else {
            continue;
        };
        let mix: Vec<String> = shares
            .iter()
            .take(3)
            .map(|s| format!("{} {}", s.pitch_type, s.pct))
            .collect();
        out.push_str(&format!("    {:<14} {}\n", situation.label(), mix.join(", ")));
    }

    bullets(&mut out, "Relay to hitter", &c.relay);
    bullets(&mut out, "Hitting plan", &c.hitting_plan);
    out
}

// ---------------------------------------------------------------------------
// Hitter card
// ---------------------------------------------------------------------------

fn render_zone_grid(out: &mut String, d: &DugoutStats) {
    if !d.has_zone_data() {
        return;
    }
    out.push_str("  Zones (AVG, catcher's view):\n");
    for row in d.zone_grid.chunks(3) {
        let cells: Vec<String> = row
            .iter()
            .map(|c| {
                let mark = match c.heat {
                    Some(Heat::Hot) => "+",
                    Some(Heat::Cold) => "-",
                    None => " ",
                };
                format!("{:>5}{}", c.avg.to_string(), mark)
            })
            .collect();
        out.push_str(&format!("    {}\n", cells.join(" ")));
    }
}

fn render_hitter(c: &HitterCard, small_sample: usize) -> String {
    let h = &c.profile;
    let mut out = h.name.clone();
    if let Some(team) = &h.team {
        out.push_str(&format!(" ({})", team));
    }
    out.push_str(&format!(
        " {} | {} pitches, {} PA\n",
        h.hand.hitter_label(),
        h.total_pitches,
        h.total_pa
    ));
    sample_line(&mut out, h.total_pitches, small_sample);

    out.push_str(&format!(
        "  AVG {} ({}-{}) | K {} | BB {} | chase {}\n",
        h.avg, h.hits, h.at_bats, h.k_rate, h.bb_rate, h.chase_rate
    ));
    let d = &c.dugout;
    out.push_str(&format!(
        "  vs RHP {} / wOBA {} | vs LHP {} / wOBA {}\n",
        d.vs_rhp.avg, d.vs_rhp.woba, d.vs_lhp.avg, d.vs_lhp.woba
    ));

    out.push_str("  By pitch type:\n");
    for r in &h.results_by_pitch_type {
        out.push_str(&format!(
            "    {:<14} {:>3} seen  AVG {:<6} whiff {:<6} chase {}\n",
            r.pitch_type,
            r.pitches,
            r.avg.to_string(),
            r.whiff_rate.to_string(),
            r.chase_rate
        ));
    }
    render_zone_grid(&mut out, d);

    bullets(&mut out, "Coach notes", &c.coach_notes);
    bullets(&mut out, "Pitching plan", &c.pitching_plan);
    out
}

// ---------------------------------------------------------------------------
// Team cards
// ---------------------------------------------------------------------------

fn render_team_pitching(c: &TeamPitchingCard, small_sample: usize) -> String {
    let mut out = format!(
        "{} pitching staff | {} arms, {} pitches\n",
        c.team, c.staff.arms, c.staff.profile.total_pitches
    );
    bullets(&mut out, "Overview", &c.overview);
    for p in &c.pitchers {
        out.push('\n');
        out.push_str(&render_pitcher(p, small_sample));
    }
    out
}

fn render_team_hitting(c: &TeamHittingCard, small_sample: usize) -> String {
    let mut out = format!(
        "{} lineup | {} hitters, {} pitches seen\n",
        c.team, c.lineup.hitters, c.lineup.profile.total_pitches
    );
    bullets(&mut out, "Overview", &c.overview);
    for h in &c.hitters {
        out.push('\n');
        out.push_str(&render_hitter(h, small_sample));
    }
    out
}
