// Pitch-level records and CSV loading.
//
// One row per pitch thrown, as exported by the charting app. Column names
// follow the charting export (Date, Inning, Top/Bottom, Pitcher, ...). Every
// column is optional: a missing or malformed numeric field is tolerated and
// treated as absent/zero, never as an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One pitch, with the plate-appearance context it was thrown in.
///
/// String fields are trimmed on load. `at_bat_result` is only populated on
/// the pitch that ends a plate appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PitchRecord {
    pub date: String,
    pub inning: String,
    pub half: String,
    pub pitcher: String,
    pub pitcher_team: String,
    pub pitcher_hand: String,
    pub batter: String,
    pub batter_team: String,
    pub batter_hand: String,
    /// Free-text pitch type as charted; see `normalize::normalize_pitch_type`.
    pub pitch_type: String,
    /// Parsed velocity. `None` when the field was blank or not a number.
    pub velocity: Option<f64>,
    pub balls: u8,
    pub strikes: u8,
    pub pitch_result: String,
    pub attack_zone: String,
    pub location: String,
    pub at_bat_result: String,
    pub pa_of_inning: String,
}

impl PitchRecord {
    /// Game date parsed from the `Date` column (`M/D/YYYY`, or ISO as a
    /// fallback). `None` if the column is blank or unparseable.
    pub fn game_date(&self) -> Option<NaiveDate> {
        let d = self.date.trim();
        NaiveDate::parse_from_str(d, "%m/%d/%Y")
            .or_else(|_| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
            .ok()
    }

    /// Velocity usable for velocity stats: finite and strictly positive.
    pub fn usable_velocity(&self) -> Option<f64> {
        self.velocity.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Grid cell 1-9 from the `Location` column, if it is one.
    pub fn zone_cell(&self) -> Option<u8> {
        match leading_int(&self.location) {
            Some(n @ 1..=9) => Some(n as u8),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Charting export row. Every column is read as a string so that a bad
/// number in one field cannot reject the whole pitch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPitchRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Inning")]
    inning: String,
    #[serde(rename = "Top/Bottom")]
    half: String,
    #[serde(rename = "Pitcher")]
    pitcher: String,
    #[serde(rename = "PitcherTeam")]
    pitcher_team: String,
    #[serde(rename = "PitcherHand")]
    pitcher_hand: String,
    #[serde(rename = "Batter")]
    batter: String,
    #[serde(rename = "BatterTeam")]
    batter_team: String,
    #[serde(rename = "Batter Hand", alias = "BatterHand")]
    batter_hand: String,
    #[serde(rename = "PitchType")]
    pitch_type: String,
    #[serde(rename = "PitchVelo")]
    pitch_velo: String,
    #[serde(rename = "Balls")]
    balls: String,
    #[serde(rename = "Strikes")]
    strikes: String,
    #[serde(rename = "PitchResult")]
    pitch_result: String,
    #[serde(rename = "AttackZone")]
    attack_zone: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "AtBatResult")]
    at_bat_result: String,
    #[serde(rename = "PAofInning")]
    pa_of_inning: String,
}

impl From<RawPitchRow> for PitchRecord {
    fn from(raw: RawPitchRow) -> Self {
        PitchRecord {
            date: raw.date.trim().to_string(),
            inning: raw.inning.trim().to_string(),
            half: raw.half.trim().to_string(),
            pitcher: raw.pitcher.trim().to_string(),
            pitcher_team: raw.pitcher_team.trim().to_string(),
            pitcher_hand: raw.pitcher_hand.trim().to_string(),
            batter: raw.batter.trim().to_string(),
            batter_team: raw.batter_team.trim().to_string(),
            batter_hand: raw.batter_hand.trim().to_string(),
            pitch_type: raw.pitch_type.trim().to_string(),
            velocity: parse_velocity(&raw.pitch_velo),
            balls: parse_count(&raw.balls),
            strikes: parse_count(&raw.strikes),
            pitch_result: raw.pitch_result.trim().to_string(),
            attack_zone: raw.attack_zone.trim().to_string(),
            location: raw.location.trim().to_string(),
            at_bat_result: raw.at_bat_result.trim().to_string(),
            pa_of_inning: raw.pa_of_inning.trim().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field parsing helpers
// ---------------------------------------------------------------------------

/// Leading integer of a field ("2", "2.0", "3 "), like a lenient parseInt.
fn leading_int(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Ball/strike count. Blank or malformed counts are zero.
fn parse_count(s: &str) -> u8 {
    leading_int(s)
        .and_then(|n| u8::try_from(n).ok())
        .unwrap_or(0)
}

/// Leading decimal number of a field ("82 mph", "82.5*", "-3"), like a
/// lenient parseFloat. At least one digit is required.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut end = 0;
    let mut digits = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => digits += 1,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Pitch speed. Zero and negative readings are kept here and dropped by
/// `PitchRecord::usable_velocity`.
fn parse_velocity(s: &str) -> Option<f64> {
    leading_float(s).filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read pitch records from any CSV source with a header row.
///
/// Rows the CSV reader cannot decode at all (e.g. wrong field count) are
/// skipped with a warning; the rest of the file still loads.
pub fn load_pitches_from_reader<R: Read>(rdr: R) -> Result<Vec<PitchRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let mut records = Vec::new();
    for result in reader.deserialize::<RawPitchRow>() {
        match result {
            Ok(raw) => {
                let record = PitchRecord::from(raw);
                if is_blank(&record) {
                    continue;
                }
                records.push(record);
            }
            Err(e) => {
                warn!("skipping malformed pitch row: {}", e);
            }
        }
    }
    Ok(records)
}

/// Load the pitch dataset from a CSV file.
pub fn load_pitches(path: &Path) -> Result<Vec<PitchRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = load_pitches_from_reader(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Loaded {} pitch records from {}", records.len(), path.display());
    Ok(records)
}

/// A row with no pitcher, no batter and no date carries nothing usable.
fn is_blank(r: &PitchRecord) -> bool {
    r.pitcher.is_empty() && r.batter.is_empty() && r.date.is_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Inning,Top/Bottom,Pitcher,PitcherTeam,PitcherHand,Batter,BatterTeam,Batter Hand,PitchType,PitchVelo,Balls,Strikes,PitchResult,AttackZone,Location,AtBatResult,PAofInning";

    #[test]
    fn loads_full_row() {
        let csv_data = format!(
            "{HEADER}\n4/1/2024,1,Top,John Doe,Moeller,R,Sam Jones,Rival,L,Fastball,82.5,1,2,Called Strike,Heart,5,,3"
        );
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date, "4/1/2024");
        assert_eq!(r.half, "Top");
        assert_eq!(r.pitcher, "John Doe");
        assert_eq!(r.batter_hand, "L");
        assert_eq!(r.velocity, Some(82.5));
        assert_eq!(r.balls, 1);
        assert_eq!(r.strikes, 2);
        assert_eq!(r.zone_cell(), Some(5));
        assert_eq!(r.pa_of_inning, "3");
        assert!(r.at_bat_result.is_empty());
    }

    #[test]
    fn malformed_numbers_are_tolerated() {
        let csv_data = format!(
            "{HEADER}\n4/1/2024,1,Top,Doe,Moeller,R,Jones,Rival,R,Slider,fast,x,,Ball,Chase,14,,1"
        );
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].velocity, None);
        assert_eq!(records[0].balls, 0);
        assert_eq!(records[0].strikes, 0);
        assert_eq!(records[0].zone_cell(), None);
    }

    #[test]
    fn zero_velocity_is_parsed_but_not_usable() {
        let csv_data = format!(
            "{HEADER}\n4/1/2024,1,Top,Doe,Moeller,R,Jones,Rival,R,Slider,0,0,0,Ball,Chase,,,1"
        );
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records[0].velocity, Some(0.0));
        assert_eq!(records[0].usable_velocity(), None);
    }

    #[test]
    fn velocity_reads_the_leading_number() {
        assert_eq!(parse_velocity("82 mph"), Some(82.0));
        assert_eq!(parse_velocity("82.5abc"), Some(82.5));
        assert_eq!(parse_velocity("82.5*"), Some(82.5));
        assert_eq!(parse_velocity(" 79. "), Some(79.0));
        assert_eq!(parse_velocity(".5"), Some(0.5));
        assert_eq!(parse_velocity("-3"), Some(-3.0));
        assert_eq!(parse_velocity("abc"), None);
        assert_eq!(parse_velocity(""), None);
        assert_eq!(parse_velocity("-"), None);
        assert_eq!(parse_velocity("."), None);

        let csv_data = format!(
            "{HEADER}\n4/1/2024,1,Top,Doe,Moeller,R,Jones,Rival,R,Fastball,82 mph,0,0,Ball,Heart,5,,1"
        );
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records[0].velocity, Some(82.0));
        assert_eq!(records[0].usable_velocity(), Some(82.0));
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let csv_data = "Date,Pitcher,Batter\n4/2/2025,Doe,Jones";
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pitcher, "Doe");
        assert!(records[0].pitch_type.is_empty());
        assert_eq!(records[0].velocity, None);
    }

    #[test]
    fn fields_are_trimmed() {
        let csv_data = "Date,Pitcher,PitcherTeam,Batter\n 4/2/2025 ,  Jim Smith , Rival ,Jones";
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records[0].date, "4/2/2025");
        assert_eq!(records[0].pitcher, "Jim Smith");
        assert_eq!(records[0].pitcher_team, "Rival");
    }

    #[test]
    fn blank_rows_skipped() {
        let csv_data = "Date,Pitcher,Batter\n,,\n4/2/2025,Doe,Jones";
        let records = load_pitches_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn game_date_formats() {
        let mut r = PitchRecord {
            date: "3/28/2025".into(),
            ..Default::default()
        };
        assert_eq!(r.game_date(), NaiveDate::from_ymd_opt(2025, 3, 28));
        r.date = "2024-04-01".into();
        assert_eq!(r.game_date(), NaiveDate::from_ymd_opt(2024, 4, 1));
        r.date = "opening day".into();
        assert_eq!(r.game_date(), None);
    }

    #[test]
    fn empty_csv_returns_empty_vec() {
        let records = load_pitches_from_reader(HEADER.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
