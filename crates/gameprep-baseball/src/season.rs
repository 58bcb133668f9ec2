// Season filtering.
//
// A season is matched as a "/YYYY" fragment of the raw Date column, so
// dates the charting app wrote in M/D/YYYY form filter correctly even if
// chrono cannot parse them.

use crate::record::PitchRecord;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonFilter {
    #[default]
    All,
    Year(u16),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid season '{0}': expected \"all\" or a four-digit year")]
pub struct SeasonParseError(pub String);

impl FromStr for SeasonFilter {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("all") {
            return Ok(SeasonFilter::All);
        }
        if t.len() == 4 && t.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(year) = t.parse::<u16>() {
                return Ok(SeasonFilter::Year(year));
            }
        }
        Err(SeasonParseError(s.to_string()))
    }
}

impl fmt::Display for SeasonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonFilter::All => f.write_str("all"),
            SeasonFilter::Year(y) => write!(f, "{}", y),
        }
    }
}

impl SeasonFilter {
    pub fn matches(&self, date: &str) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Year(y) => date.contains(&format!("/{}", y)),
        }
    }
}

/// The records that fall in `season`, in input order.
pub fn filter_records(records: &[PitchRecord], season: SeasonFilter) -> Vec<PitchRecord> {
    records
        .iter()
        .filter(|r| season.matches(&r.date))
        .cloned()
        .collect()
}

/// Sorted, distinct years present in the dataset. Rows with unparseable
/// dates are ignored.
pub fn seasons_in(records: &[PitchRecord]) -> Vec<i32> {
    use chrono::Datelike;

    records
        .iter()
        .filter_map(|r| r.game_date())
        .map(|d| d.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str) -> PitchRecord {
        PitchRecord {
            date: date.into(),
            pitcher: "Doe".into(),
            ..Default::default()
        }
    }

    #[test]
    fn parse_season_values() {
        assert_eq!("all".parse::<SeasonFilter>().unwrap(), SeasonFilter::All);
        assert_eq!("ALL".parse::<SeasonFilter>().unwrap(), SeasonFilter::All);
        assert_eq!("2025".parse::<SeasonFilter>().unwrap(), SeasonFilter::Year(2025));
        assert!("25".parse::<SeasonFilter>().is_err());
        assert!("last year".parse::<SeasonFilter>().is_err());
        assert_eq!(SeasonFilter::Year(2024).to_string(), "2024");
    }

    #[test]
    fn year_is_a_date_fragment_match() {
        let f = SeasonFilter::Year(2024);
        assert!(f.matches("4/1/2024"));
        assert!(!f.matches("4/1/2025"));
        // ISO dates have no "/YYYY" fragment.
        assert!(!f.matches("2024-04-01"));
        assert!(SeasonFilter::All.matches(""));
    }

    #[test]
    fn filter_keeps_input_order() {
        let records = vec![dated("4/1/2024"), dated("3/30/2025"), dated("5/2/2024")];
        let kept = filter_records(&records, SeasonFilter::Year(2024));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].date, "4/1/2024");
        assert_eq!(kept[1].date, "5/2/2024");
        assert_eq!(filter_records(&records, SeasonFilter::All).len(), 3);
    }

    #[test]
    fn seasons_are_sorted_and_distinct() {
        let records = vec![
            dated("3/30/2025"),
            dated("4/1/2024"),
            dated("bad"),
            dated("2025-04-02"),
        ];
        assert_eq!(seasons_in(&records), vec![2024, 2025]);
    }
}
