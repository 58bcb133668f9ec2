// Rate types and small accumulators shared by the profile builders.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Shown wherever a rate has a zero denominator.
pub const NOT_APPLICABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Percent
// ---------------------------------------------------------------------------

/// A percentage (0-100) or N/A when the denominator was zero.
///
/// Displays and serializes with one decimal: `"41.7%"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percent(Option<f64>);

impl Percent {
    pub fn of(num: u32, den: u32) -> Self {
        if den == 0 {
            Percent(None)
        } else {
            Percent(Some(num as f64 / den as f64 * 100.0))
        }
    }

    pub const fn not_applicable() -> Self {
        Percent(None)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_applicable(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}%", v),
            None => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Average
// ---------------------------------------------------------------------------

/// A batting-average style ratio (hits / at-bats, wOBA) or N/A.
///
/// Displays and serializes with three decimals: `"0.333"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Average(Option<f64>);

impl Average {
    pub fn of(num: u32, den: u32) -> Self {
        if den == 0 {
            Average(None)
        } else {
            Average(Some(num as f64 / den as f64))
        }
    }

    pub fn from_ratio(num: f64, den: f64) -> Self {
        if den > 0.0 {
            Average(Some(num / den))
        } else {
            Average(None)
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_applicable(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.3}", v),
            None => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Velocity
// ---------------------------------------------------------------------------

/// Velocity summary for one pitch type: average to 0.1 mph, range to the
/// nearest mph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VeloStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub samples: u32,
}

impl VeloStats {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let sum: f64 = samples.iter().sum();
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(VeloStats {
            avg: round_to(sum / samples.len() as f64, 1),
            min: min.round(),
            max: max.round(),
            samples: samples.len() as u32,
        })
    }
}

/// Round to `places` decimal places.
pub fn round_to(v: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (v * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Ordered tallies
// ---------------------------------------------------------------------------

/// Per-label accumulator that remembers first-seen order, so ties in a
/// count-sorted listing resolve the same way on every run.
#[derive(Debug, Clone)]
pub struct Tally<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T: Default> Tally<T> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Mutable slot for `label`, created with `T::default()` on first use.
    pub fn entry(&mut self, label: &str) -> &mut T {
        let idx = match self.index.get(label) {
            Some(&i) => i,
            None => {
                self.entries.push((label.to_string(), T::default()));
                self.index.insert(label.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, label: &str) -> Option<&T> {
        self.index.get(label).map(|&i| &self.entries[i].1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries stably sorted by `key` descending.
    pub fn sorted_desc_by<K: Ord>(&self, key: impl Fn(&T) -> K) -> Vec<(&str, &T)> {
        let mut out: Vec<(&str, &T)> = self.iter().collect();
        out.sort_by(|a, b| key(b.1).cmp(&key(a.1)));
        out
    }
}

impl<T: Default> Default for Tally<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One pitch type's share of a total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchShare {
    pub pitch_type: String,
    pub count: u32,
    pub pct: Percent,
}

/// Turn a label → count tally into shares of its own total, most used first.
pub fn shares(tally: &Tally<u32>) -> Vec<PitchShare> {
    let total: u32 = tally.iter().map(|(_, c)| *c).sum();
    tally
        .sorted_desc_by(|c| *c)
        .into_iter()
        .map(|(label, count)| PitchShare {
            pitch_type: label.to_string(),
            count: *count,
            pct: Percent::of(*count, total),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
