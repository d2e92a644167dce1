// src/models/scan.rs
use std::collections::BTreeMap;

use super::names::FieldName;
use super::reading::Reading;

/// Readings collected from page markup, keyed by a fixed name set.
#[derive(Debug, Clone, PartialEq)]
pub struct Scan<N: FieldName> {
    readings: BTreeMap<N, Reading>,
    /// Declared names outside the fixed set, in document order.
    pub unknown: Vec<String>,
}

impl<N: FieldName> Default for Scan<N> {
    fn default() -> Self {
        Self {
            readings: BTreeMap::new(),
            unknown: Vec::new(),
        }
    }
}

impl<N: FieldName> Scan<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a declared name. A later entry for the same name replaces
    /// the earlier one.
    pub fn record(&mut self, declared: &str, reading: Reading) {
        match declared.parse::<N>() {
            Ok(name) => {
                self.readings.insert(name, reading);
            }
            Err(err) => self.unknown.push(err.name),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: N) -> Option<&Reading> {
        self.readings.get(&name)
    }

    /// The numeric value for `name`; absent names are zero.
    #[inline]
    #[must_use]
    pub fn value(&self, name: N) -> f64 {
        self.get(name).map_or(0.0, Reading::value)
    }

    /// Names from the fixed set with no reading at all.
    #[must_use]
    pub fn missing(&self) -> Vec<N> {
        N::ALL
            .iter()
            .copied()
            .filter(|name| !self.readings.contains_key(name))
            .collect()
    }

    pub fn unparsable(&self) -> impl Iterator<Item = (N, &str)> {
        self.readings.iter().filter_map(|(name, reading)| match reading {
            Reading::Unparsable(raw) => Some((*name, raw.as_str())),
            Reading::Number(_) => None,
        })
    }
}

impl<N: FieldName> FromIterator<(N, f64)> for Scan<N> {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self {
            readings: iter
                .into_iter()
                .map(|(name, value)| (name, Reading::Number(value)))
                .collect(),
            unknown: Vec::new(),
        }
    }
}
