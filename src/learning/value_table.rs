//! Sparse table of learned state values

use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};

use crate::tictactoe::BoardState;

/// Entries with a magnitude at or below this are not worth persisting
pub const SIGNIFICANCE_THRESHOLD: f64 = 1e-5;

/// Value estimates keyed by board encoding; unseen boards are worth 0.
///
/// Serializes as a JSON object from the decimal encoding to the value, in
/// ascending encoding order. Deserializing rejects repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueTable {
    values: BTreeMap<u16, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: BoardState) -> f64 {
        self.values.get(&state.encoded()).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: BoardState, value: f64) {
        self.values.insert(state.encoded(), value);
    }

    /// Number of stored entries (including insignificant ones)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw `(encoding, value)` pairs in ascending encoding order
    pub fn entries(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.values.iter().map(|(&key, &value)| (key, value))
    }

    /// Only the entries whose magnitude exceeds [`SIGNIFICANCE_THRESHOLD`]
    pub fn significant(&self) -> ValueTable {
        self.values
            .iter()
            .filter(|(_, value)| value.abs() > SIGNIFICANCE_THRESHOLD)
            .map(|(&key, &value)| (key, value))
            .collect()
    }
}

impl<'de> Deserialize<'de> for ValueTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UniqueEntries)
    }
}

struct UniqueEntries;

impl<'de> Visitor<'de> for UniqueEntries {
    type Value = ValueTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from board encodings to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ValueTable, A::Error> {
        let mut values = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<u16, f64>()? {
            if values.insert(key, value).is_some() {
                return Err(de::Error::custom(format_args!(
                    "duplicate entry for board {key}"
                )));
            }
        }
        Ok(ValueTable { values })
    }
}

impl FromIterator<(u16, f64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (u16, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
