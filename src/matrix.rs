//! Stop identifiers and the pairwise distance matrix.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Id;

/// Opaque key identifying a place within a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Travel cost for one ordered pair of stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistanceRecord {
    /// Distance in meters.
    pub distance: u64,
    /// Duration in seconds.
    pub duration: u64,
}

impl DistanceRecord {
    pub const fn new(distance: u64, duration: u64) -> Self {
        Self { distance, duration }
    }
}

/// Mapping from (origin, destination) to [`DistanceRecord`].
///
/// Not assumed symmetric: `A -> B` and `B -> A` are separate entries.
/// Rows are keyed by origin so lookups borrow both ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<S: Id> {
    records: HashMap<S, HashMap<S, DistanceRecord>>,
}

impl<S: Id> Default for DistanceMatrix<S> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<S: Id> DistanceMatrix<S> {
    /// Distance reported for a pair with no record.
    pub const MISSING: u64 = u64::MAX;

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `from -> to`.
    pub fn insert(&mut self, from: S, to: S, record: DistanceRecord) {
        self.records.entry(from).or_default().insert(to, record);
    }

    pub fn get(&self, from: &S, to: &S) -> Option<&DistanceRecord> {
        self.records.get(from)?.get(to)
    }

    /// Distance for `from -> to`.
    ///
    /// A stop is zero from itself. A missing pair yields [`Self::MISSING`],
    /// which sorts after every real distance.
    pub fn distance(&self, from: &S, to: &S) -> u64 {
        if from == to {
            return 0;
        }
        self.get(from, to)
            .map_or(Self::MISSING, |record| record.distance)
    }

    /// Ordered pairs of distinct stops that have no record.
    pub fn missing_pairs<'a>(&self, stops: &'a [S]) -> Vec<(&'a S, &'a S)> {
        let mut missing = Vec::new();
        for from in stops {
            for to in stops {
                if from != to && self.get(from, to).is_none() {
                    missing.push((from, to));
                }
            }
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.records.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(HashMap::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &S, &DistanceRecord)> {
        self.records.iter().flat_map(|(from, row)| {
            row.iter().map(move |(to, record)| (from, to, record))
        })
    }
}

impl<S: Id> Extend<(S, S, DistanceRecord)> for DistanceMatrix<S> {
    fn extend<T: IntoIterator<Item = (S, S, DistanceRecord)>>(&mut self, iter: T) {
        for (from, to, record) in iter {
            self.insert(from, to, record);
        }
    }
}

impl<S: Id> FromIterator<(S, S, DistanceRecord)> for DistanceMatrix<S> {
    fn from_iter<T: IntoIterator<Item = (S, S, DistanceRecord)>>(iter: T) -> Self {
        let mut matrix = Self::new();
        matrix.extend(iter);
        matrix
    }
}
