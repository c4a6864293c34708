//! Durable cross-run memory of what has been synced
//!
//! [`SyncState`] maps identifiers to [`StateRecord`]s. [`StateStore`] loads it
//! at the start of a run and replaces it wholesale at the end.

mod record;
mod store;

pub use record::StateRecord;
pub use store::StateStore;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Mapping from identifier to its sync record.
///
/// Keys iterate in sorted order so the persisted file is stable between
/// runs that change nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState {
    records: BTreeMap<String, StateRecord>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<&StateRecord> {
        self.records.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }

    /// Insert or replace a record, returning the previous one
    pub fn insert(&mut self, identifier: impl Into<String>, record: StateRecord) -> Option<StateRecord> {
        self.records.insert(identifier.into(), record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Identifiers whose upload never completed
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, record)| record.is_pending())
            .map(|(identifier, _)| identifier)
    }

    /// Copy of this state with every pending record dropped.
    ///
    /// A persisted record without a reference can only come from an older
    /// tool that saved half-finished uploads. Dropping it makes the item look
    /// new again, so it gets uploaded instead of hiding behind a matching
    /// digest forever.
    pub fn without_pending(&self) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|(_, record)| !record.is_pending())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Like [`without_pending`](Self::without_pending), but only drops the
    /// pending records whose identifier is in `identifiers`. Others are kept
    /// untouched.
    pub fn without_pending_in<'a>(&self, identifiers: impl IntoIterator<Item = &'a str>) -> Self {
        let fetched: HashSet<&str> = identifiers.into_iter().collect();
        Self {
            records: self
                .records
                .iter()
                .filter(|(identifier, record)| {
                    !(record.is_pending() && fetched.contains(identifier.as_str()))
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(String, StateRecord)> for SyncState {
    fn from_iter<T: IntoIterator<Item = (String, StateRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
