//! Key state and read-side freshness queries
//!
//! A `KeyState` maps cache key names to the logical timestamp of their last
//! write. Versions are immutable; the reducer produces a new one for every
//! change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical timestamp assigned to a key write
pub type Timestamp = i64;

/// Lowest timestamp that counts as a valid write
pub const MIN_VALID_KEY: Timestamp = 1;

/// Timestamp reported for keys that are unset or invalidated
///
/// Also the identity for max/min aggregation over no keys.
pub const UNSET_KEY_TIME: Timestamp = MIN_VALID_KEY - 1;

/// Mapping from key name to last-write timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyState {
    entries: BTreeMap<String, Timestamp>,
}

impl KeyState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the last valid write to `key`
    ///
    /// Keys that were never written and keys that were invalidated both
    /// report `UNSET_KEY_TIME`; callers cannot tell them apart.
    pub fn key_time(&self, key: &str) -> Timestamp {
        match self.entries.get(key) {
            Some(&time) if time >= MIN_VALID_KEY => time,
            _ => UNSET_KEY_TIME,
        }
    }

    /// Latest `key_time` among `keys`, or `UNSET_KEY_TIME` if there are none
    pub fn max_key_time<K: AsRef<str>>(&self, keys: &[K]) -> Timestamp {
        keys.iter()
            .map(|k| self.key_time(k.as_ref()))
            .max()
            .unwrap_or(UNSET_KEY_TIME)
    }

    /// Earliest `key_time` among `keys`, or `UNSET_KEY_TIME` if there are none
    pub fn min_key_time<K: AsRef<str>>(&self, keys: &[K]) -> Timestamp {
        keys.iter()
            .map(|k| self.key_time(k.as_ref()))
            .min()
            .unwrap_or(UNSET_KEY_TIME)
    }

    /// Whether `key` holds a fresh value given its dependencies
    ///
    /// The key must have been written validly, and strictly after the most
    /// recent write of every dependency. A dependency written at the same
    /// timestamp makes the key stale.
    pub fn key_is_valid<K: AsRef<str>>(&self, key: &str, dependencies: &[K]) -> bool {
        let time = self.key_time(key);
        time >= MIN_VALID_KEY && time > self.max_key_time(dependencies)
    }

    /// Iterate over all recorded keys, including invalidated ones
    pub fn entries(&self) -> impl Iterator<Item = (&str, Timestamp)> {
        self.entries.iter().map(|(k, &t)| (k.as_str(), t))
    }

    /// Number of recorded keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key has ever been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Greatest timestamp stored for any key
    pub fn latest_timestamp(&self) -> Timestamp {
        self.entries
            .values()
            .copied()
            .max()
            .unwrap_or(UNSET_KEY_TIME)
    }

    /// Copy of this state with `key` set to `time`
    pub(crate) fn with_key(&self, key: &str, time: Timestamp) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), time);
        Self { entries }
    }
}

impl<K: Into<String>> FromIterator<(K, Timestamp)> for KeyState {
    fn from_iter<I: IntoIterator<Item = (K, Timestamp)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_DEPS: &[&str] = &[];

    fn state(pairs: &[(&str, Timestamp)]) -> KeyState {
        pairs.iter().copied().collect()
    }

    #[test]
    fn unset_key_reports_sentinel() {
        let state = KeyState::new();
        assert_eq!(state.key_time("missing"), MIN_VALID_KEY - 1);
    }

    #[test]
    fn invalidated_key_reports_sentinel() {
        let state = state(&[("a", UNSET_KEY_TIME)]);
        assert_eq!(state.key_time("a"), UNSET_KEY_TIME);
        assert!(!state.key_is_valid("a", NO_DEPS));
    }

    #[test]
    fn empty_aggregates_return_sentinel() {
        let state = state(&[("a", 10)]);
        assert_eq!(state.max_key_time(NO_DEPS), UNSET_KEY_TIME);
        assert_eq!(state.min_key_time(NO_DEPS), UNSET_KEY_TIME);
    }

    #[test]
    fn aggregates_over_keys() {
        let state = state(&[("a", 10), ("b", 30), ("c", 20)]);
        assert_eq!(state.max_key_time(&["a", "b", "c"]), 30);
        assert_eq!(state.min_key_time(&["a", "b", "c"]), 10);
        assert_eq!(state.min_key_time(&["a", "missing"]), UNSET_KEY_TIME);
    }

    #[test]
    fn valid_without_dependencies_once_written() {
        let state = state(&[("a", 10)]);
        assert!(state.key_is_valid("a", NO_DEPS));
        assert!(!state.key_is_valid("b", NO_DEPS));
    }

    #[test]
    fn unset_key_is_invalid_with_dependencies() {
        let state = KeyState::new();
        assert!(!state.key_is_valid("a", &["b"]));
    }

    #[test]
    fn unset_dependencies_do_not_constrain() {
        let state = state(&[("a", 10)]);
        assert!(state.key_is_valid("a", &["never-written"]));
    }

    #[test]
    fn stale_when_any_dependency_is_newer() {
        let state = state(&[("c", 5), ("a", 10), ("b", 15)]);
        assert!(!state.key_is_valid("a", &["b", "c"]));
        assert!(state.key_is_valid("b", &["a", "c"]));
    }

    #[test]
    fn equal_timestamps_count_as_stale() {
        let state = state(&[("a", 10), ("b", 10)]);
        assert!(!state.key_is_valid("a", &["b"]));
        assert!(!state.key_is_valid("b", &["a"]));
    }

    #[test]
    fn latest_timestamp_covers_all_entries() {
        assert_eq!(KeyState::new().latest_timestamp(), UNSET_KEY_TIME);
        let state = state(&[("a", 10), ("b", 42), ("c", UNSET_KEY_TIME)]);
        assert_eq!(state.latest_timestamp(), 42);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn serializes_as_flat_object() {
        let state = state(&[("a", 10)]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"a":10}"#);

        let parsed: KeyState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
