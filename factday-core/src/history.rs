//! Tracking of previously delivered item identifiers.
//!
//! The ledger is owned by the calling context and handed to the engine as
//! a capability; the engine itself never persists anything. Entries are
//! append-only within a session and carry no expiry.

use crate::store::{SessionStore, FACT_HISTORY_KEY};
use std::collections::HashSet;

/// Previously delivered item identifiers (article titles, question
/// prompts).
pub trait HistoryLedger {
    fn has_seen(&self, id: &str) -> bool;
    fn record(&mut self, id: &str);
}

/// Plain in-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ledger with already-known identifiers.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl HistoryLedger for SeenSet {
    fn has_seen(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn record(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }
}

/// Ledger persisted through a [`SessionStore`] as a JSON string array
/// under the `factHistory` key, matching the layout the surrounding
/// application already stores.
#[derive(Debug, Clone)]
pub struct StoreLedger<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> StoreLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Hand the store back to the caller.
    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> Vec<String> {
        self.store
            .get(FACT_HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}

impl<S: SessionStore> HistoryLedger for StoreLedger<S> {
    fn has_seen(&self, id: &str) -> bool {
        self.load().iter().any(|seen| seen == id)
    }

    fn record(&mut self, id: &str) {
        let mut ids = self.load();
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
            // A fresh id list always serializes.
            let raw = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string());
            self.store.set(FACT_HISTORY_KEY, &raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_seen_set_records_and_reports() {
        let mut ledger = SeenSet::new();
        assert!(!ledger.has_seen("Anglo-Zanzibar War"));
        ledger.record("Anglo-Zanzibar War");
        assert!(ledger.has_seen("Anglo-Zanzibar War"));
        assert!(!ledger.has_seen("Crimean War"));
    }

    #[test]
    fn test_seen_set_seeded() {
        let ledger = SeenSet::with_ids(["a", "b"]);
        assert!(ledger.has_seen("a"));
        assert!(ledger.has_seen("b"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_store_ledger_round_trips_json() {
        let mut ledger = StoreLedger::new(MemoryStore::new());
        ledger.record("First Article");
        ledger.record("Second Article");
        ledger.record("First Article"); // no duplicate entry

        let store = ledger.into_inner();
        let raw = store.get(FACT_HISTORY_KEY).unwrap();
        let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(ids, vec!["First Article", "Second Article"]);
    }

    #[test]
    fn test_store_ledger_reads_existing_history() {
        let mut store = MemoryStore::new();
        store.set(FACT_HISTORY_KEY, r#"["Old Article"]"#);
        let ledger = StoreLedger::new(store);
        assert!(ledger.has_seen("Old Article"));
        assert!(!ledger.has_seen("New Article"));
    }

    #[test]
    fn test_store_ledger_tolerates_corrupt_history() {
        let mut store = MemoryStore::new();
        store.set(FACT_HISTORY_KEY, "not json");
        let mut ledger = StoreLedger::new(store);
        assert!(!ledger.has_seen("Anything"));
        ledger.record("Anything");
        assert!(ledger.has_seen("Anything"));
    }
}
