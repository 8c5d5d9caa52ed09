//! Session storage capability.
//!
//! The surrounding application owns persistence (the original kept
//! everything in browser-local storage). The core only sees this narrow
//! get/set interface, injected by the caller, which keeps ownership of
//! history and day markers outside the engine.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Seen-article identifiers, stored as a JSON string array.
pub const FACT_HISTORY_KEY: &str = "factHistory";
/// Date marker (`YYYY-MM-DD`) for "quiz taken today".
pub const QUIZ_DATE_KEY: &str = "quizDate";
/// Date marker (`YYYY-MM-DD`) for "bonus fact delivered today".
pub const BONUS_FACT_DATE_KEY: &str = "bonusFactDate";

/// Format a date the way the persisted day markers expect it.
pub fn date_marker(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A key/value store scoped to one user session.
///
/// Single-writer within a session; cross-session isolation is the
/// caller's concern.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, for tests and for callers without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
