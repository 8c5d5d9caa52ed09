//! Date-derived seeds and the daily subject rotation.
//!
//! The seed is a plain decimal encoding of the calendar date and the
//! subject index is derived from it with a trigonometric hash. This is
//! intentionally non-cryptographic: it only has to be a stable,
//! roughly-uniform map from date to subject that every independent
//! implementation (client or server) reproduces without shared state.

use chrono::{Datelike, NaiveDate};

/// The canonical subject rotation.
pub const DEFAULT_SUBJECTS: &[&str] = &[
    "history",
    "geography",
    "anthropology",
    "sociology",
    "economics",
    "political science",
    "sports",
];

/// Encode a calendar date as a decimal seed: `year*10000 + month*100 + day`.
///
/// 2025-01-15 encodes as 20250115.
pub fn compute_seed(date: NaiveDate) -> u32 {
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Pick the subject for a date from an ordered, non-empty subject list.
///
/// `index = floor(|sin(seed)| * 100000) mod len`, evaluated in IEEE-754
/// double precision so the result is bit-for-bit identical everywhere.
///
/// # Panics
///
/// Panics if `subjects` is empty.
pub fn compute_subject<'a>(date: NaiveDate, subjects: &[&'a str]) -> &'a str {
    assert!(!subjects.is_empty(), "subject list must be non-empty");
    let seed = compute_seed(date);
    let index = ((f64::from(seed)).sin().abs() * 100_000.0).floor() as usize % subjects.len();
    subjects[index]
}

/// The resolved subject for one calendar day.
///
/// A value, not an entity: recomputed from the date on demand and never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySubject {
    pub date: NaiveDate,
    pub subject: String,
    pub seed: u32,
}

impl DailySubject {
    /// Resolve the subject for a date against the given rotation.
    pub fn for_date(date: NaiveDate, subjects: &[&str]) -> Self {
        Self {
            date,
            subject: compute_subject(date, subjects).to_string(),
            seed: compute_seed(date),
        }
    }
}
