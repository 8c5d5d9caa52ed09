//! Deterministic fact-of-the-day and daily-quiz selection.
//!
//! This crate is the decision core of the fact machine:
//! - A reproducible subject per calendar date (no shared state, no real
//!   randomness in daily values)
//! - Candidate retrieval from trivia and encyclopedia providers behind
//!   one [`ContentSource`] trait
//! - Relevance and seen-before filtering in a bounded retry loop
//! - Deterministic fallbacks when providers fail or attempts run out
//! - Quiz grading with bonus-unlock eligibility
//!
//! HTTP handlers, UI, and durable storage are the surrounding
//! application's concern; history and session state enter through the
//! [`HistoryLedger`] and [`SessionStore`] capabilities.
//!
//! # Quick Start
//!
//! ```ignore
//! use factday_core::{
//!     compute_subject, EncyclopediaSource, SeenSet, SelectionEngine, TriviaSource,
//!     DEFAULT_SUBJECTS,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let today = chrono::Local::now().date_naive();
//!     let subject = compute_subject(today, DEFAULT_SUBJECTS);
//!
//!     let engine = SelectionEngine::new(
//!         TriviaSource::new(opentdb::Client::new()),
//!         EncyclopediaSource::new(wikipedia::Client::new()),
//!     );
//!
//!     let mut ledger = SeenSet::new();
//!     let fact = engine.select_fact(subject, &mut ledger).await;
//!     println!("{}", fact.text);
//! }
//! ```

pub mod content;
pub mod engine;
pub mod history;
pub mod model;
pub mod relevance;
pub mod score;
pub mod seed;
pub mod store;
pub mod testing;

// Primary public API
pub use content::{
    category_for_subject, CandidateKind, ContentSource, Difficulty, EncyclopediaSource,
    FetchStrategy, RawCandidate, SourceError, TriviaSource,
};
pub use engine::{EngineConfig, SelectionEngine};
pub use history::{HistoryLedger, SeenSet, StoreLedger};
pub use model::{Fact, Quiz, QuizQuestion, FALLBACK_FACT_TEXT};
pub use relevance::RelevanceFilter;
pub use score::{evaluate, running_score, ScoreError, ScoreReport, BONUS_THRESHOLD, UNANSWERED};
pub use seed::{compute_seed, compute_subject, DailySubject, DEFAULT_SUBJECTS};
pub use store::{date_marker, MemoryStore, SessionStore};
