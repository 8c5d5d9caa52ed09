//! The selection engine: bounded-retry fact selection and one-shot quiz
//! assembly, with deterministic fallbacks.
//!
//! Upstream failures and exhausted retries never escape this module; the
//! caller always receives a usable [`Fact`] or [`Quiz`]. The only error
//! the wider system ever surfaces to a user is incomplete quiz
//! submission, and that lives in [`crate::score`].

use crate::content::{ContentSource, RawCandidate, SourceError};
use crate::history::HistoryLedger;
use crate::model::{Fact, Quiz, QuizQuestion};
use crate::relevance::RelevanceFilter;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Engine tuning knobs with the observed production defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Retry budget for fact selection.
    pub max_attempts: u32,

    /// Questions requested per quiz. The provider may return fewer; the
    /// quiz then uses exactly what was returned.
    pub question_count: usize,

    /// Whether fact selection consults and updates the history ledger.
    /// Quiz selection never deduplicates regardless of this flag.
    pub dedup_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            question_count: 10,
            dedup_enabled: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count;
        self
    }

    pub fn with_dedup_enabled(mut self, dedup_enabled: bool) -> Self {
        self.dedup_enabled = dedup_enabled;
        self
    }
}

/// Internal selection failures. Converted to fallbacks before returning.
#[derive(Debug, Error)]
enum SelectError {
    #[error(transparent)]
    Upstream(#[from] SourceError),

    #[error("No relevant unseen candidate within the attempt budget")]
    NoRelevantCandidate,
}

/// Orchestrates content sources, relevance filtering, and history into
/// fact and quiz selection.
///
/// The ledger is not owned here: callers pass it per call, keeping
/// persistence and session scoping outside the engine.
pub struct SelectionEngine<T, E> {
    trivia: T,
    encyclopedia: E,
    filter: RelevanceFilter,
    config: EngineConfig,
}

impl<T: ContentSource, E: ContentSource> SelectionEngine<T, E> {
    pub fn new(trivia: T, encyclopedia: E) -> Self {
        Self {
            trivia,
            encyclopedia,
            filter: RelevanceFilter::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select today's fact for `subject`.
    ///
    /// Tries up to `max_attempts` candidates, skipping ones already in the
    /// ledger or irrelevant to the subject. A failed fetch consumes an
    /// attempt. On success the candidate id is recorded; on exhaustion the
    /// constant fallback fact is returned and deliberately not recorded.
    pub async fn select_fact(&self, subject: &str, ledger: &mut dyn HistoryLedger) -> Fact {
        match self.try_select_fact(subject, ledger).await {
            Ok(fact) => fact,
            Err(_) => Fact::fallback(),
        }
    }

    async fn try_select_fact(
        &self,
        subject: &str,
        ledger: &mut dyn HistoryLedger,
    ) -> Result<Fact, SelectError> {
        let mut last_upstream: Option<SourceError> = None;

        for _ in 0..self.config.max_attempts {
            // A failed or empty fetch consumes an attempt.
            let candidate = match self.encyclopedia.fetch_candidates(subject, 1).await {
                Ok(mut batch) if !batch.is_empty() => batch.remove(0),
                Ok(_) => continue,
                Err(err) => {
                    last_upstream = Some(err);
                    continue;
                }
            };

            if self.config.dedup_enabled && ledger.has_seen(&candidate.id) {
                continue;
            }
            if !self.filter.matches(&candidate, subject) {
                continue;
            }

            let Some(fact) = Fact::new(
                &candidate.prompt_or_text,
                candidate.source_url.clone(),
                Some(candidate.id.clone()),
            ) else {
                // Whitespace-only extract; not a usable fact.
                continue;
            };

            if self.config.dedup_enabled {
                ledger.record(&candidate.id);
            }
            return Ok(fact);
        }

        Err(match last_upstream {
            Some(err) => SelectError::Upstream(err),
            None => SelectError::NoRelevantCandidate,
        })
    }

    /// Assemble today's quiz for `subject`.
    ///
    /// One batch fetch; any upstream failure, empty batch, or batch with
    /// no well-formed items yields the constant fallback quiz. Questions
    /// are never deduplicated against history.
    pub async fn select_quiz(&self, subject: &str) -> Quiz {
        self.select_quiz_with_rng(subject, &mut rand::thread_rng())
            .await
    }

    /// [`select_quiz`](Self::select_quiz) with an explicit RNG for the
    /// choice shuffle, so tests can pin the permutation.
    pub async fn select_quiz_with_rng<R: Rng>(&self, subject: &str, rng: &mut R) -> Quiz {
        let batch = match self
            .trivia
            .fetch_candidates(subject, self.config.question_count)
            .await
        {
            Ok(batch) => batch,
            Err(_) => return Quiz::fallback(),
        };

        let questions: Vec<QuizQuestion> = batch
            .into_iter()
            .filter_map(|candidate| build_question(candidate, rng))
            .collect();

        if questions.is_empty() {
            return Quiz::fallback();
        }
        Quiz { questions }
    }
}

/// Combine correct answer and distractors into a shuffled choice list,
/// with `answer_index` tracking the correct answer's final position.
fn build_question<R: Rng>(candidate: RawCandidate, rng: &mut R) -> Option<QuizQuestion> {
    let correct = candidate.correct_answer?;
    let mut choices = candidate.distractors?;
    choices.push(correct.clone());
    choices.shuffle(rng);

    let answer_index = choices.iter().position(|choice| *choice == correct)?;
    Some(QuizQuestion {
        prompt: candidate.prompt_or_text,
        choices,
        answer_index,
    })
}
