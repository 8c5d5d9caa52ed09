//! Content sources: one trait, two provider adapters.
//!
//! The engine talks to providers only through [`ContentSource`], so tests
//! can script candidates without touching the network, and the subject to
//! trivia-category mapping lives in exactly one table.

use rand::Rng;
use thiserror::Error;

pub use opentdb::Difficulty;

/// Trivia category used for subjects with no table entry.
const DEFAULT_CATEGORY: u8 = 23;

/// Text used when an article summary has neither extract nor description.
const PLACEHOLDER_DESCRIPTION: &str = "An interesting Wikipedia article.";

/// Which provider a candidate came from. Relevance filtering only applies
/// to encyclopedia candidates; trivia category selection already encodes
/// the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Trivia,
    Encyclopedia,
}

/// A raw item fetched from a provider, before filtering and normalization.
#[derive(Debug, Clone)]
pub struct RawCandidate {
    /// Dedup identifier: article title or question prompt.
    pub id: String,
    pub prompt_or_text: String,
    pub correct_answer: Option<String>,
    pub distractors: Option<Vec<String>>,
    pub source_url: Option<String>,
    pub categories: Vec<String>,
    pub kind: CandidateKind,
}

/// Errors raised by content sources. The selection engine absorbs these
/// into its fallback paths; they never reach the engine's callers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Trivia provider error: {0}")]
    Trivia(#[from] opentdb::Error),

    #[error("Encyclopedia provider error: {0}")]
    Encyclopedia(#[from] wikipedia::Error),

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

/// A provider of candidate items for a subject.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn fetch_candidates(
        &self,
        subject: &str,
        count: usize,
    ) -> Result<Vec<RawCandidate>, SourceError>;
}

/// Map a subject name to its trivia category code.
///
/// This is the single canonical table; unmapped subjects fall back to the
/// history category.
pub fn category_for_subject(subject: &str) -> u8 {
    match subject.to_lowercase().as_str() {
        "history" => 23,
        "geography" => 22,
        "anthropology" => 17,
        "sociology" | "economics" | "political science" => 24,
        "sports" => 21,
        _ => DEFAULT_CATEGORY,
    }
}

/// Adapter over the Open Trivia Database: one batch call per request.
#[derive(Clone)]
pub struct TriviaSource {
    client: opentdb::Client,
    difficulty: Difficulty,
}

impl TriviaSource {
    pub fn new(client: opentdb::Client) -> Self {
        Self {
            client,
            difficulty: Difficulty::default(),
        }
    }

    /// Set the difficulty requested from the provider.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl ContentSource for TriviaSource {
    async fn fetch_candidates(
        &self,
        subject: &str,
        count: usize,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        let category = category_for_subject(subject);
        let questions = self
            .client
            .fetch_questions(category, self.difficulty, count.min(u8::MAX as usize) as u8)
            .await?;

        Ok(questions
            .into_iter()
            .map(|q| RawCandidate {
                id: q.question.clone(),
                prompt_or_text: q.question,
                correct_answer: Some(q.correct_answer),
                distractors: Some(q.incorrect_answers),
                source_url: None,
                categories: Vec::new(),
                kind: CandidateKind::Trivia,
            })
            .collect())
    }
}

/// How the encyclopedia adapter locates an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One random article, any subject. The relevance filter does the work.
    #[default]
    RandomArticle,
    /// Enumerate the subject-named category and pick one member at random.
    Category,
}

/// Adapter over Wikipedia: random article or subject-category lookup,
/// followed by a summary fetch.
#[derive(Clone)]
pub struct EncyclopediaSource {
    client: wikipedia::Client,
    strategy: FetchStrategy,
}

impl EncyclopediaSource {
    pub fn new(client: wikipedia::Client) -> Self {
        Self {
            client,
            strategy: FetchStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    async fn pick_title(&self, subject: &str) -> Result<String, SourceError> {
        match self.strategy {
            FetchStrategy::RandomArticle => Ok(self.client.random_title().await?),
            FetchStrategy::Category => {
                let members = self.client.category_members(subject).await?;
                let index = rand::thread_rng().gen_range(0..members.len());
                Ok(members[index].clone())
            }
        }
    }
}

impl ContentSource for EncyclopediaSource {
    async fn fetch_candidates(
        &self,
        subject: &str,
        count: usize,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        let mut candidates = Vec::with_capacity(count);
        for _ in 0..count {
            let title = self.pick_title(subject).await?;
            let summary = self.client.summary(&title).await?;
            candidates.push(candidate_from_summary(summary));
        }
        Ok(candidates)
    }
}

fn candidate_from_summary(summary: wikipedia::PageSummary) -> RawCandidate {
    let text = if summary.extract.trim().is_empty() {
        let description = summary
            .description
            .as_deref()
            .unwrap_or(PLACEHOLDER_DESCRIPTION);
        format!("{}: {}", summary.title, description)
    } else {
        summary.extract.clone()
    };

    RawCandidate {
        id: summary.title.clone(),
        prompt_or_text: text,
        correct_answer: None,
        distractors: None,
        source_url: summary.url,
        categories: summary.categories,
        kind: CandidateKind::Encyclopedia,
    }
}
