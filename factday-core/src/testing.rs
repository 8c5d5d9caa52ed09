//! Testing utilities for the selection engine.
//!
//! `MockSource` stands in for either provider adapter, returning scripted
//! responses in order so engine behavior can be tested deterministically
//! without network access.

use crate::content::{CandidateKind, ContentSource, RawCandidate, SourceError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A content source that replays scripted responses.
///
/// Each `fetch_candidates` call consumes the next scripted response; when
/// the script runs out it reports an upstream failure.
pub struct MockSource {
    responses: Mutex<VecDeque<Result<Vec<RawCandidate>, SourceError>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    /// Script a successful batch.
    pub fn queue_candidates(self, candidates: Vec<RawCandidate>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(candidates));
        self
    }

    /// Script an upstream failure.
    pub fn queue_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(SourceError::Upstream(message.into())));
        self
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for MockSource {
    async fn fetch_candidates(
        &self,
        _subject: &str,
        _count: usize,
    ) -> Result<Vec<RawCandidate>, SourceError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Upstream("mock script exhausted".to_string())))
    }
}

/// Build a synthetic encyclopedia candidate.
pub fn encyclopedia_candidate(title: &str, text: &str, categories: &[&str]) -> RawCandidate {
    RawCandidate {
        id: title.to_string(),
        prompt_or_text: text.to_string(),
        correct_answer: None,
        distractors: None,
        source_url: Some(format!(
            "https://en.wikipedia.org/wiki/{}",
            title.replace(' ', "_")
        )),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        kind: CandidateKind::Encyclopedia,
    }
}

/// Build a synthetic trivia candidate.
pub fn trivia_candidate(prompt: &str, correct: &str, distractors: &[&str]) -> RawCandidate {
    RawCandidate {
        id: prompt.to_string(),
        prompt_or_text: prompt.to_string(),
        correct_answer: Some(correct.to_string()),
        distractors: Some(distractors.iter().map(|d| d.to_string()).collect()),
        source_url: None,
        categories: Vec::new(),
        kind: CandidateKind::Trivia,
    }
}
