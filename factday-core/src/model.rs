//! Facts, quizzes, and the constant fallbacks.
//!
//! Serde field names follow the wire layout the surrounding application
//! already persists (`fact`, `source_url`, `answer_index`, ...).

use serde::{Deserialize, Serialize};

/// The permanent fallback fact, returned whenever selection exhausts its
/// attempts or the encyclopedia is unreachable. Never recorded in history.
pub const FALLBACK_FACT_TEXT: &str = "The shortest war in history was between Britain and \
     Zanzibar on August 27, 1896, lasting only 38 minutes.";

/// A single displayable fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(rename = "fact")]
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
}

impl Fact {
    /// Build a fact from raw text, trimming whitespace and ensuring the
    /// text ends with terminal punctuation. Returns `None` when the text
    /// is empty or whitespace-only.
    pub fn new(
        text: &str,
        source_url: Option<String>,
        source_title: Option<String>,
    ) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            text,
            source_url,
            source_title,
        })
    }

    /// The constant fallback fact.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_FACT_TEXT.to_string(),
            source_url: None,
            source_title: None,
        }
    }

    /// Whether a fact satisfies its invariants: non-empty trimmed text and
    /// well-formed optional source fields.
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Trim and terminate fact text. `None` if nothing remains after trimming.
fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with(['.', '!', '?']) {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}."))
    }
}

/// One multiple-choice question.
///
/// Invariant: `answer_index` is in bounds and names the correct choice,
/// whatever order the choices were shuffled into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// May embed inline markup entities; rendered by the caller.
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
}

impl QuizQuestion {
    /// The choice `answer_index` points at.
    pub fn correct_choice(&self) -> &str {
        &self.choices[self.answer_index]
    }
}

/// A day's quiz. Non-empty by construction of both selection paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// The constant fallback quiz, returned on any upstream failure.
    pub fn fallback() -> Self {
        Self {
            questions: vec![QuizQuestion {
                prompt: "What is the capital of France?".to_string(),
                choices: vec![
                    "London".to_string(),
                    "Berlin".to_string(),
                    "Paris".to_string(),
                    "Madrid".to_string(),
                ],
                answer_index: 2,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
