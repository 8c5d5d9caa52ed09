//! Minimal Open Trivia Database API client.
//!
//! This crate wraps the single `api.php` endpoint used to fetch batches
//! of multiple-choice questions by category and difficulty. Question and
//! answer strings are returned exactly as the provider sends them, which
//! means they may contain HTML entities (`&quot;`, `&#039;`, ...).

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const API_BASE: &str = "https://opentdb.com/api.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur when querying the trivia API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider reported failure code {0}")]
    ResponseCode(u8),

    #[error("Provider returned no questions")]
    Empty,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Question difficulty accepted by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multiple-choice question as returned by the provider.
#[derive(Debug, Clone)]
pub struct TriviaQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// Open Trivia Database client.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new client with conservative timeouts.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: API_BASE.to_string(),
        }
    }

    /// Override the endpoint URL (useful for tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch a batch of multiple-choice questions.
    ///
    /// Fails if the provider reports a non-zero `response_code` or returns
    /// an empty result set.
    pub async fn fetch_questions(
        &self,
        category: u8,
        difficulty: Difficulty,
        amount: u8,
    ) -> Result<Vec<TriviaQuestion>, Error> {
        let url = format!(
            "{}?amount={amount}&category={category}&difficulty={}&type=multiple",
            self.base_url,
            difficulty.as_str()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        parse_response(&body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_response(body: &str) -> Result<Vec<TriviaQuestion>, Error> {
    let api: ApiResponse = serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;

    if api.response_code != 0 {
        return Err(Error::ResponseCode(api.response_code));
    }
    if api.results.is_empty() {
        return Err(Error::Empty);
    }

    Ok(api
        .results
        .into_iter()
        .map(|q| TriviaQuestion {
            question: q.question,
            correct_answer: q.correct_answer,
            incorrect_answers: q.incorrect_answers,
        })
        .collect())
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}
