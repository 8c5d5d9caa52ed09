//! Quiz grading and bonus-unlock eligibility.

use crate::model::Quiz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel for a question with no answer selected yet.
pub const UNANSWERED: i32 = -1;

/// Bonus unlocks above this score. A fixed design constant for the
/// standard 10-question quiz, deliberately not derived from quiz length.
pub const BONUS_THRESHOLD: u32 = 8;

/// Errors from final quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Question {index} has no answer selected")]
    IncompleteAnswers { index: usize },
}

/// The graded result of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub bonus_eligible: bool,
}

/// Grade a completed quiz against its answer key.
///
/// `answers[i]` is the chosen choice index for question `i`, or
/// [`UNANSWERED`]. Fails when any answer is missing or unset; callers
/// should block submission and prompt for the remaining answers. Pure and
/// idempotent: the same quiz and answers always grade identically.
pub fn evaluate(quiz: &Quiz, answers: &[i32]) -> Result<ScoreReport, ScoreError> {
    if answers.len() < quiz.questions.len() {
        return Err(ScoreError::IncompleteAnswers {
            index: answers.len(),
        });
    }
    if let Some(index) = answers
        .iter()
        .take(quiz.questions.len())
        .position(|&answer| answer == UNANSWERED)
    {
        return Err(ScoreError::IncompleteAnswers { index });
    }

    let score = correct_count(quiz, answers);
    Ok(ScoreReport {
        score,
        bonus_eligible: score > BONUS_THRESHOLD,
    })
}

/// Correct answers so far, for intermediate display. Unanswered questions
/// simply do not count; this never fails.
pub fn running_score(quiz: &Quiz, answers: &[i32]) -> u32 {
    correct_count(quiz, answers)
}

fn correct_count(quiz: &Quiz, answers: &[i32]) -> u32 {
    quiz.questions
        .iter()
        .zip(answers)
        .filter(|(question, &answer)| answer == question.answer_index as i32)
        .count() as u32
}
