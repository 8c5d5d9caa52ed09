//! Subject relevance filtering for encyclopedia candidates.
//!
//! A candidate belongs to a subject when its title, summary text, or any
//! category label contains one of the subject's keywords, case-folded.
//! Subjects without a keyword table match nothing: an unknown subject
//! rejects every encyclopedia candidate rather than accepting garbage.

use crate::content::{CandidateKind, RawCandidate};

/// Keyword table for a subject, or `None` for unmapped subjects.
fn keywords_for(subject: &str) -> Option<&'static [&'static str]> {
    let keywords: &[&str] = match subject {
        "history" => &["history", "century", "war", "empire", "dynasty", "revolution"],
        "geography" => &[
            "geography", "river", "mountain", "island", "continent", "ocean", "region",
        ],
        "anthropology" => &[
            "anthropology",
            "culture",
            "tribe",
            "ritual",
            "kinship",
            "ethnic",
        ],
        "sociology" => &[
            "sociology",
            "society",
            "social",
            "community",
            "population",
            "urban",
        ],
        "economics" => &[
            "economics", "economy", "trade", "market", "currency", "industry",
        ],
        "political science" => &[
            "politic", "government", "election", "parliament", "treaty", "state",
        ],
        "sports" => &[
            "sport",
            "olympic",
            "championship",
            "football",
            "athlete",
            "tournament",
        ],
        _ => return None,
    };
    Some(keywords)
}

/// Decides whether a raw candidate belongs to a requested subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceFilter;

impl RelevanceFilter {
    pub fn new() -> Self {
        Self
    }

    /// Whether `candidate` is acceptable for `subject`.
    ///
    /// Trivia candidates are always relevant; their category was chosen
    /// from the subject in the first place.
    pub fn matches(&self, candidate: &RawCandidate, subject: &str) -> bool {
        if candidate.kind == CandidateKind::Trivia {
            return true;
        }

        let Some(keywords) = keywords_for(&subject.to_lowercase()) else {
            return false;
        };

        let title = candidate.id.to_lowercase();
        let text = candidate.prompt_or_text.to_lowercase();
        keywords.iter().any(|keyword| {
            title.contains(keyword)
                || text.contains(keyword)
                || candidate
                    .categories
                    .iter()
                    .any(|label| label.to_lowercase().contains(keyword))
        })
    }
}
