//! Keyword classification of free-text analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse verdict extracted from the collaborator's free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Excellent,
    Good,
    NeedsWork,
    Generic,
}

/// Keyword groups in priority order; the first group with a hit wins
const KEYWORDS: [(FeedbackCategory, &[&str]); 3] = [
    (FeedbackCategory::Excellent, &["excellent", "perfect"]),
    (FeedbackCategory::Good, &["good", "well"]),
    (FeedbackCategory::NeedsWork, &["improve", "adjust"]),
];

fn starts_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric())
    })
}

impl FeedbackCategory {
    /// Keyword search, ASCII case-insensitive. A keyword must start a word,
    /// so "improvement" counts for "improve" but "dwell" does not count for "well".
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_ascii_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|word| starts_word(&lowered, word)))
            .map(|(category, _)| *category)
            .unwrap_or(FeedbackCategory::Generic)
    }

    /// Fixed sentence spoken for this category
    pub fn spoken(&self) -> &'static str {
        match self {
            FeedbackCategory::Excellent => {
                "AI Analysis: Your form is excellent! Keep up the great work!"
            }
            FeedbackCategory::Good => {
                "AI Analysis: Good form! Minor adjustments needed for perfection."
            }
            FeedbackCategory::NeedsWork => {
                "AI Analysis: Some adjustments needed. Focus on proper form."
            }
            FeedbackCategory::Generic => {
                "AI Analysis: Keep working on your form for better results!"
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::Excellent => "excellent",
            FeedbackCategory::Good => "good",
            FeedbackCategory::NeedsWork => "needs_work",
            FeedbackCategory::Generic => "generic",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
