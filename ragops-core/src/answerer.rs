//! Generation capability and the extractive heuristic stub.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::telemetry::Telemetry;
use crate::text::{sentences, token_set, tokenize};

/// Returned when there is no context to answer from.
pub const NO_CONTEXT_ANSWER: &str = "I could not find an answer in the retrieved context.";

/// Capitalized phrases ("Alexander Fleming") and years/short numbers ("1945").
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*|\d{3,4})\b").expect("entity regex")
});

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "another", "as", "at", "by", "for", "he", "her", "his", "in", "it", "its",
    "of", "on", "or", "she", "that", "the", "their", "there", "these", "they", "this", "to",
    "was", "we", "what", "when", "where", "which", "who", "with",
];

/// Output of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub text: String,
    /// Measured latency/cost, when the backend reports it.
    pub telemetry: Option<Telemetry>,
}

/// Generation capability: answer a query from retrieved contexts.
pub trait Generator {
    fn generate(&self, query: &str, contexts: &[String]) -> Generation;
}

/// Extractive answerer: returns the best-matching context sentence that
/// names something the query does not, else the top context's first sentence.
#[derive(Debug, Clone, Default)]
pub struct HeuristicAnswerer;

impl HeuristicAnswerer {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic, never empty.
    pub fn answer(&self, query: &str, contexts: &[String]) -> String {
        let Some(top) = contexts.first() else {
            return NO_CONTEXT_ANSWER.to_string();
        };
        let query_tokens = token_set(query);

        let mut best: Option<(usize, &str)> = None;
        for sentence in contexts.iter().flat_map(|c| sentences(c)) {
            if !has_answer_span(sentence, &query_tokens) {
                continue;
            }
            let overlap = token_set(sentence).intersection(&query_tokens).count();
            if overlap > 0 && best.is_none_or(|(score, _)| overlap > score) {
                best = Some((overlap, sentence));
            }
        }

        if let Some((overlap, sentence)) = best {
            tracing::trace!(overlap, sentence, "Answer span found");
            return sentence.to_string();
        }

        match sentences(top).first() {
            Some(sentence) => sentence.to_string(),
            None if !top.trim().is_empty() => top.trim().to_string(),
            None => NO_CONTEXT_ANSWER.to_string(),
        }
    }
}

impl Generator for HeuristicAnswerer {
    fn generate(&self, query: &str, contexts: &[String]) -> Generation {
        Generation {
            text: self.answer(query, contexts),
            telemetry: None,
        }
    }
}

/// Whether the sentence names an entity that the query does not already mention.
fn has_answer_span(sentence: &str, query_tokens: &HashSet<String>) -> bool {
    ENTITY.find_iter(sentence).any(|m| {
        let tokens = tokenize(m.as_str());
        if tokens.len() == 1 && STOPWORDS.contains(&tokens[0].as_str()) {
            return false;
        }
        !tokens.iter().all(|t| query_tokens.contains(t))
    })
}
