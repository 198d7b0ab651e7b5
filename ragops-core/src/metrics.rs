//! Per-record RAG metrics.
//!
//! All four quality scores are case-insensitive substring heuristics:
//!
//! - **contextual recall**: 1.0 if any retrieved context contains the expected
//!   answer. Assumes exactly one relevant context exists per question, so the
//!   relevant count is divided by 1 and capped.
//! - **contextual precision**: share of retrieved contexts containing the
//!   expected answer; 0.0 when nothing was retrieved.
//! - **answer relevancy**: 1.0 if the predicted answer contains the expected answer.
//! - **faithfulness**: 1.0 if the predicted answer is contained in a context,
//!   or a context is contained in the predicted answer.

use serde::{Deserialize, Serialize};

use crate::telemetry::Telemetry;

/// Relevant contexts assumed to exist for every question.
const THEORETICAL_RELEVANT_COUNT: f64 = 1.0;

/// Scores for one QA record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricResult {
    pub contextual_recall: f64,
    pub contextual_precision: f64,
    pub answer_relevancy: f64,
    pub faithfulness: f64,
    pub latency_ms: f64,
    pub cost_usd: f64,
}

/// Number of contexts that contain the expected answer (case-insensitive).
pub fn relevant_count(expected_answer: &str, retrieved_contexts: &[String]) -> usize {
    let expected = expected_answer.to_lowercase();
    retrieved_contexts
        .iter()
        .filter(|c| c.to_lowercase().contains(&expected))
        .count()
}

/// Score a predicted answer against the expected answer and retrieved contexts.
///
/// Total over its inputs: an empty context list yields zero recall, precision
/// and faithfulness rather than an error.
pub fn compute_metrics(
    expected_answer: &str,
    retrieved_contexts: &[String],
    predicted_answer: &str,
    telemetry: Telemetry,
) -> MetricResult {
    let expected = expected_answer.to_lowercase();
    let predicted = predicted_answer.to_lowercase();
    let contexts: Vec<String> = retrieved_contexts.iter().map(|c| c.to_lowercase()).collect();

    let relevant = relevant_count(expected_answer, retrieved_contexts) as f64;
    let contextual_recall = (relevant / THEORETICAL_RELEVANT_COUNT).min(1.0);
    let contextual_precision = if contexts.is_empty() {
        0.0
    } else {
        relevant / contexts.len() as f64
    };

    let answer_relevancy = binary(predicted.contains(&expected));
    let faithfulness = binary(
        contexts
            .iter()
            .any(|c| c.contains(&predicted) || predicted.contains(c.as_str())),
    );

    MetricResult {
        contextual_recall,
        contextual_precision,
        answer_relevancy,
        faithfulness,
        latency_ms: telemetry.latency_ms,
        cost_usd: telemetry.cost_usd,
    }
}

fn binary(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn paris_contexts() -> Vec<String> {
        ctx(&[
            "Paris is the capital of France.",
            "France is located in Europe.",
            "The population of the city is about 2 million.",
        ])
    }

    #[test]
    fn test_capital_of_france() {
        let m = compute_metrics(
            "Paris",
            &paris_contexts(),
            "Paris is the capital of France.",
            Telemetry::default(),
        );
        assert_eq!(m.contextual_recall, 1.0);
        assert!((m.contextual_precision - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.answer_relevancy, 1.0);
        assert_eq!(m.faithfulness, 1.0);
    }

    #[test]
    fn test_recall_capped_at_one() {
        let contexts = ctx(&["paris", "Paris again", "PARIS"]);
        let m = compute_metrics("Paris", &contexts, "Paris", Telemetry::default());
        assert_eq!(relevant_count("Paris", &contexts), 3);
        assert_eq!(m.contextual_recall, 1.0);
        assert_eq!(m.contextual_precision, 1.0);
    }

    #[test]
    fn test_nothing_relevant() {
        let contexts = ctx(&["Mars is red.", "Venus is hot.", "Saturn has rings."]);
        let m = compute_metrics("Jupiter", &contexts, "I don't know", Telemetry::default());
        assert_eq!(m.contextual_recall, 0.0);
        assert_eq!(m.contextual_precision, 0.0);
        assert_eq!(m.answer_relevancy, 0.0);
        assert_eq!(m.faithfulness, 0.0);
    }

    #[test]
    fn test_faithfulness_context_inside_prediction() {
        let contexts = ctx(&["ended in 1945", "other", "more"]);
        let m = compute_metrics(
            "1945",
            &contexts,
            "The war ended in 1945, in Europe.",
            Telemetry::default(),
        );
        assert_eq!(m.faithfulness, 1.0);
    }

    #[test]
    fn test_paraphrase_is_not_faithful() {
        let m = compute_metrics(
            "George Orwell",
            &ctx(&["1984 is a dystopian novel by George Orwell.", "x", "y"]),
            "George Orwell wrote 1984.",
            Telemetry::default(),
        );
        assert_eq!(m.answer_relevancy, 1.0);
        assert_eq!(m.faithfulness, 0.0);
    }

    #[test]
    fn test_empty_contexts_zero_precision() {
        let m = compute_metrics("Paris", &[], "Paris", Telemetry::default());
        assert_eq!(m.contextual_precision, 0.0);
        assert_eq!(m.contextual_recall, 0.0);
        assert_eq!(m.faithfulness, 0.0);
        assert_eq!(m.answer_relevancy, 1.0);
    }

    #[test]
    fn test_telemetry_is_carried() {
        let telemetry = Telemetry {
            latency_ms: 61.0,
            cost_usd: 0.00002,
        };
        let m = compute_metrics("a", &ctx(&["a"]), "a", telemetry);
        assert_eq!(m.latency_ms, 61.0);
        assert_eq!(m.cost_usd, 0.00002);
    }
}
