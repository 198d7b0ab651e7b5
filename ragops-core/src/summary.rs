//! Run-level aggregation of per-record metrics.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricResult;
use crate::telemetry::round_to;

/// Arithmetic mean of every [`MetricResult`] field, plus the record count.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub count: usize,
    pub contextual_recall: f64,
    pub contextual_precision: f64,
    pub answer_relevancy: f64,
    pub faithfulness: f64,
    pub latency_ms: f64,
    pub cost_usd: f64,
}

impl EvaluationSummary {
    /// Average the results. An empty slice gives a zeroed summary with `count == 0`.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a MetricResult>,
    {
        let mut totals = MetricResult::default();
        let mut count = 0usize;
        for r in results {
            totals.contextual_recall += r.contextual_recall;
            totals.contextual_precision += r.contextual_precision;
            totals.answer_relevancy += r.answer_relevancy;
            totals.faithfulness += r.faithfulness;
            totals.latency_ms += r.latency_ms;
            totals.cost_usd += r.cost_usd;
            count += 1;
        }
        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        Self {
            count,
            contextual_recall: totals.contextual_recall / n,
            contextual_precision: totals.contextual_precision / n,
            answer_relevancy: totals.answer_relevancy / n,
            faithfulness: totals.faithfulness / n,
            latency_ms: totals.latency_ms / n,
            cost_usd: totals.cost_usd / n,
        }
    }

    /// Copy with ratios at 2 decimals, latency at 1, cost at 6.
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            contextual_recall: round_to(self.contextual_recall, 2),
            contextual_precision: round_to(self.contextual_precision, 2),
            answer_relevancy: round_to(self.answer_relevancy, 2),
            faithfulness: round_to(self.faithfulness, 2),
            latency_ms: round_to(self.latency_ms, 1),
            cost_usd: round_to(self.cost_usd, 6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(recall: f64, precision: f64, latency: f64) -> MetricResult {
        MetricResult {
            contextual_recall: recall,
            contextual_precision: precision,
            answer_relevancy: 1.0,
            faithfulness: 0.0,
            latency_ms: latency,
            cost_usd: 0.00001,
        }
    }

    #[test]
    fn test_mean_of_fields() {
        let results = vec![result(1.0, 1.0 / 3.0, 60.0), result(0.0, 0.0, 70.0)];
        let s = EvaluationSummary::from_results(&results);
        assert_eq!(s.count, 2);
        assert_eq!(s.contextual_recall, 0.5);
        assert!((s.contextual_precision - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(s.answer_relevancy, 1.0);
        assert_eq!(s.faithfulness, 0.0);
        assert_eq!(s.latency_ms, 65.0);
        assert!((s.cost_usd - 0.00001).abs() < 1e-15);
    }

    #[test]
    fn test_empty_is_zeroed() {
        let s = EvaluationSummary::from_results(std::iter::empty());
        assert_eq!(s, EvaluationSummary::default());
        assert_eq!(s.count, 0);
    }

    #[test]
    fn test_rounded() {
        let s = EvaluationSummary {
            count: 3,
            contextual_recall: 2.0 / 3.0,
            contextual_precision: 1.0 / 3.0,
            answer_relevancy: 1.0,
            faithfulness: 0.6,
            latency_ms: 64.666,
            cost_usd: 0.000_013_333,
        }
        .rounded();
        assert_eq!(s.contextual_recall, 0.67);
        assert_eq!(s.contextual_precision, 0.33);
        assert_eq!(s.latency_ms, 64.7);
        assert_eq!(s.cost_usd, 0.000013);
    }
}
