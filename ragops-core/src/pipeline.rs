//! Evaluation pipeline: question set -> retriever -> generator -> metrics.
//!
//! Single pass, in dataset order. Records come back in the order the
//! questions were given.

use serde::{Deserialize, Serialize};

use crate::answerer::Generator;
use crate::dataset::{Dataset, QARecord, validate_records};
use crate::error::{InputError, Result};
use crate::metrics::{MetricResult, compute_metrics};
use crate::retriever::Retriever;
use crate::summary::EvaluationSummary;
use crate::telemetry::{Telemetry, TelemetrySimulator};

/// A QA record with its scores.
///
/// Pipeline runs also carry the question id and the ids of the retrieved
/// documents, in retrieval order. Replayed records have neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_ids: Vec<String>,
    pub record: QARecord,
    pub metrics: MetricResult,
}

/// Summarize a set of evaluated records.
pub fn summarize(records: &[EvaluatedRecord]) -> EvaluationSummary {
    EvaluationSummary::from_results(records.iter().map(|r| &r.metrics))
}

/// Run every question in `dataset` through retrieval, generation, and scoring.
///
/// Fails fast if the dataset is invalid or the corpus is smaller than the
/// retriever's width. Generators that report their own telemetry are trusted;
/// otherwise `telemetry` simulates it.
pub fn run_pipeline(
    dataset: &Dataset,
    retriever: &dyn Retriever,
    generator: &dyn Generator,
    telemetry: &mut TelemetrySimulator,
) -> Result<Vec<EvaluatedRecord>> {
    dataset.validate()?;
    let width = retriever.width();
    if width == 0 {
        return Err(InputError::ZeroWidth.into());
    }
    if dataset.documents.len() < width {
        return Err(InputError::CorpusTooSmall {
            documents: dataset.documents.len(),
            width,
        }
        .into());
    }

    tracing::info!(
        questions = dataset.questions.len(),
        documents = dataset.documents.len(),
        width,
        "Starting evaluation run"
    );

    let mut evaluated = Vec::with_capacity(dataset.questions.len());
    for (index, question) in dataset.questions.iter().enumerate() {
        let retrieved = retriever.retrieve(&question.query, &dataset.documents);
        if retrieved.len() != width {
            return Err(InputError::WidthMismatch {
                index: index + 1,
                actual: retrieved.len(),
                expected: width,
            }
            .into());
        }
        tracing::debug!(
            question = %question.id,
            documents = ?retrieved.iter().map(|d| d.document_id.as_str()).collect::<Vec<_>>(),
            "Retrieved contexts"
        );

        let (context_ids, contexts): (Vec<String>, Vec<String>) = retrieved
            .into_iter()
            .map(|d| (d.document_id, d.text))
            .unzip();
        let generation = generator.generate(&question.query, &contexts);
        let sample = generation
            .telemetry
            .unwrap_or_else(|| telemetry.measure(&generation.text));

        let record = QARecord::new(
            question.query.clone(),
            question.expected_answer.clone(),
            contexts,
            generation.text,
        );
        let mut scored = score(record, sample);
        scored.question_id = Some(question.id.clone());
        scored.context_ids = context_ids;
        evaluated.push(scored);
    }

    Ok(evaluated)
}

/// Score pre-recorded QA records without retrieval or generation.
///
/// Every record must carry exactly `width` retrieved contexts.
pub fn score_records(
    records: Vec<QARecord>,
    width: usize,
    telemetry: &mut TelemetrySimulator,
) -> Result<Vec<EvaluatedRecord>> {
    validate_records(&records, width)?;
    tracing::info!(records = records.len(), width, "Scoring recorded answers");

    Ok(records
        .into_iter()
        .map(|record| {
            let sample = telemetry.measure(&record.predicted_answer);
            score(record, sample)
        })
        .collect())
}

fn score(record: QARecord, sample: Telemetry) -> EvaluatedRecord {
    let metrics = compute_metrics(
        &record.expected_answer,
        &record.retrieved_contexts,
        &record.predicted_answer,
        sample,
    );
    tracing::debug!(
        query = %record.query,
        recall = metrics.contextual_recall,
        precision = metrics.contextual_precision,
        relevancy = metrics.answer_relevancy,
        faithfulness = metrics.faithfulness,
        "Scored record"
    );
    EvaluatedRecord {
        question_id: None,
        context_ids: Vec::new(),
        record,
        metrics,
    }
}
