//! Markdown report rendering and writing.
//!
//! One report per run date: `<reports_dir>/<YYYY-MM-DD>-ragops-eval.md`.
//! Rendering is a pure function of the date, the summary, and the records;
//! the content is buffered in full and written atomically.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::metrics::MetricResult;
use crate::persistence::atomic_write;
use crate::pipeline::{EvaluatedRecord, summarize};
use crate::summary::EvaluationSummary;

/// Suffix appended to the run date to form the report file name.
pub const REPORT_SUFFIX: &str = "-ragops-eval.md";

/// Path of the report for `date` inside `reports_dir`.
pub fn report_path(reports_dir: &Path, date: NaiveDate) -> PathBuf {
    reports_dir.join(format!("{}{REPORT_SUFFIX}", date.format("%Y-%m-%d")))
}

/// Writes dated markdown reports into a directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Render and write the report, creating the directory if needed.
    ///
    /// Overwrites an existing report for the same date. On I/O failure no
    /// partial file is left behind.
    pub fn write_report(&self, date: NaiveDate, records: &[EvaluatedRecord]) -> Result<PathBuf> {
        let summary = summarize(records);
        let content = render_report(date, &summary, records);
        let path = report_path(&self.reports_dir, date);

        atomic_write(&path, content.as_bytes())?;
        tracing::info!(path = %path.display(), records = records.len(), "Report written");
        Ok(path)
    }
}

/// Render the full markdown document.
pub fn render_report(
    date: NaiveDate,
    summary: &EvaluationSummary,
    records: &[EvaluatedRecord],
) -> String {
    let mut md = format!("# {} RAGOps Evaluation\n\n", date.format("%Y-%m-%d"));

    render_summary(&mut md, summary);

    md.push_str("## Details\n");
    for (index, evaluated) in records.iter().enumerate() {
        md.push('\n');
        render_record(&mut md, index + 1, evaluated);
    }
    md
}

fn render_summary(md: &mut String, summary: &EvaluationSummary) {
    let s = summary.rounded();
    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Mean |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Contextual Recall | {:.2} |\n", s.contextual_recall));
    md.push_str(&format!(
        "| Contextual Precision | {:.2} |\n",
        s.contextual_precision
    ));
    md.push_str(&format!("| Answer Relevancy | {:.2} |\n", s.answer_relevancy));
    md.push_str(&format!("| Faithfulness | {:.2} |\n", s.faithfulness));
    md.push_str(&format!("| Latency (ms) | {:.1} |\n", s.latency_ms));
    md.push_str(&format!("| Cost (USD) | {:.6} |\n\n", s.cost_usd));
    md.push_str(&format!("Records evaluated: {}\n\n", s.count));
}

fn render_record(md: &mut String, number: usize, evaluated: &EvaluatedRecord) {
    let record = &evaluated.record;
    md.push_str(&format!("### {number}. {}\n\n", inline(&record.query)));
    if let Some(id) = &evaluated.question_id {
        md.push_str(&format!("- **Question id:** `{id}`\n"));
    }
    md.push_str(&format!(
        "- **Expected answer:** {}\n",
        inline(&record.expected_answer)
    ));
    md.push_str(&format!(
        "- **Predicted answer:** {}\n",
        inline(&record.predicted_answer)
    ));
    md.push_str("- **Retrieved contexts:**\n");
    if record.retrieved_contexts.is_empty() {
        md.push_str("  - _(none)_\n");
    }
    for (rank, context) in record.retrieved_contexts.iter().enumerate() {
        match evaluated.context_ids.get(rank) {
            Some(id) => md.push_str(&format!("  {}. `{id}` {}\n", rank + 1, inline(context))),
            None => md.push_str(&format!("  {}. {}\n", rank + 1, inline(context))),
        }
    }
    md.push('\n');
    render_scores(md, &evaluated.metrics);
}

fn render_scores(md: &mut String, m: &MetricResult) {
    md.push_str(
        "| Contextual Recall | Contextual Precision | Answer Relevancy | Faithfulness | Latency (ms) | Cost (USD) |\n",
    );
    md.push_str("| --- | --- | --- | --- | --- | --- |\n");
    md.push_str(&format!(
        "| {:.2} | {:.2} | {:.2} | {:.2} | {:.1} | {:.6} |\n",
        m.contextual_recall,
        m.contextual_precision,
        m.answer_relevancy,
        m.faithfulness,
        m.latency_ms,
        m.cost_usd
    ));
}

/// Collapse whitespace so multi-line text stays on one markdown line.
fn inline(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::QARecord;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 11).unwrap()
    }

    fn record() -> EvaluatedRecord {
        EvaluatedRecord {
            question_id: None,
            context_ids: Vec::new(),
            record: QARecord::new(
                "What is the capital of France?",
                "Paris",
                vec![
                    "Paris is the capital of France.".into(),
                    "France is located in Europe.".into(),
                    "The population of the city\nis about 2 million.".into(),
                ],
                "Paris is the capital of France.",
            ),
            metrics: MetricResult {
                contextual_recall: 1.0,
                contextual_precision: 1.0 / 3.0,
                answer_relevancy: 1.0,
                faithfulness: 1.0,
                latency_ms: 62.0,
                cost_usd: 0.00006,
            },
        }
    }

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(Path::new("reports"), date()),
            PathBuf::from("reports/2025-08-11-ragops-eval.md")
        );
    }

    #[test]
    fn test_render_report() {
        let records = vec![record()];
        let rendered = render_report(date(), &summarize(&records), &records);
        let expected = "\
# 2025-08-11 RAGOps Evaluation

## Summary

| Metric | Mean |
| --- | --- |
| Contextual Recall | 1.00 |
| Contextual Precision | 0.33 |
| Answer Relevancy | 1.00 |
| Faithfulness | 1.00 |
| Latency (ms) | 62.0 |
| Cost (USD) | 0.000060 |

Records evaluated: 1

## Details

### 1. What is the capital of France?

- **Expected answer:** Paris
- **Predicted answer:** Paris is the capital of France.
- **Retrieved contexts:**
  1. Paris is the capital of France.
  2. France is located in Europe.
  3. The population of the city is about 2 million.

| Contextual Recall | Contextual Precision | Answer Relevancy | Faithfulness | Latency (ms) | Cost (USD) |
| --- | --- | --- | --- | --- | --- |
| 1.00 | 0.33 | 1.00 | 1.00 | 62.0 | 0.000060 |
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_contexts() {
        let mut evaluated = record();
        evaluated.record.retrieved_contexts.clear();
        let rendered = render_report(date(), &summarize(&[]), &[evaluated]);
        assert!(rendered.contains("  - _(none)_\n"));
    }

    #[test]
    fn test_render_ids_when_present() {
        let mut evaluated = record();
        evaluated.question_id = Some("q1".into());
        evaluated.context_ids = vec!["geo-01".into(), "geo-02".into(), "geo-03".into()];
        let rendered = render_report(date(), &summarize(&[]), &[evaluated]);

        assert!(rendered.contains(
            "### 1. What is the capital of France?\n\n- **Question id:** `q1`\n- **Expected answer:** Paris\n"
        ));
        assert!(rendered.contains("  1. `geo-01` Paris is the capital of France.\n"));
        assert!(
            rendered.contains("  3. `geo-03` The population of the city is about 2 million.\n")
        );
    }

    #[test]
    fn test_write_report_creates_directory() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));

        let path = writer.write_report(date(), &[record()]).unwrap();
        assert_eq!(path, dir.path().join("reports/2025-08-11-ragops-eval.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# 2025-08-11 RAGOps Evaluation\n"));
    }

    #[test]
    fn test_write_report_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());

        let path = writer.write_report(date(), &[record()]).unwrap();
        let first = std::fs::read(&path).unwrap();
        writer.write_report(date(), &[record()]).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_report_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("reports");
        std::fs::write(&blocker, b"a file, not a directory").unwrap();

        let writer = ReportWriter::new(&blocker);
        let err = writer.write_report(date(), &[record()]).unwrap_err();
        assert!(matches!(err, crate::error::RagOpsError::Io(_)));
        assert!(!report_path(&blocker, date()).exists());
    }
}
