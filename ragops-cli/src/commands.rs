//! Command handlers for the RAGOps CLI.

use anyhow::Context;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use ragops_core::fixtures::{builtin_dataset, worked_example_records};
use ragops_core::{
    Dataset, EvalConfig, EvaluatedRecord, EvaluationSummary, HeuristicAnswerer, LexicalRetriever,
    ReportWriter, TelemetrySimulator, dataset::load_records, load_config, run_pipeline,
    score_records, summarize,
};

/// Flags that override the layered configuration for a single invocation.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    /// Dataset file (JSON or TOML) replacing the built-in corpus
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Directory that receives the report
    #[arg(long, global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Seed for synthetic latency/cost
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Contexts retrieved per question
    #[arg(long, global = true)]
    pub width: Option<usize>,

    /// Report date as YYYY-MM-DD (defaults to today, UTC)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

/// Load layered configuration and apply CLI overrides on top.
pub fn resolve_config(
    workspace: &Path,
    config_file: Option<&Path>,
    overrides: &RunOverrides,
) -> anyhow::Result<EvalConfig> {
    let mut config = load_config(Some(workspace), config_file)?;
    apply_overrides(&mut config, overrides);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut EvalConfig, overrides: &RunOverrides) {
    if let Some(corpus) = &overrides.corpus {
        config.corpus_path = Some(corpus.clone());
    }
    if let Some(dir) = &overrides.reports_dir {
        config.reports_dir = dir.clone();
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(width) = overrides.width {
        config.retrieval_width = width;
    }
}

/// Evaluate the configured dataset and write the report.
pub fn run(config: &EvalConfig, date: Option<NaiveDate>) -> anyhow::Result<()> {
    let dataset = match &config.corpus_path {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?,
        None => builtin_dataset(),
    };

    let retriever = LexicalRetriever::new(config.retrieval_width);
    let answerer = HeuristicAnswerer::new();
    let mut telemetry = TelemetrySimulator::new(config.telemetry.clone(), config.seed);

    let records = run_pipeline(&dataset, &retriever, &answerer, &mut telemetry)?;
    finish(config, date, &records)
}

/// Score pre-recorded records and write the report.
pub fn replay(
    config: &EvalConfig,
    records_path: Option<&Path>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let records = match records_path {
        Some(path) => load_records(path, config.retrieval_width)
            .with_context(|| format!("Failed to load records from {}", path.display()))?,
        None => worked_example_records(),
    };

    let mut telemetry = TelemetrySimulator::new(config.telemetry.clone(), config.seed);
    let evaluated = score_records(records, config.retrieval_width, &mut telemetry)?;
    finish(config, date, &evaluated)
}

/// Print the effective configuration.
pub fn show_config(config: &EvalConfig) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

fn finish(
    config: &EvalConfig,
    date: Option<NaiveDate>,
    records: &[EvaluatedRecord],
) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let path = ReportWriter::new(&config.reports_dir)
        .write_report(date, records)
        .with_context(|| {
            format!(
                "Failed to write report to {}",
                config.reports_dir.display()
            )
        })?;

    print!("{}", format_summary(&summarize(records)));
    println!("Report written to {}", path.display());
    Ok(())
}

/// Plain-text summary for stdout.
fn format_summary(summary: &EvaluationSummary) -> String {
    let s = summary.rounded();
    format!(
        "Evaluation metrics ({} records):\n\
         contextual_recall: {:.2}\n\
         contextual_precision: {:.2}\n\
         answer_relevancy: {:.2}\n\
         faithfulness: {:.2}\n\
         latency_ms: {:.1}\n\
         cost_usd: {:.6}\n",
        s.count,
        s.contextual_recall,
        s.contextual_precision,
        s.answer_relevancy,
        s.faithfulness,
        s.latency_ms,
        s.cost_usd
    )
}
