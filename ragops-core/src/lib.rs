//! # ragops-core
//!
//! A small evaluation harness for retrieval-augmented generation pipelines.
//! Questions from a fixed dataset are answered by pluggable [`Retriever`] and
//! [`Generator`] backends, scored with heuristic groundedness metrics, and
//! summarized into a dated markdown report.
//!
//! The bundled backends are stubs: [`LexicalRetriever`] ranks by token overlap
//! and [`HeuristicAnswerer`] extracts a sentence from the retrieved context.
//! Latency and cost are simulated by a seeded [`TelemetrySimulator`].

pub mod answerer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fixtures;
pub mod metrics;
pub mod persistence;
pub mod pipeline;
pub mod report;
pub mod retriever;
pub mod summary;
pub mod telemetry;
pub mod text;

pub use answerer::{Generation, Generator, HeuristicAnswerer};
pub use config::{EvalConfig, TelemetryConfig, load_config};
pub use dataset::{Dataset, Document, QARecord, Question};
pub use error::{ConfigError, InputError, RagOpsError, Result};
pub use metrics::{MetricResult, compute_metrics};
pub use pipeline::{EvaluatedRecord, run_pipeline, score_records, summarize};
pub use report::{ReportWriter, render_report, report_path};
pub use retriever::{LexicalRetriever, RetrievedDocument, Retriever};
pub use summary::EvaluationSummary;
pub use telemetry::{Telemetry, TelemetrySimulator};
