//! Corpus, question set, and pre-recorded QA records.
//!
//! A [`Dataset`] is an immutable value handed to the pipeline entry point.
//! It can come from the built-in fixtures or be loaded from a JSON/TOML file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::InputError;

/// A document in the evaluation corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            text: text.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Text used for lexical matching: the body followed by the title, if any.
    pub fn searchable_text(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}", self.text, title),
            None => self.text.clone(),
        }
    }
}

/// A question paired with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub query: String,
    pub expected_answer: String,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        query: impl Into<String>,
        expected_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            query: query.into(),
            expected_answer: expected_answer.into(),
        }
    }
}

/// Corpus plus question set for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub documents: Vec<Document>,
    pub questions: Vec<Question>,
}

impl Dataset {
    pub fn new(documents: Vec<Document>, questions: Vec<Question>) -> Self {
        Self {
            documents,
            questions,
        }
    }

    /// Load a dataset from a `.json` or `.toml` file and validate it.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let dataset: Dataset = parse_file(path)?;
        dataset.validate()?;
        tracing::debug!(
            path = %path.display(),
            documents = dataset.documents.len(),
            questions = dataset.questions.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Check the dataset is usable: non-empty, no blank fields, unique ids.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.documents.is_empty() {
            return Err(InputError::EmptyCorpus);
        }
        if self.questions.is_empty() {
            return Err(InputError::EmptyQuestions);
        }

        let mut seen = HashSet::new();
        for doc in &self.documents {
            if doc.id.trim().is_empty() {
                return Err(missing("document", &doc.id, "id"));
            }
            if doc.text.trim().is_empty() {
                return Err(missing("document", &doc.id, "text"));
            }
            if !seen.insert(doc.id.as_str()) {
                return Err(InputError::DuplicateId {
                    kind: "document",
                    id: doc.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if q.id.trim().is_empty() {
                return Err(missing("question", &q.id, "id"));
            }
            if q.query.trim().is_empty() {
                return Err(missing("question", &q.id, "query"));
            }
            if q.expected_answer.trim().is_empty() {
                return Err(missing("question", &q.id, "expected_answer"));
            }
            if !seen.insert(q.id.as_str()) {
                return Err(InputError::DuplicateId {
                    kind: "question",
                    id: q.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One evaluated question: what was asked, what was retrieved, what was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QARecord {
    pub query: String,
    pub expected_answer: String,
    pub retrieved_contexts: Vec<String>,
    pub predicted_answer: String,
}

impl QARecord {
    pub fn new(
        query: impl Into<String>,
        expected_answer: impl Into<String>,
        retrieved_contexts: Vec<String>,
        predicted_answer: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            expected_answer: expected_answer.into(),
            retrieved_contexts,
            predicted_answer: predicted_answer.into(),
        }
    }
}

/// Load pre-recorded QA records (a JSON or TOML array) and check each has
/// exactly `width` retrieved contexts.
pub fn load_records(path: &Path, width: usize) -> Result<Vec<QARecord>, InputError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RecordFile {
        List(Vec<QARecord>),
        Table { records: Vec<QARecord> },
    }

    let records = match parse_file::<RecordFile>(path)? {
        RecordFile::List(records) | RecordFile::Table { records } => records,
    };
    validate_records(&records, width)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded QA records");
    Ok(records)
}

/// Validate a record set: non-empty, required fields present, fixed width.
pub fn validate_records(records: &[QARecord], width: usize) -> Result<(), InputError> {
    if records.is_empty() {
        return Err(InputError::EmptyRecords);
    }
    for (index, record) in records.iter().enumerate() {
        let id = (index + 1).to_string();
        if record.query.trim().is_empty() {
            return Err(missing("record", &id, "query"));
        }
        if record.expected_answer.trim().is_empty() {
            return Err(missing("record", &id, "expected_answer"));
        }
        if record.retrieved_contexts.len() != width {
            return Err(InputError::WidthMismatch {
                index: index + 1,
                actual: record.retrieved_contexts.len(),
                expected: width,
            });
        }
    }
    Ok(())
}

fn missing(kind: &'static str, id: &str, field: &'static str) -> InputError {
    InputError::MissingField {
        kind,
        id: id.to_string(),
        field,
    }
}

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    let parsed = if is_toml {
        toml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| InputError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
