//! Retrieval capability and the lexical-overlap stub.
//!
//! A real backend (vector index, BM25 service) implements [`Retriever`] and
//! returns its own ranked documents; nothing downstream depends on how the
//! ranking was produced.

use serde::{Deserialize, Serialize};

use crate::dataset::Document;
use crate::text::token_set;

/// A retrieved document with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub document_id: String,
    pub text: String,
    pub score: f32,
}

/// Retrieval capability: rank the corpus for a query.
pub trait Retriever {
    /// Number of documents returned per query.
    fn width(&self) -> usize;

    /// Return up to [`width`](Retriever::width) documents, best first.
    fn retrieve(&self, query: &str, corpus: &[Document]) -> Vec<RetrievedDocument>;
}

/// Ranks documents by the number of distinct tokens shared with the query.
///
/// Ties keep corpus order. The searchable text includes the document title.
#[derive(Debug, Clone)]
pub struct LexicalRetriever {
    width: usize,
}

impl LexicalRetriever {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Retriever for LexicalRetriever {
    fn width(&self) -> usize {
        self.width
    }

    fn retrieve(&self, query: &str, corpus: &[Document]) -> Vec<RetrievedDocument> {
        let query_tokens = token_set(query);

        let mut scored: Vec<(usize, &Document)> = corpus
            .iter()
            .map(|doc| {
                let overlap = token_set(&doc.searchable_text())
                    .intersection(&query_tokens)
                    .count();
                (overlap, doc)
            })
            .collect();
        // Vec::sort_by is stable, so equal scores stay in corpus order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.width)
            .map(|(overlap, doc)| RetrievedDocument {
                document_id: doc.id.clone(),
                text: doc.text.clone(),
                score: overlap as f32,
            })
            .collect()
    }
}
