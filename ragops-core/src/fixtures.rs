//! Built-in evaluation data.
//!
//! The default corpus mixes short encyclopedic facts with a few LLMOps notes.
//! [`worked_example_records`] is a pre-recorded five-question run used by
//! `ragops replay` and as a regression anchor for the metric calculator.

use crate::dataset::{Dataset, Document, QARecord, Question};

/// The built-in corpus and question set.
pub fn builtin_dataset() -> Dataset {
    Dataset::new(builtin_documents(), builtin_questions())
}

fn builtin_documents() -> Vec<Document> {
    vec![
        Document::new("geo-01", "Paris is the capital of France."),
        Document::new("geo-02", "France is located in Europe."),
        Document::new("geo-03", "The population of the city is about 2 million."),
        Document::new("lit-01", "1984 is a dystopian novel by George Orwell."),
        Document::new("lit-02", "It was published in 1949."),
        Document::new("lit-03", "Animal Farm is another book by the same author."),
        Document::new("astro-01", "Jupiter is the largest planet in the solar system."),
        Document::new("astro-02", "Mars is smaller than Earth."),
        Document::new("astro-03", "Saturn has large rings."),
        Document::new("hist-01", "World War II ended in 1945."),
        Document::new("hist-02", "The war started in 1939."),
        Document::new("hist-03", "It involved many nations around the globe."),
        Document::new("med-01", "Alexander Fleming discovered penicillin in 1928."),
        Document::new("med-02", "Penicillin was the first true antibiotic."),
        Document::new("med-03", "The discovery revolutionized medicine."),
        Document::new(
            "ops-01",
            "Groundedness measures how well an LLM answer relies on the provided context. \
             Toxicity, latency and cost are also common evaluation metrics.",
        )
        .with_title("LLM Evaluation Best Practices"),
        Document::new(
            "ops-02",
            "To reduce inference cost, use smaller models and caching. \
             Selective routing can pick the right model size on demand.",
        )
        .with_title("Cost Optimization"),
        Document::new(
            "ops-03",
            "Agentic RAG adds planning and tool use to retrieval-augmented generation. \
             It often re-queries or verifies intermediate results.",
        )
        .with_title("Agentic RAG"),
    ]
}

fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new("q1", "What is the capital of France?", "Paris"),
        Question::new("q2", "Who wrote the novel 1984?", "George Orwell"),
        Question::new("q3", "What is the largest planet in our solar system?", "Jupiter"),
        Question::new("q4", "When did the Second World War end?", "1945"),
        Question::new("q5", "Who discovered penicillin?", "Alexander Fleming"),
        Question::new(
            "q6",
            "What does groundedness measure in LLM evaluation?",
            "provided context",
        ),
        Question::new(
            "q7",
            "Name two methods to reduce inference cost.",
            "smaller models and caching",
        ),
        Question::new(
            "q8",
            "What does Agentic RAG add to standard RAG?",
            "planning and tool use",
        ),
    ]
}

/// Five pre-recorded QA records with three retrieved contexts each.
pub fn worked_example_records() -> Vec<QARecord> {
    fn record(query: &str, expected: &str, contexts: [&str; 3], predicted: &str) -> QARecord {
        QARecord::new(
            query,
            expected,
            contexts.iter().map(|c| c.to_string()).collect(),
            predicted,
        )
    }

    vec![
        record(
            "What is the capital of France?",
            "Paris",
            [
                "Paris is the capital of France.",
                "France is located in Europe.",
                "The population of the city is about 2 million.",
            ],
            "Paris is the capital of France.",
        ),
        record(
            "Who wrote the novel 1984?",
            "George Orwell",
            [
                "1984 is a dystopian novel by George Orwell.",
                "It was published in 1949.",
                "Animal Farm is another book by the same author.",
            ],
            "George Orwell wrote 1984.",
        ),
        record(
            "What is the largest planet in our solar system?",
            "Jupiter",
            [
                "Jupiter is the largest planet in the solar system.",
                "Mars is smaller than Earth.",
                "Saturn has large rings.",
            ],
            "Jupiter",
        ),
        record(
            "When did the Second World War end?",
            "1945",
            [
                "World War II ended in 1945.",
                "The war started in 1939.",
                "It involved many nations around the globe.",
            ],
            "It ended in 1945.",
        ),
        record(
            "Who discovered penicillin?",
            "Alexander Fleming",
            [
                "Alexander Fleming discovered penicillin in 1928.",
                "Penicillin was the first true antibiotic.",
                "The discovery revolutionized medicine.",
            ],
            "Alexander Fleming",
        ),
    ]
}
