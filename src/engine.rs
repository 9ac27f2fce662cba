//! Composition root: owns the corpus and answers questions.
//!
//! The engine is built once at startup from an already-loaded [`Corpus`] and
//! the application config, then shared read-only across requests — no
//! locking, no mutation after construction.

use crate::compose::{self, NO_RELEVANT_CONTENT};
use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::generate::{create_backend, GenerationBackend};
use crate::models::Answer;
use crate::retrieve::retrieve;

/// How `Answer.text` is produced.
enum AnswerMode {
    /// Compose locally from the top results.
    Template,
    /// Delegate to the generation backend.
    Generated(Box<dyn GenerationBackend>),
}

pub struct AskEngine {
    corpus: Corpus,
    mode: AnswerMode,
    top_k: usize,
}

impl AskEngine {
    /// Build the engine, taking ownership of the loaded corpus.
    ///
    /// The generation backend is constructed here when `answer.mode` is
    /// `"generated"`, so a bad backend configuration fails at startup.
    pub fn new(corpus: Corpus, config: &Config) -> Result<Self> {
        let mode = match config.answer.mode.as_str() {
            "generated" => AnswerMode::Generated(create_backend(&config.generation)?),
            _ => AnswerMode::Template,
        };

        Ok(Self {
            corpus,
            mode,
            top_k: config.retrieval.top_k,
        })
    }

    /// Answer a question against the corpus.
    ///
    /// Retrieves the top-ranked documents and composes the answer per the
    /// configured mode. When nothing overlaps the query, the fixed
    /// no-relevant-content response is returned — never an error. Callers
    /// are expected to reject empty or whitespace-only questions before
    /// invoking this; the engine itself is total over any string.
    pub async fn answer_question(&self, question: &str) -> Result<Answer> {
        let results = retrieve(question, &self.corpus, self.top_k);

        if results.is_empty() {
            return Ok(Answer {
                text: NO_RELEVANT_CONTENT.to_string(),
                sources: Vec::new(),
            });
        }

        match &self.mode {
            AnswerMode::Template => Ok(compose::compose(&results, question)),
            AnswerMode::Generated(backend) => {
                let text = backend.generate(question, &results).await?;
                let sources = results.iter().map(|d| d.title.clone()).collect();
                Ok(Answer { text, sources })
            }
        }
    }
}
