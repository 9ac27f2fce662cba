//! Core data models for the question-answering pipeline.
//!
//! These types represent the articles, ranked matches, and composed answers
//! that flow from retrieval to answer composition.

use serde::{Deserialize, Serialize};

/// A single article in the corpus.
///
/// Documents carry no explicit id — identity is their position in the loaded
/// corpus, and `title` serves as the stable display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
}

/// A document paired with its overlap score for one retrieval call.
#[derive(Debug, Clone)]
pub struct ScoredDocument<'a> {
    /// Count of distinct normalized terms shared between query and content.
    pub score: usize,
    pub document: &'a Document,
}

/// A composed answer returned to the caller.
///
/// `sources` has the same length and order as the documents used to build
/// `text`.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}
