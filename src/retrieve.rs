//! Keyword-overlap retrieval over the corpus.
//!
//! Every document is scored by the number of distinct normalized terms it
//! shares with the query — an unweighted overlap count, not TF-IDF. Documents
//! are re-tokenized on every query; at this corpus size that is cheaper than
//! maintaining a precomputed index, and precomputation is deliberately left
//! out (it would be the first optimization if the corpus grew).

use crate::corpus::Corpus;
use crate::models::{Document, ScoredDocument};
use crate::tokenize::tokenize;

/// Score every document in the corpus against the query.
///
/// Returns one entry per document in corpus order, including zero scores.
pub fn score_documents<'a>(query: &str, corpus: &'a Corpus) -> Vec<ScoredDocument<'a>> {
    let query_tokens = tokenize(query);

    corpus
        .documents()
        .iter()
        .map(|doc| {
            let content_tokens = tokenize(&doc.content);
            let score = query_tokens.intersection(&content_tokens).count();
            ScoredDocument {
                score,
                document: doc,
            }
        })
        .collect()
}

/// Retrieve the best-matching documents for a query.
///
/// Scores all documents, sorts by score descending, keeps the first `top_k`,
/// and drops anything with zero overlap. The sort is stable, so documents
/// with equal scores keep their corpus order.
///
/// Never fails: an empty query, an empty corpus, or a query sharing no token
/// with any document all yield an empty result.
pub fn retrieve<'a>(query: &str, corpus: &'a Corpus, top_k: usize) -> Vec<&'a Document> {
    let mut scored = score_documents(query, corpus);

    // slice::sort_by is stable; equal scores preserve input order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
        .into_iter()
        .take(top_k)
        .filter(|s| s.score > 0)
        .map(|s| s.document)
        .collect()
}
