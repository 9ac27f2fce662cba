//! Template-mode answer composition.
//!
//! Builds the user-facing answer string from ranked retrieval results: a
//! header embedding the question, an excerpt of the best match, and a bullet
//! list of related titles. The excerpt cut is a raw character-count cut and
//! may split mid-word; downstream consumers rely on the exact length
//! contract, so it is preserved as-is.

use crate::models::{Answer, Document};

/// Fixed response used whenever retrieval finds nothing.
pub const NO_RELEVANT_CONTENT: &str = "No relevant content found.";

/// Maximum excerpt length (characters) taken from the top result.
const EXCERPT_CHARS: usize = 350;

/// Cut a string to at most `max` characters.
///
/// Counts characters, not bytes, so the cut never lands inside a UTF-8
/// sequence. No word-boundary awareness.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Compose a template answer from ranked results.
///
/// The answer text is a header line embedding the verbatim question, an
/// excerpt of the first (highest-scored) result capped at 350 characters,
/// and one bullet per result title. `sources` lists every result title in
/// rank order.
///
/// # Panics
///
/// `results` must be non-empty. The empty case is handled upstream with
/// [`NO_RELEVANT_CONTENT`]; calling this with no results is a bug in the
/// caller.
pub fn compose(results: &[&Document], question: &str) -> Answer {
    let summary = truncate_chars(&results[0].content, EXCERPT_CHARS);

    let related: Vec<String> = results.iter().map(|d| format!("• {}", d.title)).collect();
    let sources: Vec<String> = results.iter().map(|d| d.title.clone()).collect();

    let text = format!(
        "Here is what we found about \"{}\":\n\n{}\n\nKey related content:\n{}",
        question,
        summary,
        related.join("\n")
    );

    Answer { text, sources }
}
