//! Similarity engine for finding repeated cases
//!
//! Every call builds TF-IDF statistics from exactly the documents it is given
//! (the query plus its candidates), scores each candidate against the query
//! with cosine similarity and returns the candidates above a threshold, best
//! first. [`CorpusIndex`] precomputes the same statistics for a fixed corpus
//! when one set of documents is queried repeatedly.

pub mod tfidf;

mod duplicates;

mod index;

pub use duplicates::{find_all_duplicates, DuplicatePair};
pub use index::{CorpusIndex, IndexCache};
pub use tfidf::{cosine_similarity, vectorize, IdfTable, TermVector};

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Document;
use crate::text::normalize;
use crate::trace_time;

/// Threshold used when the caller has no stronger opinion
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Similarity score of one candidate against the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Candidate document ID
    pub id: String,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
}

impl SimilarityResult {
    /// Score as a whole percentage for display
    pub fn percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

/// Ranking options for [`find_similar_with_options`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarOptions {
    /// Keep only candidates scoring strictly above this value
    pub threshold: f64,
    /// Maximum number of results, applied after sorting
    pub limit: Option<usize>,
}

impl Default for SimilarOptions {
    fn default() -> Self {
        SimilarOptions {
            threshold: DEFAULT_THRESHOLD,
            limit: None,
        }
    }
}

/// Rank candidates by textual similarity to the query
///
/// Candidates sharing the query's id are removed before the corpus is built,
/// so they influence neither the scores nor the result. Results scoring at or
/// below `threshold` are dropped; the rest are sorted by score descending,
/// ties keeping candidate order.
pub fn find_similar(
    query: &Document,
    candidates: &[Document],
    threshold: f64,
) -> Vec<SimilarityResult> {
    find_similar_with_options(
        query,
        candidates,
        &SimilarOptions {
            threshold,
            limit: None,
        },
    )
}

/// [`find_similar`] with an optional result limit
pub fn find_similar_with_options(
    query: &Document,
    candidates: &[Document],
    options: &SimilarOptions,
) -> Vec<SimilarityResult> {
    let start = Instant::now();

    let others: Vec<&Document> = candidates.iter().filter(|c| c.id != query.id).collect();
    if others.is_empty() {
        return Vec::new();
    }

    let tokenized: Vec<Vec<String>> = std::iter::once(query)
        .chain(others.iter().copied())
        .map(|doc| normalize(&doc.text))
        .collect();
    let (_, vectors) = tfidf::vectorize_tokens(&tokenized);

    let (query_vec, candidate_vecs) = match vectors.split_first() {
        Some(split) => split,
        None => return Vec::new(),
    };

    let scored = others
        .iter()
        .zip(candidate_vecs)
        .map(|(doc, vec)| (doc.id.as_str(), cosine_similarity(query_vec, vec)));
    let results = rank(scored, options);

    debug!(
        query = %query.id,
        candidates = others.len(),
        matches = results.len(),
        threshold = options.threshold,
        "find_similar"
    );
    trace_time!(start, "find_similar");

    results
}

/// Apply the threshold, sort best first and truncate
pub(crate) fn rank<'a>(
    scored: impl Iterator<Item = (&'a str, f64)>,
    options: &SimilarOptions,
) -> Vec<SimilarityResult> {
    let mut results: Vec<SimilarityResult> = scored
        .filter(|(_, score)| *score > options.threshold)
        .map(|(id, score)| SimilarityResult {
            id: id.to_string(),
            score,
        })
        .collect();

    // sort_by is stable, so equal scores keep candidate order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}
