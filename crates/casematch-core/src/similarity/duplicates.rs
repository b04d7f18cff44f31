use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::CorpusIndex;
use super::tfidf::cosine_similarity;
use crate::document::Document;
use crate::error::Result;
use crate::trace_time;

/// Two documents whose similarity exceeded the sweep threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    /// Earlier document in input order
    pub first: String,
    /// Later document in input order
    pub second: String,
    /// Similarity score (0.0 to 1.0)
    pub score: f64,
}

impl DuplicatePair {
    /// Score as a whole percentage for display
    pub fn percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

/// Find all near-duplicates in a set of documents
///
/// Scores every unordered pair against statistics of the whole set, keeps
/// pairs scoring strictly above `threshold` and sorts them by score
/// descending. Ties keep input order. Ids must be unique.
pub fn find_all_duplicates(documents: &[Document], threshold: f64) -> Result<Vec<DuplicatePair>> {
    let start = Instant::now();
    let index = CorpusIndex::build(documents)?;
    let ids = index.ids();

    let mut duplicates = Vec::new();
    for i in 0..ids.len() {
        for j in i + 1..ids.len() {
            let score = cosine_similarity(index.vector_at(i), index.vector_at(j));
            if score > threshold {
                duplicates.push(DuplicatePair {
                    first: ids[i].clone(),
                    second: ids[j].clone(),
                    score,
                });
            }
        }
    }

    duplicates.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        documents = ids.len(),
        pairs = duplicates.len(),
        threshold,
        "find_all_duplicates"
    );
    trace_time!(start, "find_all_duplicates");

    Ok(duplicates)
}
