//! Precomputed TF-IDF statistics for a fixed corpus
//!
//! Querying document `d` of a [`CorpusIndex`] built over `docs` returns
//! exactly what [`find_similar`](super::find_similar) returns for `d` against
//! `docs`: the corpus membership and the IDF formula are the same, only the
//! vectorization work is shared between queries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::tfidf::{self, cosine_similarity, IdfTable, TermVector};
use super::{rank, SimilarOptions, SimilarityResult};
use crate::document::Document;
use crate::error::{CaseMatchError, Result};
use crate::logging::ResourceMetrics;
use crate::text::normalize;
use crate::{bail_input, log_resource_metrics, trace_time};

/// TF-IDF vectors for every document of one corpus
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
    vectors: Vec<TermVector>,
    idf: IdfTable,
    fingerprint: String,
}

impl CorpusIndex {
    /// Vectorize a corpus once
    ///
    /// Ids must be unique within the corpus.
    pub fn build(documents: &[Document]) -> Result<Self> {
        let start = Instant::now();

        let mut positions = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            if positions.insert(doc.id.clone(), i).is_some() {
                bail_input!("duplicate document id in corpus: {}", doc.id);
            }
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| normalize(&d.text)).collect();
        let (idf, vectors) = tfidf::vectorize_tokens(&tokenized);

        let index = CorpusIndex {
            ids: documents.iter().map(|d| d.id.clone()).collect(),
            positions,
            vectors,
            idf,
            fingerprint: fingerprint(documents),
        };

        debug!(
            documents = index.len(),
            terms = index.idf.doc_freqs.len(),
            "build_corpus_index"
        );
        trace_time!(start, "build_corpus_index");

        Ok(index)
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Document ids in corpus order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Hex SHA-256 over the ordered ids and texts of the corpus
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// IDF statistics of the corpus
    pub fn idf_table(&self) -> &IdfTable {
        &self.idf
    }

    /// TF-IDF vector of a corpus document
    pub fn vector(&self, id: &str) -> Option<&TermVector> {
        self.positions.get(id).map(|&i| &self.vectors[i])
    }

    /// Weigh a text that is not part of the corpus against its statistics
    ///
    /// Terms the corpus has never seen get the `ln(N)` fallback weight.
    pub fn vectorize_external(&self, text: &str) -> TermVector {
        self.idf.vectorize_text(text)
    }

    /// Cosine similarity between two corpus documents
    pub fn score(&self, id_a: &str, id_b: &str) -> Result<f64> {
        let a = self.lookup(id_a)?;
        let b = self.lookup(id_b)?;
        Ok(cosine_similarity(&self.vectors[a], &self.vectors[b]))
    }

    /// Rank every other corpus document against `id`
    pub fn find_similar(&self, id: &str, threshold: f64) -> Result<Vec<SimilarityResult>> {
        self.find_similar_with_options(
            id,
            &SimilarOptions {
                threshold,
                limit: None,
            },
        )
    }

    /// [`CorpusIndex::find_similar`] with an optional result limit
    pub fn find_similar_with_options(
        &self,
        id: &str,
        options: &SimilarOptions,
    ) -> Result<Vec<SimilarityResult>> {
        let position = self.lookup(id)?;
        let query_vec = &self.vectors[position];

        let scored = self
            .ids
            .iter()
            .zip(&self.vectors)
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, (other, vec))| (other.as_str(), cosine_similarity(query_vec, vec)));

        Ok(rank(scored, options))
    }

    pub(crate) fn vector_at(&self, position: usize) -> &TermVector {
        &self.vectors[position]
    }

    fn lookup(&self, id: &str) -> Result<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| CaseMatchError::not_found("document", id))
    }
}

fn fingerprint(documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    for doc in documents {
        // Length prefixes keep ("ab", "c") and ("a", "bc") apart
        hasher.update((doc.id.len() as u64).to_le_bytes());
        hasher.update(doc.id.as_bytes());
        hasher.update((doc.text.len() as u64).to_le_bytes());
        hasher.update(doc.text.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Caller-owned cache of corpus indexes keyed by corpus fingerprint
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: HashMap<String, Arc<CorpusIndex>>,
    metrics: ResourceMetrics,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index for this exact corpus, building it on a miss
    pub fn get_or_build(&mut self, documents: &[Document]) -> Result<Arc<CorpusIndex>> {
        let key = fingerprint(documents);
        if let Some(index) = self.entries.get(&key) {
            self.metrics.record_cache_hit();
            log_resource_metrics!(&self.metrics, "index_cache");
            return Ok(Arc::clone(index));
        }

        self.metrics.record_cache_miss();
        let index = Arc::new(CorpusIndex::build(documents)?);
        let bytes: usize = documents.iter().map(|d| d.id.len() + d.text.len()).sum();
        self.metrics.record_allocation(bytes as u64);
        self.entries.insert(key, Arc::clone(&index));
        log_resource_metrics!(&self.metrics, "index_cache");

        Ok(index)
    }

    /// Number of cached indexes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached index and reset the counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.metrics.reset();
    }

    pub fn metrics(&self) -> &ResourceMetrics {
        &self.metrics
    }
}
