use std::collections::{BTreeMap, HashMap, HashSet};

use crate::text::{normalize, term_frequencies};

/// Sparse term weights; absent terms weigh zero
///
/// Kept in term order so cosine sums run in the same order on every call.
pub type TermVector = BTreeMap<String, f64>;

/// Document frequency statistics for one corpus
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdfTable {
    /// Number of documents in the corpus
    pub total_docs: usize,
    /// Number of documents containing each term at least once
    pub doc_freqs: HashMap<String, usize>,
}

impl IdfTable {
    /// Count document frequencies over normalized token sequences
    pub fn from_token_sets(docs: &[Vec<String>]) -> Self {
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();
        for tokens in docs {
            let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for term in unique {
                *doc_freqs.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        IdfTable {
            total_docs: docs.len(),
            doc_freqs,
        }
    }

    /// `ln(N / (1 + df))` for a term seen in the corpus
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.doc_freqs
            .get(term)
            .map(|&df| (self.total_docs as f64 / (1.0 + df as f64)).ln())
    }

    /// Weight for terms absent from the corpus
    fn fallback_idf(&self) -> f64 {
        (self.total_docs as f64).ln()
    }

    /// Turn raw term counts into TF-IDF weights
    pub fn weigh(&self, term_freqs: &BTreeMap<String, f64>) -> TermVector {
        let fallback = self.fallback_idf();
        term_freqs
            .iter()
            .map(|(term, &tf)| {
                let idf = self.idf(term).unwrap_or(fallback);
                (term.clone(), tf * idf)
            })
            .collect()
    }

    /// Normalize and weigh a single text against this table
    pub fn vectorize_text(&self, text: &str) -> TermVector {
        self.weigh(&term_frequencies(&normalize(text)))
    }
}

/// Build one TF-IDF vector per text, positionally aligned with the input
///
/// Document frequencies are counted over exactly the texts passed in.
pub fn vectorize(corpus_texts: &[&str]) -> Vec<TermVector> {
    let tokenized: Vec<Vec<String>> = corpus_texts.iter().map(|t| normalize(t)).collect();
    vectorize_tokens(&tokenized).1
}

/// Vectorize pre-normalized token sequences, returning the IDF table used
pub(crate) fn vectorize_tokens(tokenized: &[Vec<String>]) -> (IdfTable, Vec<TermVector>) {
    let table = IdfTable::from_token_sets(tokenized);
    let vectors = tokenized
        .iter()
        .map(|tokens| table.weigh(&term_frequencies(tokens)))
        .collect();
    (table, vectors)
}

/// Cosine of the angle between two term vectors, 0.0 when either is empty
pub fn cosine_similarity(vec_a: &TermVector, vec_b: &TermVector) -> f64 {
    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (term, weight) in vec_a {
        norm_a += weight * weight;
        if let Some(weight_b) = vec_b.get(term) {
            dot_product += weight * weight_b;
        }
    }

    for weight in vec_b.values() {
        norm_b += weight * weight;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot_product / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
