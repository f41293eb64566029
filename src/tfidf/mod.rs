//! TF-IDF weighting over an ad hoc corpus, with cosine similarity.
//!
//! A validation pass builds one small corpus per request: the original user
//! input at index 0, followed by one document per feature. Vectors are sparse
//! term-to-weight maps; weights use smoothed inverse document frequency so a
//! term present in every document still contributes a little instead of
//! dividing by zero.

use std::collections::{HashMap, HashSet};

use crate::text;

/// Sparse TF-IDF vectors for one document set, in input order.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    vectors: Vec<HashMap<String, f64>>,
}

impl TfIdfIndex {
    /// Tokenizes `documents` and computes one weighted vector per document.
    ///
    /// For a corpus of `N` documents: `tf(t) = count(t) / |tokens|`,
    /// `idf(t) = ln((N + 1) / (df(t) + 1)) + 1`, `weight = tf * idf`.
    /// Documents that tokenize to nothing get an empty vector.
    pub fn build(documents: &[&str]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| text::tokenize(d)).collect();
        let n_docs = tokenized.len() as f64;

        let mut df: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let total = tokens.len() as f64;
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for token in tokens {
                    *counts.entry(token).or_insert(0) += 1;
                }

                counts
                    .into_iter()
                    .map(|(term, count)| {
                        let tf = count as f64 / total;
                        let doc_freq = df[term] as f64;
                        let idf = ((n_docs + 1.0) / (doc_freq + 1.0)).ln() + 1.0;
                        (term.to_owned(), tf * idf)
                    })
                    .collect()
            })
            .collect();

        Self { vectors }
    }

    /// Number of documents in the corpus.
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The weighted vector for document `idx`, if it exists.
    #[inline]
    pub fn vector(&self, idx: usize) -> Option<&HashMap<String, f64>> {
        self.vectors.get(idx)
    }

    /// Cosine similarity between document `idx` and the reference document
    /// at index 0. Out-of-range indexes score 0.
    pub fn similarity_to_reference(&self, idx: usize) -> f64 {
        match (self.vectors.first(), self.vectors.get(idx)) {
            (Some(reference), Some(candidate)) => cosine_similarity(reference, candidate),
            _ => 0.0,
        }
    }
}

/// Cosine similarity between two sparse vectors.
///
/// Returns 0 when either vector has zero norm, so empty or fully
/// stop-worded documents never produce NaN. The result is clamped into
/// `[0, 1]` to keep float noise away from classification boundaries.
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut dot = 0.0;
    for (term, w_small) in small {
        if let Some(w_large) = large.get(term) {
            dot += w_small * w_large;
        }
    }

    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
