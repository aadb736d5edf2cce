//! Term-frequency / inverse-document-frequency weighting.
//!
//! Computes a weight vector for one document against the full comparison
//! set (for grading, the student answer and the expected answer). The
//! engine is stateless: vectors are recomputed per grading call and
//! discarded at call end.

use std::collections::{HashMap, HashSet};

/// A sparse mapping from term to TF-IDF weight.
pub type WeightVector = HashMap<String, f64>;

/// Compute the TF-IDF weight vector for `doc` over `documents`.
///
/// Term frequency is the term count divided by the document's total token
/// count. The IDF is smoothed: `ln(N / (df + 1))` where N is the number of
/// documents and df the number of documents containing the term. With the
/// two-document comparison set this means a term present in both documents
/// weighs `ln(2/3)` (negative) and a term present in only one weighs zero.
///
/// An empty document yields an empty vector rather than dividing by zero.
pub fn weight_vector(doc: &[String], documents: &[&[String]]) -> WeightVector {
    if doc.is_empty() {
        return WeightVector::new();
    }

    let total_terms = doc.len() as f64;
    let mut tf: HashMap<&str, usize> = HashMap::new();
    for term in doc {
        *tf.entry(term.as_str()).or_insert(0) += 1;
    }

    let document_sets: Vec<HashSet<&str>> = documents
        .iter()
        .map(|d| d.iter().map(String::as_str).collect())
        .collect();
    let n = documents.len() as f64;

    tf.into_iter()
        .map(|(term, count)| {
            let df = document_sets.iter().filter(|d| d.contains(term)).count();
            let idf = (n / (df as f64 + 1.0)).ln();
            (term.to_string(), (count as f64 / total_terms) * idf)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    fn vectors_for(a: &str, b: &str) -> (WeightVector, WeightVector) {
        let ta = tokenize(a);
        let tb = tokenize(b);
        let docs: [&[String]; 2] = [&ta, &tb];
        (weight_vector(&ta, &docs), weight_vector(&tb, &docs))
    }

    #[test]
    fn empty_document_yields_empty_vector() {
        let other = tokenize("some text");
        let empty: Vec<String> = Vec::new();
        let docs: [&[String]; 2] = [&empty, &other];
        assert!(weight_vector(&empty, &docs).is_empty());
    }

    #[test]
    fn shared_terms_get_negative_weight() {
        let (va, _) = vectors_for("stack overflow", "stack underflow");
        // "stack" appears in both documents: idf = ln(2/3) < 0
        assert!(va["stack"] < 0.0);
    }

    #[test]
    fn unique_terms_get_zero_weight() {
        let (va, _) = vectors_for("stack overflow", "stack underflow");
        // "overflow" appears in one document: idf = ln(2/2) = 0
        assert_eq!(va["overflow"], 0.0);
    }

    #[test]
    fn term_frequency_scales_weights() {
        let (va, _) = vectors_for("stack stack overflow", "stack");
        let expected = (2.0 / 3.0) * (2.0f64 / 3.0).ln();
        assert!((va["stack"] - expected).abs() < 1e-12);
    }
}
