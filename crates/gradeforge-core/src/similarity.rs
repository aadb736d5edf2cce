//! Cosine similarity between sparse weight vectors.

use crate::tfidf::WeightVector;

/// Compute the cosine similarity of two weight vectors.
///
/// The dot product is taken over the union of terms and divided by the
/// product of the Euclidean norms. If either norm is zero the similarity
/// is defined as 0.0 rather than an error.
///
/// With smoothed IDF weighting over the two-document comparison set, all
/// nonzero weights belong to shared terms and carry the same sign, so in
/// practice the result lands in [0.0, 1.0]. No clamping is performed.
pub fn cosine_similarity(a: &WeightVector, b: &WeightVector) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, wa)| b.get(term).map(|wb| wa * wb))
        .sum();

    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;
    use crate::tfidf::weight_vector;

    fn similarity_for(a: &str, b: &str) -> f64 {
        let ta = tokenize(a);
        let tb = tokenize(b);
        let docs: [&[String]; 2] = [&ta, &tb];
        cosine_similarity(&weight_vector(&ta, &docs), &weight_vector(&tb, &docs))
    }

    #[test]
    fn identical_texts_have_similarity_one() {
        let sim = similarity_for(
            "inheritance lets a class reuse behaviour",
            "inheritance lets a class reuse behaviour",
        );
        assert!((sim - 1.0).abs() < 1e-9, "expected 1.0, got {sim}");
    }

    #[test]
    fn disjoint_vocabularies_have_similarity_zero() {
        // No shared terms, so every weight is zero and both norms vanish
        assert_eq!(similarity_for("alpha beta gamma", "delta epsilon"), 0.0);
    }

    #[test]
    fn empty_vectors_have_similarity_zero() {
        assert_eq!(cosine_similarity(&WeightVector::new(), &WeightVector::new()), 0.0);
        assert_eq!(similarity_for("", "some expected answer"), 0.0);
    }

    #[test]
    fn partial_overlap_is_between_zero_and_one() {
        // Unequal term frequencies keep the shared-term vectors from being
        // proportional, so the similarity is strictly partial
        let sim = similarity_for(
            "encapsulation encapsulation hides internal state",
            "encapsulation hides implementation details",
        );
        assert!(sim > 0.0);
        assert!(sim < 1.0);
    }
}
