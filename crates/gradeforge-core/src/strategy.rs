//! Interchangeable grading strategies.
//!
//! Each question type maps to one of three scoring policies. Dispatch is a
//! pure function; unrecognized question types fall back to keyword overlap,
//! a deliberate permissive default.

use serde_json::json;

use crate::model::{Details, QuestionType, Rubric};
use crate::similarity::cosine_similarity;
use crate::text::{extract_keywords, tokenize, word_count};
use crate::tfidf::weight_vector;

/// Minimum word count for full length credit in keyword-overlap grading.
const MIN_WORDS: usize = 10;

/// Round to two decimal places, used for all reported scores.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// The outcome of grading a single answer.
#[derive(Debug, Clone)]
pub struct GradeOutcome {
    /// Awarded marks, rounded to 2 decimals, in `[0, max_marks]`.
    pub score: f64,
    /// Human-readable feedback for the student.
    pub feedback: String,
    /// Machine-readable breakdown of how the score was computed.
    pub details: Details,
}

/// A grading strategy, selected by question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Normalized string equality, for objective questions.
    ExactMatch,
    /// Keyword coverage with a length factor, for short answers.
    KeywordOverlap,
    /// TF-IDF cosine similarity with a sqrt boost, for essays.
    VectorSimilarity,
}

impl Strategy {
    /// Select the strategy for a question type.
    ///
    /// Unrecognized types grade with keyword overlap rather than erroring.
    pub fn for_question_type(question_type: &QuestionType) -> Self {
        match question_type {
            QuestionType::Mcq | QuestionType::TrueFalse => Strategy::ExactMatch,
            QuestionType::ShortAnswer => Strategy::KeywordOverlap,
            QuestionType::Essay => Strategy::VectorSimilarity,
            QuestionType::Other(_) => Strategy::KeywordOverlap,
        }
    }

    /// Strategy name recorded in the grading details.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ExactMatch => "exact_match",
            Strategy::KeywordOverlap => "keyword_overlap",
            Strategy::VectorSimilarity => "vector_similarity",
        }
    }

    /// Grade one answer against its expected answer.
    ///
    /// The rubric is accepted for forward compatibility but not consumed
    /// by any current strategy.
    pub fn grade(
        &self,
        student_answer: &str,
        expected_answer: &str,
        max_marks: f64,
        _rubric: Option<&Rubric>,
    ) -> GradeOutcome {
        match self {
            Strategy::ExactMatch => grade_exact(student_answer, expected_answer, max_marks),
            Strategy::KeywordOverlap => grade_keywords(student_answer, expected_answer, max_marks),
            Strategy::VectorSimilarity => {
                grade_similarity(student_answer, expected_answer, max_marks)
            }
        }
    }
}

fn grade_exact(student_answer: &str, expected_answer: &str, max_marks: f64) -> GradeOutcome {
    let student = student_answer.trim().to_lowercase();
    let expected = expected_answer.trim().to_lowercase();
    let is_correct = student == expected;

    let score = if is_correct { round2(max_marks) } else { 0.0 };
    let feedback = if is_correct {
        "Correct!".to_string()
    } else {
        format!("Incorrect. Expected: {expected}")
    };

    let mut details = Details::new();
    details.insert("strategy".into(), json!(Strategy::ExactMatch.name()));
    details.insert("is_correct".into(), json!(is_correct));
    details.insert("student_answer".into(), json!(student));
    details.insert("expected_answer".into(), json!(expected));

    GradeOutcome {
        score,
        feedback,
        details,
    }
}

fn grade_keywords(student_answer: &str, expected_answer: &str, max_marks: f64) -> GradeOutcome {
    let keywords = extract_keywords(expected_answer);
    let student_lower = student_answer.to_lowercase();

    let (matched, missed): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|kw| student_lower.contains(kw.as_str()));

    let total_keywords = matched.len() + missed.len();
    // An expected answer with no keywords grades at a neutral 0.5
    let match_percentage = if total_keywords > 0 {
        matched.len() as f64 / total_keywords as f64
    } else {
        0.5
    };

    let words = word_count(student_answer);
    let length_factor = (words as f64 / MIN_WORDS as f64).min(1.0);

    let score = round2(max_marks * match_percentage * length_factor);
    let feedback = keyword_feedback(&matched, &missed, words);

    let mut details = Details::new();
    details.insert("strategy".into(), json!(Strategy::KeywordOverlap.name()));
    details.insert("matched_keywords".into(), json!(matched));
    details.insert("missed_keywords".into(), json!(missed));
    details.insert(
        "match_percentage".into(),
        json!(round2(match_percentage * 100.0)),
    );
    details.insert("word_count".into(), json!(words));
    details.insert("length_factor".into(), json!(round2(length_factor)));

    GradeOutcome {
        score,
        feedback,
        details,
    }
}

fn keyword_feedback(matched: &[String], missed: &[String], words: usize) -> String {
    let mut parts = Vec::new();

    if !matched.is_empty() {
        let shown: Vec<&str> = matched.iter().take(5).map(String::as_str).collect();
        parts.push(format!("Good coverage of key concepts: {}", shown.join(", ")));
    }
    if !missed.is_empty() {
        let shown: Vec<&str> = missed.iter().take(3).map(String::as_str).collect();
        parts.push(format!("Consider including: {}", shown.join(", ")));
    }
    if words < MIN_WORDS {
        parts.push("Answer could be more detailed".to_string());
    }

    if parts.is_empty() {
        "Answer reviewed.".to_string()
    } else {
        parts.join(". ")
    }
}

fn grade_similarity(student_answer: &str, expected_answer: &str, max_marks: f64) -> GradeOutcome {
    let student_tokens = tokenize(student_answer);
    let expected_tokens = tokenize(expected_answer);
    let documents: [&[String]; 2] = [&student_tokens, &expected_tokens];

    let student_vector = weight_vector(&student_tokens, &documents);
    let expected_vector = weight_vector(&expected_tokens, &documents);

    let similarity = cosine_similarity(&student_vector, &expected_vector);
    // The sqrt deliberately boosts partial-similarity scores: a similarity
    // of 0.25 yields a 0.5 multiplier
    let adjusted_similarity = similarity.sqrt();

    let score = round2(max_marks * adjusted_similarity);
    let feedback = similarity_feedback(similarity);

    let mut details = Details::new();
    details.insert(
        "strategy".into(),
        json!(Strategy::VectorSimilarity.name()),
    );
    details.insert("similarity_score".into(), json!(round4(similarity)));
    details.insert(
        "adjusted_similarity".into(),
        json!(round4(adjusted_similarity)),
    );
    details.insert("student_word_count".into(), json!(student_tokens.len()));
    details.insert("expected_word_count".into(), json!(expected_tokens.len()));

    GradeOutcome {
        score,
        feedback,
        details,
    }
}

/// Tiered feedback thresholds apply to the pre-sqrt similarity.
fn similarity_feedback(similarity: f64) -> String {
    if similarity >= 0.8 {
        "Excellent answer with strong alignment to expected content.".to_string()
    } else if similarity >= 0.6 {
        "Good answer, captures most key points.".to_string()
    } else if similarity >= 0.4 {
        "Adequate answer, but could be more comprehensive.".to_string()
    } else {
        "Answer needs improvement. Review the question carefully.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_by_question_type() {
        assert_eq!(
            Strategy::for_question_type(&QuestionType::Mcq),
            Strategy::ExactMatch
        );
        assert_eq!(
            Strategy::for_question_type(&QuestionType::TrueFalse),
            Strategy::ExactMatch
        );
        assert_eq!(
            Strategy::for_question_type(&QuestionType::ShortAnswer),
            Strategy::KeywordOverlap
        );
        assert_eq!(
            Strategy::for_question_type(&QuestionType::Essay),
            Strategy::VectorSimilarity
        );
    }

    #[test]
    fn unrecognized_type_defaults_to_keyword_overlap() {
        let qt = QuestionType::Other("diagram".into());
        assert_eq!(Strategy::for_question_type(&qt), Strategy::KeywordOverlap);
    }

    #[test]
    fn exact_match_is_case_and_whitespace_insensitive() {
        let outcome = Strategy::ExactMatch.grade("  A ", "a", 5.0, None);
        assert_eq!(outcome.score, 5.0);
        assert_eq!(outcome.feedback, "Correct!");
        assert_eq!(outcome.details["is_correct"], json!(true));
    }

    #[test]
    fn exact_match_wrong_answer_scores_zero_and_reveals_expected() {
        let outcome = Strategy::ExactMatch.grade("b", "A", 5.0, None);
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.feedback, "Incorrect. Expected: a");
        assert_eq!(outcome.details["is_correct"], json!(false));
    }

    #[test]
    fn keyword_overlap_full_match_short_answer() {
        // 5 words, all 3 keywords matched: length_factor 0.5, score = 10 * 1.0 * 0.5
        let outcome = Strategy::KeywordOverlap.grade(
            "It is Object Oriented Programming",
            "Object Oriented Programming",
            10.0,
            None,
        );
        assert_eq!(outcome.score, 5.0);
        assert_eq!(outcome.details["match_percentage"], json!(100.0));
        assert_eq!(outcome.details["length_factor"], json!(0.5));
        assert!(outcome.feedback.contains("object, oriented, programming"));
        assert!(outcome.feedback.contains("could be more detailed"));
    }

    #[test]
    fn keyword_overlap_missed_keywords_reduce_score() {
        let outcome = Strategy::KeywordOverlap.grade(
            "a queue is first in first out and supports push and pop operations",
            "stack queue list",
            9.0,
            None,
        );
        // 1 of 3 keywords matched, 13 words so full length credit
        assert_eq!(outcome.score, 3.0);
        assert_eq!(outcome.details["matched_keywords"], json!(["queue"]));
        assert_eq!(outcome.details["missed_keywords"], json!(["stack", "list"]));
        assert!(outcome.feedback.contains("Consider including: stack, list"));
    }

    #[test]
    fn keyword_overlap_neutral_default_for_empty_keyword_set() {
        let outcome = Strategy::KeywordOverlap.grade(
            "some answer text that is definitely long enough to pass ten words",
            "the a an",
            10.0,
            None,
        );
        assert_eq!(outcome.details["match_percentage"], json!(50.0));
        assert_eq!(outcome.score, 5.0);
    }

    #[test]
    fn keyword_overlap_empty_student_answer() {
        let outcome = Strategy::KeywordOverlap.grade("", "binary search tree", 10.0, None);
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.details["word_count"], json!(0));
    }

    #[test]
    fn vector_similarity_identical_texts_get_full_marks() {
        let text = "Polymorphism lets one interface represent many underlying forms";
        let outcome = Strategy::VectorSimilarity.grade(text, text, 10.0, None);
        assert_eq!(outcome.score, 10.0);
        assert_eq!(outcome.details["similarity_score"], json!(1.0));
        assert!(outcome.feedback.starts_with("Excellent"));
    }

    #[test]
    fn vector_similarity_disjoint_texts_score_zero() {
        let outcome = Strategy::VectorSimilarity.grade(
            "completely unrelated words here",
            "photosynthesis converts sunlight",
            10.0,
            None,
        );
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.details["similarity_score"], json!(0.0));
        assert!(outcome.feedback.contains("needs improvement"));
    }

    #[test]
    fn vector_similarity_empty_student_answer_scores_zero() {
        let outcome =
            Strategy::VectorSimilarity.grade("", "an essay about databases", 10.0, None);
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn scores_stay_within_bounds() {
        for strategy in [
            Strategy::ExactMatch,
            Strategy::KeywordOverlap,
            Strategy::VectorSimilarity,
        ] {
            let outcome = strategy.grade(
                "the quick brown fox jumps over the lazy dog repeatedly",
                "quick brown fox",
                7.5,
                None,
            );
            assert!(outcome.score >= 0.0, "{:?} went negative", strategy);
            assert!(outcome.score <= 7.5, "{:?} exceeded max", strategy);
            assert_eq!(outcome.score, round2(outcome.score));
        }
    }

    #[test]
    fn details_record_strategy_name() {
        let outcome = Strategy::KeywordOverlap.grade("x", "y", 1.0, None);
        assert_eq!(outcome.details["strategy"], json!("keyword_overlap"));
    }
}
