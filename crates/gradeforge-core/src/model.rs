//! Core data model types for gradeforge.
//!
//! These are the fundamental types the grading pipeline operates on:
//! question types, answers awaiting grading, and submissions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An open key-value map of strategy-specific grading detail.
///
/// Preserved verbatim on every graded item so external collaborators can
/// audit exactly which keywords matched or what similarity was computed.
pub type Details = serde_json::Map<String, serde_json::Value>;

/// Optional structured grading hints attached to a question.
///
/// Present in the data model but not consumed by the current strategies;
/// reserved as an extension point.
pub type Rubric = serde_json::Map<String, serde_json::Value>;

/// The kind of exam question, which selects the grading strategy.
///
/// Parsing never fails: any unrecognized tag is preserved as `Other` and
/// graded with the keyword-overlap strategy (a deliberate permissive
/// default, not an error).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
    Essay,
    Other(String),
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Mcq => write!(f, "mcq"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::Essay => write!(f, "essay"),
            QuestionType::Other(tag) => write!(f, "{tag}"),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(s: &str) -> Self {
        match s {
            "mcq" => QuestionType::Mcq,
            "true_false" => QuestionType::TrueFalse,
            "short_answer" => QuestionType::ShortAnswer,
            "essay" => QuestionType::Essay,
            other => QuestionType::Other(other.to_string()),
        }
    }
}

impl FromStr for QuestionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuestionType::from(s))
    }
}

impl From<String> for QuestionType {
    fn from(s: String) -> Self {
        QuestionType::from(s.as_str())
    }
}

impl From<QuestionType> for String {
    fn from(qt: QuestionType) -> Self {
        qt.to_string()
    }
}

/// A single student answer awaiting grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Identifier of the question this answer belongs to.
    pub question_id: String,
    /// Question kind, which selects the grading strategy.
    pub question_type: QuestionType,
    /// The student's response text.
    pub student_answer: String,
    /// The expected (model) answer text.
    pub expected_answer: String,
    /// Maximum marks awardable. Must be non-negative.
    pub max_marks: f64,
    /// Optional structured grading hints.
    #[serde(default)]
    pub rubric: Option<Rubric>,
}

/// One student's complete set of answers for an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier for this submission.
    pub id: String,
    /// Student name or identifier.
    pub student: String,
    /// Exam name or identifier.
    #[serde(default)]
    pub exam: String,
    /// The answers, in question order. Grading preserves this order.
    #[serde(default)]
    pub answers: Vec<Answer>,
}
