//! Core grading error types.
//!
//! The scoring strategies themselves never fail: empty keyword sets,
//! zero-magnitude vectors, and unrecognized question types all degrade
//! gracefully. These errors cover the conditions that indicate broken
//! input or a logic bug and must propagate to the caller.

use thiserror::Error;

/// Errors raised by the grading engine and report lookups.
#[derive(Debug, Error)]
pub enum GradingError {
    /// A result lookup referenced a question id that was never graded.
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),

    /// An answer carried a negative max_marks value.
    #[error("negative max_marks ({max_marks}) for question '{question_id}'")]
    NegativeMaxMarks { question_id: String, max_marks: f64 },
}
