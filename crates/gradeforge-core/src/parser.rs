//! TOML submission parser.
//!
//! Loads submissions from TOML files and directories, and validates them.
//! Malformed files are fatal: a submission with missing required fields
//! propagates an error rather than being silently skipped.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answer, QuestionType, Rubric, Submission};

/// Intermediate TOML structure for parsing submission files.
#[derive(Debug, Deserialize)]
struct TomlSubmissionFile {
    submission: TomlSubmissionHeader,
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlSubmissionHeader {
    id: String,
    student: String,
    #[serde(default)]
    exam: String,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    question_id: String,
    question_type: String,
    student_answer: String,
    expected_answer: String,
    max_marks: f64,
    #[serde(default)]
    rubric: Option<toml::value::Table>,
}

/// Parse a single TOML file into a `Submission`.
pub fn parse_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submission file: {}", path.display()))?;

    parse_submission_str(&content, path)
}

/// Parse a TOML string into a `Submission` (useful for testing).
pub fn parse_submission_str(content: &str, source_path: &Path) -> Result<Submission> {
    let parsed: TomlSubmissionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let answers = parsed
        .answers
        .into_iter()
        .map(|a| {
            let question_type: QuestionType = QuestionType::from(a.question_type.as_str());
            let rubric = a.rubric.map(rubric_from_toml).transpose()?;

            Ok(Answer {
                question_id: a.question_id,
                question_type,
                student_answer: a.student_answer,
                expected_answer: a.expected_answer,
                max_marks: a.max_marks,
                rubric,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Submission {
        id: parsed.submission.id,
        student: parsed.submission.student,
        exam: parsed.submission.exam,
        answers,
    })
}

fn rubric_from_toml(table: toml::value::Table) -> Result<Rubric> {
    let value = serde_json::to_value(table).context("failed to convert rubric")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("rubric must be a table"),
    }
}

/// Recursively load all `.toml` submission files from a directory.
///
/// Any malformed file aborts the load with an error naming the file.
pub fn load_submission_directory(dir: &Path) -> Result<Vec<Submission>> {
    let mut submissions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            submissions.extend(load_submission_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            submissions.push(parse_submission(&path)?);
        }
    }

    Ok(submissions)
}

/// A warning from submission validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a submission for common issues.
pub fn validate_submission(submission: &Submission) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for answer in &submission.answers {
        if !seen_ids.insert(&answer.question_id) {
            warnings.push(ValidationWarning {
                question_id: Some(answer.question_id.clone()),
                message: format!("duplicate question id: {}", answer.question_id),
            });
        }
    }

    for answer in &submission.answers {
        if answer.student_answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(answer.question_id.clone()),
                message: "student answer is empty".into(),
            });
        }

        if answer.max_marks == 0.0 {
            warnings.push(ValidationWarning {
                question_id: Some(answer.question_id.clone()),
                message: "max_marks is 0; this answer cannot contribute to the score".into(),
            });
        }

        // Keyword grading falls back to a neutral 0.5 match on these
        let overlap = matches!(
            answer.question_type,
            QuestionType::ShortAnswer | QuestionType::Other(_)
        );
        if overlap && crate::text::extract_keywords(&answer.expected_answer).is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(answer.question_id.clone()),
                message: "expected answer yields no keywords; grading uses a neutral 50% match"
                    .into(),
            });
        }
    }

    warnings
}
