//! Grading report types with JSON persistence and regrade comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GradingError;
use crate::model::{Details, QuestionType};
use crate::statistics::AggregateStats;

/// The graded result for a single answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    /// Question id, round-tripped unchanged from the input.
    pub question_id: String,
    /// Question type that selected the strategy.
    pub question_type: QuestionType,
    /// Awarded marks, rounded to 2 decimals.
    pub score: f64,
    /// Maximum marks for this question.
    pub max_marks: f64,
    /// Human-readable feedback.
    pub feedback: String,
    /// Strategy-specific detail breakdown, preserved verbatim for audit.
    pub details: Details,
}

impl ItemResult {
    /// Score as a fraction of max marks; 0 when no marks were available.
    pub fn score_ratio(&self) -> f64 {
        if self.max_marks > 0.0 {
            self.score / self.max_marks
        } else {
            0.0
        }
    }
}

/// The graded result for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When grading happened.
    pub graded_at: DateTime<Utc>,
    /// Identifier of the graded submission.
    pub submission_id: String,
    /// Student name or identifier.
    pub student: String,
    /// Sum of per-item scores, rounded to 2 decimals.
    pub total_score: f64,
    /// Sum of per-item max marks, rounded to 2 decimals.
    pub max_score: f64,
    /// total/max as a percentage (0 when max is 0), rounded to 2 decimals.
    pub percentage: f64,
    /// Per-item results, in the same order as the input answers.
    pub detailed_results: Vec<ItemResult>,
}

impl SubmissionReport {
    /// Look up the result for a question id.
    ///
    /// A missing id indicates a logic bug in the caller (asking for a
    /// question that was never part of the submission), so this is an
    /// error rather than a silent skip.
    pub fn result_for(&self, question_id: &str) -> Result<&ItemResult, GradingError> {
        self.detailed_results
            .iter()
            .find(|r| r.question_id == question_id)
            .ok_or_else(|| GradingError::UnknownQuestion(question_id.to_string()))
    }
}

/// A batch of submission reports from one grading run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the run started.
    pub created_at: DateTime<Utc>,
    /// Per-submission reports, in input order.
    pub reports: Vec<SubmissionReport>,
    /// Aggregate statistics across all reports.
    pub aggregate: AggregateStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this run against a baseline to detect score changes after
    /// an answer-key edit or strategy change.
    pub fn compare(&self, baseline: &BatchReport, threshold: f64) -> RegradeReport {
        // (submission_id, question_id) -> score ratio
        let ratio_map = |report: &BatchReport| -> HashMap<(String, String), f64> {
            let mut map = HashMap::new();
            for sub in &report.reports {
                for item in &sub.detailed_results {
                    map.insert(
                        (sub.submission_id.clone(), item.question_id.clone()),
                        item.score_ratio(),
                    );
                }
            }
            map
        };

        let baseline_ratios = ratio_map(baseline);
        let current_ratios = ratio_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_answers = 0usize;

        for (key, &current) in &current_ratios {
            if let Some(&base) = baseline_ratios.get(key) {
                let delta = current - base;
                let change = ScoreChange {
                    submission_id: key.0.clone(),
                    question_id: key.1.clone(),
                    baseline_ratio: base,
                    current_ratio: current,
                    delta,
                };
                if delta < -threshold {
                    regressions.push(change);
                } else if delta > threshold {
                    improvements.push(change);
                } else {
                    unchanged += 1;
                }
            } else {
                new_answers += 1;
            }
        }

        let removed_answers = baseline_ratios
            .keys()
            .filter(|k| !current_ratios.contains_key(k))
            .count();

        RegradeReport {
            regressions,
            improvements,
            unchanged,
            new_answers,
            removed_answers,
        }
    }
}

/// Result of comparing two grading runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegradeReport {
    /// Answers whose score ratio went down.
    pub regressions: Vec<ScoreChange>,
    /// Answers whose score ratio went up.
    pub improvements: Vec<ScoreChange>,
    /// Answers with no significant change.
    pub unchanged: usize,
    /// Answers in current but not baseline.
    pub new_answers: usize,
    /// Answers in baseline but not current.
    pub removed_answers: usize,
}

/// A per-answer score change between two runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub submission_id: String,
    pub question_id: String,
    pub baseline_ratio: f64,
    pub current_ratio: f64,
    pub delta: f64,
}

impl RegradeReport {
    /// Format the regrade report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Submission | Question | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|----------|---------|-------|\n");
            for r in &self.regressions {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1}% | {:.1}% |\n",
                    r.submission_id,
                    r.question_id,
                    r.baseline_ratio * 100.0,
                    r.current_ratio * 100.0,
                    r.delta * 100.0
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Submission | Question | Baseline | Current | Delta |\n");
            md.push_str("|------------|----------|----------|---------|-------|\n");
            for i in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1}% | +{:.1}% |\n",
                    i.submission_id,
                    i.question_id,
                    i.baseline_ratio * 100.0,
                    i.current_ratio * 100.0,
                    i.delta * 100.0
                ));
            }
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
