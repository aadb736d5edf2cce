//! The grading engine.
//!
//! Grading a single submission is a pure, synchronous computation: each
//! answer dispatches to its strategy and the results aggregate in input
//! order. Independent submissions share no state, so batch grading fans
//! them out across tasks with bounded parallelism.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::GradingError;
use crate::model::{Answer, Submission};
use crate::report::{BatchReport, ItemResult, SubmissionReport};
use crate::statistics::compute_aggregate_stats;
use crate::strategy::{round2, Strategy};

/// Configuration for the grading engine.
#[derive(Debug, Clone)]
pub struct GradingEngineConfig {
    /// Maximum submissions graded concurrently in a batch.
    pub parallelism: usize,
}

impl Default for GradingEngineConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// Progress reporting for batch grading.
pub trait ProgressReporter: Send + Sync {
    fn on_submission_start(&self, submission_id: &str);
    fn on_submission_complete(&self, report: &SubmissionReport);
    fn on_submission_error(&self, submission_id: &str, error: &str);
    fn on_batch_complete(&self, total: usize, graded: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_submission_start(&self, _: &str) {}
    fn on_submission_complete(&self, _: &SubmissionReport) {}
    fn on_submission_error(&self, _: &str, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// The grading engine. Stateless; construct fresh per call or reuse freely.
#[derive(Debug, Clone, Default)]
pub struct GradingEngine {
    config: GradingEngineConfig,
}

impl GradingEngine {
    pub fn new(config: GradingEngineConfig) -> Self {
        Self { config }
    }

    /// Grade a single answer.
    ///
    /// Fails only on broken input (negative max_marks); all scoring edge
    /// cases degrade gracefully inside the strategy.
    pub fn grade_answer(&self, answer: &Answer) -> Result<ItemResult, GradingError> {
        if answer.max_marks < 0.0 {
            return Err(GradingError::NegativeMaxMarks {
                question_id: answer.question_id.clone(),
                max_marks: answer.max_marks,
            });
        }

        let strategy = Strategy::for_question_type(&answer.question_type);
        let outcome = strategy.grade(
            &answer.student_answer,
            &answer.expected_answer,
            answer.max_marks,
            answer.rubric.as_ref(),
        );

        Ok(ItemResult {
            question_id: answer.question_id.clone(),
            question_type: answer.question_type.clone(),
            score: outcome.score,
            max_marks: answer.max_marks,
            feedback: outcome.feedback,
            details: outcome.details,
        })
    }

    /// Grade every answer of a submission, preserving input order.
    pub fn grade_submission(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionReport, GradingError> {
        let mut detailed_results = Vec::with_capacity(submission.answers.len());
        let mut total_score = 0.0;
        let mut max_score = 0.0;

        for answer in &submission.answers {
            let result = self.grade_answer(answer)?;
            total_score += result.score;
            max_score += result.max_marks;
            detailed_results.push(result);
        }

        // Zero total marks grade to 0%, an explicit policy rather than an error
        let percentage = if max_score > 0.0 {
            round2(total_score / max_score * 100.0)
        } else {
            0.0
        };

        Ok(SubmissionReport {
            id: Uuid::new_v4(),
            graded_at: chrono::Utc::now(),
            submission_id: submission.id.clone(),
            student: submission.student.clone(),
            total_score: round2(total_score),
            max_score: round2(max_score),
            percentage,
            detailed_results,
        })
    }

    /// Grade a batch of submissions concurrently.
    ///
    /// Submissions are independent, so they run under a semaphore-bounded
    /// set of tasks. Failed submissions are reported and skipped; the
    /// returned batch preserves input order for the ones that graded.
    pub async fn grade_batch(
        &self,
        submissions: &[Submission],
        progress: &dyn ProgressReporter,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));

        let mut futures = FuturesUnordered::new();
        for (index, submission) in submissions.iter().enumerate() {
            let engine = self.clone();
            let submission = submission.clone();
            let semaphore = Arc::clone(&semaphore);

            progress.on_submission_start(&submission.id);
            futures.push(async move {
                let submission_id = submission.id.clone();
                let inner = async {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
                    engine
                        .grade_submission(&submission)
                        .map_err(anyhow::Error::from)
                };
                (index, submission_id, inner.await)
            });
        }

        let total = futures.len();
        let mut indexed: Vec<(usize, SubmissionReport)> = Vec::new();
        let mut failed = 0usize;

        while let Some((index, submission_id, result)) = futures.next().await {
            match result {
                Ok(report) => {
                    progress.on_submission_complete(&report);
                    indexed.push((index, report));
                }
                Err(e) => {
                    tracing::error!("grading failed for {submission_id}: {e:#}");
                    progress.on_submission_error(&submission_id, &e.to_string());
                    failed += 1;
                }
            }
        }

        indexed.sort_by_key(|(index, _)| *index);
        let reports: Vec<SubmissionReport> = indexed.into_iter().map(|(_, r)| r).collect();

        let elapsed = start.elapsed();
        progress.on_batch_complete(total, reports.len(), failed, elapsed);

        let aggregate = compute_aggregate_stats(&reports);

        Ok(BatchReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            reports,
            aggregate,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
