//! Aggregate statistics across a batch of graded submissions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::report::SubmissionReport;

/// Aggregate statistics across all reports of a grading run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Per-question-type statistics.
    pub per_type: HashMap<String, TypeStats>,
    /// Per-question statistics, across submissions.
    pub per_question: HashMap<String, QuestionStats>,
    /// Whole-cohort percentage distribution.
    pub cohort: CohortStats,
}

/// Statistics for one question type across all graded answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeStats {
    /// Question type tag.
    pub question_type: String,
    /// Number of answers graded with this type.
    pub answers_graded: usize,
    /// Mean score/max ratio.
    pub avg_score_ratio: f64,
    /// Fraction of answers that earned full marks.
    pub full_credit_rate: f64,
    /// Fraction of answers that earned zero.
    pub zero_rate: f64,
}

/// Statistics for one question across all submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionStats {
    /// Question identifier.
    pub question_id: String,
    /// Number of submissions that answered this question.
    pub attempts: usize,
    /// Mean score/max ratio; low values flag hard questions.
    pub avg_score_ratio: f64,
}

/// Percentage distribution across submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortStats {
    /// Number of submissions graded.
    pub submissions: usize,
    pub mean_percentage: f64,
    pub median_percentage: f64,
    pub min_percentage: f64,
    pub max_percentage: f64,
}

/// Compute aggregate statistics from all submission reports.
pub fn compute_aggregate_stats(reports: &[SubmissionReport]) -> AggregateStats {
    let mut type_ratios: HashMap<String, Vec<f64>> = HashMap::new();
    let mut type_full: HashMap<String, usize> = HashMap::new();
    let mut type_zero: HashMap<String, usize> = HashMap::new();
    let mut question_ratios: HashMap<String, Vec<f64>> = HashMap::new();

    for report in reports {
        for item in &report.detailed_results {
            let ratio = item.score_ratio();
            let type_key = item.question_type.to_string();

            type_ratios.entry(type_key.clone()).or_default().push(ratio);
            if item.max_marks > 0.0 && item.score >= item.max_marks {
                *type_full.entry(type_key.clone()).or_insert(0) += 1;
            }
            if item.score == 0.0 {
                *type_zero.entry(type_key).or_insert(0) += 1;
            }

            question_ratios
                .entry(item.question_id.clone())
                .or_default()
                .push(ratio);
        }
    }

    let per_type = type_ratios
        .into_iter()
        .map(|(question_type, ratios)| {
            let n = ratios.len();
            let stats = TypeStats {
                question_type: question_type.clone(),
                answers_graded: n,
                avg_score_ratio: mean(&ratios),
                full_credit_rate: *type_full.get(&question_type).unwrap_or(&0) as f64
                    / n.max(1) as f64,
                zero_rate: *type_zero.get(&question_type).unwrap_or(&0) as f64 / n.max(1) as f64,
            };
            (question_type, stats)
        })
        .collect();

    let per_question = question_ratios
        .into_iter()
        .map(|(question_id, ratios)| {
            let stats = QuestionStats {
                question_id: question_id.clone(),
                attempts: ratios.len(),
                avg_score_ratio: mean(&ratios),
            };
            (question_id, stats)
        })
        .collect();

    let mut percentages: Vec<f64> = reports.iter().map(|r| r.percentage).collect();
    percentages.sort_by(|a, b| a.total_cmp(b));

    let cohort = CohortStats {
        submissions: reports.len(),
        mean_percentage: mean(&percentages),
        median_percentage: median(&percentages),
        min_percentage: percentages.first().copied().unwrap_or(0.0),
        max_percentage: percentages.last().copied().unwrap_or(0.0),
    };

    AggregateStats {
        per_type,
        per_question,
        cohort,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Median of an already sorted slice.
fn median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Details, QuestionType};
    use crate::report::ItemResult;
    use chrono::Utc;
    use uuid::Uuid;

    fn item(question_id: &str, question_type: QuestionType, score: f64, max: f64) -> ItemResult {
        ItemResult {
            question_id: question_id.into(),
            question_type,
            score,
            max_marks: max,
            feedback: String::new(),
            details: Details::new(),
        }
    }

    fn report(submission_id: &str, items: Vec<ItemResult>, percentage: f64) -> SubmissionReport {
        SubmissionReport {
            id: Uuid::nil(),
            graded_at: Utc::now(),
            submission_id: submission_id.into(),
            student: submission_id.into(),
            total_score: items.iter().map(|i| i.score).sum(),
            max_score: items.iter().map(|i| i.max_marks).sum(),
            percentage,
            detailed_results: items,
        }
    }

    #[test]
    fn per_type_rates() {
        let reports = vec![
            report(
                "s1",
                vec![
                    item("q1", QuestionType::Mcq, 5.0, 5.0),
                    item("q2", QuestionType::Essay, 4.0, 10.0),
                ],
                60.0,
            ),
            report(
                "s2",
                vec![
                    item("q1", QuestionType::Mcq, 0.0, 5.0),
                    item("q2", QuestionType::Essay, 10.0, 10.0),
                ],
                66.67,
            ),
        ];

        let stats = compute_aggregate_stats(&reports);
        let mcq = &stats.per_type["mcq"];
        assert_eq!(mcq.answers_graded, 2);
        assert!((mcq.avg_score_ratio - 0.5).abs() < 1e-9);
        assert!((mcq.full_credit_rate - 0.5).abs() < 1e-9);
        assert!((mcq.zero_rate - 0.5).abs() < 1e-9);

        let q2 = &stats.per_question["q2"];
        assert_eq!(q2.attempts, 2);
        assert!((q2.avg_score_ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn cohort_distribution() {
        let reports = vec![
            report("s1", vec![], 40.0),
            report("s2", vec![], 60.0),
            report("s3", vec![], 90.0),
        ];
        let stats = compute_aggregate_stats(&reports);
        assert_eq!(stats.cohort.submissions, 3);
        assert!((stats.cohort.mean_percentage - 63.333333).abs() < 1e-4);
        assert_eq!(stats.cohort.median_percentage, 60.0);
        assert_eq!(stats.cohort.min_percentage, 40.0);
        assert_eq!(stats.cohort.max_percentage, 90.0);
    }

    #[test]
    fn empty_batch_has_zeroed_cohort() {
        let stats = compute_aggregate_stats(&[]);
        assert_eq!(stats.cohort.submissions, 0);
        assert_eq!(stats.cohort.mean_percentage, 0.0);
        assert!(stats.per_type.is_empty());
        assert!(stats.per_question.is_empty());
    }
}
