//! The `gradeforge grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use gradeforge_core::engine::{GradingEngine, GradingEngineConfig, ProgressReporter};
use gradeforge_core::parser;
use gradeforge_core::report::{BatchReport, SubmissionReport};
use gradeforge_report::html::write_html_report;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_submission_start(&self, submission_id: &str) {
        eprintln!("  Grading: {submission_id}");
    }

    fn on_submission_complete(&self, report: &SubmissionReport) {
        eprintln!(
            "  Done: {} ({}) {:.2}/{:.2} = {:.1}%",
            report.submission_id,
            report.student,
            report.total_score,
            report.max_score,
            report.percentage,
        );
    }

    fn on_submission_error(&self, submission_id: &str, error: &str) {
        eprintln!("  ERROR: {submission_id}: {error}");
    }

    fn on_batch_complete(&self, total: usize, graded: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {graded}/{total} graded, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    submissions_path: PathBuf,
    parallelism: usize,
    output: PathBuf,
    format: String,
) -> Result<()> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let submissions = if submissions_path.is_dir() {
        parser::load_submission_directory(&submissions_path)?
    } else {
        vec![parser::parse_submission(&submissions_path)?]
    };
    anyhow::ensure!(!submissions.is_empty(), "no submissions found");

    eprintln!(
        "gradeforge v{} — Grading {} submission(s)",
        env!("CARGO_PKG_VERSION"),
        submissions.len()
    );
    eprintln!();

    let engine = GradingEngine::new(GradingEngineConfig { parallelism });
    let report = engine.grade_batch(&submissions, &ConsoleReporter).await?;

    print_summary(&report);

    // Save outputs
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &BatchReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Student", "Submission", "Score", "Max", "Percentage"]);

    for sub in &report.reports {
        table.add_row(vec![
            Cell::new(&sub.student),
            Cell::new(&sub.submission_id),
            Cell::new(format!("{:.2}", sub.total_score)),
            Cell::new(format!("{:.2}", sub.max_score)),
            Cell::new(format!("{:.1}%", sub.percentage)),
        ]);
    }

    eprintln!("\n{table}");

    let cohort = &report.aggregate.cohort;
    if cohort.submissions > 1 {
        eprintln!(
            "Cohort: mean {:.1}% | median {:.1}% | min {:.1}% | max {:.1}%",
            cohort.mean_percentage,
            cohort.median_percentage,
            cohort.min_percentage,
            cohort.max_percentage
        );
    }
}
