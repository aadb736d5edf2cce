//! The `gradeforge compare` command.

use std::path::PathBuf;

use anyhow::Result;

use gradeforge_core::report::BatchReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = BatchReport::load_json(&baseline_path)?;
    let current = BatchReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} / {} {:.1}% -> {:.1}% ({:+.1}%)",
                        r.submission_id,
                        r.question_id,
                        r.baseline_ratio * 100.0,
                        r.current_ratio * 100.0,
                        r.delta * 100.0
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} / {} {:.1}% -> {:.1}% (+{:.1}%)",
                        i.submission_id,
                        i.question_id,
                        i.baseline_ratio * 100.0,
                        i.current_ratio * 100.0,
                        i.delta * 100.0
                    );
                }
            }

            if report.new_answers > 0 {
                println!("\n{} new answer(s)", report.new_answers);
            }
            if report.removed_answers > 0 {
                println!("{} removed answer(s)", report.removed_answers);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
