//! The `gradeforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(submissions_path: PathBuf) -> Result<()> {
    let submissions = if submissions_path.is_dir() {
        gradeforge_core::parser::load_submission_directory(&submissions_path)?
    } else {
        vec![gradeforge_core::parser::parse_submission(&submissions_path)?]
    };

    let mut total_warnings = 0;

    for submission in &submissions {
        println!(
            "Submission: {} by {} ({} answers)",
            submission.id,
            submission.student,
            submission.answers.len()
        );

        let warnings = gradeforge_core::parser::validate_submission(submission);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All submissions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
