//! The `gradeforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("submissions")?;
    let example_path = std::path::Path::new("submissions/example.toml");
    if example_path.exists() {
        println!("submissions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SUBMISSION)?;
        println!("Created submissions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit submissions/example.toml with real answers");
    println!("  2. Run: gradeforge validate --submissions submissions/example.toml");
    println!("  3. Run: gradeforge grade --submissions submissions/example.toml");

    Ok(())
}

const EXAMPLE_SUBMISSION: &str = r#"[submission]
id = "sub-001"
student = "alice"
exam = "cs101-midterm"

[[answers]]
question_id = "q1"
question_type = "mcq"
student_answer = "a"
expected_answer = "A"
max_marks = 5.0

[[answers]]
question_id = "q2"
question_type = "true_false"
student_answer = "true"
expected_answer = "True"
max_marks = 2.0

[[answers]]
question_id = "q3"
question_type = "short_answer"
student_answer = "Object Oriented Programming concepts"
expected_answer = "Object Oriented Programming"
max_marks = 10.0

[[answers]]
question_id = "q4"
question_type = "essay"
student_answer = """
Encapsulation bundles data and the methods that operate on it into a single
unit and hides the internal representation behind a public interface.
"""
expected_answer = """
Encapsulation is the bundling of state and behaviour inside a class while
restricting direct access to the internal representation.
"""
max_marks = 10.0
"#;
