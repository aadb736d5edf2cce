//! gradeforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradeforge", version, about = "Deterministic exam answer grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade submissions
    Grade {
        /// Path to a .toml submission file or directory
        #[arg(long)]
        submissions: PathBuf,

        /// Max submissions graded concurrently
        #[arg(long, default_value = "4")]
        parallelism: usize,

        /// Output directory
        #[arg(long, default_value = "./gradeforge-results")]
        output: PathBuf,

        /// Output format: json, html, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Compare two grading runs
    Compare {
        /// Baseline batch report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current batch report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score-ratio regression threshold
        #[arg(long, default_value = "0.05")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate submission TOML files
    Validate {
        /// Path to a submission file or directory
        #[arg(long)]
        submissions: PathBuf,
    },

    /// Create an example submission file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradeforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            submissions,
            parallelism,
            output,
            format,
        } => commands::grade::execute(submissions, parallelism, output, format).await,
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { submissions } => commands::validate::execute(submissions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
