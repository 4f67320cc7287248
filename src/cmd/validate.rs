//! Validate command - surface data quality issues without generating full reports

use crate::cmd::InputArgs;
use crate::core::Warning;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// A validation issue for output
#[derive(Debug, Clone, Serialize)]
struct ValidationIssue {
    #[serde(rename = "type")]
    issue_type: String,
    message: String,
    detail: Warning,
}

impl From<&Warning> for ValidationIssue {
    fn from(warning: &Warning) -> Self {
        ValidationIssue {
            issue_type: warning.kind().to_string(),
            message: warning.to_string(),
            detail: warning.clone(),
        }
    }
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    transaction_count: usize,
    issue_count: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let report = self.input.calculate()?;
        let issues: Vec<ValidationIssue> = report.warnings.iter().map(ValidationIssue::from).collect();

        if self.json {
            let output = ValidationOutput {
                transaction_count: report.transaction_count,
                issue_count: issues.len(),
                issues: issues.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&issues, report.transaction_count);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn print_text(issues: &[ValidationIssue], transaction_count: usize) {
    println!();
    println!("VALIDATION RESULTS ({} transactions)", transaction_count);
    println!();

    if issues.is_empty() {
        println!("\u{2713} No issues found.");
    } else {
        println!("\u{26A0} {} issue(s) found:", issues.len());
        println!();

        for (i, issue) in issues.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, issue.issue_type, issue.message);
        }
    }
    println!();
}
