//! Run summary rendering

use crate::orchestrators::RunSummary;
use anyhow::Result;
use colored::*;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render the summary in the given format
///
/// Text is meant for stderr, JSON for stdout.
pub fn format_summary(summary: &RunSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(summary)),
        OutputFormat::Json => format_json(summary),
    }
}

fn format_text(summary: &RunSummary) -> String {
    let mut output = String::new();

    if summary.dry_run {
        output.push_str(&format!("{}\n", "Dry run, nothing was written".yellow()));
    }

    output.push_str(&format!("total: {}\n", summary.total()));
    output.push_str(&format!("skipped: {}\n", summary.skipped_count()));

    let written_label = if summary.dry_run { "would write" } else { "written" };
    output.push_str(&format!(
        "{}: {}\n",
        written_label,
        summary.written_count().to_string().green()
    ));

    if summary.has_failures() {
        output.push_str(&format!(
            "failed: {}\n",
            summary.failed_count().to_string().red()
        ));
        for failure in &summary.failed {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "✗".red(),
                failure.path.display(),
                failure.reason
            ));
        }
    }

    output
}

fn format_json(summary: &RunSummary) -> Result<String> {
    let value = serde_json::json!({
        "total": summary.total(),
        "dry_run": summary.dry_run,
        "skipped": summary.skipped,
        "written": summary.written,
        "failed": summary.failed,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
