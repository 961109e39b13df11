//! End-of-batch summary for multi-URL runs.

use crate::{BatchReport, format_bytes, format_duration};

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

/// Renders the summary block for a batch.
pub fn format_summary(report: &BatchReport) -> String {
    let stats = &report.stats;
    let mut lines = vec![
        String::new(),
        SEPARATOR.to_string(),
        "Download Summary".to_string(),
        SEPARATOR.to_string(),
        format!("  Files downloaded:  {}", stats.files_downloaded),
        format!("  Total size:        {}", format_bytes(stats.total_bytes)),
        format!("  Total time:        {}", format_duration(stats.elapsed)),
        format!("  Average speed:     {}/s", format_bytes(stats.average_speed())),
    ];

    if stats.files_failed > 0 {
        lines.push(format!("  Failed:            {}", stats.files_failed));
        for outcome in &report.outcomes {
            if let Err(e) = &outcome.result {
                lines.push(format!("    {} ({e})", outcome.url));
            }
        }
    }

    lines.push(SEPARATOR.to_string());
    lines.join("\n")
}

/// Prints a summary of download statistics.
pub fn print_summary(report: &BatchReport) {
    println!("{}", format_summary(report));
}
