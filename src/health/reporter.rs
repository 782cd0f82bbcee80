//! Table output for `--check`

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::HealthCheckReport;

/// Renders the report as a table followed by a summary
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{}\n{}", table, format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = format!("\n{}\n", "Summary".bold().underline());
    summary.push_str(&format!("  Checks: {}\n", report.total()));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed()));

    if report.has_warnings() {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned()));
    }
    if !report.is_healthy() {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed()));
    }

    let overall = if !report.is_healthy() {
        "Overall: UNHEALTHY".red().bold()
    } else if report.has_warnings() {
        "Overall: HEALTHY (with warnings)".yellow().bold()
    } else {
        "Overall: HEALTHY".green().bold()
    };
    summary.push_str(&format!("\n  {}\n", overall));

    summary
}

/// Prints the report and the detail lines of every check that has any
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if result.details.is_empty() {
            continue;
        }
        println!("\n{} Details:", name.bold());
        for line in &result.details {
            println!("  {}", line);
        }
    }
}
