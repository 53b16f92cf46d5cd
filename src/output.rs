//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every route is
//! its key (or year/month pair) with the emitted file as secondary
//! context. Each command has a `format_*` function returning lines (pure,
//! no I/O, testable) and a `print_*` wrapper that writes to stdout.
//!
//! ```text
//! Pages
//! 001 index → index.html
//! 002 downloads → downloads/index.html
//!
//! Newsletter
//! 2024/04 → newsletter/2024/04/index.html
//! 2024/03 → newsletter/2024/03/index.html
//!
//! Generated 2 pages, 2 newsletter issues
//! ```

use crate::generate::{CheckReport, GenerateReport};

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, (key, path)) in report.pages.iter().enumerate() {
            lines.push(format!("{:03} {} → {}", i + 1, key, path));
        }
    }

    if !report.newsletters.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Newsletter".to_string());
        for nl in &report.newsletters {
            lines.push(format!(
                "{}/{} → newsletter/{}/{}/index.html",
                nl.year, nl.month, nl.year, nl.month
            ));
        }
    }

    if !report.warnings.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("    {warning}"));
        }
    }

    if !report.errors.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Errors".to_string());
        for error in &report.errors {
            lines.push(format!("    {error}"));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mut summary = format!(
        "Generated {} {}, {} newsletter {}",
        report.pages.len(),
        plural(report.pages.len(), "page", "pages"),
        report.newsletters.len(),
        plural(report.newsletters.len(), "issue", "issues"),
    );
    if !report.errors.is_empty() {
        summary.push_str(&format!(
            ", {} {} failed",
            report.errors.len(),
            plural(report.errors.len(), "route", "routes")
        ));
    }
    lines.push(summary);

    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{line}");
    }
}

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Checked {} {}, {} newsletter {}",
        report.pages,
        plural(report.pages, "page", "pages"),
        report.newsletters,
        plural(report.newsletters, "issue", "issues"),
    )];

    if report.findings.is_empty() {
        lines.push("Content is valid".to_string());
    } else {
        lines.push(String::new());
        lines.push(format!(
            "{} {}",
            report.findings.len(),
            plural(report.findings.len(), "finding", "findings")
        ));
        for finding in &report.findings {
            lines.push(format!("    {}: {}", finding.route, finding.detail));
        }
    }

    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{line}");
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
