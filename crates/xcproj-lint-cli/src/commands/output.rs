//! Shared output formatting for lint results.

use anyhow::Result;
use xcproj_lint_core::{Finding, LintResult};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

/// Errors first, then warnings, each in production order; never
/// globally sorted.
fn print_text(result: &LintResult) {
    let (errors, warnings) = result.count_by_severity();

    for finding in result.errors() {
        println!("\x1b[31merror\x1b[0m: {}", finding.message);
    }
    for finding in result.warnings() {
        println!("\x1b[33mwarning\x1b[0m: {}", finding.message);
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("{summary_color}Found {errors} error(s), {warnings} warning(s)\x1b[0m");
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for finding in result.errors() {
        println!("{}", compact_line(finding));
    }
    for finding in result.warnings() {
        println!("{}", compact_line(finding));
    }
}

fn compact_line(finding: &Finding) -> String {
    let message: Vec<&str> = finding.message.lines().map(str::trim).collect();
    match &finding.subject {
        Some(id) => format!(
            "{}: [{}] {} ({})",
            finding.severity,
            finding.check,
            message.join(" "),
            id
        ),
        None => format!(
            "{}: [{}] {}",
            finding.severity,
            finding.check,
            message.join(" ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xcproj_lint_core::{ObjectId, Severity};

    #[test]
    fn compact_line_flattens_multiline_messages() {
        let finding = Finding::new(
            "localization",
            Severity::Error,
            Some(ObjectId::from("VG1")),
            "icon.png is missing resources!\n  Present: en\n  Missing: fr",
        );
        assert_eq!(
            compact_line(&finding),
            "error: [localization] icon.png is missing resources! Present: en Missing: fr (VG1)"
        );
    }

    #[test]
    fn compact_line_without_subject_omits_id() {
        let finding = Finding::warning("file-references", None, "one line");
        assert_eq!(compact_line(&finding), "warning: [file-references] one line");
    }
}
