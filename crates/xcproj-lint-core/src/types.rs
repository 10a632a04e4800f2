//! Core types for lint findings and results.

use serde::Serialize;

use crate::graph::ObjectId;

/// Severity level for lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Finding that should be addressed but does not fail the run.
    Warning,
    /// Finding that fails the run.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single lint finding.
///
/// Findings are keyed by the project object they concern where one
/// exists; aggregate findings (such as the untracked-file listing)
/// carry no subject.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Name of the check that produced this finding.
    pub check: &'static str,
    /// Severity of this finding.
    pub severity: Severity,
    /// Identifier of the project object this finding concerns, if any.
    pub subject: Option<ObjectId>,
    /// Human-readable message. May span multiple lines.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        check: &'static str,
        severity: Severity,
        subject: Option<ObjectId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check,
            severity,
            subject,
            message: message.into(),
        }
    }

    /// Creates a warning finding.
    #[must_use]
    pub fn warning(check: &'static str, subject: Option<ObjectId>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Warning, subject, message)
    }

    /// Creates an error finding.
    #[must_use]
    pub fn error(check: &'static str, subject: Option<ObjectId>, message: impl Into<String>) -> Self {
        Self::new(check, Severity::Error, subject, message)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.severity, self.check, self.message)
    }
}

/// Result of one lint run.
///
/// Findings accumulate in the order the checks produce them and are
/// never reordered; output layers may partition by severity but must
/// preserve the per-severity production order.
#[derive(Debug, Default, Serialize)]
pub struct LintResult {
    /// All findings, in production order.
    pub findings: Vec<Finding>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Appends all findings from an iterator.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Iterates over error findings in production order.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    /// Iterates over warning findings in production order.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// Counts findings by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        (self.errors().count(), self.warnings().count())
    }
}
