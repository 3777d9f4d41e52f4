//! Core types for violations, faults and audit results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level of a violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Logged by the check but never reported.
    Ignore,
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A rule breach reported by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File path, relative to the base directory when one is configured.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, tabs expanded).
    pub column: usize,
    /// Message key (e.g., "array.type.style").
    pub key: String,
    /// Human-readable message.
    pub message: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Name of the check that logged the violation.
    pub check: String,
    /// Configured id of the check instance, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        key: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        check: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            key: key.into(),
            message: message.into(),
            severity,
            check: check.into(),
            module_id: None,
        }
    }

    /// Attaches the configured id of the check instance.
    #[must_use]
    pub fn with_module_id(mut self, id: impl Into<String>) -> Self {
        self.module_id = Some(id.into());
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}:{}:{}: {} [{}]",
            self.severity,
            self.file.display(),
            self.line,
            self.column,
            self.message,
            self.module_id.as_deref().unwrap_or(&self.check),
        )
    }
}

/// Where a per-file failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultKind {
    /// The file could not be read.
    Io,
    /// The lexer rejected the file.
    Lexical,
    /// The parser rejected the file.
    Syntax,
    /// A check failed while processing the file.
    Check,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::Check => write!(f, "check"),
        }
    }
}

/// A failure recorded for one file instead of aborting the batch.
///
/// Faults are never filtered and are kept apart from violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFault {
    /// File path, relative to the base directory when one is configured.
    pub file: PathBuf,
    /// Failure category.
    pub kind: FaultKind,
    /// 1-based line, when the failure has a position.
    pub line: Option<usize>,
    /// 1-based column, when the failure has a position.
    pub column: Option<usize>,
    /// Failing check, for [`FaultKind::Check`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Description of the failure.
    pub message: String,
}

impl FileFault {
    /// Creates a fault without position.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            line: None,
            column: None,
            check: None,
            message: message.into(),
        }
    }

    /// Sets the 1-based position of the fault.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Sets the failing check.
    #[must_use]
    pub fn in_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }
}

impl std::fmt::Display for FileFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} fault] {}", self.kind, self.file.display())?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, ":{line}:{column}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(check) = &self.check {
            write!(f, " [{check}]")?;
        }
        Ok(())
    }
}

/// Result of auditing a batch of files.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    /// Accepted violations, in file order then position order.
    pub violations: Vec<Violation>,
    /// Per-file failures.
    pub faults: Vec<FileFault>,
    /// Number of files that went through the check pipeline.
    pub files_checked: usize,
    /// Number of files skipped by extension or before-execution filters.
    pub files_skipped: usize,
}

impl AuditResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any error-level violations.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if any file failed.
    #[must_use]
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Returns the faults of one kind.
    #[must_use]
    pub fn faults_of(&self, kind: FaultKind) -> Vec<&FileFault> {
        self.faults.iter().filter(|f| f.kind == kind).collect()
    }

    /// Counts violations by severity: `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Formats the whole result as plain text, one record per line.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for v in &self.violations {
            let _ = writeln!(report, "{v}");
        }
        for fault in &self.faults {
            let _ = writeln!(report, "{fault}");
        }
        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Audit done: {} error(s), {} warning(s), {} info(s), {} fault(s) in {} file(s)",
            errors,
            warnings,
            infos,
            self.faults.len(),
            self.files_checked
        );
        report
    }

    /// Appends another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.faults.extend(other.faults);
        self.files_checked += other.files_checked;
        self.files_skipped += other.files_skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "src/A.java",
            42,
            10,
            "array.type.style",
            "Array brackets at illegal position.",
            severity,
            "ArrayTypeStyle",
        )
    }

    #[test]
    fn severity_orders_from_ignore_to_error() {
        assert!(Severity::Ignore < Severity::Info);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn display_prefers_module_id() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "[warning] src/A.java:42:10: Array brackets at illegal position. [ArrayTypeStyle]"
        );
        let v = v.with_module_id("arrays");
        assert!(v.to_string().ends_with("[arrays]"));
    }

    #[test]
    fn fault_display_includes_position_and_check() {
        let fault = FileFault::new("B.java", FaultKind::Check, "boom")
            .at(3, 1)
            .in_check("LineLength");
        assert_eq!(fault.to_string(), "[check fault] B.java:3:1: boom [LineLength]");
        let fault = FileFault::new("C.java", FaultKind::Io, "not found");
        assert_eq!(fault.to_string(), "[io fault] C.java: not found");
    }

    #[test]
    fn counts_and_thresholds() {
        let mut result = AuditResult::new();
        result.files_checked = 2;
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Info));
        assert_eq!(result.count_by_severity(), (1, 1, 1));
        assert!(result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_faults());
    }

    #[test]
    fn report_lists_faults_after_violations() {
        let mut result = AuditResult::new();
        result.files_checked = 1;
        result.violations.push(make_violation(Severity::Error));
        result
            .faults
            .push(FileFault::new("D.java", FaultKind::Syntax, "expected ;").at(1, 5));
        let report = result.format_report();
        let violation_at = report.find("ArrayTypeStyle").expect("violation");
        let fault_at = report.find("syntax fault").expect("fault");
        assert!(violation_at < fault_at);
        assert!(report.contains("1 fault(s) in 1 file(s)"));
    }

    #[test]
    fn extend_merges_counters() {
        let mut a = AuditResult::new();
        a.files_checked = 1;
        let mut b = AuditResult::new();
        b.files_checked = 2;
        b.files_skipped = 1;
        b.faults.push(FileFault::new("E.java", FaultKind::Lexical, "x"));
        a.extend(b);
        assert_eq!(a.files_checked, 3);
        assert_eq!(a.files_skipped, 1);
        assert_eq!(a.faults_of(FaultKind::Lexical).len(), 1);
    }
}
