//! Static suppression by file, check, message, id and position.

use regex::Regex;

use super::{compile, Decision, FileFilter, Filter, FilterError};
use crate::contents::FileContents;
use crate::types::Violation;

/// An inclusive range of 1-based numbers; `end == None` is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    start: usize,
    end: Option<usize>,
}

impl Range {
    fn contains(self, n: usize) -> bool {
        n >= self.start && self.end.map_or(true, |end| n <= end)
    }
}

/// Parses `"1-5,10,20-"`.
fn parse_ranges(value: &str) -> Result<Vec<Range>, FilterError> {
    let bad = || FilterError::Range {
        value: value.to_string(),
    };
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (start, end) = match part.split_once('-') {
                Some((start, "")) => (start.trim().parse().map_err(|_| bad())?, None),
                Some((start, end)) => (
                    start.trim().parse().map_err(|_| bad())?,
                    Some(end.trim().parse().map_err(|_| bad())?),
                ),
                None => {
                    let n = part.parse().map_err(|_| bad())?;
                    (n, Some(n))
                }
            };
            Ok(Range { start, end })
        })
        .collect()
}

/// Denies violations matching every configured criterion.
///
/// File, check and message patterns are searched (not anchored); the id is
/// compared exactly. Lines and columns take comma-separated numbers and
/// ranges; a violation is in scope when either list contains it, or when
/// neither list is set. A filter with no criteria at all is neutral.
#[derive(Debug, Clone, Default)]
pub struct SuppressFilterElement {
    files: Option<Regex>,
    checks: Option<Regex>,
    message: Option<Regex>,
    id: Option<String>,
    lines: Option<Vec<Range>>,
    columns: Option<Vec<Range>>,
}

impl SuppressFilterElement {
    /// Creates a filter without criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern matched against the violation's file path.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn files(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.files = Some(compile(pattern)?);
        Ok(self)
    }

    /// Pattern matched against the check name.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn checks(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.checks = Some(compile(pattern)?);
        Ok(self)
    }

    /// Pattern matched against the formatted message.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn message(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.message = Some(compile(pattern)?);
        Ok(self)
    }

    /// Exact check id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Line numbers and ranges, e.g. `"1-5,10,20-"`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Range`] if the list is malformed.
    pub fn lines(mut self, ranges: &str) -> Result<Self, FilterError> {
        self.lines = Some(parse_ranges(ranges)?);
        Ok(self)
    }

    /// Column numbers and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Range`] if the list is malformed.
    pub fn columns(mut self, ranges: &str) -> Result<Self, FilterError> {
        self.columns = Some(parse_ranges(ranges)?);
        Ok(self)
    }

    fn has_criteria(&self) -> bool {
        self.files.is_some()
            || self.checks.is_some()
            || self.message.is_some()
            || self.id.is_some()
    }

    fn position_matches(&self, violation: &Violation) -> bool {
        let hit = |ranges: &Option<Vec<Range>>, n| {
            ranges
                .as_ref()
                .is_some_and(|r| r.iter().any(|range| range.contains(n)))
        };
        (self.lines.is_none() && self.columns.is_none())
            || hit(&self.lines, violation.line)
            || hit(&self.columns, violation.column)
    }
}

impl FileFilter for SuppressFilterElement {
    fn decide(&self, violation: &Violation) -> Decision {
        if !self.has_criteria() {
            return Decision::Neutral;
        }
        let file = violation.file.to_string_lossy();
        let matches = self.files.as_ref().map_or(true, |re| re.is_match(&file))
            && self
                .checks
                .as_ref()
                .map_or(true, |re| re.is_match(&violation.check))
            && self
                .message
                .as_ref()
                .map_or(true, |re| re.is_match(&violation.message))
            && self
                .id
                .as_ref()
                .map_or(true, |id| violation.module_id.as_ref() == Some(id))
            && self.position_matches(violation);
        if matches {
            Decision::Deny
        } else {
            Decision::Accept
        }
    }
}

impl Filter for SuppressFilterElement {
    fn name(&self) -> &'static str {
        "SuppressFilterElement"
    }

    fn bind<'f>(&'f self, _contents: &FileContents, _tab_width: usize) -> Box<dyn FileFilter + 'f> {
        Box::new(self)
    }
}
