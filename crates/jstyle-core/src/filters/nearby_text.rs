//! Suppression by a marker anywhere in the text of a nearby line.

use regex::Regex;
use tracing::warn;

use super::{compile, expand, Decision, FileFilter, Filter, FilterError};
use crate::contents::FileContents;
use crate::types::Violation;

const DEFAULT_NEARBY_TEXT_PATTERN: &str = r"SUPPRESS CHECKSTYLE (\w+)";
const DEFAULT_CHECK_PATTERN: &str = ".*";
const DEFAULT_LINE_RANGE: &str = "0";

/// Suppresses violations on lines near a line whose raw text matches
/// `nearby_text_pattern`.
///
/// Works like [`SuppressWithNearbyCommentFilter`](super::SuppressWithNearbyCommentFilter)
/// without looking at comments: every source line is searched, and the
/// first match on a line becomes a tag covering that line plus
/// `line_range` lines after it (or before it, when negative).
#[derive(Debug, Clone)]
pub struct SuppressWithNearbyTextFilter {
    nearby_text_pattern: Regex,
    check_pattern: String,
    message_pattern: Option<String>,
    id_pattern: Option<String>,
    line_range: String,
}

impl Default for SuppressWithNearbyTextFilter {
    fn default() -> Self {
        Self {
            nearby_text_pattern: Regex::new(DEFAULT_NEARBY_TEXT_PATTERN)
                .unwrap_or_else(|_| unreachable!("default text pattern compiles")),
            check_pattern: DEFAULT_CHECK_PATTERN.to_string(),
            message_pattern: None,
            id_pattern: None,
            line_range: DEFAULT_LINE_RANGE.to_string(),
        }
    }
}

impl SuppressWithNearbyTextFilter {
    /// Creates a filter with the default patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern searched in every line.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn nearby_text_pattern(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.nearby_text_pattern = compile(pattern)?;
        Ok(self)
    }

    /// Check-name pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn check_pattern(mut self, pattern: &str) -> Result<Self, FilterError> {
        compile(pattern)?;
        self.check_pattern = pattern.to_string();
        Ok(self)
    }

    /// Message pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn message_pattern(mut self, pattern: &str) -> Result<Self, FilterError> {
        compile(pattern)?;
        self.message_pattern = Some(pattern.to_string());
        Ok(self)
    }

    /// Id pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn id_pattern(mut self, pattern: &str) -> Result<Self, FilterError> {
        compile(pattern)?;
        self.id_pattern = Some(pattern.to_string());
        Ok(self)
    }

    /// Signed number of lines covered after the match, may be `$n`.
    #[must_use]
    pub fn line_range(mut self, format: impl Into<String>) -> Self {
        self.line_range = format.into();
        self
    }

    fn tag(&self, text: &str, line: usize) -> Option<Tag> {
        let captures = self.nearby_text_pattern.captures(text)?;
        let expanded = |format: &str| match compile(&expand(format, &captures)) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(line, "ignoring suppression text: {err}");
                None
            }
        };
        let check = expanded(&self.check_pattern)?;
        let message = match &self.message_pattern {
            Some(format) => Some(expanded(format)?),
            None => None,
        };
        let id = match &self.id_pattern {
            Some(format) => Some(expanded(format)?),
            None => None,
        };
        let range_text = expand(&self.line_range, &captures);
        let Ok(range) = range_text.trim().trim_start_matches('+').parse::<isize>() else {
            warn!(
                line,
                "unable to parse line range from `{}` using `{}`",
                text,
                self.line_range
            );
            return None;
        };
        let (first, last) = if range >= 0 {
            (line, line.saturating_add(range.unsigned_abs()))
        } else {
            (line.saturating_sub(range.unsigned_abs()), line)
        };
        Some(Tag {
            first,
            last,
            check,
            message,
            id,
        })
    }
}

#[derive(Debug)]
struct Tag {
    first: usize,
    last: usize,
    check: Regex,
    message: Option<Regex>,
    id: Option<Regex>,
}

impl Tag {
    fn matches(&self, violation: &Violation) -> bool {
        (self.first..=self.last).contains(&violation.line)
            && self.check.is_match(&violation.check)
            && self.id.as_ref().map_or(true, |re| {
                violation.module_id.as_deref().is_some_and(|id| re.is_match(id))
            })
            && self
                .message
                .as_ref()
                .map_or(true, |re| re.is_match(&violation.message))
    }
}

struct Bound {
    tags: Vec<Tag>,
}

impl FileFilter for Bound {
    fn decide(&self, violation: &Violation) -> Decision {
        if self.tags.iter().any(|tag| tag.matches(violation)) {
            Decision::Deny
        } else {
            Decision::Neutral
        }
    }
}

impl Filter for SuppressWithNearbyTextFilter {
    fn name(&self) -> &'static str {
        "SuppressWithNearbyTextFilter"
    }

    fn bind<'f>(&'f self, contents: &FileContents, _: usize) -> Box<dyn FileFilter + 'f> {
        let tags = contents
            .text()
            .lines()
            .filter_map(|(line, text)| self.tag(text, line))
            .collect();
        Box::new(Bound { tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    const SOURCE: &str = "class A {\n\
        int a[]; // SUPPRESS CHECKSTYLE ArrayTypeStyle\n\
        String s = \"SUPPRESS CHECKSTYLE LineLength\";\n\
        int b;\n\
        /* ALLOW MagicNumber FOR NEXT 2 LINES */\n\
        int c = 1;\n\
        int d = 2;\n\
        int e = 3;\n\
        }\n";

    fn violation(line: usize, check: &str) -> Violation {
        Violation::new("A.java", line, 1, "key", "message", Severity::Error, check)
    }

    fn decide(filter: &SuppressWithNearbyTextFilter, v: &Violation) -> Decision {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let bound = filter.bind(&contents, 8);
        bound.decide(v)
    }

    #[test]
    fn default_pattern_covers_only_its_line() {
        let filter = SuppressWithNearbyTextFilter::new();
        assert_eq!(decide(&filter, &violation(2, "ArrayTypeStyle")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(3, "LineLength")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(4, "LineLength")), Decision::Neutral);
    }

    #[test]
    fn check_pattern_uses_match_groups() {
        let filter = SuppressWithNearbyTextFilter::new()
            .check_pattern("$1")
            .expect("filter");
        assert_eq!(decide(&filter, &violation(2, "ArrayTypeStyle")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(2, "LineLength")), Decision::Neutral);
        assert_eq!(decide(&filter, &violation(3, "LineLength")), Decision::Deny);
    }

    #[test]
    fn line_range_from_capture_group() {
        let filter = SuppressWithNearbyTextFilter::new()
            .nearby_text_pattern(r"ALLOW (\w+) FOR NEXT (\d+) LINES")
            .and_then(|f| f.check_pattern("$1"))
            .map(|f| f.line_range("$2"))
            .expect("filter");
        assert_eq!(decide(&filter, &violation(7, "MagicNumber")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(8, "MagicNumber")), Decision::Neutral);
        assert_eq!(decide(&filter, &violation(4, "MagicNumber")), Decision::Neutral);
    }

    #[test]
    fn negative_range_reaches_backwards() {
        let filter = SuppressWithNearbyTextFilter::new().line_range("-1");
        assert_eq!(decide(&filter, &violation(1, "Any")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(4, "Any")), Decision::Neutral);
    }

    #[test]
    fn unparsable_range_drops_the_tag() {
        let filter = SuppressWithNearbyTextFilter::new().line_range("$1");
        assert_eq!(decide(&filter, &violation(2, "ArrayTypeStyle")), Decision::Neutral);
    }

    #[test]
    fn message_pattern_must_match() {
        let filter = SuppressWithNearbyTextFilter::new()
            .message_pattern("^Array")
            .expect("filter");
        let v = Violation::new("A.java", 2, 1, "key", "Array brackets", Severity::Error, "X");
        assert_eq!(decide(&filter, &v), Decision::Deny);
        assert_eq!(decide(&filter, &violation(2, "X")), Decision::Neutral);
    }
}
