//! Suppression by a marker comment on or near the violation's line.

use regex::Regex;
use tracing::warn;

use super::{comment_lines, compile, expand, Decision, FileFilter, Filter, FilterError};
use crate::contents::FileContents;
use crate::types::Violation;

const DEFAULT_COMMENT_FORMAT: &str = r"SUPPRESS CHECKSTYLE (\w+)";
const DEFAULT_CHECK_FORMAT: &str = ".*";
const DEFAULT_INFLUENCE_FORMAT: &str = "0";

/// Suppresses violations on lines near a matching comment.
///
/// Each comment line matching `comment_format` becomes a tag covering the
/// comment's line plus `influence` lines after it (or before it, when
/// negative). The check, message, id and influence formats may refer to the
/// comment's capture groups as `$n`.
///
/// A violation is denied when it lies in a tag's range, its check name
/// matches the expanded check format, and the expanded id and message
/// formats (when set) match its id and message.
#[derive(Debug, Clone)]
pub struct SuppressWithNearbyCommentFilter {
    comment_format: Regex,
    check_format: String,
    message_format: Option<String>,
    id_format: Option<String>,
    influence_format: String,
    check_cpp: bool,
    check_c: bool,
}

impl Default for SuppressWithNearbyCommentFilter {
    fn default() -> Self {
        Self {
            comment_format: Regex::new(DEFAULT_COMMENT_FORMAT)
                .unwrap_or_else(|_| unreachable!("default comment format compiles")),
            check_format: DEFAULT_CHECK_FORMAT.to_string(),
            message_format: None,
            id_format: None,
            influence_format: DEFAULT_INFLUENCE_FORMAT.to_string(),
            check_cpp: true,
            check_c: true,
        }
    }
}

impl SuppressWithNearbyCommentFilter {
    /// Creates a filter with the default formats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern identifying suppression comments.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn comment_format(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.comment_format = compile(pattern)?;
        Ok(self)
    }

    /// Check-name pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn check_format(mut self, format: &str) -> Result<Self, FilterError> {
        compile(format)?;
        self.check_format = format.to_string();
        Ok(self)
    }

    /// Message pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn message_format(mut self, format: &str) -> Result<Self, FilterError> {
        compile(format)?;
        self.message_format = Some(format.to_string());
        Ok(self)
    }

    /// Id pattern, may contain `$n`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the unexpanded pattern does not
    /// compile.
    pub fn id_format(mut self, format: &str) -> Result<Self, FilterError> {
        compile(format)?;
        self.id_format = Some(format.to_string());
        Ok(self)
    }

    /// Signed number of lines covered after the comment, may be `$n`.
    #[must_use]
    pub fn influence_format(mut self, format: impl Into<String>) -> Self {
        self.influence_format = format.into();
        self
    }

    /// Whether `//` comments are scanned.
    #[must_use]
    pub fn check_cpp(mut self, enabled: bool) -> Self {
        self.check_cpp = enabled;
        self
    }

    /// Whether `/* */` comments are scanned.
    #[must_use]
    pub fn check_c(mut self, enabled: bool) -> Self {
        self.check_c = enabled;
        self
    }

    fn tag(&self, text: &str, line: usize) -> Option<Tag> {
        let captures = self.comment_format.captures(text)?;
        let expanded = |format: &str| {
            let pattern = expand(format, &captures);
            match compile(&pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    warn!(line, "ignoring suppression comment: {err}");
                    None
                }
            }
        };
        let check = expanded(&self.check_format)?;
        let message = match &self.message_format {
            Some(format) => Some(expanded(format)?),
            None => None,
        };
        let id = match &self.id_format {
            Some(format) => Some(expanded(format)?),
            None => None,
        };
        let influence_text = expand(&self.influence_format, &captures);
        let Ok(influence) = influence_text
            .trim()
            .trim_start_matches('+')
            .parse::<isize>()
        else {
            warn!(
                line,
                "unable to parse influence from `{}` using `{}`",
                text,
                self.influence_format
            );
            return None;
        };
        let (first, last) = if influence >= 0 {
            (line, line.saturating_add(influence.unsigned_abs()))
        } else {
            (line.saturating_sub(influence.unsigned_abs()), line)
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

impl Filter for SuppressWithNearbyCommentFilter {
    fn name(&self) -> &'static str {
        "SuppressWithNearbyCommentFilter"
    }

    fn bind<'f>(&'f self, contents: &FileContents, tab_width: usize) -> Box<dyn FileFilter + 'f> {
        let mut tags: Vec<Tag> = comment_lines(contents, tab_width, self.check_cpp, self.check_c)
            .into_iter()
            .filter_map(|comment| self.tag(comment.text, comment.line))
            .collect();
        tags.sort_by_key(|tag| (tag.first, tag.last));
        Box::new(Bound { tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    const SOURCE: &str = "class A {\n\
        int[] a; // CHECKSTYLE IGNORE ArrayTypeStyle\n\
        int b[];\n\
        // SUPPRESS CHECKSTYLE LineLength\n\
        int c;\n\
        /* ALLOW LineLength FOR NEXT 2 LINES */\n\
        int d;\n\
        int e;\n\
        int f;\n\
        }\n";

    fn violation(line: usize, check: &str) -> Violation {
        Violation::new("A.java", line, 1, "key", "message", Severity::Error, check)
    }

    fn decide(filter: &SuppressWithNearbyCommentFilter, v: &Violation) -> Decision {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let bound = filter.bind(&contents, 8);
        bound.decide(v)
    }

    #[test]
    fn marked_line_is_suppressed_and_neighbour_kept() {
        let filter = SuppressWithNearbyCommentFilter::new()
            .comment_format(r"CHECKSTYLE IGNORE (\w+)")
            .and_then(|f| f.check_format("$1"))
            .expect("filter");
        assert_eq!(
            decide(&filter, &violation(2, "ArrayTypeStyle")),
            Decision::Deny
        );
        assert_eq!(
            decide(&filter, &violation(3, "ArrayTypeStyle")),
            Decision::Neutral
        );
        assert_eq!(
            decide(&filter, &violation(1, "ArrayTypeStyle")),
            Decision::Neutral
        );
        assert_eq!(decide(&filter, &violation(2, "LineLength")), Decision::Neutral);
    }

    #[test]
    fn default_format_covers_only_its_line() {
        let filter = SuppressWithNearbyCommentFilter::new();
        assert_eq!(decide(&filter, &violation(4, "LineLength")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(5, "LineLength")), Decision::Neutral);
    }

    #[test]
    fn influence_from_capture_group() {
        let filter = SuppressWithNearbyCommentFilter::new()
            .comment_format(r"ALLOW (\w+) FOR NEXT (\d+) LINES")
            .and_then(|f| f.check_format("$1"))
            .map(|f| f.influence_format("$2"))
            .expect("filter");
        assert_eq!(decide(&filter, &violation(8, "LineLength")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(9, "LineLength")), Decision::Neutral);

        let block_off = filter.check_c(false);
        assert_eq!(decide(&block_off, &violation(7, "LineLength")), Decision::Neutral);
    }

    #[test]
    fn negative_influence_reaches_backwards() {
        let filter = SuppressWithNearbyCommentFilter::new()
            .comment_format(r"SUPPRESS CHECKSTYLE (\w+)")
            .map(|f| f.influence_format("-2"))
            .expect("filter");
        assert_eq!(decide(&filter, &violation(2, "Any")), Decision::Deny);
        assert_eq!(decide(&filter, &violation(5, "Any")), Decision::Neutral);
    }

    #[test]
    fn unparsable_influence_drops_the_tag() {
        let filter = SuppressWithNearbyCommentFilter::new().influence_format("$1");
        assert_eq!(decide(&filter, &violation(4, "LineLength")), Decision::Neutral);
    }

    #[test]
    fn id_format_requires_a_module_id() {
        let filter = SuppressWithNearbyCommentFilter::new()
            .id_format("$1")
            .expect("filter");
        assert_eq!(decide(&filter, &violation(4, "X")), Decision::Neutral);
        let tagged = violation(4, "X").with_module_id("LineLength");
        assert_eq!(decide(&filter, &tagged), Decision::Deny);
    }
}
