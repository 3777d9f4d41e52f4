//! Region suppression between `CHECKSTYLE:OFF` and `CHECKSTYLE:ON` comments.

use regex::Regex;
use tracing::warn;

use super::{comment_lines, compile, expand, Decision, FileFilter, Filter, FilterError};
use crate::contents::FileContents;
use crate::types::Violation;

const DEFAULT_OFF_FORMAT: &str = "CHECKSTYLE:OFF";
const DEFAULT_ON_FORMAT: &str = "CHECKSTYLE:ON";
const DEFAULT_CHECK_FORMAT: &str = ".*";

/// Suppresses violations between an "off" comment and the next matching
/// "on" comment.
///
/// For a violation, the last tag at or before its position whose expanded
/// check (and message) format matches decides: an "off" tag denies.
#[derive(Debug, Clone)]
pub struct SuppressionCommentFilter {
    off_format: Regex,
    on_format: Regex,
    check_format: String,
    message_format: Option<String>,
    check_cpp: bool,
    check_c: bool,
}

impl Default for SuppressionCommentFilter {
    fn default() -> Self {
        let fixed = |pattern: &str| {
            Regex::new(&regex::escape(pattern))
                .unwrap_or_else(|_| unreachable!("escaped literal compiles"))
        };
        Self {
            off_format: fixed(DEFAULT_OFF_FORMAT),
            on_format: fixed(DEFAULT_ON_FORMAT),
            check_format: DEFAULT_CHECK_FORMAT.to_string(),
            message_format: None,
            check_cpp: true,
            check_c: true,
        }
    }
}

impl SuppressionCommentFilter {
    /// Creates a filter with the default formats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern of comments that turn reporting off.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn off_format(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.off_format = compile(pattern)?;
        Ok(self)
    }

    /// Pattern of comments that turn reporting back on.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn on_format(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.on_format = compile(pattern)?;
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

    fn tag(&self, text: &str, line: usize, column: usize) -> Option<Tag> {
        let (captures, on) = match self.off_format.captures(text) {
            Some(captures) => (captures, false),
            None => (self.on_format.captures(text)?, true),
        };
        let expanded = |format: &str| match compile(&expand(format, &captures)) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(line, "ignoring suppression comment: {err}");
                None
            }
        };
        let check = expanded(&self.check_format)?;
        let message = match &self.message_format {
            Some(format) => Some(expanded(format)?),
            None => None,
        };
        Some(Tag {
            line,
            column,
            on,
            check,
            message,
        })
    }
}

#[derive(Debug)]
struct Tag {
    line: usize,
    column: usize,
    on: bool,
    check: Regex,
    message: Option<Regex>,
}

impl Tag {
    fn matches(&self, violation: &Violation) -> bool {
        self.check.is_match(&violation.check)
            || self
                .message
                .as_ref()
                .is_some_and(|re| re.is_match(&violation.message))
    }
}

struct Bound {
    tags: Vec<Tag>,
}

impl FileFilter for Bound {
    fn decide(&self, violation: &Violation) -> Decision {
        let nearest = self
            .tags
            .iter()
            .take_while(|tag| (tag.line, tag.column) <= (violation.line, violation.column))
            .filter(|tag| tag.matches(violation))
            .last();
        match nearest {
            Some(tag) if !tag.on => Decision::Deny,
            _ => Decision::Neutral,
        }
    }
}

impl Filter for SuppressionCommentFilter {
    fn name(&self) -> &'static str {
        "SuppressionCommentFilter"
    }

    fn bind<'f>(&'f self, contents: &FileContents, tab_width: usize) -> Box<dyn FileFilter + 'f> {
        let mut tags: Vec<Tag> = comment_lines(contents, tab_width, self.check_cpp, self.check_c)
            .into_iter()
            .filter_map(|comment| self.tag(comment.text, comment.line, comment.column))
            .collect();
        tags.sort_by_key(|tag| (tag.line, tag.column));
        Box::new(Bound { tags })
    }
}
