//! Region suppression by on/off markers matched against raw source lines.

use regex::Regex;
use tracing::warn;

use super::{compile, expand, Decision, FileFilter, Filter, FilterError};
use crate::contents::FileContents;
use crate::types::Violation;

const DEFAULT_OFF_FORMAT: &str = "// CHECKSTYLE:OFF";
const DEFAULT_ON_FORMAT: &str = "// CHECKSTYLE:ON";
const DEFAULT_CHECK_FORMAT: &str = ".*";

/// Suppresses violations between an "off" line and the next matching "on"
/// line.
///
/// Unlike [`SuppressionCommentFilter`](super::SuppressionCommentFilter) the
/// markers are searched in the plain text of every line, so they also work
/// inside string literals and text blocks. A line matching both formats
/// counts as "off". Tags apply from the start of their line; the last
/// matching tag at or above a violation decides.
#[derive(Debug, Clone)]
pub struct SuppressWithPlainTextCommentFilter {
    off_format: Regex,
    on_format: Regex,
    check_format: String,
    message_format: Option<String>,
    id_format: Option<String>,
}

impl Default for SuppressWithPlainTextCommentFilter {
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
            id_format: None,
        }
    }
}

impl SuppressWithPlainTextCommentFilter {
    /// Creates a filter with the default formats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern of lines that turn reporting off.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn off_format(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.off_format = compile(pattern)?;
        Ok(self)
    }

    /// Pattern of lines that turn reporting back on.
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

    fn tag(&self, text: &str, line: usize) -> Option<Tag> {
        let (captures, on) = match self.off_format.captures(text) {
            Some(captures) => (captures, false),
            None => (self.on_format.captures(text)?, true),
        };
        let expanded = |format: &str| match compile(&expand(format, &captures)) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(line, "ignoring suppression marker: {err}");
                None
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
        Some(Tag {
            line,
            on,
            check,
            message,
            id,
        })
    }
}

#[derive(Debug)]
struct Tag {
    line: usize,
    on: bool,
    check: Regex,
    message: Option<Regex>,
    id: Option<Regex>,
}

impl Tag {
    fn matches(&self, violation: &Violation) -> bool {
        self.line <= violation.line
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
        match self.tags.iter().filter(|tag| tag.matches(violation)).last() {
            Some(tag) if !tag.on => Decision::Deny,
            _ => Decision::Neutral,
        }
    }
}

impl Filter for SuppressWithPlainTextCommentFilter {
    fn name(&self) -> &'static str {
        "SuppressWithPlainTextCommentFilter"
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
