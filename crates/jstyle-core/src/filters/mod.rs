//! Violation filters and the before-execution file filter.
//!
//! A [`Filter`] is configured once and bound to each file after its checks
//! ran; binding lets comment-driven filters scan the file's comments once.
//! Bound filters are evaluated in registration order and the first
//! [`Decision::Deny`] suppresses the violation.

mod comment_on_off;
mod element;
mod file_exclusion;
mod nearby_comment;
mod nearby_text;
mod plain_text;

pub use comment_on_off::SuppressionCommentFilter;
pub use element::SuppressFilterElement;
pub use file_exclusion::BeforeExecutionExclusionFileFilter;
pub use nearby_comment::SuppressWithNearbyCommentFilter;
pub use nearby_text::SuppressWithNearbyTextFilter;
pub use plain_text::SuppressWithPlainTextCommentFilter;

use std::path::Path;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::contents::FileContents;
use crate::token_types::TokenType;
use crate::types::Violation;

/// Opinion of one filter about one violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the violation.
    Accept,
    /// No opinion.
    Neutral,
    /// Suppress the violation.
    Deny,
}

/// Errors raised while configuring a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A pattern does not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Regex {
        /// The offending pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A line or column range list is malformed.
    #[error("invalid range list `{value}`")]
    Range {
        /// The offending list.
        value: String,
    },
}

/// A filter bound to one file.
pub trait FileFilter {
    /// Decides about one violation of the bound file.
    fn decide(&self, violation: &Violation) -> Decision;
}

impl<T: FileFilter + ?Sized> FileFilter for &T {
    fn decide(&self, violation: &Violation) -> Decision {
        (**self).decide(violation)
    }
}

/// A configured violation filter.
pub trait Filter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Prepares the filter for the violations of one file.
    fn bind<'f>(&'f self, contents: &FileContents, tab_width: usize) -> Box<dyn FileFilter + 'f>;
}

/// Decides before reading whether a file is processed at all.
pub trait BeforeExecutionFilter: Send + Sync {
    /// Returns false to skip the file.
    fn accept(&self, path: &Path) -> bool;
}

/// An ordered chain of filters.
#[derive(Default)]
pub struct FilterSet {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterSet {
    /// Creates an empty chain that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Keeps the violations no filter denies, preserving order.
    #[must_use]
    pub fn apply(
        &self,
        contents: &FileContents,
        tab_width: usize,
        violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if self.filters.is_empty() {
            return violations;
        }
        let bound: Vec<_> = self
            .filters
            .iter()
            .map(|f| f.bind(contents, tab_width))
            .collect();
        violations
            .into_iter()
            .filter(|v| bound.iter().all(|f| f.decide(v) != Decision::Deny))
            .collect()
    }
}

impl std::fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, FilterError> {
    Regex::new(pattern).map_err(|source| FilterError::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Replaces `$n` in `format` with capture group `n` of a comment match.
/// Higher group numbers are substituted first so `$1` never eats `$10`.
pub(crate) fn expand(format: &str, captures: &Captures<'_>) -> String {
    let mut result = format.to_string();
    for i in (0..captures.len()).rev() {
        let group = captures.get(i).map_or("", |m| m.as_str());
        result = result.replace(&format!("${i}"), group);
    }
    result
}

/// One physical line of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommentLine<'a> {
    pub line: usize,
    /// 1-based, tab-expanded column where the text starts.
    pub column: usize,
    pub text: &'a str,
}

/// Lines of the `//` and `/* */` comments of a file, delimiters included.
pub(crate) fn comment_lines(
    contents: &FileContents,
    tab_width: usize,
    line_comments: bool,
    block_comments: bool,
) -> Vec<CommentLine<'_>> {
    let source = contents.text().text();
    let mut out = Vec::new();
    for comment in contents.comments() {
        let last = match comment.kind() {
            TokenType::SingleLineComment if line_comments => {
                comment.find_first_child(TokenType::CommentContent)
            }
            TokenType::BlockCommentBegin if block_comments => comment
                .find_first_child(TokenType::BlockCommentEnd)
                .or_else(|| comment.find_first_child(TokenType::CommentContent)),
            _ => continue,
        };
        let end = last.map_or(comment.span().end, |n| n.span().end);
        let text = &source[comment.span().start..end];
        for (i, part) in text.lines().enumerate() {
            let line = comment.line() + i;
            let column = if i == 0 {
                contents
                    .text()
                    .expanded_column(line, comment.column(), tab_width)
                    + 1
            } else {
                1
            };
            out.push(CommentLine {
                line,
                column,
                text: part,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    struct DenyAll;

    impl FileFilter for DenyAll {
        fn decide(&self, _: &Violation) -> Decision {
            Decision::Deny
        }
    }

    impl Filter for DenyAll {
        fn name(&self) -> &'static str {
            "DenyAll"
        }

        fn bind<'f>(&'f self, _: &FileContents, _: usize) -> Box<dyn FileFilter + 'f> {
            Box::new(self)
        }
    }

    #[test]
    fn expansion_prefers_longer_group_numbers() {
        let re = Regex::new(r"(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)").expect("regex");
        let caps = re.captures("abcdefghij").expect("captures");
        assert_eq!(expand("$10-$1-$0", &caps), "j-a-abcdefghij");
    }

    #[test]
    fn comment_lines_cover_both_styles() {
        let contents = FileContents::parse(
            "A.java",
            "class A {\n  int a; // one\n  /* two\n     three */\n}\n",
        )
        .expect("parse");
        let lines = comment_lines(&contents, 8, true, true);
        let texts: Vec<_> = lines.iter().map(|l| (l.line, l.column, l.text)).collect();
        assert_eq!(
            texts,
            vec![
                (2, 10, "// one"),
                (3, 3, "/* two"),
                (4, 1, "     three */"),
            ]
        );
        assert_eq!(comment_lines(&contents, 8, false, true).len(), 2);
    }

    #[test]
    fn empty_chain_accepts_and_deny_wins() {
        let contents = FileContents::parse("A.java", "class A {}").expect("parse");
        let v = Violation::new("A.java", 1, 1, "k", "m", Severity::Error, "C");
        let mut set = FilterSet::new();
        assert_eq!(set.apply(&contents, 8, vec![v.clone()]).len(), 1);
        set.push(Box::new(DenyAll));
        assert!(set.apply(&contents, 8, vec![v]).is_empty());
    }
}
