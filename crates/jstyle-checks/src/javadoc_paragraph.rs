//! Check for the placement of `<p>` paragraph tags in doc comments.
//!
//! # Detected Patterns
//!
//! - `<p>` not preceded by an empty line, or not first on its line
//! - `<p>` followed by whitespace instead of the first word
//! - `<p>` before the first sentence, where it is redundant
//! - an empty line followed by text that does not start with a tag
//!
//! # Configuration
//!
//! - `allow_newline_paragraph`: accept `<p>` alone at the end of a line
//!   (default: true)

use jstyle_core::javadoc::{is_javadoc_comment, DocTokenType};
use jstyle_core::{Check, CheckConfig, CheckContext, CheckResult, FileText, Node, TokenType};

/// Check name.
pub const NAME: &str = "JavadocParagraph";

/// `<p>` without an empty line before it.
pub const MSG_LINE_BEFORE: &str = "javadoc.paragraph.line.before";

/// `<p>` not immediately followed by text.
pub const MSG_MISPLACED_TAG: &str = "javadoc.paragraph.misplaced.tag";

/// `<p>` before the first sentence.
pub const MSG_REDUNDANT_PARAGRAPH: &str = "javadoc.paragraph.redundant.paragraph";

/// Empty line followed by untagged text.
pub const MSG_TAG_AFTER: &str = "javadoc.paragraph.tag.after";

/// Checks `<p>` placement.
#[derive(Debug, Clone)]
pub struct JavadocParagraph {
    allow_newline_paragraph: bool,
}

impl Default for JavadocParagraph {
    fn default() -> Self {
        Self::new()
    }
}

impl JavadocParagraph {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_newline_paragraph: true,
        }
    }

    /// Whether `<p>` may end its line.
    #[must_use]
    pub fn allow_newline_paragraph(mut self, allowed: bool) -> Self {
        self.allow_newline_paragraph = allowed;
        self
    }

    /// Reads `allow_newline_paragraph` from a check configuration.
    #[must_use]
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new().allow_newline_paragraph(config.get_bool("allow_newline_paragraph", true))
    }
}

fn byte_at(line: &str, column: usize) -> usize {
    line.char_indices().nth(column).map_or(line.len(), |(i, _)| i)
}

/// The source lines of one doc comment.
struct CommentLines<'a> {
    text: &'a FileText,
    first: usize,
    last: usize,
    column: usize,
}

impl<'a> CommentLines<'a> {
    fn raw(&self, line: usize) -> &'a str {
        let raw = self.text.line(line).unwrap_or("");
        if line == self.last {
            // A trailing `*/` on the first line lies after the opening.
            let floor = if line == self.first { byte_at(raw, self.column) + 3 } else { 0 };
            if let Some(end) = raw.rfind("*/").filter(|&end| end >= floor) {
                return &raw[..end];
            }
        }
        raw
    }

    /// `part`, a prefix of line `line`, without the opening `/**` or the
    /// leading asterisk.
    fn strip(&self, line: usize, part: &'a str) -> &'a str {
        if line == self.first {
            let rest = &part[byte_at(part, self.column).min(part.len())..];
            rest.strip_prefix("/**").unwrap_or(rest)
        } else {
            let rest = part.trim_start();
            rest.strip_prefix('*').unwrap_or(rest)
        }
    }

    fn content(&self, line: usize) -> &'a str {
        self.strip(line, self.raw(line))
    }

    fn is_blank(&self, line: usize) -> bool {
        self.content(line).trim().is_empty()
    }

    /// Whether nothing but comment decoration precedes `column`.
    fn starts_line(&self, line: usize, column: usize) -> bool {
        let raw = self.raw(line);
        self.strip(line, &raw[..byte_at(raw, column)]).trim().is_empty()
    }

    /// Text after `column` up to the end of the line or comment.
    fn after(&self, line: usize, column: usize) -> &'a str {
        let raw = self.raw(line);
        &raw[byte_at(raw, column)..]
    }
}

impl JavadocParagraph {
    fn check_tags(
        &self,
        ctx: &mut CheckContext<'_>,
        lines: &CommentLines<'_>,
        doc_root: Node<'_, DocTokenType>,
    ) {
        let first_content = (lines.first..=lines.last).find(|&l| !lines.is_blank(l));
        let paragraphs = doc_root.descendants().filter(|n| {
            n.kind() == DocTokenType::HtmlTagStart
                && n.find_first_child(DocTokenType::TagName)
                    .is_some_and(|name| name.text().eq_ignore_ascii_case("p"))
        });
        for tag in paragraphs {
            let (line, column) = (tag.line(), tag.column());
            let starts_line = lines.starts_line(line, column);
            if starts_line && Some(line) == first_content {
                ctx.log_at(line, column, MSG_REDUNDANT_PARAGRAPH, "Redundant <p> tag.");
            } else if !starts_line || line == lines.first || !lines.is_blank(line - 1) {
                ctx.log_at(
                    line,
                    column,
                    MSG_LINE_BEFORE,
                    "<p> tag should be preceded with an empty line.",
                );
            }

            let Some(close) = tag.find_first_child(DocTokenType::TagClose) else {
                continue;
            };
            let rest = lines.after(close.line(), close.column() + 1);
            let misplaced = if rest.trim().is_empty() {
                !self.allow_newline_paragraph
            } else {
                rest.starts_with(char::is_whitespace)
            };
            if misplaced {
                ctx.log_at(
                    line,
                    column,
                    MSG_MISPLACED_TAG,
                    "<p> tag should be placed immediately before the first word, with no space after.",
                );
            }
        }
    }

    fn check_empty_lines(ctx: &mut CheckContext<'_>, lines: &CommentLines<'_>) {
        let Some(start) = (lines.first..=lines.last).find(|&l| !lines.is_blank(l)) else {
            return;
        };
        for line in start..lines.last {
            let next = lines.content(line + 1).trim_start();
            if next.starts_with('@') {
                break;
            }
            if lines.is_blank(line) && !next.is_empty() && !next.starts_with('<') {
                ctx.log_at(
                    line,
                    0,
                    MSG_TAG_AFTER,
                    "Empty line should be followed by <p> tag on the next line.",
                );
            }
        }
    }
}

impl Check for JavadocParagraph {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[TokenType::BlockCommentBegin]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        if !is_javadoc_comment(node) {
            return Ok(());
        }
        let outcome = ctx.javadoc(node);
        // Unparseable comments are reported by the HTML check.
        let Ok(parsed) = outcome.as_ref() else {
            return Ok(());
        };
        let lines = CommentLines {
            text: ctx.contents().text(),
            first: node.line(),
            last: node
                .find_first_child(TokenType::BlockCommentEnd)
                .map_or(node.line(), |end| end.line()),
            column: node.column(),
        };
        self.check_tags(ctx, &lines, parsed.tree.root());
        Self::check_empty_lines(ctx, &lines);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify;

    const SOURCE: &str = "/**\n\
         * Summary.\n\
         * <p>Good paragraph.\n\
         *\n\
         * <p> Misplaced.\n\
         * Text. <p>Inline.\n\
         *\n\
         * Missing tag.\n\
         *\n\
         * <p>\n\
         * Newline paragraph.\n\
         * @return nothing\n\
         */\n\
        class A {}\n";

    fn owned(found: &[(usize, usize, &str)]) -> Vec<(usize, usize, String)> {
        found
            .iter()
            .map(|&(line, column, key)| (line, column, key.to_string()))
            .collect()
    }

    #[test]
    fn reports_misplaced_paragraphs() {
        let found = verify(JavadocParagraph::new(), &SOURCE.replace("\n*", "\n *"));
        assert_eq!(
            found,
            owned(&[
                (3, 4, MSG_LINE_BEFORE),
                (5, 4, MSG_MISPLACED_TAG),
                (6, 10, MSG_LINE_BEFORE),
                (7, 1, MSG_TAG_AFTER),
            ])
        );
    }

    #[test]
    fn newline_paragraph_can_be_disallowed() {
        let check = JavadocParagraph::new().allow_newline_paragraph(false);
        let found = verify(check, &SOURCE.replace("\n*", "\n *"));
        assert!(found.contains(&(10, 4, MSG_MISPLACED_TAG.to_string())));
    }

    #[test]
    fn paragraph_before_first_sentence_is_redundant() {
        let found = verify(JavadocParagraph::new(), "/** <p>Summary. */\nclass A {}\n");
        assert_eq!(found, owned(&[(1, 5, MSG_REDUNDANT_PARAGRAPH)]));

        let found = verify(JavadocParagraph::new(), "/**\n * <p>Summary.\n */\nclass A {}\n");
        assert_eq!(found, owned(&[(2, 4, MSG_REDUNDANT_PARAGRAPH)]));
    }

    #[test]
    fn code_samples_and_plain_comments_are_ignored() {
        let source = "/**\n * Use {@code <p> } here.\n */\n/* Text. <p>Inline. */\nclass A {}\n";
        assert!(verify(JavadocParagraph::new(), source).is_empty());
    }
}
