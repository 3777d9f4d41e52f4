//! Check for malformed HTML in doc comments.
//!
//! Reports the recoverable problems found while parsing each `/** ... */`
//! comment (unclosed elements, stray closing tags, closed void elements) and
//! the comments whose structure could not be parsed at all.

use jstyle_core::javadoc::is_javadoc_comment;
use jstyle_core::{Check, CheckConfig, CheckContext, CheckResult, Node, TokenType};

/// Check name.
pub const NAME: &str = "JavadocHtmlTags";

/// Reports doc-comment HTML issues and parse errors.
#[derive(Debug, Clone)]
pub struct JavadocHtmlTags {
    report_parse_errors: bool,
}

impl Default for JavadocHtmlTags {
    fn default() -> Self {
        Self::new()
    }
}

impl JavadocHtmlTags {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self {
            report_parse_errors: true,
        }
    }

    /// Whether unparseable comments are reported (default: true).
    #[must_use]
    pub fn report_parse_errors(mut self, enabled: bool) -> Self {
        self.report_parse_errors = enabled;
        self
    }

    /// Reads `report_parse_errors` from a check configuration.
    #[must_use]
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new().report_parse_errors(config.get_bool("report_parse_errors", true))
    }
}

impl Check for JavadocHtmlTags {
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
        match outcome.as_ref() {
            Ok(parsed) => {
                for issue in &parsed.issues {
                    ctx.log_at(issue.line, issue.column, issue.key(), issue.message());
                }
            }
            Err(err) if self.report_parse_errors => {
                ctx.log_at(
                    err.line,
                    err.column,
                    err.key(),
                    format!("Javadoc comment at column {} has parse error: {}.", err.column + 1, err.kind),
                );
            }
            Err(_) => {}
        }
        Ok(())
    }
}
