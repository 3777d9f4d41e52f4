//! Check for overlong lines.
//!
//! Length counts code points after expanding tabs to the configured tab
//! width. The check needs no tokens: it reads the file text once the tree has
//! been walked.
//!
//! # Configuration
//!
//! - `max`: maximum allowed length (default: 80)
//! - `ignore_pattern`: lines matching this regex are skipped
//!   (default: `^(package|import) .*`)

use jstyle_core::{Check, CheckConfig, CheckContext, CheckError, CheckResult, Node, TokenType};
use regex::Regex;

/// Check name.
pub const NAME: &str = "LineLength";

/// Message key.
pub const MSG_KEY: &str = "line.longer.than";

const DEFAULT_MAX: usize = 80;
const DEFAULT_IGNORE_PATTERN: &str = "^(package|import) .*";

/// Reports lines longer than a maximum.
#[derive(Debug, Clone)]
pub struct LineLength {
    max: usize,
    ignore_pattern: Regex,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates the check with the default limit and ignore pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max: DEFAULT_MAX,
            ignore_pattern: Regex::new(DEFAULT_IGNORE_PATTERN)
                .unwrap_or_else(|_| unreachable!("default pattern compiles")),
        }
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Sets the pattern of lines to skip.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Regex`] if the pattern does not compile.
    pub fn ignore_pattern(mut self, pattern: &str) -> Result<Self, CheckError> {
        self.ignore_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    /// Reads `max` and `ignore_pattern` from a check configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative `max` or an invalid pattern.
    pub fn from_config(config: &CheckConfig) -> Result<Self, CheckError> {
        let max = config.get_int("max", i64::try_from(DEFAULT_MAX).unwrap_or(i64::MAX));
        let max = usize::try_from(max).map_err(|_| CheckError::Property {
            name: "max".to_string(),
            message: format!("expected a non-negative integer, found {max}"),
        })?;
        Self::new()
            .max(max)
            .ignore_pattern(config.get_str("ignore_pattern", DEFAULT_IGNORE_PATTERN))
    }
}

impl Check for LineLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[]
    }

    fn finish_tree(&mut self, ctx: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
        let text = ctx.contents().text();
        let tab_width = ctx.tab_width();
        for (number, line) in text.lines() {
            if self.ignore_pattern.is_match(line) {
                continue;
            }
            let length = text.line_length(number, tab_width);
            if length > self.max {
                ctx.log_at(
                    number,
                    0,
                    MSG_KEY,
                    format!("Line is longer than {} characters (found {length}).", self.max),
                );
            }
        }
        Ok(())
    }
}
