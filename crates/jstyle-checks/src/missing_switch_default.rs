//! Check that switch statements have a `default` label.
//!
//! # Rationale
//!
//! A `default` label documents that the unlisted values were considered,
//! even when it only throws.
//!
//! # Detected Patterns
//!
//! - `switch` statements without `default:`, `default ->` or
//!   `case null, default`
//!
//! Switch expressions, and statements with pattern or `null` labels, are
//! skipped: the compiler already requires them to be exhaustive.

use jstyle_core::{Check, CheckContext, CheckResult, Node, TokenType};

use crate::switches;

/// Check name.
pub const NAME: &str = "MissingSwitchDefault";

/// Message key.
pub const MSG_KEY: &str = "missing.switch.default";

/// Reports switch statements without a `default` label.
#[derive(Debug, Clone, Default)]
pub struct MissingSwitchDefault;

impl MissingSwitchDefault {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Check for MissingSwitchDefault {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[TokenType::LiteralSwitch]
    }

    fn required_tokens(&self) -> &'static [TokenType] {
        &[TokenType::LiteralSwitch]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        if switches::is_expression(node)
            || switches::has_default(node)
            || switches::has_pattern_or_null_label(node)
        {
            return Ok(());
        }
        ctx.log(node, MSG_KEY, "switch without \"default\" clause.");
        Ok(())
    }
}
