//! Check for colon-style switches that could use `->` labels.
//!
//! A switch qualifies when it uses only `case ...:` groups and no group can
//! fall through into the next one. Whether a group falls through is decided
//! by [`switches::terminates`] on its last statement; anything the analysis
//! cannot prove to exit counts as fall-through, so the check never suggests
//! a rewrite that changes behaviour.
//!
//! The last group may complete normally: it leaves the switch either way.

use jstyle_core::{Check, CheckContext, CheckResult, Node, TokenType};

use crate::switches;

/// Check name.
pub const NAME: &str = "EnhancedSwitchCandidate";

/// Message key.
pub const MSG_KEY: &str = "enhanced.switch.candidate";

/// Suggests the enhanced (`->`) form for switches without fall-through.
#[derive(Debug, Clone, Default)]
pub struct EnhancedSwitchCandidate;

impl EnhancedSwitchCandidate {
    /// Creates the check.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn falls_through(group: Node<'_, TokenType>) -> bool {
    !group
        .find_first_child(TokenType::Slist)
        .and_then(switches::last_statement)
        .is_some_and(switches::terminates)
}

impl Check for EnhancedSwitchCandidate {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[TokenType::LiteralSwitch]
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        let groups: Vec<_> = switches::entries(node).collect();
        if groups.is_empty() || groups.iter().any(|g| g.kind() == TokenType::SwitchRule) {
            return Ok(());
        }
        let leading = &groups[..groups.len() - 1];
        if leading.iter().copied().any(falls_through) {
            return Ok(());
        }
        ctx.log(node, MSG_KEY, "Switch can be replaced with an enhanced switch.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::keys;

    fn flagged(body: &str) -> bool {
        let source = format!("class A {{ int f(int x) {{ {body} return 0; }} }}");
        !keys(EnhancedSwitchCandidate::new(), &source).is_empty()
    }

    #[test]
    fn truth_table() {
        let cases = [
            // every group exits
            ("switch (x) { case 1: a(); break; case 2: return 2; default: throw new E(); }", true),
            // shared labels are not fall-through
            ("switch (x) { case 1: case 2: a(); break; default: b(); }", true),
            // last group may complete normally
            ("switch (x) { case 1: break; default: a(); }", true),
            // plain fall-through
            ("switch (x) { case 1: a(); case 2: b(); break; }", false),
            // conditional exit still falls through
            ("switch (x) { case 1: if (x > 0) break; case 2: b(); }", false),
            // both arms exit
            ("switch (x) { case 1: if (x > 0) { return 1; } else { break; } case 2: b(); }", true),
            // one arm completes normally
            ("switch (x) { case 1: if (x > 0) { return 1; } else { a(); } case 2: b(); }", false),
            // try with exiting body and handlers
            ("switch (x) { case 1: try { return 1; } catch (E e) { break; } default: }", true),
            // loop bodies are not analysed
            ("switch (x) { case 1: while (true) { return 1; } default: }", false),
            // labelled blocks are not analysed
            ("switch (x) { case 1: out: { break out; } default: }", false),
            // already enhanced
            ("switch (x) { case 1 -> a(); default -> b(); }", false),
            // no labels at all
            ("switch (x) { }", false),
        ];
        for (body, expected) in cases {
            assert_eq!(flagged(body), expected, "{body}");
        }
    }

    #[test]
    fn switch_expressions_with_yield_qualify() {
        assert!(flagged("int y = switch (x) { case 1: yield 1; default: yield 2; };"));
    }
}
