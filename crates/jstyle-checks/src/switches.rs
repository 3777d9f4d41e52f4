//! Shared queries over `LITERAL_SWITCH` subtrees.

use jstyle_core::{Node, TokenType};

type JavaNode<'t> = Node<'t, TokenType>;

/// Whether the switch is used as an expression rather than a statement.
pub(crate) fn is_expression(switch: JavaNode<'_>) -> bool {
    switch
        .ancestors()
        .find(|a| {
            matches!(
                a.kind(),
                TokenType::Expr | TokenType::Slist | TokenType::ObjBlock | TokenType::CompilationUnit
            )
        })
        .is_some_and(|a| a.kind() == TokenType::Expr)
}

/// The `CASE_GROUP` and `SWITCH_RULE` children, in source order.
pub(crate) fn entries<'t>(switch: JavaNode<'t>) -> impl Iterator<Item = JavaNode<'t>> {
    switch
        .children()
        .filter(|c| matches!(c.kind(), TokenType::CaseGroup | TokenType::SwitchRule))
}

/// The `case` and `default` labels of one entry.
pub(crate) fn labels<'t>(entry: JavaNode<'t>) -> impl Iterator<Item = JavaNode<'t>> {
    entry
        .children()
        .filter(|c| matches!(c.kind(), TokenType::LiteralCase | TokenType::LiteralDefault))
}

/// Whether some label is `default` or `case null, default`.
pub(crate) fn has_default(switch: JavaNode<'_>) -> bool {
    entries(switch).flat_map(labels).any(|label| {
        label.kind() == TokenType::LiteralDefault || label.has_child(TokenType::LiteralDefault)
    })
}

/// Whether some `case` matches a pattern or `null`.
pub(crate) fn has_pattern_or_null_label(switch: JavaNode<'_>) -> bool {
    entries(switch)
        .flat_map(labels)
        .filter(|label| label.kind() == TokenType::LiteralCase)
        .flat_map(|label| label.children())
        .any(|item| match item.kind() {
            TokenType::PatternVariableDef
            | TokenType::RecordPatternDef
            | TokenType::PatternDef
            | TokenType::UnnamedPatternDef => true,
            TokenType::Expr => item
                .first_child()
                .is_some_and(|e| e.kind() == TokenType::LiteralNull),
            _ => false,
        })
}

/// Last statement of a statement list, skipping comments, `;` and `}`.
pub(crate) fn last_statement(list: JavaNode<'_>) -> Option<JavaNode<'_>> {
    list.children()
        .filter(|c| {
            !c.is_comment() && !matches!(c.kind(), TokenType::Semi | TokenType::RCurly)
        })
        .last()
}

/// Whether a statement can never complete normally, so control cannot reach
/// the statement after it.
///
/// The analysis is conservative: loops, nested switches and labelled
/// statements count as completing normally, as does an `if` without `else`.
pub(crate) fn terminates(statement: JavaNode<'_>) -> bool {
    match statement.kind() {
        TokenType::LiteralBreak
        | TokenType::LiteralContinue
        | TokenType::LiteralReturn
        | TokenType::LiteralThrow
        | TokenType::LiteralYield => true,
        TokenType::Slist => last_statement(statement).is_some_and(terminates),
        TokenType::LiteralSynchronized => statement
            .find_first_child(TokenType::Slist)
            .is_some_and(terminates),
        TokenType::LiteralIf => {
            let Some(otherwise) = statement.find_first_child(TokenType::LiteralElse) else {
                return false;
            };
            let then = statement
                .find_first_child(TokenType::RParen)
                .and_then(|paren| paren.next_code_sibling());
            then.is_some_and(terminates)
                && otherwise
                    .children()
                    .find(|c| !c.is_comment())
                    .is_some_and(terminates)
        }
        TokenType::LiteralTry => {
            let finally = statement
                .find_first_child(TokenType::LiteralFinally)
                .and_then(|f| f.find_first_child(TokenType::Slist));
            if finally.is_some_and(terminates) {
                return true;
            }
            let body = statement.find_first_child(TokenType::Slist);
            body.is_some_and(terminates)
                && statement
                    .children()
                    .filter(|c| c.kind() == TokenType::LiteralCatch)
                    .all(|catch| catch.find_first_child(TokenType::Slist).is_some_and(terminates))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jstyle_core::parse_source;

    fn first_switch_in(tree: &jstyle_core::SyntaxTree) -> JavaNode<'_> {
        tree.root()
            .descendants()
            .find(|n| n.kind() == TokenType::LiteralSwitch)
            .expect("switch")
    }

    fn in_method(body: &str) -> jstyle_core::SyntaxTree {
        parse_source(&format!("class A {{ Object f(Object o, int x) {{ {body} }} }}")).expect("parse")
    }

    #[test]
    fn statement_and_expression_positions() {
        let tree = in_method("switch (x) { default: break; }");
        assert!(!is_expression(first_switch_in(&tree)));
        let tree = in_method("return switch (x) { default -> 1; };");
        assert!(is_expression(first_switch_in(&tree)));
        let tree = in_method("if (x > 0) switch (x) { default: }");
        assert!(!is_expression(first_switch_in(&tree)));
    }

    #[test]
    fn defaults_and_patterns() {
        let tree = in_method("switch (o) { case null, default -> {} }");
        let switch = first_switch_in(&tree);
        assert!(has_default(switch));
        assert!(has_pattern_or_null_label(switch));

        let tree = in_method("switch (o) { case String s -> {} case Integer i -> {} }");
        let switch = first_switch_in(&tree);
        assert!(!has_default(switch));
        assert!(has_pattern_or_null_label(switch));

        let tree = in_method("switch (x) { case 1: break; }");
        assert!(!has_pattern_or_null_label(first_switch_in(&tree)));
    }

    #[test]
    fn termination_truth_table() {
        let cases = [
            ("{ return 1; }", true),
            ("{ a(); }", false),
            ("{ if (x > 0) return 1; }", false),
            ("{ if (x > 0) return 1; else throw new E(); }", true),
            ("{ if (x > 0) { return 1; } else { a(); } }", false),
            ("{ try { return 1; } catch (E e) { throw e; } }", true),
            ("{ try { return 1; } catch (E e) { a(); } }", false),
            ("{ try { a(); } finally { return 2; } }", true),
            ("{ synchronized (this) { return 1; } }", true),
            ("{ while (true) { return 1; } }", false),
            ("{ a(); /* trailing */ }", false),
            ("{ { return 1; } /* trailing */ }", true),
        ];
        for (block, expected) in cases {
            let tree = in_method(block);
            let method_body = tree
                .root()
                .descendants()
                .find(|n| n.kind() == TokenType::MethodDef)
                .and_then(|m| m.find_first_child(TokenType::Slist))
                .expect("body");
            let inner = last_statement(method_body).expect("statement");
            assert_eq!(terminates(inner), expected, "{block}");
        }
    }
}
