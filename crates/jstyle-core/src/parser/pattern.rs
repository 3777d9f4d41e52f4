//! Type, record and unnamed patterns.

use super::{PResult, Parser};
use crate::token_types::TokenType;

impl Parser<'_> {
    /// Whether a pattern starts at code token `n`.
    pub(super) fn pattern_ahead(&self, n: usize) -> bool {
        if self.is_word(n, "_") {
            return true;
        }
        let start = self.scan_modifiers(n);
        self.scan_type(start)
            .is_some_and(|end| matches!(self.nth(end), TokenType::Ident | TokenType::LParen))
    }

    pub(super) fn pattern(&mut self) -> PResult {
        self.nested(|p| {
            if p.at_word("_") {
                p.start_anchored(TokenType::UnnamedPatternDef);
                p.finish();
                return Ok(());
            }
            p.start(TokenType::PatternVariableDef);
            p.modifiers()?;
            p.type_node()?;
            if p.at(TokenType::LParen) {
                p.builder.relabel(TokenType::RecordPatternDef);
                p.bump();
                p.start(TokenType::RecordPatternComponents);
                if !p.at(TokenType::RParen) {
                    loop {
                        if !p.pattern_ahead(0) {
                            return Err(p.error("pattern"));
                        }
                        p.pattern()?;
                        if !p.eat(TokenType::Comma) {
                            break;
                        }
                    }
                }
                p.finish();
                p.expect(TokenType::RParen)?;
            } else {
                p.expect_ident()?;
            }
            p.finish();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_source;
    use crate::token_types::TokenType;

    #[test]
    fn instanceof_type_pattern_versus_plain_type() {
        let tree = parse_source(
            "class A { void f(Object o) { if (o instanceof String s && s.isEmpty()) {} boolean b = o instanceof Number; } }",
        )
        .expect("parse");
        let root = tree.root();
        let patterns: Vec<_> = root
            .descendants()
            .filter(|n| n.kind() == TokenType::PatternVariableDef)
            .collect();
        assert_eq!(patterns.len(), 1);
        let ident = patterns[0].find_first_child(TokenType::Ident).expect("ident");
        assert_eq!(ident.text(), "s");
    }

    #[test]
    fn nested_record_pattern() {
        let tree = parse_source(
            "class A { boolean f(Object o) { return o instanceof Line(Point(var x, _), final Point end); } }",
        )
        .expect("parse");
        let root = tree.root();
        let outer = root
            .descendants()
            .find(|n| n.kind() == TokenType::RecordPatternDef)
            .expect("record pattern");
        let components = outer
            .find_first_child(TokenType::RecordPatternComponents)
            .expect("components");
        let kinds: Vec<_> = components.children().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::RecordPatternDef,
                TokenType::Comma,
                TokenType::PatternVariableDef,
            ]
        );
        assert!(root
            .descendants()
            .any(|n| n.kind() == TokenType::UnnamedPatternDef && n.text() == "_"));
    }
}
