//! Expressions.
//!
//! Operators become nodes anchored at the operator token whose children are
//! the operands; parentheses stay as `LPAREN`/`RPAREN` siblings of the inner
//! expression. Full expressions are wrapped in `EXPR`.

use super::{PResult, Parser};
use crate::token_types::TokenType;

/// Binding strength of binary operators, loosest first.
mod prec {
    pub const LOR: u8 = 1;
    pub const LAND: u8 = 2;
    pub const BOR: u8 = 3;
    pub const BXOR: u8 = 4;
    pub const BAND: u8 = 5;
    pub const EQUALITY: u8 = 6;
    pub const RELATIONAL: u8 = 7;
    pub const SHIFT: u8 = 8;
    pub const ADDITIVE: u8 = 9;
    pub const MULTIPLICATIVE: u8 = 10;
}

impl Parser<'_> {
    /// An `EXPR`-wrapped expression; lambdas are left unwrapped.
    pub(super) fn expr(&mut self) -> PResult {
        if self.lambda_ahead() {
            return self.lambda();
        }
        self.start(TokenType::Expr);
        self.expression()?;
        self.finish();
        Ok(())
    }

    /// An `EXPR`-wrapped conditional expression: no lambda, no assignment.
    pub(super) fn conditional_expr(&mut self) -> PResult {
        self.start(TokenType::Expr);
        self.ternary()?;
        self.finish();
        Ok(())
    }

    /// Assignment-level expression without wrapper.
    pub(super) fn expression(&mut self) -> PResult {
        self.nested(|p| {
            if p.lambda_ahead() {
                return p.lambda();
            }
            let checkpoint = p.checkpoint();
            p.ternary()?;
            if let Some((kind, width)) = p.assignment_operator() {
                p.start_at(checkpoint, kind);
                p.anchor(width);
                p.expression()?;
                p.finish();
            }
            Ok(())
        })
    }

    fn assignment_operator(&self) -> Option<(TokenType, usize)> {
        let kind = self.peek();
        if kind.is_assignment() {
            return Some((kind, 1));
        }
        match self.fused_gt() {
            Some((kind @ (TokenType::SrAssign | TokenType::BsrAssign), width)) => {
                Some((kind, width))
            }
            _ => None,
        }
    }

    /// Operator formed by byte-adjacent `>` / `=` tokens at the cursor.
    fn fused_gt(&self) -> Option<(TokenType, usize)> {
        if !self.at(TokenType::Gt) {
            return None;
        }
        let next_is = |n: usize, kind: TokenType| self.nth(n) == kind && self.adjacent(n - 1);
        Some(if next_is(1, TokenType::Gt) {
            if next_is(2, TokenType::Gt) {
                if next_is(3, TokenType::Assign) {
                    (TokenType::BsrAssign, 4)
                } else {
                    (TokenType::Bsr, 3)
                }
            } else if next_is(2, TokenType::Assign) {
                (TokenType::SrAssign, 3)
            } else {
                (TokenType::Sr, 2)
            }
        } else if next_is(1, TokenType::Assign) {
            (TokenType::Ge, 2)
        } else {
            (TokenType::Gt, 1)
        })
    }

    pub(super) fn ternary(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        self.binary(prec::LOR)?;
        if self.at(TokenType::Question) {
            self.start_at(checkpoint, TokenType::Question);
            self.anchor(1);
            self.expression()?;
            self.expect(TokenType::Colon)?;
            if self.lambda_ahead() {
                self.lambda()?;
            } else {
                self.nested(Self::ternary)?;
            }
            self.finish();
        }
        Ok(())
    }

    fn binary_operator(&self) -> Option<(TokenType, usize, u8)> {
        let kind = self.peek();
        let found = match kind {
            TokenType::Lor => (kind, 1, prec::LOR),
            TokenType::Land => (kind, 1, prec::LAND),
            TokenType::Bor => (kind, 1, prec::BOR),
            TokenType::Bxor => (kind, 1, prec::BXOR),
            TokenType::Band => (kind, 1, prec::BAND),
            TokenType::Equal | TokenType::NotEqual => (kind, 1, prec::EQUALITY),
            TokenType::Lt | TokenType::Le => (kind, 1, prec::RELATIONAL),
            TokenType::Gt => match self.fused_gt()? {
                (TokenType::Gt, _) => (TokenType::Gt, 1, prec::RELATIONAL),
                (TokenType::Ge, width) => (TokenType::Ge, width, prec::RELATIONAL),
                (op @ (TokenType::Sr | TokenType::Bsr), width) => (op, width, prec::SHIFT),
                _ => return None,
            },
            TokenType::Sl => (kind, 1, prec::SHIFT),
            TokenType::Plus | TokenType::Minus => (kind, 1, prec::ADDITIVE),
            TokenType::Star | TokenType::Div | TokenType::Mod => {
                (kind, 1, prec::MULTIPLICATIVE)
            }
            _ => return None,
        };
        Some(found)
    }

    /// Left-associative binary operators binding at least as tight as `min`.
    fn binary(&mut self, min: u8) -> PResult {
        let checkpoint = self.checkpoint();
        self.unary()?;
        loop {
            if self.at(TokenType::LiteralInstanceof) && min <= prec::RELATIONAL {
                self.start_at(checkpoint, TokenType::LiteralInstanceof);
                self.anchor(1);
                self.instanceof_target()?;
                self.finish();
                continue;
            }
            let Some((kind, width, level)) = self.binary_operator() else {
                break;
            };
            if level < min {
                break;
            }
            self.start_at(checkpoint, kind);
            self.anchor(width);
            self.binary(level + 1)?;
            self.finish();
        }
        Ok(())
    }

    fn unary(&mut self) -> PResult {
        let kind = match self.peek() {
            TokenType::Plus => TokenType::UnaryPlus,
            TokenType::Minus => TokenType::UnaryMinus,
            kind @ (TokenType::Inc | TokenType::Dec | TokenType::Lnot | TokenType::Bnot) => kind,
            TokenType::LParen if self.cast_ahead() => return self.cast(),
            _ => return self.postfix(),
        };
        self.start_anchored(kind);
        self.nested(Self::unary)?;
        self.finish();
        Ok(())
    }

    /// Whether `(` at the cursor opens a cast.
    fn cast_ahead(&self) -> bool {
        let primitive = self.nth(self.scan_annotations(1)).is_primitive();
        let Some(mut i) = self.scan_type(1) else {
            return false;
        };
        while self.nth(i) == TokenType::Band {
            match self.scan_type(i + 1) {
                Some(next) => i = next,
                None => return false,
            }
        }
        if self.nth(i) != TokenType::RParen {
            return false;
        }
        let next = self.nth(i + 1);
        if primitive && self.scan_type(1) == Some(2) {
            return !matches!(
                next,
                TokenType::RParen | TokenType::Semi | TokenType::Comma | TokenType::Eof
            );
        }
        next == TokenType::Ident
            || next.is_literal()
            || next.is_primitive()
            || matches!(
                next,
                TokenType::LParen
                    | TokenType::Lnot
                    | TokenType::Bnot
                    | TokenType::LiteralThis
                    | TokenType::LiteralSuper
                    | TokenType::LiteralNew
                    | TokenType::LiteralSwitch
            )
    }

    fn cast(&mut self) -> PResult {
        self.start_anchored(TokenType::Typecast);
        self.type_node()?;
        while self.at(TokenType::Band) {
            self.start_anchored(TokenType::TypeExtensionAnd);
            self.type_node()?;
            self.finish();
        }
        self.expect(TokenType::RParen)?;
        if self.lambda_ahead() {
            self.lambda()?;
        } else {
            self.nested(Self::unary)?;
        }
        self.finish();
        Ok(())
    }

    fn lambda(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        if self.at(TokenType::Ident) {
            self.bump();
        } else {
            self.expect(TokenType::LParen)?;
            self.start(TokenType::Parameters);
            while !self.at(TokenType::RParen) {
                if self.at(TokenType::Ident)
                    && matches!(self.nth(1), TokenType::Comma | TokenType::RParen)
                {
                    self.start(TokenType::ParameterDef);
                    self.empty(TokenType::Modifiers);
                    self.empty(TokenType::Type);
                    self.bump();
                    self.finish();
                } else {
                    self.parameter()?;
                }
                if !self.eat(TokenType::Comma) {
                    break;
                }
            }
            self.finish();
            self.expect(TokenType::RParen)?;
        }
        self.start_at(checkpoint, TokenType::Lambda);
        self.anchor(1);
        if self.at(TokenType::LCurly) {
            self.block()?;
        } else {
            self.expr()?;
        }
        self.finish();
        Ok(())
    }

    fn postfix(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        let mut callable = self.primary()?;
        loop {
            match self.peek() {
                TokenType::LParen if callable => {
                    self.start_at(checkpoint, TokenType::MethodCall);
                    self.anchor(1);
                    self.argument_list()?;
                    self.expect(TokenType::RParen)?;
                    self.finish();
                    callable = false;
                }
                TokenType::Dot => {
                    self.start_at(checkpoint, TokenType::Dot);
                    self.anchor(1);
                    callable = true;
                    match self.peek() {
                        TokenType::Lt => {
                            self.type_arguments()?;
                            if !self.eat(TokenType::LiteralSuper) && !self.eat(TokenType::LiteralThis) {
                                self.expect_ident()?;
                            }
                        }
                        TokenType::LiteralNew => {
                            self.creator()?;
                            callable = false;
                        }
                        TokenType::LiteralThis | TokenType::LiteralSuper => self.bump(),
                        TokenType::LiteralClass => {
                            self.bump();
                            callable = false;
                        }
                        _ => self.expect_ident()?,
                    }
                    self.finish();
                }
                TokenType::LBrack => {
                    self.start_at(checkpoint, TokenType::IndexOp);
                    self.anchor(1);
                    self.expr()?;
                    self.expect(TokenType::RBrack)?;
                    self.finish();
                    callable = false;
                }
                TokenType::DoubleColon => {
                    self.start_at(checkpoint, TokenType::MethodRef);
                    self.anchor(1);
                    self.type_arguments_opt()?;
                    if !self.eat(TokenType::LiteralNew) {
                        self.expect_ident()?;
                    }
                    self.finish();
                    callable = false;
                }
                TokenType::Inc | TokenType::Dec => {
                    let kind = if self.at(TokenType::Inc) {
                        TokenType::PostInc
                    } else {
                        TokenType::PostDec
                    };
                    self.start_at(checkpoint, kind);
                    self.anchor(1);
                    self.finish();
                    callable = false;
                }
                _ => return Ok(()),
            }
        }
    }

    /// A primary expression; returns whether a call may follow directly.
    fn primary(&mut self) -> PResult<bool> {
        let kind = self.peek();
        if kind.is_literal() {
            self.bump();
            return Ok(false);
        }
        match kind {
            TokenType::Ident => {
                if let Some(end) = self.scan_type(0) {
                    let generic_ref = end > 1 && self.nth(end) == TokenType::DoubleColon;
                    let array_type = self.nth(1) == TokenType::LBrack
                        && self.nth(2) == TokenType::RBrack
                        && self.class_literal_or_ref_at(end);
                    let type_like = generic_ref || array_type;
                    if type_like {
                        self.type_body()?;
                        return Ok(false);
                    }
                }
                self.bump();
                Ok(true)
            }
            TokenType::LiteralThis | TokenType::LiteralSuper => {
                self.bump();
                Ok(true)
            }
            TokenType::LParen => {
                self.bump();
                self.expression()?;
                self.expect(TokenType::RParen)?;
                Ok(false)
            }
            TokenType::LiteralNew => {
                self.creator()?;
                Ok(false)
            }
            TokenType::LiteralSwitch => {
                self.switch_construct()?;
                Ok(false)
            }
            // Only `int.class`, `int[]::new` and the like.
            kind if kind.is_primitive() => {
                self.type_body()?;
                if !self.class_literal_or_ref_at(0) {
                    return Err(self.error("expression"));
                }
                Ok(false)
            }
            _ => Err(self.error("expression")),
        }
    }

    /// Whether the tokens at `i` are `.class` or `::`.
    fn class_literal_or_ref_at(&self, i: usize) -> bool {
        self.nth(i) == TokenType::DoubleColon
            || (self.nth(i) == TokenType::Dot && self.nth(i + 1) == TokenType::LiteralClass)
    }

    /// `new` expressions: class instance creation or array creation.
    fn creator(&mut self) -> PResult {
        self.start_anchored(TokenType::LiteralNew);
        self.type_arguments_opt()?;
        let checkpoint = self.checkpoint();
        if self.peek().is_primitive() {
            self.bump();
        } else {
            self.annotation_run()?;
            self.expect_ident()?;
            self.type_arguments_opt()?;
            while self.at(TokenType::Dot) {
                self.start_at(checkpoint, TokenType::Dot);
                self.anchor(1);
                self.annotation_run()?;
                self.expect_ident()?;
                self.type_arguments_opt()?;
                self.finish();
            }
        }

        if self.at(TokenType::LBrack) {
            let dims = self.checkpoint();
            while self.at(TokenType::LBrack) {
                self.start_at(dims, TokenType::ArrayDeclarator);
                self.anchor(1);
                if !self.at(TokenType::RBrack) {
                    self.expr()?;
                }
                self.expect(TokenType::RBrack)?;
                self.finish();
            }
            if self.at(TokenType::LCurly) {
                self.array_initializer()?;
            }
        } else {
            self.expect(TokenType::LParen)?;
            self.argument_list()?;
            self.expect(TokenType::RParen)?;
            if self.at(TokenType::LCurly) {
                self.class_body(super::Body::Class)?;
            }
        }
        self.finish();
        Ok(())
    }

    /// `{ a, b, }` as `ARRAY_INIT`.
    pub(super) fn array_initializer(&mut self) -> PResult {
        self.nested(|p| {
            p.start_anchored(TokenType::ArrayInit);
            while !p.at(TokenType::RCurly) {
                p.variable_initializer()?;
                if !p.eat(TokenType::Comma) {
                    break;
                }
            }
            p.expect(TokenType::RCurly)?;
            p.finish();
            Ok(())
        })
    }

    /// `ELIST` of call arguments, without the parentheses.
    pub(super) fn argument_list(&mut self) -> PResult {
        self.start(TokenType::Elist);
        if !self.at(TokenType::RParen) {
            self.expr()?;
            while self.eat(TokenType::Comma) {
                self.expr()?;
            }
        }
        self.finish();
        Ok(())
    }

    /// Right operand of `instanceof`: a pattern or a type.
    fn instanceof_target(&mut self) -> PResult {
        if self.pattern_ahead(0) {
            self.pattern()
        } else {
            self.type_node()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{parse_source, ParseError, SyntaxTree};
    use crate::token_types::TokenType;
    use crate::tree::Node;

    fn method_body(source: &str) -> SyntaxTree {
        parse_source(&format!("class A {{ void f() {{ {source} }} }}")).expect("parse")
    }

    fn first(tree: &SyntaxTree, kind: TokenType) -> Node<'_, TokenType> {
        tree.root()
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind}"))
    }

    fn kinds(node: Node<'_, TokenType>) -> Vec<TokenType> {
        node.children().map(|c| c.kind()).collect()
    }

    #[test]
    fn precedence_nests_multiplication_under_addition() {
        let tree = method_body("x = a + b * c;");
        let plus = first(&tree, TokenType::Plus);
        assert_eq!(kinds(plus), vec![TokenType::Ident, TokenType::Star]);
        let assign = first(&tree, TokenType::Assign);
        assert_eq!(assign.parent().map(|p| p.kind()), Some(TokenType::Expr));
    }

    #[test]
    fn shifts_and_comparisons_are_fused() {
        let tree = method_body("x = a >> 2; y = b >>> 1; z = c >= d; w >>= 1; v >>>= 2;");
        for kind in [
            TokenType::Sr,
            TokenType::Bsr,
            TokenType::Ge,
            TokenType::SrAssign,
            TokenType::BsrAssign,
        ] {
            let node = first(&tree, kind);
            assert_eq!(node.text(), kind_text(kind));
        }
    }

    fn kind_text(kind: TokenType) -> &'static str {
        match kind {
            TokenType::Sr => ">>",
            TokenType::Bsr => ">>>",
            TokenType::Ge => ">=",
            TokenType::SrAssign => ">>=",
            _ => ">>>=",
        }
    }

    #[test]
    fn closing_generics_are_not_shifts() {
        let tree = method_body("List<List<String>> l = null; boolean b = x > y;");
        let root = tree.root();
        assert!(root.descendants().all(|n| n.kind() != TokenType::Sr));
        assert_eq!(
            root.descendants().filter(|n| n.kind() == TokenType::GenericEnd).count(),
            2
        );
        assert!(root.descendants().any(|n| n.kind() == TokenType::Gt));
    }

    #[test]
    fn generic_less_than_is_a_comparison() {
        let tree = method_body("boolean b = i < n && j > m;");
        assert!(tree.root().descendants().any(|n| n.kind() == TokenType::Lt));
        assert!(tree.root().descendants().any(|n| n.kind() == TokenType::Gt));
        assert!(tree.root().descendants().all(|n| n.kind() != TokenType::TypeArguments));
    }

    #[test]
    fn casts_versus_parenthesized_expressions() {
        let tree = method_body("a = (int) -b; c = (d) - e; f = (List<String>) g; h = (i);");
        let root = tree.root();
        assert_eq!(
            root.descendants().filter(|n| n.kind() == TokenType::Typecast).count(),
            2
        );
        assert!(root.descendants().any(|n| n.kind() == TokenType::Minus));
    }

    #[test]
    fn lambdas_and_method_references() {
        let tree = method_body(
            "run(() -> {}); map(x -> x + 1); map((a, b) -> a); map((String s) -> s); ref(String::valueOf); ref(List<String>::size); ref(int[]::new);",
        );
        let root = tree.root();
        assert_eq!(
            root.descendants().filter(|n| n.kind() == TokenType::Lambda).count(),
            4
        );
        assert_eq!(
            root.descendants().filter(|n| n.kind() == TokenType::MethodRef).count(),
            3
        );
    }

    #[test]
    fn method_call_is_anchored_at_paren() {
        let tree = method_body("obj.call(1, 2);");
        let call = first(&tree, TokenType::MethodCall);
        assert_eq!(call.text(), "(");
        assert_eq!(
            kinds(call),
            vec![TokenType::Dot, TokenType::Elist, TokenType::RParen]
        );
    }

    #[test]
    fn creation_expressions() {
        let tree = method_body(
            "a = new int[3][]; b = new String[] {\"x\"}; c = new ArrayList<>(); d = new Runnable() { public void run() {} }; e = outer.new Inner();",
        );
        let root = tree.root();
        assert_eq!(
            root.descendants().filter(|n| n.kind() == TokenType::LiteralNew).count(),
            5
        );
        assert!(root.descendants().any(|n| n.kind() == TokenType::ArrayInit));
        assert!(root.descendants().any(|n| n.kind() == TokenType::ObjBlock
            && n.parent().is_some_and(|p| p.kind() == TokenType::LiteralNew)));
    }

    #[test]
    fn ternary_and_instanceof_patterns() {
        let tree = method_body("r = o instanceof String s && !s.isEmpty() ? s : \"\";");
        let root = tree.root();
        assert!(root.descendants().any(|n| n.kind() == TokenType::Question));
        assert!(root.descendants().any(|n| n.kind() == TokenType::PatternVariableDef));
    }

    #[test]
    fn class_literals() {
        let tree = method_body("a = String.class; b = int.class; c = String[].class;");
        // The wrapper's own `class` keyword sits under CLASS_DEF.
        assert_eq!(
            tree.root()
                .descendants()
                .filter(|n| n.kind() == TokenType::LiteralClass)
                .filter(|n| n.parent().map(|p| p.kind()) == Some(TokenType::Dot))
                .count(),
            3
        );
    }

    #[test]
    fn bare_primitive_is_not_an_expression() {
        let err = parse_source("class A { void f() { x = int; } }").expect_err("should fail");
        let ParseError::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.found, ";");

        let tree = method_body("f = int[]::new; g = double.class;");
        assert!(tree
            .root()
            .descendants()
            .any(|n| n.kind() == TokenType::MethodRef));
    }

    #[test]
    fn text_block_parts() {
        let tree = method_body("String s = \"\"\"\n    hi\n    \"\"\";");
        let block = first(&tree, TokenType::TextBlockLiteralBegin);
        assert_eq!(
            kinds(block),
            vec![TokenType::TextBlockContent, TokenType::TextBlockLiteralEnd]
        );
        let end = block.last_child().expect("end");
        assert_eq!(end.text(), "\"\"\"");
    }
}
