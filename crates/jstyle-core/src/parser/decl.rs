//! Type declarations and their members.

use super::{Body, PResult, Parser};
use crate::token_types::TokenType;
use crate::tree::Checkpoint;

impl Parser<'_> {
    /// Whether a type declaration keyword follows the modifiers at `i`.
    pub(super) fn type_declaration_at(&self, i: usize) -> bool {
        match self.nth(i) {
            TokenType::LiteralClass | TokenType::LiteralInterface | TokenType::Enum => true,
            TokenType::At => self.nth(i + 1) == TokenType::LiteralInterface,
            TokenType::Ident => self.record_declaration_at(i),
            _ => false,
        }
    }

    fn record_declaration_at(&self, i: usize) -> bool {
        self.is_word(i, "record")
            && self.nth(i + 1) == TokenType::Ident
            && matches!(self.nth(i + 2), TokenType::LParen | TokenType::Lt)
    }

    /// One member of a class-like body, or a top-level declaration.
    pub(super) fn member(&mut self, body: Body) -> PResult {
        match self.peek() {
            TokenType::Semi => {
                self.bump();
                return Ok(());
            }
            TokenType::LiteralStatic if self.nth(1) == TokenType::LCurly => {
                self.start_anchored(TokenType::StaticInit);
                self.block()?;
                self.finish();
                return Ok(());
            }
            TokenType::LCurly => {
                self.start(TokenType::InstanceInit);
                self.block()?;
                self.finish();
                return Ok(());
            }
            _ => {}
        }

        let checkpoint = self.checkpoint();
        self.modifiers()?;

        if self.type_declaration_at(0) {
            return self.type_declaration(checkpoint);
        }

        self.type_parameters_opt()?;
        if self.at(TokenType::Ident) && self.nth(1) == TokenType::LParen {
            return self.constructor(checkpoint);
        }
        if body == Body::Record && self.at(TokenType::Ident) && self.nth(1) == TokenType::LCurly {
            self.start_at(checkpoint, TokenType::CompactCtorDef);
            self.expect_ident()?;
            self.block()?;
            self.finish();
            return Ok(());
        }

        if self.scan_type(0).is_none() {
            return Err(self.error("member declaration"));
        }
        self.type_node()?;
        if self.at(TokenType::Ident) && self.nth(1) == TokenType::LParen {
            if body == Body::Annotation {
                self.annotation_field(checkpoint)
            } else {
                self.method(checkpoint)
            }
        } else {
            self.start_at(checkpoint, TokenType::VariableDef);
            self.variable_declarators(true)
        }
    }

    /// A class, interface, enum, record or annotation type declaration whose
    /// modifiers were emitted after `checkpoint`.
    pub(super) fn type_declaration(&mut self, checkpoint: Checkpoint) -> PResult {
        match self.peek() {
            TokenType::LiteralClass => {
                self.start_at(checkpoint, TokenType::ClassDef);
                self.bump();
                self.expect_ident()?;
                self.type_parameters_opt()?;
                if self.at(TokenType::LiteralExtends) {
                    self.start_anchored(TokenType::ExtendsClause);
                    self.type_body()?;
                    self.finish();
                }
                self.implements_opt()?;
                self.permits_opt()?;
                self.class_body(Body::Class)?;
            }
            TokenType::LiteralInterface => {
                self.start_at(checkpoint, TokenType::InterfaceDef);
                self.bump();
                self.expect_ident()?;
                self.type_parameters_opt()?;
                if self.at(TokenType::LiteralExtends) {
                    self.start_anchored(TokenType::ExtendsClause);
                    self.type_list()?;
                    self.finish();
                }
                self.permits_opt()?;
                self.class_body(Body::Interface)?;
            }
            TokenType::Enum => {
                self.start_at(checkpoint, TokenType::EnumDef);
                self.bump();
                self.expect_ident()?;
                self.implements_opt()?;
                self.enum_body()?;
            }
            TokenType::At => {
                self.start_at(checkpoint, TokenType::AnnotationDef);
                self.bump();
                self.expect(TokenType::LiteralInterface)?;
                self.expect_ident()?;
                self.class_body(Body::Annotation)?;
            }
            _ => {
                self.start_at(checkpoint, TokenType::RecordDef);
                self.bump_as(TokenType::LiteralRecord);
                self.expect_ident()?;
                self.type_parameters_opt()?;
                self.expect(TokenType::LParen)?;
                self.record_components()?;
                self.expect(TokenType::RParen)?;
                self.implements_opt()?;
                self.class_body(Body::Record)?;
            }
        }
        self.finish();
        Ok(())
    }

    fn implements_opt(&mut self) -> PResult {
        if self.at(TokenType::LiteralImplements) {
            self.start_anchored(TokenType::ImplementsClause);
            self.type_list()?;
            self.finish();
        }
        Ok(())
    }

    fn permits_opt(&mut self) -> PResult {
        if self.at_word("permits") {
            self.start_anchored(TokenType::PermitsClause);
            self.type_list()?;
            self.finish();
        }
        Ok(())
    }

    /// `OBJBLOCK` with braces and members.
    pub(super) fn class_body(&mut self, body: Body) -> PResult {
        self.nested(|p| {
            p.start(TokenType::ObjBlock);
            p.expect(TokenType::LCurly)?;
            while !p.at(TokenType::RCurly) {
                if p.at(TokenType::Eof) {
                    return Err(p.error("}"));
                }
                p.member(body)?;
            }
            p.bump();
            p.finish();
            Ok(())
        })
    }

    fn enum_body(&mut self) -> PResult {
        self.start(TokenType::ObjBlock);
        self.expect(TokenType::LCurly)?;
        while !matches!(
            self.peek(),
            TokenType::Semi | TokenType::RCurly | TokenType::Eof
        ) {
            self.enum_constant()?;
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        if self.eat(TokenType::Semi) {
            while !self.at(TokenType::RCurly) {
                if self.at(TokenType::Eof) {
                    return Err(self.error("}"));
                }
                self.member(Body::Class)?;
            }
        }
        self.expect(TokenType::RCurly)?;
        self.finish();
        Ok(())
    }

    fn enum_constant(&mut self) -> PResult {
        self.start(TokenType::EnumConstantDef);
        self.annotations_node()?;
        self.expect_ident()?;
        if self.eat(TokenType::LParen) {
            self.argument_list()?;
            self.expect(TokenType::RParen)?;
        }
        if self.at(TokenType::LCurly) {
            self.class_body(Body::Class)?;
        }
        self.finish();
        Ok(())
    }

    fn record_components(&mut self) -> PResult {
        self.start(TokenType::RecordComponents);
        while !self.at(TokenType::RParen) {
            self.start(TokenType::RecordComponentDef);
            self.annotations_node()?;
            self.type_node()?;
            self.ellipsis_opt()?;
            self.expect_ident()?;
            self.finish();
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.finish();
        Ok(())
    }

    fn constructor(&mut self, checkpoint: Checkpoint) -> PResult {
        self.start_at(checkpoint, TokenType::CtorDef);
        self.expect_ident()?;
        self.formal_parameters()?;
        self.throws_opt()?;
        if !self.eat(TokenType::Semi) {
            self.block()?;
        }
        self.finish();
        Ok(())
    }

    fn method(&mut self, checkpoint: Checkpoint) -> PResult {
        self.start_at(checkpoint, TokenType::MethodDef);
        self.expect_ident()?;
        self.formal_parameters()?;
        self.trailing_dims()?;
        self.throws_opt()?;
        if !self.eat(TokenType::Semi) {
            self.block()?;
        }
        self.finish();
        Ok(())
    }

    fn annotation_field(&mut self, checkpoint: Checkpoint) -> PResult {
        self.start_at(checkpoint, TokenType::AnnotationFieldDef);
        self.expect_ident()?;
        self.expect(TokenType::LParen)?;
        self.expect(TokenType::RParen)?;
        self.trailing_dims()?;
        if self.at(TokenType::LiteralDefault) {
            self.start_anchored(TokenType::LiteralDefault);
            self.element_value()?;
            self.finish();
        }
        self.expect(TokenType::Semi)?;
        self.finish();
        Ok(())
    }

    fn throws_opt(&mut self) -> PResult {
        if self.at(TokenType::LiteralThrows) {
            self.start_anchored(TokenType::LiteralThrows);
            self.qualified_name()?;
            while self.eat(TokenType::Comma) {
                self.qualified_name()?;
            }
            self.finish();
        }
        Ok(())
    }

    /// `( PARAMETERS )`.
    pub(super) fn formal_parameters(&mut self) -> PResult {
        self.expect(TokenType::LParen)?;
        self.start(TokenType::Parameters);
        while !self.at(TokenType::RParen) {
            self.parameter()?;
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        self.finish();
        self.expect(TokenType::RParen)
    }

    pub(super) fn parameter(&mut self) -> PResult {
        self.start(TokenType::ParameterDef);
        self.modifiers()?;
        self.type_node()?;
        self.ellipsis_opt()?;
        if self.at(TokenType::LiteralThis) {
            self.bump();
        } else {
            self.qualified_receiver_or_name()?;
        }
        self.trailing_dims()?;
        self.finish();
        Ok(())
    }

    /// The `...` of a variadic parameter, after any annotations on it.
    fn ellipsis_opt(&mut self) -> PResult {
        if self.nth(self.scan_annotations(0)) == TokenType::Ellipsis {
            self.annotation_run()?;
            self.bump();
        }
        Ok(())
    }

    /// A parameter name, or the `Outer.this` receiver form.
    fn qualified_receiver_or_name(&mut self) -> PResult {
        if self.nth(1) == TokenType::Dot && self.nth(2) == TokenType::LiteralThis {
            let checkpoint = self.checkpoint();
            self.expect_ident()?;
            self.start_at(checkpoint, TokenType::Dot);
            self.anchor(1);
            self.bump();
            self.finish();
            Ok(())
        } else {
            self.expect_ident()
        }
    }

    /// Declarators after the type of a field or local variable. The first
    /// `VARIABLE_DEF` is already open and owns the modifiers and type; later
    /// declarators get empty ones. Fields keep their `;`/`,` inside the
    /// definition, locals leave them as following siblings.
    pub(super) fn variable_declarators(&mut self, field: bool) -> PResult {
        loop {
            self.expect_ident()?;
            self.trailing_dims()?;
            if self.at(TokenType::Assign) {
                self.start_anchored(TokenType::Assign);
                self.variable_initializer()?;
                self.finish();
            }
            let more = self.at(TokenType::Comma);
            if field {
                if more {
                    self.bump();
                } else {
                    self.expect(TokenType::Semi)?;
                }
                self.finish();
            } else {
                self.finish();
                if more {
                    self.bump();
                }
            }
            if !more {
                return Ok(());
            }
            self.start(TokenType::VariableDef);
            self.empty(TokenType::Modifiers);
            self.empty(TokenType::Type);
        }
    }

    pub(super) fn variable_initializer(&mut self) -> PResult {
        if self.at(TokenType::LCurly) {
            self.array_initializer()
        } else {
            self.expr()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_source;
    use crate::token_types::TokenType;
    use crate::tree::Node;

    fn kinds(node: Node<'_, TokenType>) -> Vec<TokenType> {
        node.children().map(|c| c.kind()).collect()
    }

    #[test]
    fn method_shape() {
        let tree = parse_source("class A { public <T> int[] f(final T a, String... b) throws E { return 1; } }")
            .expect("parse");
        let method = tree
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::MethodDef)
            .expect("method");
        assert_eq!(
            kinds(method),
            vec![
                TokenType::Modifiers,
                TokenType::TypeParameters,
                TokenType::Type,
                TokenType::Ident,
                TokenType::LParen,
                TokenType::Parameters,
                TokenType::RParen,
                TokenType::LiteralThrows,
                TokenType::Slist,
            ]
        );
        let params = method.find_first_child(TokenType::Parameters).expect("params");
        assert_eq!(params.child_count(), 3);
    }

    #[test]
    fn annotated_variadic_parameter() {
        let tree = parse_source(
            "class A { void g(int @Ann ... b) {} }\nrecord R(String @NonNull @Size(1) ... parts) {}\n",
        )
        .expect("parse");
        let param = tree
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::ParameterDef)
            .expect("parameter");
        assert_eq!(
            kinds(param),
            vec![
                TokenType::Modifiers,
                TokenType::Type,
                TokenType::Annotation,
                TokenType::Ellipsis,
                TokenType::Ident,
            ]
        );
        let component = tree
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::RecordComponentDef)
            .expect("component");
        assert_eq!(
            component.children().filter(|n| n.kind() == TokenType::Annotation).count(),
            2
        );

        assert!(parse_source("class A { void g(int @Ann b) {} }").is_err());
    }

    #[test]
    fn field_declarators_split_into_definitions() {
        let tree = parse_source("class A { int a = 1, b[], c; }").expect("parse");
        let object = tree
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::ObjBlock)
            .expect("body");
        let defs: Vec<_> = object
            .children()
            .filter(|n| n.kind() == TokenType::VariableDef)
            .collect();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].last_child().map(|n| n.kind()), Some(TokenType::Comma));
        assert_eq!(defs[2].last_child().map(|n| n.kind()), Some(TokenType::Semi));
        assert!(defs[1].has_child(TokenType::ArrayDeclarator));
    }

    #[test]
    fn enum_with_bodies_and_members() {
        let tree = parse_source(
            "enum E implements I { A(1) { void f() {} }, B(2), ; private final int v; E(int v) { this.v = v; } }",
        )
        .expect("parse");
        let root = tree.root();
        let count = |kind| root.descendants().filter(|n| n.kind() == kind).count();
        assert_eq!(count(TokenType::EnumConstantDef), 2);
        assert_eq!(count(TokenType::CtorDef), 1);
        assert_eq!(count(TokenType::MethodDef), 1);
    }

    #[test]
    fn record_with_compact_constructor() {
        let tree = parse_source(
            "record P<T>(int x, T... rest) implements Q { P { if (x < 0) throw new E(); } static int z() { return 0; } }",
        )
        .expect("parse");
        let root = tree.root();
        let record = root
            .descendants()
            .find(|n| n.kind() == TokenType::RecordDef)
            .expect("record");
        assert!(record.has_child(TokenType::LiteralRecord));
        assert!(record.has_child(TokenType::RecordComponents));
        assert!(root.descendants().any(|n| n.kind() == TokenType::CompactCtorDef));
    }

    #[test]
    fn annotation_type_with_defaults() {
        let tree = parse_source("@interface Tag { String value() default \"\"; int[] n() default {1, 2}; }")
            .expect("parse");
        let root = tree.root();
        assert_eq!(
            root.descendants()
                .filter(|n| n.kind() == TokenType::AnnotationFieldDef)
                .count(),
            2
        );
    }

    #[test]
    fn compact_source_file_members() {
        let tree = parse_source("void main() { System.out.println(\"hi\"); }\nint x = 3;\n")
            .expect("parse");
        assert_eq!(
            kinds(tree.root()),
            vec![TokenType::MethodDef, TokenType::VariableDef]
        );
    }

    #[test]
    fn initializers() {
        let tree = parse_source("class A { static { x = 1; } { y = 2; } }").expect("parse");
        let root = tree.root();
        assert!(root.descendants().any(|n| n.kind() == TokenType::StaticInit));
        assert!(root.descendants().any(|n| n.kind() == TokenType::InstanceInit));
    }
}
