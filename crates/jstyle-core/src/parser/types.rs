//! Types, type arguments, type parameters, modifiers and annotations.

use super::{PResult, Parser};
use crate::token_types::TokenType;

impl Parser<'_> {
    // ---- scanners -----------------------------------------------------

    /// Index past one annotation starting at `i`, if any.
    pub(super) fn scan_annotation(&self, i: usize) -> Option<usize> {
        if self.nth(i) != TokenType::At || self.nth(i + 1) != TokenType::Ident {
            return None;
        }
        let mut j = i + 2;
        while self.nth(j) == TokenType::Dot && self.nth(j + 1) == TokenType::Ident {
            j += 2;
        }
        if self.nth(j) == TokenType::LParen {
            j = self.matching_close(j, TokenType::LParen, TokenType::RParen)?;
        }
        Some(j)
    }

    /// Index past any run of annotations starting at `i`.
    pub(super) fn scan_annotations(&self, mut i: usize) -> usize {
        while let Some(next) = self.scan_annotation(i) {
            i = next;
        }
        i
    }

    /// Index past modifiers and annotations starting at `i`.
    pub(super) fn scan_modifiers(&self, mut i: usize) -> usize {
        loop {
            if let Some(next) = self.scan_annotation(i) {
                i = next;
            } else if self.nth(i).is_modifier() {
                i += 1;
            } else if self.non_sealed_at(i) {
                i += 3;
            } else if self.is_word(i, "sealed") && self.modifier_follows(i + 1) {
                i += 1;
            } else {
                return i;
            }
        }
    }

    fn non_sealed_at(&self, i: usize) -> bool {
        self.is_word(i, "non")
            && self.nth(i + 1) == TokenType::Minus
            && self.is_word(i + 2, "sealed")
            && self.adjacent(i)
            && self.adjacent(i + 1)
    }

    /// Whether the token at `i` continues a modifier list into a declaration.
    fn modifier_follows(&self, i: usize) -> bool {
        let kind = self.nth(i);
        kind.is_modifier()
            || matches!(
                kind,
                TokenType::LiteralClass | TokenType::LiteralInterface | TokenType::At
            )
            || self.is_word(i, "sealed")
            || self.non_sealed_at(i)
    }

    /// Index past a type starting at `i`: annotations, a primitive or a
    /// qualified class type with type arguments, then array dimensions.
    pub(super) fn scan_type(&self, i: usize) -> Option<usize> {
        let mut i = self.scan_annotations(i);
        let kind = self.nth(i);
        if kind.is_primitive() {
            i += 1;
        } else if kind == TokenType::Ident {
            i += 1;
            if self.nth(i) == TokenType::Lt {
                i = self.scan_type_arguments(i)?;
            }
            while self.nth(i) == TokenType::Dot {
                let next = self.scan_annotations(i + 1);
                if self.nth(next) != TokenType::Ident {
                    break;
                }
                i = next + 1;
                if self.nth(i) == TokenType::Lt {
                    i = self.scan_type_arguments(i)?;
                }
            }
        } else {
            return None;
        }
        loop {
            let next = self.scan_annotations(i);
            if self.nth(next) == TokenType::LBrack && self.nth(next + 1) == TokenType::RBrack {
                i = next + 2;
            } else {
                return Some(i);
            }
        }
    }

    /// Index past `<...>` starting at `i`.
    pub(super) fn scan_type_arguments(&self, i: usize) -> Option<usize> {
        if self.nth(i) != TokenType::Lt {
            return None;
        }
        let mut i = i + 1;
        if self.nth(i) == TokenType::Gt {
            return Some(i + 1);
        }
        loop {
            i = self.scan_annotations(i);
            if self.nth(i) == TokenType::Question {
                i += 1;
                if matches!(
                    self.nth(i),
                    TokenType::LiteralExtends | TokenType::LiteralSuper
                ) {
                    i = self.scan_type(i + 1)?;
                }
            } else {
                i = self.scan_type(i)?;
            }
            while self.nth(i) == TokenType::Band {
                i = self.scan_type(i + 1)?;
            }
            match self.nth(i) {
                TokenType::Comma => i += 1,
                TokenType::Gt => return Some(i + 1),
                _ => return None,
            }
        }
    }

    // ---- emitters -----------------------------------------------------

    /// `MODIFIERS` node, possibly empty.
    pub(super) fn modifiers(&mut self) -> PResult {
        self.start(TokenType::Modifiers);
        loop {
            let kind = self.peek();
            if kind == TokenType::At && self.nth(1) != TokenType::LiteralInterface {
                self.annotation()?;
            } else if kind.is_modifier() {
                self.bump();
            } else if self.non_sealed_at(0) {
                self.bump_fused(TokenType::LiteralNonSealed, 3);
            } else if self.at_word("sealed") && self.modifier_follows(1) {
                self.bump_as(TokenType::LiteralSealed);
            } else {
                break;
            }
        }
        self.finish();
        Ok(())
    }

    /// `ANNOTATIONS` node, possibly empty.
    pub(super) fn annotations_node(&mut self) -> PResult {
        self.start(TokenType::Annotations);
        self.annotation_run()?;
        self.finish();
        Ok(())
    }

    /// Bare annotations, e.g. type annotations.
    pub(super) fn annotation_run(&mut self) -> PResult {
        while self.at(TokenType::At) && self.nth(1) != TokenType::LiteralInterface {
            self.annotation()?;
        }
        Ok(())
    }

    pub(super) fn annotation(&mut self) -> PResult {
        self.start(TokenType::Annotation);
        self.expect(TokenType::At)?;
        self.qualified_name()?;
        if self.eat(TokenType::LParen) {
            if self.at(TokenType::Ident) && self.nth(1) == TokenType::Assign {
                self.member_value_pair()?;
                while self.eat(TokenType::Comma) {
                    self.member_value_pair()?;
                }
            } else if !self.at(TokenType::RParen) {
                self.element_value()?;
            }
            self.expect(TokenType::RParen)?;
        }
        self.finish();
        Ok(())
    }

    fn member_value_pair(&mut self) -> PResult {
        self.start(TokenType::AnnotationMemberValuePair);
        self.expect_ident()?;
        self.expect(TokenType::Assign)?;
        self.element_value()?;
        self.finish();
        Ok(())
    }

    pub(super) fn element_value(&mut self) -> PResult {
        self.nested(|p| {
            match p.peek() {
                TokenType::At => p.annotation(),
                TokenType::LCurly => {
                    p.start_anchored(TokenType::AnnotationArrayInit);
                    while !p.at(TokenType::RCurly) {
                        p.element_value()?;
                        if !p.eat(TokenType::Comma) {
                            break;
                        }
                    }
                    p.expect(TokenType::RCurly)?;
                    p.finish();
                    Ok(())
                }
                _ => p.conditional_expr(),
            }
        })
    }

    /// `TYPE` node.
    pub(super) fn type_node(&mut self) -> PResult {
        self.start(TokenType::Type);
        self.type_body()?;
        self.finish();
        Ok(())
    }

    /// The content of a type without the `TYPE` wrapper. Qualified names nest
    /// as `DOT` nodes and every `[]` wraps what precedes it in an
    /// `ARRAY_DECLARATOR`.
    pub(super) fn type_body(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        self.annotation_run()?;
        if self.peek().is_primitive() {
            self.bump();
        } else {
            self.expect_ident()?;
            self.type_arguments_opt()?;
            while self.at(TokenType::Dot)
                && self.nth(self.scan_annotations(1)) == TokenType::Ident
            {
                self.start_at(checkpoint, TokenType::Dot);
                self.anchor(1);
                self.annotation_run()?;
                self.expect_ident()?;
                self.type_arguments_opt()?;
                self.finish();
            }
        }
        self.dims(checkpoint)
    }

    /// `[]` pairs wrapping everything since `checkpoint`.
    pub(super) fn dims(&mut self, checkpoint: crate::tree::Checkpoint) -> PResult {
        loop {
            let next = self.scan_annotations(0);
            if self.nth(next) != TokenType::LBrack || self.nth(next + 1) != TokenType::RBrack {
                return Ok(());
            }
            self.annotation_run()?;
            self.start_at(checkpoint, TokenType::ArrayDeclarator);
            self.anchor(1);
            self.expect(TokenType::RBrack)?;
            self.finish();
        }
    }

    /// C-style `[]` pairs after a declarator name, as sibling
    /// `ARRAY_DECLARATOR` nodes of the name.
    pub(super) fn trailing_dims(&mut self) -> PResult {
        while self.at(TokenType::LBrack) && self.nth(1) == TokenType::RBrack {
            self.start_anchored(TokenType::ArrayDeclarator);
            self.expect(TokenType::RBrack)?;
            self.finish();
        }
        Ok(())
    }

    pub(super) fn type_arguments_opt(&mut self) -> PResult {
        if self.at(TokenType::Lt) {
            self.type_arguments()?;
        }
        Ok(())
    }

    pub(super) fn type_arguments(&mut self) -> PResult {
        self.nested(|p| {
            p.start(TokenType::TypeArguments);
            p.bump_as(TokenType::GenericStart);
            if !p.at(TokenType::Gt) {
                loop {
                    p.type_argument()?;
                    if !p.eat(TokenType::Comma) {
                        break;
                    }
                }
            }
            if !p.at(TokenType::Gt) {
                return Err(p.error(">"));
            }
            p.bump_as(TokenType::GenericEnd);
            p.finish();
            Ok(())
        })
    }

    fn type_argument(&mut self) -> PResult {
        self.start(TokenType::TypeArgument);
        self.annotation_run()?;
        if self.at(TokenType::Question) {
            self.bump_as(TokenType::WildcardType);
            match self.peek() {
                TokenType::LiteralExtends => {
                    self.start_anchored(TokenType::TypeUpperBounds);
                    self.bounds()?;
                    self.finish();
                }
                TokenType::LiteralSuper => {
                    self.start_anchored(TokenType::TypeLowerBounds);
                    self.type_body()?;
                    self.finish();
                }
                _ => {}
            }
        } else {
            self.type_body()?;
        }
        self.finish();
        Ok(())
    }

    /// `A & B & C` as a type followed by `TYPE_EXTENSION_AND` nodes.
    fn bounds(&mut self) -> PResult {
        self.type_body()?;
        while self.at(TokenType::Band) {
            self.start_anchored(TokenType::TypeExtensionAnd);
            self.type_body()?;
            self.finish();
        }
        Ok(())
    }

    pub(super) fn type_parameters_opt(&mut self) -> PResult {
        if !self.at(TokenType::Lt) {
            return Ok(());
        }
        self.start(TokenType::TypeParameters);
        self.bump_as(TokenType::GenericStart);
        loop {
            self.start(TokenType::TypeParameter);
            self.annotation_run()?;
            self.expect_ident()?;
            if self.at(TokenType::LiteralExtends) {
                self.start_anchored(TokenType::TypeUpperBounds);
                self.bounds()?;
                self.finish();
            }
            self.finish();
            if !self.eat(TokenType::Comma) {
                break;
            }
        }
        if !self.at(TokenType::Gt) {
            return Err(self.error(">"));
        }
        self.bump_as(TokenType::GenericEnd);
        self.finish();
        Ok(())
    }

    /// Comma separated class types, e.g. the body of `implements`.
    pub(super) fn type_list(&mut self) -> PResult {
        self.type_body()?;
        while self.eat(TokenType::Comma) {
            self.type_body()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse_source;
    use crate::token_types::TokenType;

    #[test]
    fn nested_generics_close_on_single_gt_tokens() {
        let tree = parse_source("class A { Map<String, List<Set<Integer>>> m; }").expect("parse");
        let ends = tree
            .root()
            .descendants()
            .filter(|n| n.kind() == TokenType::GenericEnd)
            .count();
        assert_eq!(ends, 3);
    }

    #[test]
    fn wildcard_bounds() {
        let tree =
            parse_source("class A { List<? extends Number> a; List<? super T> b; List<?> c; }")
                .expect("parse");
        let root = tree.root();
        let count = |kind| root.descendants().filter(|n| n.kind() == kind).count();
        assert_eq!(count(TokenType::WildcardType), 3);
        assert_eq!(count(TokenType::TypeUpperBounds), 1);
        assert_eq!(count(TokenType::TypeLowerBounds), 1);
    }

    #[test]
    fn sealed_and_non_sealed_modifiers() {
        let tree = parse_source(
            "sealed interface S permits A, B {}\nnon-sealed class A implements S {}\nfinal class B implements S {}",
        )
        .expect("parse");
        let root = tree.root();
        assert!(root.descendants().any(|n| n.kind() == TokenType::LiteralSealed));
        let non_sealed = root
            .descendants()
            .find(|n| n.kind() == TokenType::LiteralNonSealed)
            .expect("non-sealed");
        assert_eq!(non_sealed.text(), "non-sealed");
        assert!(root.descendants().any(|n| n.kind() == TokenType::PermitsClause));
    }

    #[test]
    fn annotations_with_values() {
        let tree = parse_source(
            "@SuppressWarnings({\"a\", \"b\"}) @Target(value = ElementType.TYPE, x = @B) class A {}",
        )
        .expect("parse");
        let root = tree.root();
        let count = |kind| root.descendants().filter(|n| n.kind() == kind).count();
        assert_eq!(count(TokenType::Annotation), 3);
        assert_eq!(count(TokenType::AnnotationArrayInit), 1);
        assert_eq!(count(TokenType::AnnotationMemberValuePair), 2);
    }
}
