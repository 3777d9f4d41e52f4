//! Recursive-descent parser producing the Java syntax tree.
//!
//! The parser walks the code tokens of a lexed file and drives a
//! [`TreeBuilder`]. Comments are not part of the grammar: before each code
//! token is consumed, the comments that precede it are emitted into the node
//! currently open, so every comment ends up in the tree in source order.
//!
//! # Disambiguation rules
//!
//! All lookahead is done by side-effect-free scanners over the code tokens
//! (`scan_type`, `scan_type_arguments`, `scan_annotation`, `matching_close`);
//! the builder is only touched once a production is chosen.
//!
//! | Situation | Rule |
//! |-----------|------|
//! | `>` `>` / `>` `=` | Always separate tokens. In operator position, byte-adjacent runs are fused into `SR`, `BSR`, `GE`, `SR_ASSIGN`, `BSR_ASSIGN`; inside type arguments each `>` closes one level. |
//! | `(` in expression start | Lambda if the matching `)` is followed by `->`. Else a cast if a type (with optional `& Type` bounds) is followed by `)` and then either the type is primitive, or the next token can start an operand that is not `+`/`-`. Else a parenthesized expression. |
//! | `Ident ->` | Lambda with a single inferred parameter (not in case labels, which parse a conditional expression). |
//! | `Name <` in expression | A type only when `scan_type` succeeds and the type is followed by `::` (generic method reference). Otherwise `<` is a comparison. |
//! | Statement start | Local variable declaration iff modifiers/annotations lead, or `scan_type` succeeds and is followed by an identifier. `yield` followed by an expression start is a yield statement; `Ident :` is a labeled statement; `record Ident (`/`<` is a local record. |
//! | `case` item / `instanceof` operand | Type pattern iff (modifiers) type then identifier; record (deconstruction) pattern iff type then `(`; `_` inside a record pattern is an unnamed pattern; `null` and `default` are labels; anything else is a constant expression. |
//! | Case terminator | `:` keeps the label in a `CASE_GROUP`; `->` makes a `SWITCH_RULE`. A `when` after a pattern makes a guarded `PATTERN_DEF`. |
//! | Class body member | `static {` / `{` initializers; `Ident (` constructor; `Ident {` compact constructor inside records; type followed by `Ident (` method; otherwise field. |
//! | Compilation unit | Package, imports, `[open] module name {` module declaration; members that are not type declarations are accepted at top level (compact source files). |
//! | Contextual keywords | `record`, `sealed`, `non-sealed`, `permits`, `yield`, `when`, `open`, `module` and module directives are identifiers relabelled only in the positions above. |

mod decl;
mod expr;
mod pattern;
mod stmt;
mod types;

use std::sync::Arc;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use tracing::debug;

use crate::lexer::{advance_position, tokenize, LexicalError, Span, Token};
use crate::token_types::TokenType;
use crate::tree::{Anchor, Checkpoint, Tree, TreeBuilder};

/// The syntax tree of one Java source file.
pub type SyntaxTree = Tree<TokenType>;

/// The token stream does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("expected {expected} but found {found:?} at line {line}, column {column}")]
#[diagnostic(code(jstyle::syntax))]
pub struct SyntaxError {
    /// 1-based line of the offending token.
    pub line: usize,
    /// 0-based column of the offending token.
    pub column: usize,
    /// What the grammar allowed here.
    pub expected: String,
    /// Text of the offending token, `<EOF>` at end of input.
    pub found: String,
    /// Source range of the offending token.
    #[label("expected {expected}")]
    pub span: SourceSpan,
}

/// Either stage of turning text into a tree failed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// Malformed token.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexicalError),
    /// Grammar mismatch.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

type PResult<T = ()> = Result<T, SyntaxError>;

/// Deepest accepted nesting of expressions, statements, bodies, type
/// arguments, annotation values and patterns. Deeper input is a syntax error
/// rather than a stack overflow that would take the whole batch down.
pub const MAX_NESTING: usize = 256;

/// Builds the syntax tree for an already tokenized file.
///
/// `tokens` must come from [`tokenize`] over the same `source`.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token the grammar cannot accept.
pub fn parse(source: impl Into<Arc<str>>, tokens: &[Token]) -> Result<SyntaxTree, SyntaxError> {
    let mut parser = Parser::new(source.into(), tokens);
    parser.compilation_unit()?;
    let tree = parser.builder.finish();
    debug!(nodes = tree.len(), "parsed compilation unit");
    Ok(tree)
}

/// Tokenizes and parses a source text.
///
/// # Errors
///
/// Returns the lexical or syntax error that stopped the pipeline.
pub fn parse_source(source: &str) -> Result<SyntaxTree, ParseError> {
    let tokens = tokenize(source)?;
    Ok(parse(source, &tokens)?)
}

/// Contexts whose member grammar differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    Class,
    Interface,
    Record,
    Annotation,
    TopLevel,
}

struct Parser<'a> {
    source: Arc<str>,
    tokens: &'a [Token],
    /// Indices into `tokens` of every code token; the last one is EOF.
    code: Vec<usize>,
    pos: usize,
    /// Every token before this index has been emitted or skipped.
    emitted: usize,
    /// Open guarded recursion levels.
    depth: usize,
    builder: TreeBuilder<TokenType>,
}

impl<'a> Parser<'a> {
    fn new(source: Arc<str>, tokens: &'a [Token]) -> Self {
        let mut code: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| i)
            .collect();
        if code.last().map_or(true, |&i| tokens[i].kind != TokenType::Eof) {
            code.push(tokens.len());
        }
        Self {
            builder: TreeBuilder::new(Arc::clone(&source)),
            source,
            tokens,
            code,
            pos: 0,
            emitted: 0,
            depth: 0,
        }
    }

    // ---- token access -------------------------------------------------

    fn token(&self, n: usize) -> Token {
        let index = self
            .code
            .get(self.pos + n)
            .or_else(|| self.code.last())
            .copied()
            .unwrap_or(0);
        self.tokens.get(index).copied().unwrap_or(Token {
            kind: TokenType::Eof,
            span: Span::new(self.source.len(), self.source.len()),
            line: 1,
            column: 0,
        })
    }

    fn nth(&self, n: usize) -> TokenType {
        self.token(n).kind
    }

    fn peek(&self) -> TokenType {
        self.nth(0)
    }

    fn at(&self, kind: TokenType) -> bool {
        self.peek() == kind
    }

    fn text(&self, n: usize) -> &str {
        let span = self.token(n).span;
        &self.source[span.start..span.end]
    }

    /// Whether code token `n` is the identifier `word`.
    fn is_word(&self, n: usize, word: &str) -> bool {
        self.nth(n) == TokenType::Ident && self.text(n) == word
    }

    fn at_word(&self, word: &str) -> bool {
        self.is_word(0, word)
    }

    /// Whether code tokens `n` and `n + 1` touch with nothing in between.
    fn adjacent(&self, n: usize) -> bool {
        self.token(n).span.end == self.token(n + 1).span.start
    }

    fn current_anchor(&self) -> Anchor {
        self.token(0).into()
    }

    // ---- tree emission ------------------------------------------------

    /// Emits the comments lying before the current code token.
    fn flush_comments(&mut self) {
        let upto = self.code.get(self.pos).copied().unwrap_or(self.tokens.len());
        while self.emitted < upto {
            let token = self.tokens[self.emitted];
            self.emitted += 1;
            match token.kind {
                TokenType::SingleLineComment => self.emit_line_comment(token),
                TokenType::BlockCommentBegin => self.emit_block_comment(token),
                _ => {}
            }
        }
    }

    fn emit_line_comment(&mut self, token: Token) {
        let start = token.span.start;
        let (line, column) = advance_position(token.line, token.column, "//");
        self.builder.token_with_parts(
            TokenType::SingleLineComment,
            Anchor {
                span: Span::new(start, start + 2),
                line: token.line,
                column: token.column,
            },
            &[(
                TokenType::CommentContent,
                Anchor {
                    span: Span::new(start + 2, token.span.end),
                    line,
                    column,
                },
            )],
        );
    }

    fn emit_block_comment(&mut self, token: Token) {
        self.emit_delimited(
            token,
            2,
            [
                TokenType::BlockCommentBegin,
                TokenType::CommentContent,
                TokenType::BlockCommentEnd,
            ],
        );
    }

    /// Emits a token made of an opening delimiter, content and a closing
    /// delimiter of the same width; the parts become children of the opener.
    fn emit_delimited(&mut self, token: Token, width: usize, kinds: [TokenType; 3]) {
        let Span { start, end } = token.span;
        let close = end.saturating_sub(width).max(start + width);
        let text = &self.source[start..end];
        let (content_line, content_column) =
            advance_position(token.line, token.column, &text[..width]);
        let (end_line, end_column) =
            advance_position(content_line, content_column, &self.source[start + width..close]);
        self.builder.token_with_parts(
            kinds[0],
            Anchor {
                span: Span::new(start, start + width),
                line: token.line,
                column: token.column,
            },
            &[
                (
                    kinds[1],
                    Anchor {
                        span: Span::new(start + width, close),
                        line: content_line,
                        column: content_column,
                    },
                ),
                (
                    kinds[2],
                    Anchor {
                        span: Span::new(close, end),
                        line: end_line,
                        column: end_column,
                    },
                ),
            ],
        );
    }

    /// Moves past `count` code tokens; trivia after the last one stays pending.
    fn advance(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(&index) = self.code.get(self.pos + count - 1) {
            self.emitted = self.emitted.max(index + 1).min(self.tokens.len());
        }
        self.pos = (self.pos + count).min(self.code.len().saturating_sub(1));
    }

    /// Consumes the current token as a leaf of the given kind.
    fn bump_as(&mut self, kind: TokenType) {
        self.flush_comments();
        let token = self.token(0);
        if token.kind == TokenType::TextBlockLiteralBegin {
            self.emit_delimited(
                token,
                3,
                [
                    TokenType::TextBlockLiteralBegin,
                    TokenType::TextBlockContent,
                    TokenType::TextBlockLiteralEnd,
                ],
            );
        } else {
            self.builder.token(kind, token.into());
        }
        self.advance(1);
    }

    fn bump(&mut self) {
        let kind = self.peek();
        self.bump_as(kind);
    }

    /// Consumes `count` adjacent tokens as one leaf.
    fn bump_fused(&mut self, kind: TokenType, count: usize) {
        self.flush_comments();
        let anchor = self.fused_anchor(count);
        self.builder.token(kind, anchor);
        self.advance(count);
    }

    fn fused_anchor(&self, count: usize) -> Anchor {
        let first = self.token(0);
        let last = self.token(count.saturating_sub(1));
        Anchor {
            span: Span::new(first.span.start, last.span.end),
            line: first.line,
            column: first.column,
        }
    }

    fn eat(&mut self, kind: TokenType) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenType) -> PResult {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(kind.name()))
        }
    }

    fn expect_ident(&mut self) -> PResult {
        self.expect(TokenType::Ident)
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn start(&mut self, kind: TokenType) {
        let fallback = self.current_anchor();
        self.builder.start_node(kind, fallback);
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: TokenType) {
        let fallback = self.current_anchor();
        self.builder.start_node_at(checkpoint, kind, fallback);
    }

    /// Consumes the current token (or `count` fused tokens) as the own text
    /// of the innermost open node.
    fn anchor(&mut self, count: usize) {
        self.flush_comments();
        let anchor = self.fused_anchor(count);
        self.builder.anchor(anchor);
        self.advance(count);
    }

    /// Opens a node whose own text is the current token.
    fn start_anchored(&mut self, kind: TokenType) {
        self.flush_comments();
        self.start(kind);
        self.anchor(1);
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    /// Opens and closes an empty node.
    fn empty(&mut self, kind: TokenType) {
        self.start(kind);
        self.finish();
    }

    fn error(&self, expected: &str) -> SyntaxError {
        let token = self.token(0);
        let found = if token.kind == TokenType::Eof {
            "<EOF>".to_string()
        } else {
            self.text(0).to_string()
        };
        SyntaxError {
            line: token.line,
            column: token.column,
            expected: expected.to_string(),
            found,
            span: token.span.into(),
        }
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(&format!("at most {MAX_NESTING} nesting levels")));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ---- scanners -----------------------------------------------------

    /// Index just past the bracket matching the opener at `n`.
    fn matching_close(&self, n: usize, open: TokenType, close: TokenType) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = n;
        loop {
            match self.nth(i) {
                TokenType::Eof => return None,
                k if k == open => depth += 1,
                k if k == close => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Whether a lambda expression starts at the current token.
    fn lambda_ahead(&self) -> bool {
        match self.peek() {
            TokenType::Ident => self.nth(1) == TokenType::Lambda,
            TokenType::LParen => self
                .matching_close(0, TokenType::LParen, TokenType::RParen)
                .is_some_and(|end| self.nth(end) == TokenType::Lambda),
            _ => false,
        }
    }

    // ---- compilation unit -----------------------------------------------

    fn compilation_unit(&mut self) -> PResult {
        self.start(TokenType::CompilationUnit);

        let after_annotations = self.scan_annotations(0);
        if self.nth(after_annotations) == TokenType::LiteralPackage {
            self.package_declaration()?;
        }

        loop {
            match self.peek() {
                TokenType::LiteralImport => self.import_declaration()?,
                TokenType::Semi => self.bump(),
                _ => break,
            }
        }

        if self.module_ahead() {
            self.module_declaration()?;
        }

        while !self.at(TokenType::Eof) {
            self.member(Body::TopLevel)?;
        }

        self.flush_comments();
        self.finish();
        Ok(())
    }

    fn package_declaration(&mut self) -> PResult {
        self.start(TokenType::PackageDef);
        self.annotations_node()?;
        self.anchor(1);
        self.qualified_name()?;
        self.expect(TokenType::Semi)?;
        self.finish();
        Ok(())
    }

    fn import_declaration(&mut self) -> PResult {
        self.start_anchored(TokenType::Import);
        if self.at(TokenType::LiteralStatic) {
            self.builder.relabel(TokenType::StaticImport);
            self.bump();
        }
        let checkpoint = self.checkpoint();
        self.expect_ident()?;
        while self.at(TokenType::Dot) {
            self.start_at(checkpoint, TokenType::Dot);
            self.anchor(1);
            if !self.eat(TokenType::Star) {
                self.expect_ident()?;
            }
            self.finish();
        }
        self.expect(TokenType::Semi)?;
        self.finish();
        Ok(())
    }

    /// A dotted name: `IDENT` or nested `DOT` nodes.
    fn qualified_name(&mut self) -> PResult {
        let checkpoint = self.checkpoint();
        self.expect_ident()?;
        while self.at(TokenType::Dot) && self.nth(1) == TokenType::Ident {
            self.start_at(checkpoint, TokenType::Dot);
            self.anchor(1);
            self.bump();
            self.finish();
        }
        Ok(())
    }

    fn module_ahead(&self) -> bool {
        let mut i = self.scan_annotations(0);
        if self.is_word(i, "open") {
            i += 1;
        }
        self.is_word(i, "module")
            && self.nth(i + 1) == TokenType::Ident
            && matches!(self.nth(i + 2), TokenType::LCurly | TokenType::Dot)
    }

    fn module_declaration(&mut self) -> PResult {
        self.start(TokenType::ModuleDef);
        self.annotations_node()?;
        if self.at_word("open") {
            self.bump_as(TokenType::LiteralOpen);
        }
        self.bump_as(TokenType::LiteralModule);
        self.qualified_name()?;
        self.start(TokenType::ObjBlock);
        self.expect(TokenType::LCurly)?;
        while !self.at(TokenType::RCurly) && !self.at(TokenType::Eof) {
            self.module_directive()?;
        }
        self.expect(TokenType::RCurly)?;
        self.finish();
        self.finish();
        Ok(())
    }

    fn module_directive(&mut self) -> PResult {
        let kind = match self.text(0) {
            "requires" => TokenType::RequiresDirective,
            "exports" => TokenType::ExportsDirective,
            "opens" => TokenType::OpensDirective,
            "uses" => TokenType::UsesDirective,
            "provides" => TokenType::ProvidesDirective,
            _ => return Err(self.error("module directive")),
        };
        if !self.at(TokenType::Ident) {
            return Err(self.error("module directive"));
        }
        self.start_anchored(kind);
        match kind {
            TokenType::RequiresDirective => {
                loop {
                    if self.at_word("transitive") && self.nth(1) != TokenType::Semi {
                        self.bump_as(TokenType::LiteralTransitive);
                    } else if !self.eat(TokenType::LiteralStatic) {
                        break;
                    }
                }
                self.qualified_name()?;
            }
            TokenType::ExportsDirective | TokenType::OpensDirective => {
                self.qualified_name()?;
                if self.at_word("to") {
                    self.bump_as(TokenType::LiteralTo);
                    self.qualified_name_list()?;
                }
            }
            TokenType::UsesDirective => self.qualified_name()?,
            _ => {
                self.qualified_name()?;
                if !self.at_word("with") {
                    return Err(self.error("with"));
                }
                self.bump_as(TokenType::LiteralWith);
                self.qualified_name_list()?;
            }
        }
        self.expect(TokenType::Semi)?;
        self.finish();
        Ok(())
    }

    fn qualified_name_list(&mut self) -> PResult {
        self.qualified_name()?;
        while self.eat(TokenType::Comma) {
            self.qualified_name()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    fn tree(source: &str) -> SyntaxTree {
        parse_source(source).expect("should parse")
    }

    fn kinds_of(node: Node<'_, TokenType>) -> Vec<TokenType> {
        node.children().map(|c| c.kind()).collect()
    }

    fn find(tree: &SyntaxTree, kind: TokenType) -> Node<'_, TokenType> {
        tree.root()
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} node"))
    }

    fn count(tree: &SyntaxTree, kind: TokenType) -> usize {
        tree.root().descendants().filter(|n| n.kind() == kind).count()
    }

    #[test]
    fn empty_file_is_a_bare_compilation_unit() {
        let tree = tree("");
        assert_eq!(tree.root().kind(), TokenType::CompilationUnit);
        assert_eq!(tree.root().child_count(), 0);
    }

    #[test]
    fn package_and_imports() {
        let tree = tree("package a.b;\nimport java.util.*;\nimport static java.lang.Math.max;\n");
        let root = tree.root();
        assert_eq!(
            kinds_of(root),
            vec![TokenType::PackageDef, TokenType::Import, TokenType::StaticImport]
        );
        let package = find(&tree, TokenType::PackageDef);
        assert_eq!(package.text(), "package");
        assert_eq!((package.line(), package.column()), (1, 0));
        assert_eq!(count(&tree, TokenType::Star), 1);
    }

    #[test]
    fn class_shape_follows_declaration_order() {
        let tree = tree("public final class A<T> extends B implements C, D { }");
        let class = find(&tree, TokenType::ClassDef);
        assert_eq!(
            kinds_of(class),
            vec![
                TokenType::Modifiers,
                TokenType::LiteralClass,
                TokenType::Ident,
                TokenType::TypeParameters,
                TokenType::ExtendsClause,
                TokenType::ImplementsClause,
                TokenType::ObjBlock,
            ]
        );
        assert_eq!((class.line(), class.column()), (1, 0));
    }

    #[test]
    fn comments_are_kept_as_nodes() {
        let source = "// header\npackage p;\n/** doc */\nclass A {\n  int x; /* trailing */\n}\n// tail\n";
        let tree = tree(source);
        assert_eq!(count(&tree, TokenType::SingleLineComment), 2);
        assert_eq!(count(&tree, TokenType::BlockCommentBegin), 2);
        let doc = tree
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::BlockCommentBegin)
            .expect("doc comment");
        assert_eq!(doc.parent().map(|p| p.kind()), Some(TokenType::ClassDef));
        let content = doc.find_first_child(TokenType::CommentContent).expect("content");
        assert_eq!(content.text(), "* doc ");
        let end = doc.find_first_child(TokenType::BlockCommentEnd).expect("end");
        assert_eq!((end.line(), end.column()), (3, 8));
        let tail = tree.root().last_child().expect("tail comment");
        assert_eq!(tail.kind(), TokenType::SingleLineComment);
    }

    #[test]
    fn class_position_ignores_leading_comment() {
        let tree = tree("/** doc */\nclass A {}\n");
        let class = find(&tree, TokenType::ClassDef);
        assert_eq!((class.line(), class.column()), (2, 0));
    }

    #[test]
    fn module_declaration() {
        let tree = tree(
            "open module com.example {\n requires transitive java.sql;\n exports a.b to c, d;\n uses x.Y;\n provides x.Y with x.Z;\n}\n",
        );
        let module = find(&tree, TokenType::ModuleDef);
        assert!(module.has_child(TokenType::LiteralOpen));
        assert_eq!(count(&tree, TokenType::RequiresDirective), 1);
        assert_eq!(count(&tree, TokenType::LiteralTransitive), 1);
        assert_eq!(count(&tree, TokenType::ExportsDirective), 1);
        assert_eq!(count(&tree, TokenType::ProvidesDirective), 1);
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = parse_source("class A {\n  void f() {\n    int = 3;\n  }\n}\n")
            .expect_err("should fail");
        let ParseError::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.line, 3);
        assert_eq!(err.found, "=");
    }

    /// Runs `f` on a thread with room for the deepest accepted nesting.
    fn with_big_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(64 << 20)
            .spawn(f)
            .expect("spawn")
            .join()
            .expect("join")
    }

    #[test]
    fn nesting_past_the_limit_is_a_syntax_error() {
        let err = with_big_stack(|| {
            let depth = 20_000;
            let source = format!("class A {{ int x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
            parse_source(&source).expect_err("too deep")
        });
        let ParseError::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.line, 1);
        assert_eq!(err.expected, format!("at most {MAX_NESTING} nesting levels"));

        let err = with_big_stack(|| {
            let source = format!("class A {{ int x = {}1; }}", "-".repeat(20_000));
            parse_source(&source).expect_err("too deep")
        });
        assert!(matches!(err, ParseError::Syntax(_)));

        let err = with_big_stack(|| {
            let source = format!("class A {{ void f() {{ {}{} }} }}", "{".repeat(5_000), "}".repeat(5_000));
            parse_source(&source).expect_err("too deep")
        });
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn ordinary_nesting_parses() {
        let depth = 100;
        let source = format!("class A {{ int x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
        let parsed = with_big_stack(move || parse_source(&source).is_ok());
        assert!(parsed);
    }

    #[test]
    fn every_non_root_node_is_in_its_parents_children() {
        let tree = tree(
            "class A { void f(int a) { if (a > 0) { g(a, b -> b + 1); } else return; } }",
        );
        for node in tree.root().descendants() {
            let parent = node.parent().expect("parent");
            assert!(parent.children().any(|c| c == node));
        }
    }
}
