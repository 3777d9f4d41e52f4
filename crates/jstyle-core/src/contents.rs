//! Everything known about one file while its checks run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::javadoc::{JavadocCache, JavadocOutcome};
use crate::lexer::{tokenize, Token};
use crate::parser::{parse, ParseError, SyntaxTree};
use crate::token_types::TokenType;
use crate::tree::{FileText, Node};

/// A lexed and parsed source file.
///
/// The tree is immutable; the only interior state is the doc-comment cache,
/// which is discarded together with the contents.
#[derive(Debug)]
pub struct FileContents {
    path: PathBuf,
    text: FileText,
    tokens: Vec<Token>,
    tree: SyntaxTree,
    javadoc: JavadocCache,
}

impl FileContents {
    /// Lexes and parses `text`.
    ///
    /// # Errors
    ///
    /// Returns the lexical or syntax error that stopped the pipeline.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Result<Self, ParseError> {
        let text: Arc<str> = text.into();
        let tokens = tokenize(&text)?;
        let tree = parse(Arc::clone(&text), &tokens)?;
        Ok(Self {
            path: path.into(),
            text: FileText::new(text),
            tokens,
            tree,
            javadoc: JavadocCache::new(),
        })
    }

    /// Path the file was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line view of the source.
    #[must_use]
    pub fn text(&self) -> &FileText {
        &self.text
    }

    /// Every token of the file, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The syntax tree.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Root of the syntax tree.
    #[must_use]
    pub fn root(&self) -> Node<'_, TokenType> {
        self.tree.root()
    }

    /// Parses a doc comment once per file and shares the result afterwards.
    pub fn javadoc(&self, comment: Node<'_, TokenType>) -> JavadocOutcome {
        self.javadoc.get(comment)
    }

    /// Number of doc comments parsed so far.
    #[must_use]
    pub fn javadoc_parses(&self) -> usize {
        self.javadoc.len()
    }

    /// Comment nodes (`SINGLE_LINE_COMMENT` and `BLOCK_COMMENT_BEGIN`) in
    /// source order.
    pub fn comments(&self) -> impl Iterator<Item = Node<'_, TokenType>> {
        self.tree.root().descendants().filter(|n| {
            matches!(
                n.kind(),
                TokenType::SingleLineComment | TokenType::BlockCommentBegin
            )
        })
    }

    /// Whether a 1-based line holds only whitespace.
    #[must_use]
    pub fn line_is_blank(&self, line: usize) -> bool {
        self.text
            .line(line)
            .is_some_and(|text| text.trim().is_empty())
    }

    /// Whether a 1-based line holds nothing but a `//` comment.
    #[must_use]
    pub fn line_is_comment(&self, line: usize) -> bool {
        self.text
            .line(line)
            .is_some_and(|text| text.trim_start().starts_with("//"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "package a;\n\n// one\n/** doc */\nclass A { /* two */ }\n";

    #[test]
    fn parses_and_exposes_comments_in_order() {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        assert_eq!(contents.path(), Path::new("A.java"));
        let lines: Vec<_> = contents.comments().map(|c| c.line()).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(contents.line_is_blank(2));
        assert!(contents.line_is_comment(3));
        assert!(!contents.line_is_comment(4));
    }

    #[test]
    fn javadoc_requests_are_memoized() {
        let contents = FileContents::parse("A.java", SOURCE).expect("parse");
        let doc = contents
            .comments()
            .find(|c| crate::javadoc::is_javadoc_comment(*c))
            .expect("doc comment");
        let first = contents.javadoc(doc);
        let second = contents.javadoc(doc);
        assert!(std::rc::Rc::ptr_eq(&first, &second));
        assert_eq!(contents.javadoc_parses(), 1);
    }

    #[test]
    fn lexical_failure_is_reported() {
        let err = FileContents::parse("B.java", "class B { String s = \"oops; }\n")
            .expect_err("unterminated string");
        assert!(matches!(err, ParseError::Lexical(_)));
    }
}
