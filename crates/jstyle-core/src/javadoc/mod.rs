//! Doc-comment (javadoc) trees.
//!
//! A `/** ... */` comment node of the Java tree can be parsed on demand into a
//! [`DocTree`]. Positions in the doc tree are file-absolute, so violations
//! logged against doc nodes need no offset arithmetic.
//!
//! Malformed HTML never aborts the parse: unclosed elements, stray closing
//! tags and closed void elements are collected as [`DocIssue`]s next to a
//! complete tree. Only structure the tree cannot represent (an inline tag or
//! HTML comment running to the end of the comment) is a [`DocSyntaxError`].

mod parser;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::kind::{node_kinds, NodeKind};
use crate::token_types::TokenType;
use crate::tree::{Node, NodeId, Tree};

node_kinds! {
    /// Kind of a doc-comment tree node.
    pub enum DocTokenType {
        JavadocContent => "JAVADOC_CONTENT",
        LeadingAsterisk => "LEADING_ASTERISK",
        Newline => "NEWLINE",
        Text => "TEXT",

        JavadocBlockTag => "JAVADOC_BLOCK_TAG",
        ParamBlockTag => "PARAM_BLOCK_TAG",
        ReturnBlockTag => "RETURN_BLOCK_TAG",
        ThrowsBlockTag => "THROWS_BLOCK_TAG",
        ExceptionBlockTag => "EXCEPTION_BLOCK_TAG",
        AuthorBlockTag => "AUTHOR_BLOCK_TAG",
        SinceBlockTag => "SINCE_BLOCK_TAG",
        SeeBlockTag => "SEE_BLOCK_TAG",
        VersionBlockTag => "VERSION_BLOCK_TAG",
        DeprecatedBlockTag => "DEPRECATED_BLOCK_TAG",
        CustomBlockTag => "CUSTOM_BLOCK_TAG",

        JavadocInlineTag => "JAVADOC_INLINE_TAG",
        CodeInlineTag => "CODE_INLINE_TAG",
        LinkInlineTag => "LINK_INLINE_TAG",
        LinkplainInlineTag => "LINKPLAIN_INLINE_TAG",
        ValueInlineTag => "VALUE_INLINE_TAG",
        LiteralInlineTag => "LITERAL_INLINE_TAG",
        InheritDocInlineTag => "INHERIT_DOC_INLINE_TAG",
        CustomInlineTag => "CUSTOM_INLINE_TAG",
        InlineTagStart => "JAVADOC_INLINE_TAG_START",
        InlineTagEnd => "JAVADOC_INLINE_TAG_END",

        TagName => "TAG_NAME",
        ParameterName => "PARAMETER_NAME",
        Reference => "REFERENCE",
        Description => "DESCRIPTION",

        HtmlElement => "HTML_ELEMENT",
        HtmlTagStart => "HTML_TAG_START",
        HtmlTagEnd => "HTML_TAG_END",
        VoidElement => "VOID_ELEMENT",
        TagOpen => "TAG_OPEN",
        TagClose => "TAG_CLOSE",
        TagSlash => "TAG_SLASH",
        TagSlashClose => "TAG_SLASH_CLOSE",
        HtmlAttribute => "HTML_ATTRIBUTE",
        TagAttrName => "TAG_ATTR_NAME",
        Equals => "EQUALS",
        AttributeValue => "ATTRIBUTE_VALUE",
        HtmlContent => "HTML_CONTENT",
        HtmlComment => "HTML_COMMENT",
    }
}

impl NodeKind for DocTokenType {
    fn name(self) -> &'static str {
        DocTokenType::name(self)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl DocTokenType {
    /// Block tag kind for a tag name without the `@`.
    #[must_use]
    pub fn block_tag(name: &str) -> Self {
        match name {
            "param" => Self::ParamBlockTag,
            "return" => Self::ReturnBlockTag,
            "throws" => Self::ThrowsBlockTag,
            "exception" => Self::ExceptionBlockTag,
            "author" => Self::AuthorBlockTag,
            "since" => Self::SinceBlockTag,
            "see" => Self::SeeBlockTag,
            "version" => Self::VersionBlockTag,
            "deprecated" => Self::DeprecatedBlockTag,
            _ => Self::CustomBlockTag,
        }
    }

    /// Inline tag kind for a tag name without the `@`.
    #[must_use]
    pub fn inline_tag(name: &str) -> Self {
        match name {
            "code" => Self::CodeInlineTag,
            "link" => Self::LinkInlineTag,
            "linkplain" => Self::LinkplainInlineTag,
            "value" => Self::ValueInlineTag,
            "literal" => Self::LiteralInlineTag,
            "inheritDoc" => Self::InheritDocInlineTag,
            _ => Self::CustomInlineTag,
        }
    }
}

/// The tree of one doc comment.
pub type DocTree = Tree<DocTokenType>;

/// A recoverable problem found while parsing a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIssue {
    /// What went wrong.
    pub kind: DocIssueKind,
    /// 1-based line of the offending tag.
    pub line: usize,
    /// 0-based column of the offending tag.
    pub column: usize,
}

/// Kinds of recoverable doc-comment problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocIssueKind {
    /// An element was opened but never closed.
    UnclosedHtmlTag {
        /// Lower-cased tag name.
        name: String,
    },
    /// A closing tag matches no open element.
    ExtraClosingTag {
        /// Lower-cased tag name.
        name: String,
    },
    /// A void element such as `<br>` was given a closing tag.
    WrongSingletonClose {
        /// Lower-cased tag name.
        name: String,
    },
}

impl DocIssue {
    /// Message key used when the issue is reported as a violation.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self.kind {
            DocIssueKind::UnclosedHtmlTag { .. } => "javadoc.missed.html.close",
            DocIssueKind::ExtraClosingTag { .. } => "javadoc.extra.html.close",
            DocIssueKind::WrongSingletonClose { .. } => "javadoc.wrong.singleton.html.tag",
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            DocIssueKind::UnclosedHtmlTag { name } => {
                format!("Missed HTML close tag '{name}'.")
            }
            DocIssueKind::ExtraClosingTag { name } => {
                format!("Closing tag '{name}' has no matching open tag.")
            }
            DocIssueKind::WrongSingletonClose { name } => {
                format!("It is forbidden to close singleton HTML tags. Tag: {name}.")
            }
        }
    }
}

/// A doc comment whose structure cannot be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("javadoc comment has parse error at line {line}, column {column}: {kind}")]
pub struct DocSyntaxError {
    /// What could not be parsed.
    pub kind: DocErrorKind,
    /// 1-based line where the construct starts.
    pub line: usize,
    /// 0-based column where the construct starts.
    pub column: usize,
}

impl DocSyntaxError {
    /// Message key used when the error is reported as a violation.
    #[must_use]
    pub fn key(&self) -> &'static str {
        "javadoc.parse.rule.error"
    }
}

/// Kinds of unrecoverable doc-comment problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocErrorKind {
    /// `{@tag` without the closing brace.
    #[error("unterminated inline tag")]
    UnterminatedInlineTag,
    /// `<!--` without `-->`.
    #[error("unterminated HTML comment")]
    UnterminatedHtmlComment,
    /// The node handed to the parser is not a `/** ... */` comment.
    #[error("not a doc comment")]
    NotJavadoc,
}

/// A parsed doc comment: its tree plus the recoverable issues found.
#[derive(Debug, Clone)]
pub struct ParsedJavadoc {
    /// The doc tree, rooted at `JAVADOC_CONTENT`.
    pub tree: DocTree,
    /// Recoverable problems, ordered by position.
    pub issues: Vec<DocIssue>,
}

/// Whether `node` is a `/** ... */` comment. `/**/` is an ordinary comment.
#[must_use]
pub fn is_javadoc_comment(node: Node<'_, TokenType>) -> bool {
    node.kind() == TokenType::BlockCommentBegin
        && node
            .find_first_child(TokenType::CommentContent)
            .is_some_and(|content| content.text().starts_with('*'))
}

/// Parses the doc comment rooted at a `BLOCK_COMMENT_BEGIN` node.
///
/// # Errors
///
/// Returns a [`DocSyntaxError`] when an inline tag or HTML comment is not
/// terminated before the end of the comment, or when `comment` is not a
/// doc comment.
pub fn parse_javadoc(comment: Node<'_, TokenType>) -> Result<ParsedJavadoc, DocSyntaxError> {
    let content = comment
        .find_first_child(TokenType::CommentContent)
        .filter(|_| is_javadoc_comment(comment))
        .ok_or(DocSyntaxError {
            kind: DocErrorKind::NotJavadoc,
            line: comment.line(),
            column: comment.column(),
        })?;
    let span = content.span();
    // Skip the second `*` of `/**`.
    parser::parse(
        comment.tree().shared_source(),
        span.start + 1..span.end,
        content.line(),
        content.column() + 1,
    )
}

/// Outcome of parsing one doc comment, shared between checks.
pub type JavadocOutcome = Rc<Result<ParsedJavadoc, DocSyntaxError>>;

/// Per-file memo of parsed doc comments keyed by comment node.
///
/// Lives as long as one file's tree; every check asking for the same comment
/// gets the same parse.
#[derive(Debug, Default)]
pub struct JavadocCache {
    entries: RefCell<HashMap<NodeId, JavadocOutcome>>,
}

impl JavadocCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parse of `comment`, parsing it on first request.
    pub fn get(&self, comment: Node<'_, TokenType>) -> JavadocOutcome {
        if let Some(hit) = self.entries.borrow().get(&comment.id()) {
            return Rc::clone(hit);
        }
        debug!(line = comment.line(), "parsing doc comment");
        let outcome = Rc::new(parse_javadoc(comment));
        self.entries
            .borrow_mut()
            .insert(comment.id(), Rc::clone(&outcome));
        outcome
    }

    /// Number of comments parsed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been parsed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
