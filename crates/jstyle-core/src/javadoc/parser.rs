//! Scanner and tree builder for doc comments.
//!
//! Parsing runs in three passes over the comment text:
//! 1. scan into a flat list of [`Piece`]s (text runs, line structure, tags),
//! 2. pair start and end tags per description section, recording issues,
//! 3. emit the tree, nesting paired elements.

use std::ops::Range;
use std::sync::Arc;

use super::{DocErrorKind, DocIssue, DocIssueKind, DocSyntaxError, DocTokenType, ParsedJavadoc};
use crate::lexer::Span;
use crate::tree::{Anchor, TreeBuilder};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn to(self, end: Cursor) -> Anchor {
        Anchor {
            span: Span::new(self.pos, end.pos),
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Debug)]
struct Attribute {
    name: Anchor,
    equals: Option<Anchor>,
    value: Option<Anchor>,
}

#[derive(Debug)]
struct Tag {
    /// Lower-cased element name.
    name: String,
    open: Anchor,
    slash: Option<Anchor>,
    name_anchor: Anchor,
    attributes: Vec<Attribute>,
    close: Anchor,
    self_closing: bool,
}

#[derive(Debug)]
enum Piece {
    Leaf(DocTokenType, Anchor),
    StartTag(Tag),
    EndTag(Tag),
    InlineStart {
        kind: DocTokenType,
        brace: Anchor,
        name: Anchor,
    },
    InlineEnd(Anchor),
    BlockTag {
        kind: DocTokenType,
        name: Anchor,
        argument: Option<(Anchor, DocTokenType, Anchor)>,
    },
}

struct Scanner<'s> {
    source: &'s str,
    end: usize,
    cur: Cursor,
    pieces: Vec<Piece>,
    text_start: Option<Cursor>,
    /// Nothing but whitespace and the leading asterisk seen on this line.
    line_start: bool,
    inline_depth: usize,
    inline_open: Option<Cursor>,
}

impl<'s> Scanner<'s> {
    fn rest_at(&self, at: Cursor) -> &'s str {
        &self.source[at.pos.min(self.end)..self.end]
    }

    fn rest(&self) -> &'s str {
        self.rest_at(self.cur)
    }

    fn peek_at(&self, at: Cursor) -> Option<char> {
        self.rest_at(at).chars().next()
    }

    /// Moves `at` past one character; `\r\n` counts as one line break.
    fn step(&self, at: &mut Cursor) {
        let rest = self.rest_at(*at);
        let Some(c) = rest.chars().next() else {
            return;
        };
        if rest.starts_with("\r\n") {
            at.pos += 2;
        } else {
            at.pos += c.len_utf8();
        }
        if c == '\n' || c == '\r' {
            at.line += 1;
            at.column = 0;
        } else {
            at.column += 1;
        }
    }

    fn step_while(&self, at: &mut Cursor, pred: impl Fn(char) -> bool) {
        while self.peek_at(*at).is_some_and(&pred) {
            self.step(at);
        }
    }

    fn flush_text(&mut self) {
        if let Some(start) = self.text_start.take() {
            if start.pos < self.cur.pos {
                self.pieces
                    .push(Piece::Leaf(DocTokenType::Text, start.to(self.cur)));
            }
        }
    }

    fn text_char(&mut self) {
        if self.text_start.is_none() {
            self.text_start = Some(self.cur);
        }
        let mut cur = self.cur;
        self.step(&mut cur);
        self.cur = cur;
    }

    fn run(mut self) -> Result<Vec<Piece>, DocSyntaxError> {
        while self.cur.pos < self.end {
            let rest = self.rest();
            if rest.starts_with(['\n', '\r']) {
                self.newline();
                continue;
            }
            if self.inline_depth > 0 {
                self.inline_char();
                continue;
            }
            let Some(c) = rest.chars().next() else {
                break;
            };
            if self.line_start && (c == ' ' || c == '\t') {
                self.text_char();
                continue;
            }
            if self.line_start && c == '@' && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.flush_text();
                self.block_tag();
                self.line_start = false;
                continue;
            }
            self.line_start = false;
            if rest.starts_with("{@") && rest[2..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                self.flush_text();
                self.inline_tag();
                continue;
            }
            if c == '<' {
                if let Some((piece, after)) = self.html()? {
                    self.flush_text();
                    self.pieces.push(piece);
                    self.cur = after;
                    continue;
                }
            }
            self.text_char();
        }
        self.flush_text();
        if let Some(open) = self.inline_open.filter(|_| self.inline_depth > 0) {
            return Err(DocSyntaxError {
                kind: DocErrorKind::UnterminatedInlineTag,
                line: open.line,
                column: open.column,
            });
        }
        Ok(self.pieces)
    }

    fn newline(&mut self) {
        self.flush_text();
        let start = self.cur;
        let mut cur = start;
        self.step(&mut cur);
        self.pieces
            .push(Piece::Leaf(DocTokenType::Newline, start.to(cur)));
        let line_begin = cur;
        self.step_while(&mut cur, |c| c == ' ' || c == '\t');
        if self.peek_at(cur) == Some('*') {
            self.step(&mut cur);
            self.pieces
                .push(Piece::Leaf(DocTokenType::LeadingAsterisk, line_begin.to(cur)));
            self.cur = cur;
        } else {
            self.cur = line_begin;
        }
        self.line_start = true;
    }

    fn inline_char(&mut self) {
        self.line_start = false;
        match self.rest().chars().next() {
            Some('{') => {
                self.inline_depth += 1;
                self.text_char();
            }
            Some('}') if self.inline_depth == 1 => {
                self.flush_text();
                let start = self.cur;
                let mut cur = start;
                self.step(&mut cur);
                self.pieces.push(Piece::InlineEnd(start.to(cur)));
                self.cur = cur;
                self.inline_depth = 0;
                self.inline_open = None;
            }
            Some('}') => {
                self.inline_depth -= 1;
                self.text_char();
            }
            _ => self.text_char(),
        }
    }

    fn block_tag(&mut self) {
        let start = self.cur;
        let mut cur = start;
        self.step(&mut cur);
        self.step_while(&mut cur, |c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | ':'));
        let name = start.to(cur);
        let kind = DocTokenType::block_tag(&self.source[name.span.start + 1..name.span.end]);
        let argument_kind = match kind {
            DocTokenType::ParamBlockTag => Some(DocTokenType::ParameterName),
            DocTokenType::ThrowsBlockTag | DocTokenType::ExceptionBlockTag => {
                Some(DocTokenType::Reference)
            }
            _ => None,
        };
        let mut argument = None;
        if let Some(argument_kind) = argument_kind {
            let gap_start = cur;
            let mut arg = cur;
            self.step_while(&mut arg, |c| c == ' ' || c == '\t');
            let arg_start = arg;
            if self.peek_at(arg) == Some('<') {
                self.step(&mut arg);
                self.step_while(&mut arg, |c| c.is_alphanumeric() || c == '_' || c == '$');
                if self.peek_at(arg) == Some('>') {
                    self.step(&mut arg);
                }
            } else {
                self.step_while(&mut arg, |c| {
                    c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '#')
                });
            }
            if arg_start.pos > gap_start.pos && arg.pos > arg_start.pos {
                argument = Some((gap_start.to(arg_start), argument_kind, arg_start.to(arg)));
                cur = arg;
            }
        }
        self.pieces.push(Piece::BlockTag {
            kind,
            name,
            argument,
        });
        self.cur = cur;
    }

    fn inline_tag(&mut self) {
        let start = self.cur;
        let mut cur = start;
        self.step(&mut cur);
        let brace = start.to(cur);
        let name_start = cur;
        self.step(&mut cur);
        self.step_while(&mut cur, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        let name = name_start.to(cur);
        let kind = DocTokenType::inline_tag(&self.source[name.span.start + 1..name.span.end]);
        self.pieces.push(Piece::InlineStart { kind, brace, name });
        self.cur = cur;
        self.inline_depth = 1;
        self.inline_open = Some(start);
    }

    /// Recognises an HTML comment, start tag or end tag at the cursor.
    /// Tags must fit on one line; anything else is left as text.
    fn html(&self) -> Result<Option<(Piece, Cursor)>, DocSyntaxError> {
        let start = self.cur;
        let mut cur = start;
        self.step(&mut cur);
        if self.rest_at(cur).starts_with("!--") {
            let Some(offset) = self.rest_at(cur).find("-->") else {
                return Err(DocSyntaxError {
                    kind: DocErrorKind::UnterminatedHtmlComment,
                    line: start.line,
                    column: start.column,
                });
            };
            let stop = cur.pos + offset + 3;
            while cur.pos < stop {
                self.step(&mut cur);
            }
            return Ok(Some((Piece::Leaf(DocTokenType::HtmlComment, start.to(cur)), cur)));
        }
        let open = start.to(cur);

        let slash = if self.peek_at(cur) == Some('/') {
            let s = cur;
            self.step(&mut cur);
            Some(s.to(cur))
        } else {
            None
        };

        if !self.peek_at(cur).is_some_and(|c| c.is_ascii_alphabetic()) {
            return Ok(None);
        }
        let name_start = cur;
        self.step_while(&mut cur, |c| c.is_ascii_alphanumeric() || c == '-' || c == ':');
        let name_anchor = name_start.to(cur);
        let name = self.source[name_anchor.span.start..name_anchor.span.end].to_ascii_lowercase();

        let mut attributes = Vec::new();
        loop {
            self.step_while(&mut cur, |c| c == ' ' || c == '\t');
            let rest = self.rest_at(cur);
            if rest.starts_with('>') {
                let s = cur;
                self.step(&mut cur);
                let tag = Tag {
                    name,
                    open,
                    slash,
                    name_anchor,
                    attributes,
                    close: s.to(cur),
                    self_closing: false,
                };
                let piece = if tag.slash.is_some() {
                    Piece::EndTag(tag)
                } else {
                    Piece::StartTag(tag)
                };
                return Ok(Some((piece, cur)));
            }
            if slash.is_none() && rest.starts_with("/>") {
                let s = cur;
                self.step(&mut cur);
                self.step(&mut cur);
                let tag = Tag {
                    name,
                    open,
                    slash,
                    name_anchor,
                    attributes,
                    close: s.to(cur),
                    self_closing: true,
                };
                return Ok(Some((Piece::StartTag(tag), cur)));
            }
            if slash.is_some()
                || !rest.starts_with(|c: char| c.is_ascii_alphabetic() || matches!(c, '_' | ':'))
            {
                return Ok(None);
            }
            match self.attribute(&mut cur) {
                Some(attribute) => attributes.push(attribute),
                None => return Ok(None),
            }
        }
    }

    fn attribute(&self, cur: &mut Cursor) -> Option<Attribute> {
        let name_start = *cur;
        self.step_while(cur, |c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'));
        let name = name_start.to(*cur);
        let mut ahead = *cur;
        self.step_while(&mut ahead, |c| c == ' ' || c == '\t');
        if self.peek_at(ahead) != Some('=') {
            return Some(Attribute {
                name,
                equals: None,
                value: None,
            });
        }
        let equals_start = ahead;
        self.step(&mut ahead);
        let equals = equals_start.to(ahead);
        self.step_while(&mut ahead, |c| c == ' ' || c == '\t');
        let value_start = ahead;
        match self.peek_at(ahead) {
            Some(quote @ ('"' | '\'')) => {
                self.step(&mut ahead);
                self.step_while(&mut ahead, |c| c != quote && c != '\n' && c != '\r');
                if self.peek_at(ahead) != Some(quote) {
                    return None;
                }
                self.step(&mut ahead);
            }
            _ => {
                self.step_while(&mut ahead, |c| {
                    !c.is_whitespace() && c != '>' && c != '"' && c != '\''
                });
                if ahead.pos == value_start.pos {
                    return None;
                }
            }
        }
        *cur = ahead;
        Some(Attribute {
            name,
            equals: Some(equals),
            value: Some(value_start.to(ahead)),
        })
    }
}

/// Start tags paired with end tags, and issues found while pairing.
struct Pairing {
    /// For every start tag with a matching end tag: the end tag's index.
    partner: Vec<Option<usize>>,
    /// End tags that close a paired element.
    closes: Vec<bool>,
    issues: Vec<DocIssue>,
}

fn pair_tags(pieces: &[Piece]) -> Pairing {
    let mut pairing = Pairing {
        partner: vec![None; pieces.len()],
        closes: vec![false; pieces.len()],
        issues: Vec::new(),
    };
    let mut open: Vec<usize> = Vec::new();

    let unclosed = |issues: &mut Vec<DocIssue>, index: usize| {
        if let Piece::StartTag(tag) = &pieces[index] {
            issues.push(DocIssue {
                kind: DocIssueKind::UnclosedHtmlTag {
                    name: tag.name.clone(),
                },
                line: tag.open.line,
                column: tag.open.column,
            });
        }
    };

    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::BlockTag { .. } => {
                for &index in &open {
                    unclosed(&mut pairing.issues, index);
                }
                open.clear();
            }
            Piece::StartTag(tag) if !tag.self_closing && !is_void(&tag.name) => open.push(i),
            Piece::EndTag(tag) => {
                if is_void(&tag.name) {
                    pairing.issues.push(DocIssue {
                        kind: DocIssueKind::WrongSingletonClose {
                            name: tag.name.clone(),
                        },
                        line: tag.open.line,
                        column: tag.open.column,
                    });
                    continue;
                }
                let matching = open.iter().rposition(|&s| match &pieces[s] {
                    Piece::StartTag(start) => start.name == tag.name,
                    _ => false,
                });
                if let Some(depth) = matching {
                    for &index in &open[depth + 1..] {
                        unclosed(&mut pairing.issues, index);
                    }
                    pairing.partner[open[depth]] = Some(i);
                    pairing.closes[i] = true;
                    open.truncate(depth);
                } else {
                    pairing.issues.push(DocIssue {
                        kind: DocIssueKind::ExtraClosingTag {
                            name: tag.name.clone(),
                        },
                        line: tag.open.line,
                        column: tag.open.column,
                    });
                }
            }
            _ => {}
        }
    }
    for &index in &open {
        unclosed(&mut pairing.issues, index);
    }
    pairing
        .issues
        .sort_by_key(|issue| (issue.line, issue.column));
    pairing
}

fn emit_tag(builder: &mut TreeBuilder<DocTokenType>, kind: DocTokenType, tag: &Tag) {
    builder.start_node(kind, tag.open);
    builder.token(DocTokenType::TagOpen, tag.open);
    if let Some(slash) = tag.slash {
        builder.token(DocTokenType::TagSlash, slash);
    }
    builder.token(DocTokenType::TagName, tag.name_anchor);
    for attribute in &tag.attributes {
        builder.start_node(DocTokenType::HtmlAttribute, attribute.name);
        builder.token(DocTokenType::TagAttrName, attribute.name);
        if let (Some(equals), Some(value)) = (attribute.equals, attribute.value) {
            builder.token(DocTokenType::Equals, equals);
            builder.token(DocTokenType::AttributeValue, value);
        }
        builder.finish_node();
    }
    let close = if tag.self_closing {
        DocTokenType::TagSlashClose
    } else {
        DocTokenType::TagClose
    };
    builder.token(close, tag.close);
    builder.finish_node();
}

fn build(source: Arc<str>, start: Anchor, pieces: &[Piece], pairing: &Pairing) -> super::DocTree {
    let mut builder = TreeBuilder::new(source);
    builder.start_node(DocTokenType::JavadocContent, start);
    let mut in_block = false;

    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Leaf(kind, anchor) => {
                builder.token(*kind, *anchor);
            }
            Piece::BlockTag {
                kind,
                name,
                argument,
            } => {
                if in_block {
                    builder.finish_node();
                    builder.finish_node();
                    builder.finish_node();
                }
                builder.start_node(DocTokenType::JavadocBlockTag, *name);
                builder.start_node(*kind, *name);
                builder.token(DocTokenType::TagName, *name);
                if let Some((gap, argument_kind, value)) = argument {
                    builder.token(DocTokenType::Text, *gap);
                    builder.token(*argument_kind, *value);
                }
                builder.start_node(DocTokenType::Description, *name);
                in_block = true;
            }
            Piece::StartTag(tag) if tag.self_closing || is_void(&tag.name) => {
                emit_tag(&mut builder, DocTokenType::VoidElement, tag);
            }
            Piece::StartTag(tag) => {
                builder.start_node(DocTokenType::HtmlElement, tag.open);
                emit_tag(&mut builder, DocTokenType::HtmlTagStart, tag);
                if pairing.partner[i].is_some() {
                    builder.start_node(DocTokenType::HtmlContent, tag.close);
                } else {
                    builder.finish_node();
                }
            }
            Piece::EndTag(tag) => {
                if pairing.closes[i] {
                    builder.finish_node();
                    emit_tag(&mut builder, DocTokenType::HtmlTagEnd, tag);
                    builder.finish_node();
                } else {
                    emit_tag(&mut builder, DocTokenType::HtmlTagEnd, tag);
                }
            }
            Piece::InlineStart { kind, brace, name } => {
                builder.start_node(DocTokenType::JavadocInlineTag, *brace);
                builder.start_node(*kind, *brace);
                builder.token(DocTokenType::InlineTagStart, *brace);
                builder.token(DocTokenType::TagName, *name);
            }
            Piece::InlineEnd(anchor) => {
                builder.token(DocTokenType::InlineTagEnd, *anchor);
                builder.finish_node();
                builder.finish_node();
            }
        }
    }
    builder.finish()
}

/// Parses the doc comment text `range` of `source`, which starts at the
/// given file position.
pub(super) fn parse(
    source: Arc<str>,
    range: Range<usize>,
    line: usize,
    column: usize,
) -> Result<ParsedJavadoc, DocSyntaxError> {
    let start = Cursor {
        pos: range.start,
        line,
        column,
    };
    let scanner = Scanner {
        source: &*source,
        end: range.end.max(range.start),
        cur: start,
        pieces: Vec::new(),
        text_start: None,
        line_start: true,
        inline_depth: 0,
        inline_open: None,
    };
    let pieces = scanner.run()?;
    let pairing = pair_tags(&pieces);
    let tree = build(Arc::clone(&source), start.to(start), &pieces, &pairing);
    Ok(ParsedJavadoc {
        tree,
        issues: pairing.issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::javadoc::DocTree;

    fn doc(text: &str) -> Result<ParsedJavadoc, DocSyntaxError> {
        let source: Arc<str> = Arc::from(text);
        parse(source, 0..text.len(), 1, 3)
    }

    fn kinds(tree: &DocTree) -> Vec<DocTokenType> {
        tree.root().children().map(|c| c.kind()).collect()
    }

    fn count(tree: &DocTree, kind: DocTokenType) -> usize {
        tree.root().descendants().filter(|n| n.kind() == kind).count()
    }

    #[test]
    fn line_structure() {
        let parsed = doc(" First line.\n * Second line.\n ").expect("doc");
        assert_eq!(
            kinds(&parsed.tree),
            vec![
                DocTokenType::Text,
                DocTokenType::Newline,
                DocTokenType::LeadingAsterisk,
                DocTokenType::Text,
                DocTokenType::Newline,
                DocTokenType::Text,
            ]
        );
        let asterisk = parsed
            .tree
            .root()
            .find_first_child(DocTokenType::LeadingAsterisk)
            .expect("asterisk");
        assert_eq!(asterisk.text(), " *");
        assert_eq!((asterisk.line(), asterisk.column()), (2, 0));
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn block_tags_split_description() {
        let parsed = doc(
            " Summary.\n * @param value the value\n *     continued\n * @throws java.io.IOException when\n * @return nothing\n ",
        )
        .expect("doc");
        let tree = &parsed.tree;
        assert_eq!(count(tree, DocTokenType::JavadocBlockTag), 3);
        let param = tree
            .root()
            .descendants()
            .find(|n| n.kind() == DocTokenType::ParamBlockTag)
            .expect("param");
        let name = param
            .find_first_child(DocTokenType::ParameterName)
            .expect("name");
        assert_eq!(name.text(), "value");
        let description = param
            .find_first_child(DocTokenType::Description)
            .expect("description");
        assert!(description.has_child(DocTokenType::Newline));
        let reference = tree
            .root()
            .descendants()
            .find(|n| n.kind() == DocTokenType::Reference)
            .expect("reference");
        assert_eq!(reference.text(), "java.io.IOException");
    }

    #[test]
    fn at_sign_inside_text_is_not_a_block_tag() {
        let parsed = doc(" Mail me at a@b.c please.\n ").expect("doc");
        assert_eq!(count(&parsed.tree, DocTokenType::JavadocBlockTag), 0);
    }

    #[test]
    fn inline_tags_keep_braces_balanced() {
        let parsed = doc(" Use {@code Map<K, V> m = new HashMap<>() { }} or {@link List#add}.").expect("doc");
        let tree = &parsed.tree;
        assert_eq!(count(tree, DocTokenType::JavadocInlineTag), 2);
        assert_eq!(count(tree, DocTokenType::CodeInlineTag), 1);
        assert_eq!(count(tree, DocTokenType::LinkInlineTag), 1);
        // `<K, V>` inside code is text, not HTML.
        assert_eq!(count(tree, DocTokenType::HtmlElement), 0);
    }

    #[test]
    fn paired_elements_nest() {
        let parsed = doc(" <ul>\n * <li><b>bold</b></li>\n * </ul>").expect("doc");
        assert!(parsed.issues.is_empty());
        let tree = &parsed.tree;
        assert_eq!(count(tree, DocTokenType::HtmlElement), 3);
        let ul = tree.root().find_first_child(DocTokenType::HtmlElement).expect("ul");
        assert_eq!(
            ul.children().map(|c| c.kind()).collect::<Vec<_>>(),
            vec![
                DocTokenType::HtmlTagStart,
                DocTokenType::HtmlContent,
                DocTokenType::HtmlTagEnd,
            ]
        );
    }

    #[test]
    fn unclosed_paragraph_is_an_issue_not_an_error() {
        let parsed = doc(" Text.\n * <p>More text.\n ").expect("doc");
        assert_eq!(parsed.issues.len(), 1);
        let issue = &parsed.issues[0];
        assert_eq!(
            issue.kind,
            DocIssueKind::UnclosedHtmlTag {
                name: "p".to_string()
            }
        );
        assert_eq!((issue.line, issue.column), (2, 3));
        assert_eq!(issue.key(), "javadoc.missed.html.close");
        let p = parsed
            .tree
            .root()
            .find_first_child(DocTokenType::HtmlElement)
            .expect("p element");
        assert_eq!(p.child_count(), 1);
    }

    #[test]
    fn extra_and_singleton_closing_tags() {
        let parsed = doc(" a</b> c<br/> d<br></br>").expect("doc");
        let kinds: Vec<_> = parsed.issues.iter().map(DocIssue::key).collect();
        assert_eq!(
            kinds,
            vec!["javadoc.extra.html.close", "javadoc.wrong.singleton.html.tag"]
        );
        assert_eq!(count(&parsed.tree, DocTokenType::VoidElement), 2);
    }

    #[test]
    fn attributes() {
        let parsed = doc(r#" <a href="x.html" target=_blank hidden>link</a>"#).expect("doc");
        let tree = &parsed.tree;
        assert_eq!(count(tree, DocTokenType::HtmlAttribute), 3);
        let value = tree
            .root()
            .descendants()
            .find(|n| n.kind() == DocTokenType::AttributeValue)
            .expect("value");
        assert_eq!(value.text(), "\"x.html\"");
    }

    #[test]
    fn less_than_in_prose_is_text() {
        let parsed = doc(" if a < b then <3").expect("doc");
        assert!(parsed.issues.is_empty());
        assert_eq!(count(&parsed.tree, DocTokenType::HtmlElement), 0);
    }

    #[test]
    fn unterminated_inline_tag_is_a_hard_error() {
        let err = doc(" see {@link Foo\n * ").expect_err("error");
        assert_eq!(err.kind, DocErrorKind::UnterminatedInlineTag);
        assert_eq!((err.line, err.column), (1, 8));
        assert_eq!(err.key(), "javadoc.parse.rule.error");
    }

    #[test]
    fn unterminated_html_comment_is_a_hard_error() {
        let err = doc(" <!-- never closed").expect_err("error");
        assert_eq!(err.kind, DocErrorKind::UnterminatedHtmlComment);
    }

    #[test]
    fn issues_are_scoped_to_their_section() {
        let parsed = doc(" <b>bold\n * @return <i>x</i>\n ").expect("doc");
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(
            parsed.issues[0].kind,
            DocIssueKind::UnclosedHtmlTag {
                name: "b".to_string()
            }
        );
    }
}
