//! Java tokenizer.
//!
//! Classification is done by a [`logos`] automaton; literals and comments whose
//! end cannot be expressed as a regular expression (text blocks, escapes,
//! unterminated forms) are finished by callbacks. Positions are then computed
//! by walking each token slice:
//!
//! - lines are 1-based and advance on `\n`, `\r\n` and lone `\r`;
//! - columns are 0-based and count Unicode code points, with a tab counting
//!   as a single column (tab expansion is derived later, see
//!   [`FileText::expanded_column`](crate::FileText::expanded_column)).
//!
//! Whitespace, newlines and comments are kept as tokens. `>` is always
//! produced on its own so that closing generic brackets never need splitting;
//! the parser fuses adjacent `>`/`=` tokens into shift and comparison operators.

use logos::{Lexer, Logos};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::token_types::TokenType;

/// Byte range of a token inside its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from((span.start, span.len()))
    }
}

/// A classified lexical unit with its source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenType,
    /// Byte range in the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 0-based code-point column of the first character.
    pub column: usize,
}

impl Token {
    /// Returns the token text.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// Why a span of source text could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    /// A character that starts no Java token.
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// A `"` literal without its closing quote on the same line.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A `'` literal without its closing quote.
    #[error("unterminated character literal")]
    UnterminatedChar,
    /// A `"""` text block without its closing delimiter.
    #[error("unterminated text block")]
    UnterminatedTextBlock,
    /// A `/*` comment without `*/`.
    #[error("unterminated comment")]
    UnterminatedComment,
}

/// A malformed token, scoped to one file.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at line {line}, column {column}")]
#[diagnostic(code(jstyle::lexical))]
pub struct LexicalError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 0-based code-point column of the offending token.
    pub column: usize,
    /// Source range of the offending token.
    #[label("{kind}")]
    pub span: SourceSpan,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
enum Raw {
    #[regex(r"[ \t\x0C\x{FEFF}]+")]
    Whitespace,
    #[regex(r"\r\n|\r|\n")]
    Newline,
    #[regex(r"//[^\r\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[token("\"", string_literal)]
    StringLiteral,
    #[token("\"\"\"", text_block)]
    TextBlock,
    #[token("'", char_literal)]
    CharLiteral,

    #[regex(r"([a-zA-Z_$]|[^\x00-\x7F\x{FEFF}])([a-zA-Z0-9_$]|[^\x00-\x7F\x{FEFF}])*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"[0-9][0-9_]*")]
    NumInt,
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]")]
    #[regex(r"0[bB][01_]+[lL]")]
    #[regex(r"[0-9][0-9_]*[lL]")]
    NumLong,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?[fF]")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?[fF]")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[fF]")]
    #[regex(r"[0-9][0-9_]*[fF]")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+[fF]")]
    NumFloat,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?[dD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?[dD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[dD]?")]
    #[regex(r"[0-9][0-9_]*[dD]")]
    #[regex(r"0[xX][0-9a-fA-F_]*(\.[0-9a-fA-F_]*)?[pP][+-]?[0-9_]+[dD]?")]
    NumDouble,

    #[token("abstract")]
    Abstract,
    #[token("assert")]
    Assert,
    #[token("boolean")]
    Boolean,
    #[token("break")]
    Break,
    #[token("byte")]
    Byte,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("char")]
    Char,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("float")]
    Float,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("instanceof")]
    Instanceof,
    #[token("int")]
    Int,
    #[token("interface")]
    Interface,
    #[token("long")]
    Long,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("try")]
    Try,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("@")]
    At,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,

    #[token("=")]
    Assign,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("==")]
    EqEq,
    #[token("<=")]
    Le,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("%")]
    Percent,
    #[token("<<")]
    Shl,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("%=")]
    PercentEq,
    #[token("<<=")]
    ShlEq,
}

fn block_comment(lex: &mut Lexer<Raw>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    if let Some(end) = rest.find("*/") {
        lex.bump(end + 2);
        Ok(())
    } else {
        lex.bump(rest.len());
        Err(LexErrorKind::UnterminatedComment)
    }
}

/// Finishes a single-line quoted literal; escapes skip the next character.
fn quoted(lex: &mut Lexer<Raw>, quote: char, error: LexErrorKind) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some(&(_, next)) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        lex.bump(i + 1);
                        return Err(error);
                    }
                    chars.next();
                }
            }
            '\n' | '\r' => {
                lex.bump(i);
                return Err(error);
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(error)
}

fn string_literal(lex: &mut Lexer<Raw>) -> Result<(), LexErrorKind> {
    quoted(lex, '"', LexErrorKind::UnterminatedString)
}

fn char_literal(lex: &mut Lexer<Raw>) -> Result<(), LexErrorKind> {
    quoted(lex, '\'', LexErrorKind::UnterminatedChar)
}

fn text_block(lex: &mut Lexer<Raw>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' if rest[i..].starts_with("\"\"\"") => {
                // A run of more than three quotes closes on the last three.
                let run = rest[i..].chars().take_while(|&q| q == '"').count();
                lex.bump(i + run);
                return Ok(());
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedTextBlock)
}

impl Raw {
    fn token_type(self) -> TokenType {
        match self {
            Self::Whitespace => TokenType::Whitespace,
            Self::Newline => TokenType::Newline,
            Self::LineComment => TokenType::SingleLineComment,
            Self::BlockComment => TokenType::BlockCommentBegin,
            Self::StringLiteral => TokenType::StringLiteral,
            Self::TextBlock => TokenType::TextBlockLiteralBegin,
            Self::CharLiteral => TokenType::CharLiteral,
            Self::Ident => TokenType::Ident,
            Self::NumInt => TokenType::NumInt,
            Self::NumLong => TokenType::NumLong,
            Self::NumFloat => TokenType::NumFloat,
            Self::NumDouble => TokenType::NumDouble,
            Self::Abstract => TokenType::Abstract,
            Self::Assert => TokenType::LiteralAssert,
            Self::Boolean => TokenType::LiteralBoolean,
            Self::Break => TokenType::LiteralBreak,
            Self::Byte => TokenType::LiteralByte,
            Self::Case => TokenType::LiteralCase,
            Self::Catch => TokenType::LiteralCatch,
            Self::Char => TokenType::LiteralChar,
            Self::Class => TokenType::LiteralClass,
            Self::Const => TokenType::LiteralConst,
            Self::Continue => TokenType::LiteralContinue,
            Self::Default => TokenType::LiteralDefault,
            Self::Do => TokenType::LiteralDo,
            Self::Double => TokenType::LiteralDouble,
            Self::Else => TokenType::LiteralElse,
            Self::Enum => TokenType::Enum,
            Self::Extends => TokenType::LiteralExtends,
            Self::Final => TokenType::Final,
            Self::Finally => TokenType::LiteralFinally,
            Self::Float => TokenType::LiteralFloat,
            Self::For => TokenType::LiteralFor,
            Self::Goto => TokenType::LiteralGoto,
            Self::If => TokenType::LiteralIf,
            Self::Implements => TokenType::LiteralImplements,
            Self::Import => TokenType::LiteralImport,
            Self::Instanceof => TokenType::LiteralInstanceof,
            Self::Int => TokenType::LiteralInt,
            Self::Interface => TokenType::LiteralInterface,
            Self::Long => TokenType::LiteralLong,
            Self::Native => TokenType::LiteralNative,
            Self::New => TokenType::LiteralNew,
            Self::Package => TokenType::LiteralPackage,
            Self::Private => TokenType::LiteralPrivate,
            Self::Protected => TokenType::LiteralProtected,
            Self::Public => TokenType::LiteralPublic,
            Self::Return => TokenType::LiteralReturn,
            Self::Short => TokenType::LiteralShort,
            Self::Static => TokenType::LiteralStatic,
            Self::Strictfp => TokenType::Strictfp,
            Self::Super => TokenType::LiteralSuper,
            Self::Switch => TokenType::LiteralSwitch,
            Self::Synchronized => TokenType::LiteralSynchronized,
            Self::This => TokenType::LiteralThis,
            Self::Throw => TokenType::LiteralThrow,
            Self::Throws => TokenType::LiteralThrows,
            Self::Transient => TokenType::LiteralTransient,
            Self::Try => TokenType::LiteralTry,
            Self::Void => TokenType::LiteralVoid,
            Self::Volatile => TokenType::LiteralVolatile,
            Self::While => TokenType::LiteralWhile,
            Self::True => TokenType::LiteralTrue,
            Self::False => TokenType::LiteralFalse,
            Self::Null => TokenType::LiteralNull,
            Self::LParen => TokenType::LParen,
            Self::RParen => TokenType::RParen,
            Self::LCurly => TokenType::LCurly,
            Self::RCurly => TokenType::RCurly,
            Self::LBrack => TokenType::LBrack,
            Self::RBrack => TokenType::RBrack,
            Self::Semi => TokenType::Semi,
            Self::Comma => TokenType::Comma,
            Self::Dot => TokenType::Dot,
            Self::Ellipsis => TokenType::Ellipsis,
            Self::At => TokenType::At,
            Self::DoubleColon => TokenType::DoubleColon,
            Self::Arrow => TokenType::Lambda,
            Self::Assign => TokenType::Assign,
            Self::Gt => TokenType::Gt,
            Self::Lt => TokenType::Lt,
            Self::Bang => TokenType::Lnot,
            Self::Tilde => TokenType::Bnot,
            Self::Question => TokenType::Question,
            Self::Colon => TokenType::Colon,
            Self::EqEq => TokenType::Equal,
            Self::Le => TokenType::Le,
            Self::NotEq => TokenType::NotEqual,
            Self::AndAnd => TokenType::Land,
            Self::OrOr => TokenType::Lor,
            Self::PlusPlus => TokenType::Inc,
            Self::MinusMinus => TokenType::Dec,
            Self::Plus => TokenType::Plus,
            Self::Minus => TokenType::Minus,
            Self::Star => TokenType::Star,
            Self::Slash => TokenType::Div,
            Self::Amp => TokenType::Band,
            Self::Pipe => TokenType::Bor,
            Self::Caret => TokenType::Bxor,
            Self::Percent => TokenType::Mod,
            Self::Shl => TokenType::Sl,
            Self::PlusEq => TokenType::PlusAssign,
            Self::MinusEq => TokenType::MinusAssign,
            Self::StarEq => TokenType::StarAssign,
            Self::SlashEq => TokenType::DivAssign,
            Self::AmpEq => TokenType::BandAssign,
            Self::PipeEq => TokenType::BorAssign,
            Self::CaretEq => TokenType::BxorAssign,
            Self::PercentEq => TokenType::ModAssign,
            Self::ShlEq => TokenType::SlAssign,
        }
    }
}

/// Running line/column cursor over already-lexed text.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    line: usize,
    column: usize,
    pending_cr: bool,
}

impl Cursor {
    fn new() -> Self {
        Self {
            line: 1,
            column: 0,
            pending_cr: false,
        }
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\n' if self.pending_cr => {
                    self.pending_cr = false;
                }
                '\n' => {
                    self.line += 1;
                    self.column = 0;
                }
                '\r' => {
                    self.line += 1;
                    self.column = 0;
                    self.pending_cr = true;
                }
                _ => {
                    self.pending_cr = false;
                    self.column += 1;
                }
            }
        }
    }
}

/// Position reached after `text` when it starts at `(line, column)`.
pub(crate) fn advance_position(line: usize, column: usize, text: &str) -> (usize, usize) {
    let mut cursor = Cursor {
        line,
        column,
        pending_cr: false,
    };
    cursor.advance(text);
    (cursor.line, cursor.column)
}

/// Converts source text into a token stream terminated by an [`TokenType::Eof`] token.
///
/// # Errors
///
/// Returns a [`LexicalError`] positioned at the start of the first malformed token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut lexer = Raw::lexer(source);
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new();
    let mut consumed = 0;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        // Logos never skips input, but keep the cursor honest if it ever did.
        cursor.advance(&source[consumed..range.start]);
        let (line, column) = (cursor.line, cursor.column);
        match result {
            Ok(raw) => {
                tokens.push(Token {
                    kind: raw.token_type(),
                    span: Span::new(range.start, range.end),
                    line,
                    column,
                });
            }
            Err(kind) => {
                return Err(LexicalError {
                    kind,
                    line,
                    column,
                    span: Span::new(range.start, range.end).into(),
                });
            }
        }
        cursor.advance(&source[range.start..range.end]);
        consumed = range.end;
    }
    cursor.advance(&source[consumed..]);

    tokens.push(Token {
        kind: TokenType::Eof,
        span: Span::new(source.len(), source.len()),
        line: cursor.line,
        column: cursor.column,
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenType> {
        tokenize(source)
            .expect("should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenType::Whitespace | TokenType::Newline))
            .collect()
    }

    #[test]
    fn keywords_beat_identifiers() {
        assert_eq!(
            kinds("class classy"),
            vec![TokenType::LiteralClass, TokenType::Ident, TokenType::Eof]
        );
    }

    #[test]
    fn byte_order_mark_is_whitespace_and_letters_are_identifiers() {
        assert_eq!(
            kinds("\u{FEFF}class Grüße"),
            vec![TokenType::LiteralClass, TokenType::Ident, TokenType::Eof]
        );
        let tokens = tokenize("\u{FEFF}x").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenType::Whitespace);
    }

    #[test]
    fn closing_generics_are_single_gt() {
        assert_eq!(
            kinds("a>>=b"),
            vec![
                TokenType::Ident,
                TokenType::Gt,
                TokenType::Gt,
                TokenType::Assign,
                TokenType::Ident,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn numeric_literals_are_classified() {
        assert_eq!(
            kinds("1 1L 0x1F 0b10 1.5 1.5f 2e10 .5 3d 0x1p3"),
            vec![
                TokenType::NumInt,
                TokenType::NumLong,
                TokenType::NumInt,
                TokenType::NumInt,
                TokenType::NumDouble,
                TokenType::NumFloat,
                TokenType::NumDouble,
                TokenType::NumDouble,
                TokenType::NumDouble,
                TokenType::NumDouble,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn decrement_before_greater_than() {
        assert_eq!(
            kinds("i-->0"),
            vec![
                TokenType::Ident,
                TokenType::Dec,
                TokenType::Gt,
                TokenType::NumInt,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn positions_count_code_points_and_raw_tabs() {
        let tokens = tokenize("\tint x;\n// é\nString s = \"ü\"; y").expect("should tokenize");
        let int = tokens
            .iter()
            .find(|t| t.kind == TokenType::LiteralInt)
            .expect("int");
        assert_eq!((int.line, int.column), (1, 1));

        let y = tokens.iter().rfind(|t| t.kind == TokenType::Ident).expect("y");
        assert_eq!((y.line, y.column), (3, 16));
    }

    #[test]
    fn crlf_and_lone_cr_advance_lines() {
        let tokens = tokenize("a\r\nb\rc").expect("should tokenize");
        let idents: Vec<(usize, usize)> = tokens
            .iter()
            .filter(|t| t.kind == TokenType::Ident)
            .map(|t| (t.line, t.column))
            .collect();
        assert_eq!(idents, vec![(1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn block_comment_spans_lines() {
        let tokens = tokenize("/* a\n * b\n */ x").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenType::BlockCommentBegin);
        let x = tokens.iter().find(|t| t.kind == TokenType::Ident).expect("x");
        assert_eq!((x.line, x.column), (3, 4));
    }

    #[test]
    fn text_block_with_escaped_quotes() {
        let source = "String s = \"\"\"\n  a \\\"\"\" b\n  \"\"\";";
        let tokens = tokenize(source).expect("should tokenize");
        let block = tokens
            .iter()
            .find(|t| t.kind == TokenType::TextBlockLiteralBegin)
            .expect("text block");
        assert!(block.text(source).ends_with("\"\"\""));
        assert!(block.text(source).contains("b"));
        assert_eq!(tokens.iter().rev().nth(1).map(|t| t.kind), Some(TokenType::Semi));
    }

    #[test]
    fn empty_string_is_not_a_text_block() {
        assert_eq!(
            kinds("\"\" + x"),
            vec![
                TokenType::StringLiteral,
                TokenType::Plus,
                TokenType::Ident,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_its_line() {
        let source = "class A {\n  String s = \"oops;\n}\n";
        let err = tokenize(source).expect_err("should fail");
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column), (2, 13));
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let err = tokenize("int x; /* never closed").expect_err("should fail");
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let source = r#"s = "a\"b";"#;
        let tokens = tokenize(source).expect("should tokenize");
        let lit = tokens
            .iter()
            .find(|t| t.kind == TokenType::StringLiteral)
            .expect("literal");
        assert_eq!(lit.text(source), r#""a\"b""#);
    }

    #[test]
    fn eof_token_closes_stream() {
        let tokens = tokenize("").expect("should tokenize");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenType::Eof);
    }
}
