//! Check that each file documents an author on a top-level type.
//!
//! # Detected Patterns
//!
//! - Files whose top-level types carry no `@author` block tag, reported once
//!   at the first type after the whole tree was seen
//! - `@author` tags whose text does not match `author_format`
//!
//! # Configuration
//!
//! - `author_format`: regex the author text must match (default: unset)

use jstyle_core::javadoc::{is_javadoc_comment, DocTokenType};
use jstyle_core::{Check, CheckConfig, CheckContext, CheckError, CheckResult, Node, TokenType};
use regex::Regex;

/// Check name.
pub const NAME: &str = "RequireAuthorTag";

/// Message key for files without an author.
pub const MSG_MISSING: &str = "type.missingTag";

/// Message key for authors not matching the format.
pub const MSG_FORMAT: &str = "type.tagFormat";

/// Requires an `@author` tag on the top-level types of every file.
#[derive(Debug, Clone, Default)]
pub struct RequireAuthorTag {
    author_format: Option<Regex>,
    first_type: Option<(usize, usize)>,
    has_author: bool,
}

impl RequireAuthorTag {
    /// Creates the check without a format.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires author text to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Regex`] if the pattern does not compile.
    pub fn author_format(mut self, pattern: &str) -> Result<Self, CheckError> {
        self.author_format = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Reads `author_format` from a check configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Regex`] if the pattern does not compile.
    pub fn from_config(config: &CheckConfig) -> Result<Self, CheckError> {
        match config.get_option::<String>("author_format") {
            Some(pattern) => Self::new().author_format(&pattern),
            None => Ok(Self::new()),
        }
    }
}

/// Doc comment written before the name of a type declaration.
fn type_javadoc<'t>(def: Node<'t, TokenType>) -> Option<Node<'t, TokenType>> {
    let name = def.find_first_child(TokenType::Ident)?;
    def.descendants()
        .take_while(|n| n.id() != name.id())
        .filter(|n| is_javadoc_comment(*n))
        .last()
}

/// Author text up to the end of the tag's first line.
fn author_text(tag: Node<'_, DocTokenType>) -> String {
    let Some(description) = tag.find_first_child(DocTokenType::Description) else {
        return String::new();
    };
    description
        .children()
        .take_while(|c| c.kind() != DocTokenType::Newline)
        .filter(|c| c.kind() == DocTokenType::Text)
        .map(|c| c.text())
        .collect::<String>()
        .trim()
        .to_string()
}

impl Check for RequireAuthorTag {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[
            TokenType::ClassDef,
            TokenType::InterfaceDef,
            TokenType::EnumDef,
            TokenType::RecordDef,
            TokenType::AnnotationDef,
        ]
    }

    fn begin_tree(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
        self.first_type = None;
        self.has_author = false;
        Ok(())
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        if node.parent().map(|p| p.kind()) != Some(TokenType::CompilationUnit) {
            return Ok(());
        }
        self.first_type.get_or_insert((node.line(), node.column()));

        let Some(comment) = type_javadoc(node) else {
            return Ok(());
        };
        let outcome = ctx.javadoc(comment);
        let Ok(parsed) = outcome.as_ref() else {
            return Ok(());
        };
        let authors = parsed
            .tree
            .root()
            .descendants()
            .filter(|n| n.kind() == DocTokenType::AuthorBlockTag);
        for tag in authors {
            self.has_author = true;
            let Some(format) = &self.author_format else {
                continue;
            };
            if !format.is_match(&author_text(tag)) {
                ctx.log(
                    tag,
                    MSG_FORMAT,
                    format!("Type Javadoc tag @author must match pattern '{}'.", format.as_str()),
                );
            }
        }
        Ok(())
    }

    fn finish_tree(&mut self, ctx: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
        if let (Some((line, column)), false) = (self.first_type, self.has_author) {
            ctx.log_at(line, column, MSG_MISSING, "Type Javadoc comment is missing @author tag.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::verify;

    #[test]
    fn author_on_any_top_level_type_satisfies_the_file() {
        let source = "/**\n * Doc.\n * @author Jane Doe\n */\npublic class A {}\nclass B {}\n";
        assert!(verify(RequireAuthorTag::new(), source).is_empty());
    }

    #[test]
    fn missing_author_is_reported_at_first_type() {
        let found = verify(RequireAuthorTag::new(), "package p;\n\n/** Doc. */\npublic class A {}\n");
        assert_eq!(found, [(4, 1, MSG_MISSING.to_string())]);
    }

    #[test]
    fn nested_types_do_not_count() {
        let source = "class A {\n    /** @author x */\n    class B {}\n}\n";
        let found = verify(RequireAuthorTag::new(), source);
        assert_eq!(found, [(1, 1, MSG_MISSING.to_string())]);
    }

    #[test]
    fn author_must_match_format() {
        let check = RequireAuthorTag::new().author_format("^[A-Z]").expect("pattern");
        let found = verify(check.clone(), "/** @author jane */\nclass A {}\n");
        assert_eq!(found, [(1, 5, MSG_FORMAT.to_string())]);

        assert!(verify(check, "/** @author Jane */\nclass A {}\n").is_empty());
    }

    #[test]
    fn files_without_types_are_quiet() {
        assert!(verify(RequireAuthorTag::new(), "package p;\n").is_empty());
    }
}
