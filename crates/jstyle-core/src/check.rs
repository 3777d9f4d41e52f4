//! The check contract and the context checks log through.
//!
//! A check is a stateful visitor. The walker calls [`Check::begin_tree`] once
//! per file, then [`Check::visit_token`] and [`Check::leave_token`] for every
//! node whose kind the check is registered for, and finally
//! [`Check::finish_tree`]. Checks keep per-file state in their own fields and
//! must reset it in `begin_tree`.
//!
//! # Example
//!
//! ```
//! use jstyle_core::{Check, CheckContext, CheckResult, Node, TokenType};
//!
//! #[derive(Clone, Default)]
//! struct NoLabels;
//!
//! impl Check for NoLabels {
//!     fn name(&self) -> &'static str {
//!         "NoLabels"
//!     }
//!
//!     fn default_tokens(&self) -> &'static [TokenType] {
//!         &[TokenType::LabeledStat]
//!     }
//!
//!     fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
//!         ctx.log(node, "no.labels", "Labels are not allowed.");
//!         Ok(())
//!     }
//! }
//! ```

use thiserror::Error;

use crate::contents::FileContents;
use crate::javadoc::JavadocOutcome;
use crate::kind::NodeKind;
use crate::token_types::TokenType;
use crate::tree::Node;
use crate::types::Severity;

/// Failure raised by a check hook.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckError {
    /// The check could not process the node.
    #[error("{0}")]
    Failed(String),

    /// A configured property has an unusable value.
    #[error("invalid property `{name}`: {message}")]
    Property {
        /// Property name.
        name: String,
        /// What is wrong with it.
        message: String,
    },

    /// A configured pattern does not compile.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Result of a check hook.
pub type CheckResult = Result<(), CheckError>;

/// A message logged by a check, positioned but not yet attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedMessage {
    /// 1-based line.
    pub line: usize,
    /// 1-based, tab-expanded column.
    pub column: usize,
    /// Message key.
    pub key: String,
    /// Formatted message.
    pub message: String,
}

/// What a check sees of the file being walked.
pub struct CheckContext<'a> {
    contents: &'a FileContents,
    tab_width: usize,
    messages: Vec<LoggedMessage>,
}

impl<'a> CheckContext<'a> {
    /// Creates a context over one file.
    #[must_use]
    pub fn new(contents: &'a FileContents, tab_width: usize) -> Self {
        Self {
            contents,
            tab_width,
            messages: Vec::new(),
        }
    }

    /// The file being walked.
    #[must_use]
    pub fn contents(&self) -> &'a FileContents {
        self.contents
    }

    /// Configured tab width.
    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Tab-expanded 0-based column of a node.
    #[must_use]
    pub fn expanded_column<K: NodeKind>(&self, node: Node<'_, K>) -> usize {
        self.contents
            .text()
            .expanded_column(node.line(), node.column(), self.tab_width)
    }

    /// Logs a message at a node of either tree.
    pub fn log<K: NodeKind>(&mut self, node: Node<'_, K>, key: &str, message: impl Into<String>) {
        self.log_at(node.line(), node.column(), key, message);
    }

    /// Logs a message at a 1-based line and raw 0-based column.
    pub fn log_at(&mut self, line: usize, column: usize, key: &str, message: impl Into<String>) {
        let column = self
            .contents
            .text()
            .expanded_column(line, column, self.tab_width)
            + 1;
        self.messages.push(LoggedMessage {
            line,
            column,
            key: key.to_string(),
            message: message.into(),
        });
    }

    /// Parsed doc comment, shared with every other check of this file.
    pub fn javadoc(&self, comment: Node<'_, TokenType>) -> JavadocOutcome {
        self.contents.javadoc(comment)
    }

    /// Drains the messages logged so far.
    pub fn take_messages(&mut self) -> Vec<LoggedMessage> {
        std::mem::take(&mut self.messages)
    }
}

/// A rule that consumes syntax-tree nodes and logs violations.
pub trait Check: Send {
    /// Name used in reports and by check-name filters.
    fn name(&self) -> &'static str;

    /// Tokens the check is registered for when none are configured.
    fn default_tokens(&self) -> &'static [TokenType];

    /// Tokens a configuration may register the check for.
    fn acceptable_tokens(&self) -> &'static [TokenType] {
        self.default_tokens()
    }

    /// Tokens the check is always registered for.
    fn required_tokens(&self) -> &'static [TokenType] {
        &[]
    }

    /// Severity of logged violations unless overridden.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Called before the first node of every file.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] if the check cannot process this file.
    fn begin_tree(&mut self, ctx: &mut CheckContext<'_>, root: Node<'_, TokenType>) -> CheckResult {
        let _ = (ctx, root);
        Ok(())
    }

    /// Called when the walk enters a registered node.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] if the node cannot be processed.
    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        let _ = (ctx, node);
        Ok(())
    }

    /// Called when the walk leaves a registered node.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] if the node cannot be processed.
    fn leave_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        let _ = (ctx, node);
        Ok(())
    }

    /// Called after the last node of every file.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] if the check cannot complete.
    fn finish_tree(&mut self, ctx: &mut CheckContext<'_>, root: Node<'_, TokenType>) -> CheckResult {
        let _ = (ctx, root);
        Ok(())
    }
}

/// Type alias for boxed check trait objects.
pub type CheckBox = Box<dyn Check>;

/// Registration settings for one check instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSetup {
    /// Tokens replacing the check's default tokens.
    pub tokens: Option<Vec<TokenType>>,
    /// Severity replacing the check's default severity.
    pub severity: Option<Severity>,
    /// Id reported with every violation, matched by id filters.
    pub id: Option<String>,
}

impl CheckSetup {
    /// Creates settings that keep every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the check for `tokens` instead of its defaults.
    #[must_use]
    pub fn tokens(mut self, tokens: impl IntoIterator<Item = TokenType>) -> Self {
        self.tokens = Some(tokens.into_iter().collect());
        self
    }

    /// Overrides the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Sets the instance id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Produces fresh check instances, one per worker.
pub trait CheckFactory: Send + Sync {
    /// Creates a new instance with the configured properties.
    fn create(&self) -> CheckBox;
}

impl<T> CheckFactory for T
where
    T: Check + Clone + Sync + 'static,
{
    fn create(&self) -> CheckBox {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Marker;

    impl Check for Marker {
        fn name(&self) -> &'static str {
            "Marker"
        }

        fn default_tokens(&self) -> &'static [TokenType] {
            &[TokenType::ClassDef]
        }
    }

    #[test]
    fn default_hooks_are_no_ops_and_tokens_fall_back() {
        let contents = FileContents::parse("A.java", "class A {}").expect("parse");
        let mut ctx = CheckContext::new(&contents, 8);
        let mut check = Marker;
        assert!(check.begin_tree(&mut ctx, contents.root()).is_ok());
        assert_eq!(check.acceptable_tokens(), &[TokenType::ClassDef]);
        assert!(check.required_tokens().is_empty());
        assert_eq!(check.default_severity(), Severity::Error);
        assert!(ctx.take_messages().is_empty());
    }

    #[test]
    fn logged_columns_are_one_based_and_tab_expanded() {
        let contents = FileContents::parse("A.java", "class A {\n\tint x;\n}").expect("parse");
        let mut ctx = CheckContext::new(&contents, 4);
        let int = contents
            .root()
            .descendants()
            .find(|n| n.kind() == TokenType::LiteralInt)
            .expect("int");
        ctx.log(int, "k", "m");
        ctx.log_at(1, 0, "k2", "m2");
        let messages = ctx.take_messages();
        assert_eq!((messages[0].line, messages[0].column), (2, 5));
        assert_eq!((messages[1].line, messages[1].column), (1, 1));
        assert!(ctx.take_messages().is_empty());
    }

    #[test]
    fn factory_clones_prototype() {
        let factory: Box<dyn CheckFactory> = Box::new(Marker);
        assert_eq!(factory.create().name(), "Marker");
    }

    #[test]
    fn setup_builder_collects_overrides() {
        let setup = CheckSetup::new()
            .tokens([TokenType::MethodDef])
            .severity(Severity::Warning)
            .id("m1");
        assert_eq!(setup.tokens.as_deref(), Some(&[TokenType::MethodDef][..]));
        assert_eq!(setup.severity, Some(Severity::Warning));
        assert_eq!(setup.id.as_deref(), Some("m1"));
    }
}
