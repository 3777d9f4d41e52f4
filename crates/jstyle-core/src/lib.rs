//! # jstyle-core
//!
//! Parsing and check-dispatch engine for linting Java sources.
//!
//! This crate turns source text into an immutable syntax tree and drives
//! many stateful checks over it in a single pass. It includes:
//!
//! - [`tokenize`] and [`parse`] for the Java grammar, with comments kept in
//!   the tree
//! - [`javadoc`] for the doc-comment grammar, parsed lazily per comment
//! - [`Check`] trait for rules and [`TreeWalker`] for routing nodes to them
//! - [`filters`] for suppressing violations and skipping files
//! - [`Checker`] for processing batches of files with per-file fault
//!   isolation
//!
//! ## Example
//!
//! ```ignore
//! use jstyle_core::{Checker, Severity};
//!
//! let checker = Checker::builder()
//!     .check(MyCheck::default())
//!     .tab_width(4)
//!     .build()?;
//!
//! let result = checker.check_dir("./src".as_ref())?;
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod check;
mod checker;
mod config;
mod contents;
mod kind;
mod types;

pub mod filters;
pub mod javadoc;
pub mod lexer;
pub mod parser;
pub mod token_types;
pub mod tree;
pub mod walker;

pub use check::{
    Check, CheckBox, CheckContext, CheckError, CheckFactory, CheckResult, CheckSetup, LoggedMessage,
};
pub use checker::{discover_files, Checker, CheckerBuilder, CheckerError};
pub use config::{BuiltFilter, CheckConfig, CheckerConfig, Config, ConfigError, FilterConfig};
pub use contents::FileContents;
pub use kind::NodeKind;
pub use lexer::{tokenize, LexErrorKind, LexicalError, Span, Token};
pub use parser::{parse, parse_source, ParseError, SyntaxError, SyntaxTree};
pub use token_types::TokenType;
pub use tree::{FileText, Node, NodeId, Tree};
pub use types::{AuditResult, FaultKind, FileFault, Severity, Violation};
pub use walker::{CheckFault, RegistrationError, TreeWalker, WalkOutcome, WalkState};
