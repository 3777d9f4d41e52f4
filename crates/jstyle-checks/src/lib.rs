//! # jstyle-checks
//!
//! Reference checks for the jstyle tree walker.
//!
//! Each check is a small stateful visitor over the Java syntax tree built by
//! `jstyle-core`. Together they cover the walker's contract: token routing,
//! per-file state reset, lifecycle-only checks, lazy doc-comment parsing and
//! configurable properties.
//!
//! ## Available Checks
//!
//! | Name | Tokens | Description |
//! |------|--------|-------------|
//! | `ArrayTypeStyle` | `ARRAY_DECLARATOR` | Java-style vs C-style array brackets |
//! | `MissingSwitchDefault` | `LITERAL_SWITCH` | Switch statements without `default` |
//! | `EnhancedSwitchCandidate` | `LITERAL_SWITCH` | Colon-style switches free of fall-through |
//! | `PackageDeclaration` | `PACKAGE_DEF` | Missing or misplaced package declaration |
//! | `LineLength` | none | Lines longer than a maximum |
//! | `JavadocHtmlTags` | `BLOCK_COMMENT_BEGIN` | Malformed HTML in doc comments |
//! | `JavadocParagraph` | `BLOCK_COMMENT_BEGIN` | Placement of `<p>` in doc comments |
//! | `RequireAuthorTag` | type definitions | Top-level type doc without `@author` |
//!
//! ## Usage
//!
//! ```ignore
//! use jstyle_checks::{ArrayTypeStyle, LineLength};
//! use jstyle_core::Checker;
//!
//! let checker = Checker::builder()
//!     .check(ArrayTypeStyle::new())
//!     .check(LineLength::new().max(100))
//!     .build()?;
//! ```
//!
//! Config-driven setups resolve check names through [`registry::create`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod array_type_style;
mod enhanced_switch_candidate;
mod javadoc_html_tags;
mod javadoc_paragraph;
mod line_length;
mod missing_switch_default;
mod package_declaration;
pub mod registry;
mod require_author_tag;
mod switches;

pub use array_type_style::ArrayTypeStyle;
pub use enhanced_switch_candidate::EnhancedSwitchCandidate;
pub use javadoc_html_tags::JavadocHtmlTags;
pub use javadoc_paragraph::JavadocParagraph;
pub use line_length::LineLength;
pub use missing_switch_default::MissingSwitchDefault;
pub use package_declaration::PackageDeclaration;
pub use registry::RegistryError;
pub use require_author_tag::RequireAuthorTag;

/// Re-export core types for convenience.
pub use jstyle_core::{Check, CheckContext, CheckResult, Severity, TokenType, Violation};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use jstyle_core::{Check, Checker};

    /// Runs `check` over one in-memory file and returns `(line, column, key)`
    /// for every violation, failing the test on any fault.
    pub(crate) fn verify<C>(check: C, source: &str) -> Vec<(usize, usize, String)>
    where
        C: Check + Clone + Sync + 'static,
    {
        verify_at(check, "src/p/A.java", source)
    }

    /// Like [`verify`], with an explicit file path.
    pub(crate) fn verify_at<C>(check: C, path: &str, source: &str) -> Vec<(usize, usize, String)>
    where
        C: Check + Clone + Sync + 'static,
    {
        let checker = Checker::builder().check(check).build().expect("checker");
        let result = checker.process_sources(&[(PathBuf::from(path), source.to_string())]);
        assert!(result.faults.is_empty(), "unexpected faults: {:?}", result.faults);
        result
            .violations
            .into_iter()
            .map(|v| (v.line, v.column, v.key))
            .collect()
    }

    /// Message keys only.
    pub(crate) fn keys<C>(check: C, source: &str) -> Vec<String>
    where
        C: Check + Clone + Sync + 'static,
    {
        verify(check, source).into_iter().map(|(_, _, key)| key).collect()
    }
}
