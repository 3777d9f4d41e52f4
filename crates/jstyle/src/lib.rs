//! # jstyle
//!
//! Checkstyle-compatible Java linter engine.
//!
//! This is the facade crate: it re-exports the engine from `jstyle-core`,
//! the bundled checks from `jstyle-checks`, and turns a TOML [`Config`] into
//! a ready [`Checker`].
//!
//! ## Configuration
//!
//! ```toml
//! [checker]
//! tab_width = 4
//!
//! [checks.LineLength]
//! max = 100
//!
//! [checks.MissingSwitchDefault]
//! severity = "warning"
//!
//! [[filters]]
//! type = "SuppressWithNearbyCommentFilter"
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use jstyle::{checker_for_project, Config};
//!
//! let checker = checker_for_project("./project".as_ref())?;
//! let result = checker.check_dir("./project/src".as_ref())?;
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use jstyle_core::*;

/// Bundled checks and the name registry.
pub mod checks {
    pub use jstyle_checks::*;
}

mod setup;

pub use setup::{checker_for_project, checker_from_config, find_config, SetupError, CONFIG_CANDIDATES};
