//! Check that every compilation unit declares a package matching its
//! directory.
//!
//! # Rationale
//!
//! Classes in the default package cannot be imported, and a package that
//! disagrees with the directory layout confuses build tools.
//!
//! # Detected Patterns
//!
//! - Files with types but no `package` declaration (reported once the whole
//!   tree was seen, so files without a `PACKAGE_DEF` still get a verdict)
//! - Package names that are not a suffix of the file's directory
//!
//! A second `package` declaration is rejected by the parser and never
//! reaches this check.
//!
//! # Configuration
//!
//! - `match_directory_structure`: compare the package with the directory
//!   (default: true)

use std::path::Path;

use jstyle_core::{Check, CheckConfig, CheckContext, CheckResult, Node, TokenType};

/// Check name.
pub const NAME: &str = "PackageDeclaration";

/// Message key for a file without a package declaration.
pub const MSG_MISSING: &str = "missing.package.declaration";

/// Message key for a package that does not match the directory.
pub const MSG_MISMATCH: &str = "mismatch.package.directory";

/// Requires a package declaration, optionally matching the directory.
#[derive(Debug, Clone)]
pub struct PackageDeclaration {
    match_directory_structure: bool,
    seen: bool,
}

impl Default for PackageDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageDeclaration {
    /// Creates the check with directory matching enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            match_directory_structure: true,
            seen: false,
        }
    }

    /// Enables or disables the directory comparison.
    #[must_use]
    pub fn match_directory_structure(mut self, enabled: bool) -> Self {
        self.match_directory_structure = enabled;
        self
    }

    /// Reads `match_directory_structure` from a check configuration.
    #[must_use]
    pub fn from_config(config: &CheckConfig) -> Self {
        Self::new().match_directory_structure(config.get_bool("match_directory_structure", true))
    }
}

/// Dotted name of a `PACKAGE_DEF`.
fn package_name(package: Node<'_, TokenType>) -> String {
    let Some(name) = package
        .children()
        .find(|c| matches!(c.kind(), TokenType::Ident | TokenType::Dot))
    else {
        return String::new();
    };
    if name.kind() == TokenType::Ident {
        return name.text().to_string();
    }
    name.descendants()
        .filter(|n| n.kind() == TokenType::Ident)
        .map(|n| n.text())
        .collect::<Vec<_>>()
        .join(".")
}

fn matches_directory(file: &Path, package: &str) -> bool {
    let directory = file.parent().unwrap_or_else(|| Path::new(""));
    directory.ends_with(package.split('.').collect::<std::path::PathBuf>())
}

impl Check for PackageDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_tokens(&self) -> &'static [TokenType] {
        &[TokenType::PackageDef]
    }

    fn required_tokens(&self) -> &'static [TokenType] {
        &[TokenType::PackageDef]
    }

    fn begin_tree(&mut self, _: &mut CheckContext<'_>, _: Node<'_, TokenType>) -> CheckResult {
        self.seen = false;
        Ok(())
    }

    fn visit_token(&mut self, ctx: &mut CheckContext<'_>, node: Node<'_, TokenType>) -> CheckResult {
        self.seen = true;
        if !self.match_directory_structure {
            return Ok(());
        }
        let package = package_name(node);
        let file = ctx.contents().path();
        if !matches_directory(file, &package) {
            let directory = file.parent().unwrap_or_else(|| Path::new("")).display().to_string();
            ctx.log(
                node,
                MSG_MISMATCH,
                format!("Package declaration does not match directory '{directory}'."),
            );
        }
        Ok(())
    }

    fn finish_tree(&mut self, ctx: &mut CheckContext<'_>, root: Node<'_, TokenType>) -> CheckResult {
        let has_code = root.children().any(|c| !c.is_comment());
        if !self.seen && has_code {
            ctx.log(root, MSG_MISSING, "Missing package declaration.");
        }
        Ok(())
    }
}
