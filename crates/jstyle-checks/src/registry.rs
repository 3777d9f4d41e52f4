//! Name-based construction of the bundled checks.
//!
//! Configuration files refer to checks by name; [`create`] turns a name and
//! its [`CheckConfig`] into a factory the checker can register.

use jstyle_core::{CheckConfig, CheckError, CheckFactory};
use thiserror::Error;
use tracing::debug;

use crate::{
    ArrayTypeStyle, EnhancedSwitchCandidate, JavadocHtmlTags, JavadocParagraph, LineLength,
    MissingSwitchDefault, PackageDeclaration, RequireAuthorTag,
};

/// Names of every bundled check, sorted.
pub const AVAILABLE: &[&str] = &[
    crate::array_type_style::NAME,
    crate::enhanced_switch_candidate::NAME,
    crate::javadoc_html_tags::NAME,
    crate::javadoc_paragraph::NAME,
    crate::line_length::NAME,
    crate::missing_switch_default::NAME,
    crate::package_declaration::NAME,
    crate::require_author_tag::NAME,
];

/// Errors creating a check from configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No bundled check has this name.
    #[error("unknown check `{name}`")]
    UnknownCheck {
        /// Requested name.
        name: String,
    },

    /// The check rejected its properties.
    #[error("invalid configuration for `{name}`: {source}")]
    Check {
        /// Check name.
        name: String,
        /// What the check rejected.
        #[source]
        source: CheckError,
    },
}

/// Creates the check called `name` with the properties in `config`.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownCheck`] for an unknown name and
/// [`RegistryError::Check`] when a property is invalid.
pub fn create(name: &str, config: &CheckConfig) -> Result<Box<dyn CheckFactory>, RegistryError> {
    let invalid = |source| RegistryError::Check {
        name: name.to_string(),
        source,
    };
    let factory: Box<dyn CheckFactory> = match name {
        crate::array_type_style::NAME => Box::new(ArrayTypeStyle::from_config(config)),
        crate::enhanced_switch_candidate::NAME => Box::new(EnhancedSwitchCandidate::new()),
        crate::javadoc_html_tags::NAME => Box::new(JavadocHtmlTags::from_config(config)),
        crate::javadoc_paragraph::NAME => Box::new(JavadocParagraph::from_config(config)),
        crate::line_length::NAME => Box::new(LineLength::from_config(config).map_err(invalid)?),
        crate::missing_switch_default::NAME => Box::new(MissingSwitchDefault::new()),
        crate::package_declaration::NAME => Box::new(PackageDeclaration::from_config(config)),
        crate::require_author_tag::NAME => {
            Box::new(RequireAuthorTag::from_config(config).map_err(invalid)?)
        }
        _ => {
            return Err(RegistryError::UnknownCheck {
                name: name.to_string(),
            })
        }
    };
    debug!(check = name, "check created from configuration");
    Ok(factory)
}
