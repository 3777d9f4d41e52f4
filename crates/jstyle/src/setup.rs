//! Wiring a [`Config`] into a [`Checker`].

use std::path::{Path, PathBuf};

use jstyle_checks::{registry, RegistryError};
use jstyle_core::filters::FilterError;
use jstyle_core::{BuiltFilter, Checker, CheckerError, Config, ConfigError};
use thiserror::Error;
use tracing::{debug, info};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["jstyle.toml", ".jstyle.toml"];

/// Errors turning a configuration into a checker.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The configuration could not be read or resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured check is unknown or rejected its properties.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A configured filter is invalid.
    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// The checker rejected a registration.
    #[error(transparent)]
    Checker(#[from] CheckerError),
}

/// Builds a checker running every enabled check and filter of `config`.
///
/// Checks are registered in name order. A check without its own severity
/// gets `[checker] severity` when set, else its default.
///
/// # Errors
///
/// Returns an error for unknown checks or tokens, invalid check properties,
/// invalid filters, and tokens a check does not accept.
pub fn checker_from_config(config: &Config) -> Result<Checker, SetupError> {
    let settings = &config.checker;
    let mut builder = Checker::builder()
        .tab_width(settings.tab_width)
        .file_extensions(settings.file_extensions.iter().cloned())
        .respect_gitignore(settings.respect_gitignore);
    if let Some(threads) = settings.parallelism {
        builder = builder.parallelism(threads);
    }
    if let Some(dir) = &settings.basedir {
        builder = builder.basedir(dir.clone());
    }

    for (name, check) in config.enabled_checks() {
        let factory = registry::create(name, check)?;
        builder = builder.check_factory(factory, check.setup(settings.severity)?);
    }
    for filter in &config.filters {
        builder = match filter.build()? {
            BuiltFilter::Violation(filter) => builder.filter_box(filter),
            BuiltFilter::BeforeExecution(filter) => builder.before_execution_filter_box(filter),
        };
    }

    let checker = builder.build()?;
    debug!(checks = checker.check_count(), filters = config.filters.len(), "checker configured");
    Ok(checker)
}

/// First config file of [`CONFIG_CANDIDATES`] present in `root`.
#[must_use]
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Builds a checker from the config file in `root`, or from the default
/// configuration when there is none.
///
/// Without a configured `basedir`, paths are reported relative to `root`.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or describes an
/// invalid setup.
pub fn checker_for_project(root: &Path) -> Result<Checker, SetupError> {
    let mut config = match find_config(root) {
        Some(path) => {
            info!("Using config {}", path.display());
            Config::from_file(&path)?
        }
        None => Config::default(),
    };
    if config.checker.basedir.is_none() {
        config.checker.basedir = Some(root.to_path_buf());
    }
    checker_from_config(&config)
}
