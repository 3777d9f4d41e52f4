//! Configuration types for jstyle.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::check::CheckSetup;
use crate::filters::{
    BeforeExecutionExclusionFileFilter, BeforeExecutionFilter, Filter, FilterError,
    SuppressFilterElement, SuppressWithNearbyCommentFilter, SuppressWithNearbyTextFilter,
    SuppressWithPlainTextCommentFilter, SuppressionCommentFilter,
};
use crate::token_types::TokenType;
use crate::types::Severity;

/// Top-level configuration for jstyle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Checker configuration.
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Per-check configurations, keyed by check name. Checks are registered
    /// in key order.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,

    /// Filters, in evaluation order.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a check is enabled. Listed checks are enabled unless
    /// `enabled = false`.
    #[must_use]
    pub fn is_check_enabled(&self, name: &str) -> bool {
        self.checks
            .get(name)
            .is_some_and(|c| c.enabled.unwrap_or(true))
    }

    /// Enabled checks in registration order.
    pub fn enabled_checks(&self) -> impl Iterator<Item = (&str, &CheckConfig)> {
        self.checks
            .iter()
            .filter(|(_, c)| c.enabled.unwrap_or(true))
            .map(|(name, c)| (name.as_str(), c))
    }
}

/// Checker-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Width of a tab stop for column and length computations.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Extensions of files that are processed; others are skipped.
    #[serde(default = "default_extensions")]
    pub file_extensions: Vec<String>,

    /// Number of worker threads; `None` or 1 processes files sequentially.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Reported paths are made relative to this directory.
    #[serde(default)]
    pub basedir: Option<PathBuf>,

    /// Severity of checks that configure none; unset keeps each check's
    /// default severity.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Whether directory discovery honours `.gitignore` files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            file_extensions: default_extensions(),
            parallelism: None,
            basedir: None,
            severity: None,
            respect_gitignore: true,
        }
    }
}

fn default_tab_width() -> usize {
    8
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-check configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether this check is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this check.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Id reported with violations and matched by id filters.
    #[serde(default)]
    pub id: Option<String>,

    /// Token names replacing the check's default tokens.
    #[serde(default)]
    pub tokens: Option<Vec<String>>,

    /// Check-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl CheckConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolves tokens, severity and id into registration settings.
    ///
    /// `default_severity` applies when the check configures none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownToken`] for a token name outside the
    /// token taxonomy.
    pub fn setup(&self, default_severity: Option<Severity>) -> Result<CheckSetup, ConfigError> {
        let tokens = self
            .tokens
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| {
                        TokenType::from_name(name.trim()).ok_or_else(|| ConfigError::UnknownToken {
                            name: name.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(CheckSetup {
            tokens,
            severity: self.severity.or(default_severity),
            id: self.id.clone(),
        })
    }
}

/// A configured filter, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FilterConfig {
    /// See [`SuppressFilterElement`].
    SuppressFilterElement {
        /// File path pattern.
        #[serde(default)]
        files: Option<String>,
        /// Check name pattern.
        #[serde(default)]
        checks: Option<String>,
        /// Message pattern.
        #[serde(default)]
        message: Option<String>,
        /// Exact check id.
        #[serde(default)]
        id: Option<String>,
        /// Line ranges.
        #[serde(default)]
        lines: Option<String>,
        /// Column ranges.
        #[serde(default)]
        columns: Option<String>,
    },
    /// See [`SuppressWithNearbyCommentFilter`].
    SuppressWithNearbyCommentFilter {
        /// Comment pattern.
        #[serde(default)]
        comment_format: Option<String>,
        /// Check name format.
        #[serde(default)]
        check_format: Option<String>,
        /// Message format.
        #[serde(default)]
        message_format: Option<String>,
        /// Id format.
        #[serde(default)]
        id_format: Option<String>,
        /// Influence format.
        #[serde(default)]
        influence_format: Option<String>,
        /// Scan `//` comments.
        #[serde(default)]
        check_cpp: Option<bool>,
        /// Scan `/* */` comments.
        #[serde(default)]
        check_c: Option<bool>,
    },
    /// See [`SuppressionCommentFilter`].
    SuppressionCommentFilter {
        /// Pattern turning reporting off.
        #[serde(default)]
        off_format: Option<String>,
        /// Pattern turning reporting on.
        #[serde(default)]
        on_format: Option<String>,
        /// Check name format.
        #[serde(default)]
        check_format: Option<String>,
        /// Message format.
        #[serde(default)]
        message_format: Option<String>,
        /// Scan `//` comments.
        #[serde(default)]
        check_cpp: Option<bool>,
        /// Scan `/* */` comments.
        #[serde(default)]
        check_c: Option<bool>,
    },
    /// See [`SuppressWithPlainTextCommentFilter`].
    SuppressWithPlainTextCommentFilter {
        /// Pattern of lines turning reporting off.
        #[serde(default)]
        off_comment_format: Option<String>,
        /// Pattern of lines turning reporting on.
        #[serde(default)]
        on_comment_format: Option<String>,
        /// Check name format.
        #[serde(default)]
        check_format: Option<String>,
        /// Message format.
        #[serde(default)]
        message_format: Option<String>,
        /// Id format.
        #[serde(default)]
        id_format: Option<String>,
    },
    /// See [`SuppressWithNearbyTextFilter`].
    SuppressWithNearbyTextFilter {
        /// Pattern searched in every line.
        #[serde(default)]
        nearby_text_pattern: Option<String>,
        /// Check name pattern.
        #[serde(default)]
        check_pattern: Option<String>,
        /// Message pattern.
        #[serde(default)]
        message_pattern: Option<String>,
        /// Id pattern.
        #[serde(default)]
        id_pattern: Option<String>,
        /// Signed line range.
        #[serde(default)]
        line_range: Option<String>,
    },
    /// See [`BeforeExecutionExclusionFileFilter`].
    BeforeExecutionExclusionFileFilter {
        /// Path pattern of excluded files.
        file_name_format: String,
    },
}

/// A filter built from its configuration.
pub enum BuiltFilter {
    /// Decides about violations.
    Violation(Box<dyn Filter>),
    /// Decides about files before they are read.
    BeforeExecution(Box<dyn BeforeExecutionFilter>),
}

impl FilterConfig {
    /// Builds the configured filter.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if a pattern or range list is invalid.
    pub fn build(&self) -> Result<BuiltFilter, FilterError> {
        Ok(match self {
            Self::SuppressFilterElement {
                files,
                checks,
                message,
                id,
                lines,
                columns,
            } => {
                let mut filter = SuppressFilterElement::new();
                if let Some(p) = files {
                    filter = filter.files(p)?;
                }
                if let Some(p) = checks {
                    filter = filter.checks(p)?;
                }
                if let Some(p) = message {
                    filter = filter.message(p)?;
                }
                if let Some(id) = id {
                    filter = filter.id(id.clone());
                }
                if let Some(r) = lines {
                    filter = filter.lines(r)?;
                }
                if let Some(r) = columns {
                    filter = filter.columns(r)?;
                }
                BuiltFilter::Violation(Box::new(filter))
            }
            Self::SuppressWithNearbyCommentFilter {
                comment_format,
                check_format,
                message_format,
                id_format,
                influence_format,
                check_cpp,
                check_c,
            } => {
                let mut filter = SuppressWithNearbyCommentFilter::new();
                if let Some(p) = comment_format {
                    filter = filter.comment_format(p)?;
                }
                if let Some(p) = check_format {
                    filter = filter.check_format(p)?;
                }
                if let Some(p) = message_format {
                    filter = filter.message_format(p)?;
                }
                if let Some(p) = id_format {
                    filter = filter.id_format(p)?;
                }
                if let Some(p) = influence_format {
                    filter = filter.influence_format(p.clone());
                }
                filter = filter
                    .check_cpp(check_cpp.unwrap_or(true))
                    .check_c(check_c.unwrap_or(true));
                BuiltFilter::Violation(Box::new(filter))
            }
            Self::SuppressionCommentFilter {
                off_format,
                on_format,
                check_format,
                message_format,
                check_cpp,
                check_c,
            } => {
                let mut filter = SuppressionCommentFilter::new();
                if let Some(p) = off_format {
                    filter = filter.off_format(p)?;
                }
                if let Some(p) = on_format {
                    filter = filter.on_format(p)?;
                }
                if let Some(p) = check_format {
                    filter = filter.check_format(p)?;
                }
                if let Some(p) = message_format {
                    filter = filter.message_format(p)?;
                }
                filter = filter
                    .check_cpp(check_cpp.unwrap_or(true))
                    .check_c(check_c.unwrap_or(true));
                BuiltFilter::Violation(Box::new(filter))
            }
            Self::SuppressWithPlainTextCommentFilter {
                off_comment_format,
                on_comment_format,
                check_format,
                message_format,
                id_format,
            } => {
                let mut filter = SuppressWithPlainTextCommentFilter::new();
                if let Some(p) = off_comment_format {
                    filter = filter.off_format(p)?;
                }
                if let Some(p) = on_comment_format {
                    filter = filter.on_format(p)?;
                }
                if let Some(p) = check_format {
                    filter = filter.check_format(p)?;
                }
                if let Some(p) = message_format {
                    filter = filter.message_format(p)?;
                }
                if let Some(p) = id_format {
                    filter = filter.id_format(p)?;
                }
                BuiltFilter::Violation(Box::new(filter))
            }
            Self::SuppressWithNearbyTextFilter {
                nearby_text_pattern,
                check_pattern,
                message_pattern,
                id_pattern,
                line_range,
            } => {
                let mut filter = SuppressWithNearbyTextFilter::new();
                if let Some(p) = nearby_text_pattern {
                    filter = filter.nearby_text_pattern(p)?;
                }
                if let Some(p) = check_pattern {
                    filter = filter.check_pattern(p)?;
                }
                if let Some(p) = message_pattern {
                    filter = filter.message_pattern(p)?;
                }
                if let Some(p) = id_pattern {
                    filter = filter.id_pattern(p)?;
                }
                if let Some(r) = line_range {
                    filter = filter.line_range(r.clone());
                }
                BuiltFilter::Violation(Box::new(filter))
            }
            Self::BeforeExecutionExclusionFileFilter { file_name_format } => {
                BuiltFilter::BeforeExecution(Box::new(BeforeExecutionExclusionFileFilter::new(
                    file_name_format,
                )?))
            }
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A configured token name is not a known token.
    #[error("Unknown token name: {name}")]
    UnknownToken {
        /// The configured name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.checker.tab_width, 8);
        assert_eq!(config.checker.file_extensions, vec!["java".to_string()]);
        assert!(config.checker.respect_gitignore);
        assert!(config.checks.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[checker]
tab_width = 4
parallelism = 2
basedir = "src"

[checks.LineLength]
severity = "warning"
max = 100
ignore_pattern = "^import"

[checks.ArrayTypeStyle]
id = "arrays"
tokens = ["ARRAY_DECLARATOR"]

[checks.MissingSwitchDefault]
enabled = false

[[filters]]
type = "SuppressWithNearbyCommentFilter"
comment_format = "CHECKSTYLE IGNORE (\\w+)"
check_format = "$1"

[[filters]]
type = "BeforeExecutionExclusionFileFilter"
file_name_format = "module-info\\.java$"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.checker.tab_width, 4);
        assert_eq!(config.checker.parallelism, Some(2));
        assert!(config.is_check_enabled("LineLength"));
        assert!(!config.is_check_enabled("MissingSwitchDefault"));
        assert!(!config.is_check_enabled("Unlisted"));

        let names: Vec<_> = config.enabled_checks().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ArrayTypeStyle", "LineLength"]);

        let line_length = &config.checks["LineLength"];
        assert_eq!(line_length.get_int("max", 80), 100);
        assert_eq!(line_length.get_str("ignore_pattern", ""), "^import");
        let setup = line_length.setup(None).expect("setup");
        assert_eq!(setup.severity, Some(Severity::Warning));

        let setup = config.checks["ArrayTypeStyle"]
            .setup(Some(Severity::Info))
            .expect("setup");
        assert_eq!(setup.tokens, Some(vec![TokenType::ArrayDeclarator]));
        assert_eq!(setup.severity, Some(Severity::Info));
        assert_eq!(setup.id.as_deref(), Some("arrays"));

        assert_eq!(config.filters.len(), 2);
        assert!(matches!(
            config.filters[0].build().expect("filter"),
            BuiltFilter::Violation(_)
        ));
        assert!(matches!(
            config.filters[1].build().expect("filter"),
            BuiltFilter::BeforeExecution(_)
        ));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let config = CheckConfig {
            tokens: Some(vec!["NOT_A_TOKEN".to_string()]),
            ..CheckConfig::default()
        };
        assert!(matches!(
            config.setup(None),
            Err(ConfigError::UnknownToken { name }) if name == "NOT_A_TOKEN"
        ));
    }

    #[test]
    fn invalid_filter_pattern_is_reported() {
        let filter = FilterConfig::SuppressFilterElement {
            files: Some("(".to_string()),
            checks: None,
            message: None,
            id: None,
            lines: None,
            columns: None,
        };
        assert!(filter.build().is_err());
    }

    #[test]
    fn text_filters_are_configurable() {
        let config = Config::parse(
            r#"
[[filters]]
type = "SuppressWithPlainTextCommentFilter"
off_comment_format = "NOLINT:BEGIN"
on_comment_format = "NOLINT:END"

[[filters]]
type = "SuppressWithNearbyTextFilter"
nearby_text_pattern = 'NOLINT\((\w+)\)'
check_pattern = "$1"
line_range = "1"
"#,
        )
        .expect("config");
        assert_eq!(
            config.filters[1],
            FilterConfig::SuppressWithNearbyTextFilter {
                nearby_text_pattern: Some(r"NOLINT\((\w+)\)".to_string()),
                check_pattern: Some("$1".to_string()),
                message_pattern: None,
                id_pattern: None,
                line_range: Some("1".to_string()),
            }
        );
        for filter in &config.filters {
            assert!(matches!(filter.build().expect("filter"), BuiltFilter::Violation(_)));
        }

        let broken = FilterConfig::SuppressWithPlainTextCommentFilter {
            off_comment_format: Some("(".to_string()),
            on_comment_format: None,
            check_format: None,
            message_format: None,
            id_format: None,
        };
        assert!(matches!(broken.build(), Err(FilterError::Regex { .. })));
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(matches!(
            Config::parse("[checker\n"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
