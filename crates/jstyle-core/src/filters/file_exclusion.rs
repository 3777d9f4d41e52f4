//! Skips files by name before they are read.

use std::path::Path;

use regex::Regex;

use super::{compile, BeforeExecutionFilter, FilterError};

/// Rejects files whose path matches `file_name_format`.
#[derive(Debug, Clone)]
pub struct BeforeExecutionExclusionFileFilter {
    file_name_format: Regex,
}

impl BeforeExecutionExclusionFileFilter {
    /// Creates a filter excluding paths that match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Regex`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        Ok(Self {
            file_name_format: compile(pattern)?,
        })
    }
}

impl BeforeExecutionFilter for BeforeExecutionExclusionFileFilter {
    fn accept(&self, path: &Path) -> bool {
        !self.file_name_format.is_match(&path.to_string_lossy())
    }
}
