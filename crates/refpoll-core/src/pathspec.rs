//! Glob matching over changed-file sets.

use glob::Pattern;

use crate::{CoreError, CoreResult};

/// A set of compiled glob patterns evaluated against a commit's changed
/// files.
#[derive(Debug, Default)]
pub struct PathFilter {
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// A filter that matches nothing and filters nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compiles a list of glob patterns.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PathGlob`] on the first malformed pattern.
    pub fn new(patterns: &[String]) -> CoreResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| CoreError::PathGlob {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any file matches any pattern.
    #[must_use]
    pub fn matches_any(&self, files: &[String]) -> bool {
        files
            .iter()
            .any(|file| self.patterns.iter().any(|pattern| pattern.matches(file)))
    }
}
