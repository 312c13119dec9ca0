//! # Exclude Module
//!
//! This module implements the exclusion set: filenames that are never
//! subject to header transformation regardless of extension support.
//! License texts, holder lists, READMEs, and dotfiles are excluded by
//! default; additional patterns can be supplied from the command line.
//!
//! The set is an immutable configuration value constructed once at startup
//! and passed explicitly into the orchestrator; matching is against the base
//! filename only and is case-insensitive.

use std::path::Path;

use regex::{Regex, RegexBuilder};

/// Error type for exclusion pattern compilation.
#[derive(Debug, thiserror::Error)]
#[error("bad exclusion pattern '{pattern}'")]
pub struct ExclusionError {
  pub pattern: String,
  #[source]
  source: regex::Error,
}

/// Filename patterns that are never transformed.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
  patterns: Vec<Regex>,
}

impl ExclusionSet {
  /// The default patterns: license texts, holder lists, READMEs, dotfiles.
  pub const DEFAULT_PATTERNS: [&'static str; 4] = [r"^LICENSE(\.txt)?$", r"^HOLDERS(\.txt)?$", r"^README", r"^\."];

  /// Creates the standard exclusion set from [`Self::DEFAULT_PATTERNS`].
  pub fn standard() -> Self {
    Self {
      patterns: Self::DEFAULT_PATTERNS
        .iter()
        .map(|pattern| compile(pattern).expect("builtin exclusion pattern must compile"))
        .collect(),
    }
  }

  /// Creates an empty exclusion set that matches nothing.
  pub const fn empty() -> Self {
    Self { patterns: Vec::new() }
  }

  /// Extends the set with user-supplied patterns.
  ///
  /// # Errors
  ///
  /// Returns [`ExclusionError`] if a pattern is not a valid regular
  /// expression.
  pub fn with_patterns(mut self, patterns: &[String]) -> Result<Self, ExclusionError> {
    for pattern in patterns {
      let compiled = compile(pattern).map_err(|source| ExclusionError {
        pattern: pattern.clone(),
        source,
      })?;
      self.patterns.push(compiled);
    }
    Ok(self)
  }

  /// Whether the path's base filename matches any exclusion pattern.
  pub fn is_excluded(&self, path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
      return false;
    };

    self.patterns.iter().any(|pattern| pattern.is_match(name))
  }
}

impl Default for ExclusionSet {
  fn default() -> Self {
    Self::standard()
  }
}

/// Compiles a pattern case-insensitively.
fn compile(pattern: &str) -> Result<Regex, regex::Error> {
  RegexBuilder::new(pattern).case_insensitive(true).build()
}
