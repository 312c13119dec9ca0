//! # Diff Module
//!
//! This module renders line diffs between a file's original and transformed
//! content. It is used in dry-run mode to show what a transform would change
//! without writing anything.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for header changes.
///
/// Diffs can be shown on stderr, appended to a consolidated diff file, or
/// both. When neither is configured, [`emit`](Self::emit) is a no-op.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  show_diff: bool,

  /// Path a consolidated diff is appended to, if any
  save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new diff manager.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Creates a diff manager that does nothing.
  pub const fn disabled() -> Self {
    Self::new(false, None)
  }

  /// Whether any diff output is configured.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the diff for one file and routes it to the configured outputs.
  ///
  /// Diffs from multiple files are appended to the same save file, forming
  /// a single consolidated diff for the run.
  pub fn emit(&self, path: &Path, original: &str, updated: &str) -> Result<()> {
    if !self.is_active() {
      return Ok(());
    }

    let rendered = render_diff(path, original, updated);

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref save_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(save_path)
        .with_context(|| format!("Failed to open diff file {}", save_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file {}", save_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a line diff with +/-/space markers and a per-file heading.
fn render_diff(path: &Path, original: &str, updated: &str) -> String {
  let diff = TextDiff::from_lines(original, updated);

  let mut rendered = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    rendered.push_str(sign);
    rendered.push_str(change.value());
  }
  rendered.push('\n');

  rendered
}
