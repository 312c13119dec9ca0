//! # Output Module
//!
//! This module implements the write collaborator: the transform pipeline
//! hands each `(path, new content)` pair to a [`ContentSink`], which decides
//! what "writing" means for the run. Three sinks are provided:
//!
//! - [`DryRunSink`] — print the transformed content, touch nothing
//! - [`InPlaceSink`] — overwrite the original file
//! - [`MirrorSink`] — write to a mirrored path under an output directory
//!
//! Content is always replaced wholesale; no sink edits a file incrementally,
//! so a partially transformed file cannot exist.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::info_log;

/// Receiver of transformed file content.
pub trait ContentSink {
  /// Accepts the new full content for the file at `path`.
  fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Sink that prints transformed content to stdout without writing files.
pub struct DryRunSink {
  /// Whether to print the full transformed content; disabled when a diff
  /// is being shown instead
  print_contents: bool,
}

impl DryRunSink {
  /// Creates a dry-run sink.
  pub const fn new(print_contents: bool) -> Self {
    Self { print_contents }
  }
}

impl ContentSink for DryRunSink {
  fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
    info_log!("UPDATE {} (dry run)", path.display());
    if self.print_contents {
      println!("{contents}");
    }
    Ok(())
  }
}

/// Sink that overwrites the original file.
pub struct InPlaceSink;

impl ContentSink for InPlaceSink {
  fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    info_log!("UPDATE {}", path.display());
    Ok(())
  }
}

/// Sink that writes each file to a mirrored path under an output directory,
/// creating parent directories as needed. The original tree is untouched.
pub struct MirrorSink {
  output_dir: PathBuf,
  root: PathBuf,
}

impl MirrorSink {
  /// Creates a mirror sink rooted at `output_dir`.
  ///
  /// Absolute input paths are mirrored relative to the current working
  /// directory.
  pub fn new(output_dir: PathBuf) -> Result<Self> {
    let root = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(Self { output_dir, root })
  }

  fn target_path(&self, path: &Path) -> PathBuf {
    self.output_dir.join(mirror_relative(path, &self.root))
  }
}

impl ContentSink for MirrorSink {
  fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
    let target = self.target_path(path);

    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, contents).with_context(|| format!("Failed to write {}", target.display()))?;

    info_log!("UPDATE {} -> {}", path.display(), target.display());
    Ok(())
  }
}

/// Reduces a path to the relative form used under the mirror root.
///
/// Parent and root components are dropped so the mirrored path can never
/// escape the output directory.
fn mirror_relative(path: &Path, root: &Path) -> PathBuf {
  let relative = if path.is_absolute() {
    pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
  } else {
    path.to_path_buf()
  };

  relative
    .components()
    .filter(|component| matches!(component, Component::Normal(_)))
    .collect()
}
