//! # Processor Module
//!
//! This module contains the orchestrator: it resolves a path argument to a
//! set of candidate files, filters excluded filenames, looks up syntax
//! support, invokes the header transform, and hands new content to the
//! write collaborator.
//!
//! Files are processed one at a time, fully read and transformed before the
//! next is touched, and every visited file yields exactly one
//! [`FileOutcome`] in traversal order. Directory traversal is sorted so the
//! outcome sequence for a given tree is stable across runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::diff::DiffManager;
use crate::exclude::ExclusionSet;
use crate::header::{HeaderOutcome, HeaderTransform, SkipReason};
use crate::license_detection::{LicenseDetector, ScanWindowDetector};
use crate::output::ContentSink;
use crate::report::{FileOutcome, Outcome};
use crate::syntax::{SyntaxTable, extension};
use crate::templates::{LicenseTemplate, RenderedLicense, format_license};
use crate::{info_log, verbose_log};

/// Which header transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  /// Insert license headers
  Add,
  /// Remove license headers
  Remove,
}

/// A file path and its full text content, loaded once per transform.
///
/// Transforms never mutate the content; they produce a new string that
/// replaces the file wholesale via the write collaborator.
pub struct FileDocument {
  /// Path the content was read from
  pub path: PathBuf,
  /// The file's full text
  pub content: String,
}

impl FileDocument {
  /// Reads the file at `path` into a document.
  pub fn load(path: &Path) -> std::io::Result<Self> {
    Ok(Self {
      path: path.to_path_buf(),
      content: fs::read_to_string(path)?,
    })
  }
}

/// Orchestrator for header operations over a file tree.
///
/// The `Processor` is responsible for:
/// - Resolving a path argument (file, directory, or glob pattern)
/// - Filtering excluded filenames and unsupported extensions
/// - Applying the header transform per file
/// - Handing new content to the write collaborator
/// - Recording a deterministic per-file outcome sequence
pub struct Processor {
  /// License rendered once per run and reused for every file
  rendered: RenderedLicense,

  /// Extension-keyed syntax rules
  syntax: SyntaxTable,

  /// Filenames never transformed
  exclude: ExclusionSet,

  /// Detector deciding whether a file already has a header
  detector: Box<dyn LicenseDetector>,

  /// Diff rendering for dry runs
  diff: DiffManager,
}

impl Processor {
  /// Creates a processor, rendering the license template once.
  pub fn new(template: &LicenseTemplate, syntax: SyntaxTable, exclude: ExclusionSet, diff: DiffManager) -> Self {
    Self {
      rendered: template.render(),
      syntax,
      exclude,
      detector: Box::new(ScanWindowDetector::new()),
      diff,
    }
  }

  /// Replaces the license detector. Mostly useful for tests and embedders.
  #[must_use]
  pub fn with_detector(mut self, detector: Box<dyn LicenseDetector>) -> Self {
    self.detector = detector;
    self
  }

  /// Applies `operation` to every candidate file under `path`.
  ///
  /// `path` may name a single file, a directory (processed recursively in
  /// sorted order), or a glob pattern. Returns the `(path, outcome)` pair
  /// for every visited file, in traversal order.
  ///
  /// # Errors
  ///
  /// Returns an error for an invalid glob pattern, a failed directory
  /// traversal, or a write collaborator failure. Per-file skip conditions
  /// are outcomes, not errors.
  pub fn process(&self, operation: Operation, path: &str, sink: &mut dyn ContentSink) -> Result<Vec<FileOutcome>> {
    let files = self.resolve_files(path)?;
    debug!(count = files.len(), ?operation, "resolved candidate files");

    // Formatted header per extension, computed lazily once per run
    let mut formatted_cache: HashMap<String, String> = HashMap::new();

    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
      let outcome = self.process_file(operation, &file, sink, &mut formatted_cache)?;
      outcomes.push(FileOutcome { path: file, outcome });
    }

    Ok(outcomes)
  }

  /// Applies the operation to one file, reporting its outcome.
  fn process_file(
    &self,
    operation: Operation,
    path: &Path,
    sink: &mut dyn ContentSink,
    formatted_cache: &mut HashMap<String, String>,
  ) -> Result<Outcome> {
    verbose_log!("Processing file: {}", path.display());

    if self.exclude.is_excluded(path) {
      info_log!("SKIP {} (excluded)", path.display());
      return Ok(Outcome::Excluded);
    }

    let Some(rule) = self.syntax.rule_for(path) else {
      info_log!("SKIP {} (unsupported)", path.display());
      return Ok(Outcome::Unsupported);
    };

    let document = match FileDocument::load(path) {
      Ok(document) => document,
      Err(e) => {
        warn!(path = %path.display(), error = %e, "failed to read file");
        info_log!("SKIP {} (unreadable)", path.display());
        return Ok(Outcome::ReadFailed);
      }
    };

    let formatted = formatted_cache
      .entry(extension(path))
      .or_insert_with(|| format_license(&self.rendered, &rule.comment));

    let transform = HeaderTransform::new(rule, self.detector.as_ref());
    let result = match operation {
      Operation::Add => transform.add(&document.content, formatted),
      Operation::Remove => transform.remove(&document.content, formatted),
    };

    match result {
      HeaderOutcome::Updated(updated) => {
        self.diff.emit(path, &document.content, &updated)?;
        sink.write(path, &updated)?;
        Ok(Outcome::Updated)
      }
      HeaderOutcome::Skipped(SkipReason::AlreadyLicensed) => {
        info_log!("SKIP {} (license already present)", path.display());
        Ok(Outcome::AlreadyLicensed)
      }
      HeaderOutcome::Skipped(SkipReason::NotLicensed) => {
        info_log!("SKIP {} (no license detected)", path.display());
        Ok(Outcome::NotLicensed)
      }
    }
  }

  /// Resolves a path argument to the candidate file list.
  fn resolve_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);

    if path.is_file() {
      return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
      return collect_directory(path);
    }

    // Neither a file nor a directory: treat the argument as a glob pattern
    let mut files = Vec::new();
    let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
    for entry in entries {
      match entry {
        Ok(p) if p.is_file() => files.push(p),
        Ok(p) if p.is_dir() => files.extend(collect_directory(&p)?),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "unreadable glob entry"),
      }
    }

    Ok(files)
  }
}

/// Collects every file under `dir` by recursive descent, sorted by file
/// name at each level so traversal order is stable.
fn collect_directory(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry = entry.with_context(|| format!("Failed to traverse {}", dir.display()))?;
    if entry.file_type().is_file() {
      files.push(entry.into_path());
    }
  }

  Ok(files)
}
