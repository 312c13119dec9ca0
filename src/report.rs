//! # Report Module
//!
//! This module aggregates per-file outcomes into a run summary and can
//! write the full outcome list as a JSON report.
//!
//! Every file the orchestrator visits produces exactly one outcome, in
//! traversal order, so the report doubles as a deterministic record of the
//! run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::logging::is_quiet;

/// Outcome of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
  /// New content was produced and handed to the write collaborator
  Updated,
  /// `add` skipped the file because a header was already detected
  AlreadyLicensed,
  /// `remove` skipped the file because no header was detected
  NotLicensed,
  /// The base filename matched an exclusion pattern
  Excluded,
  /// The extension has no syntax rule
  Unsupported,
  /// The file could not be read as UTF-8 text
  ReadFailed,
}

/// One file's outcome, in traversal order.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// What happened to it
  pub outcome: Outcome,
}

/// Helper module for serializing PathBuf as a plain string
mod path_serialization {
  use serde::Serializer;

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }
}

/// Counts of per-file outcomes for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  pub updated: usize,
  pub already_licensed: usize,
  pub not_licensed: usize,
  pub excluded: usize,
  pub unsupported: usize,
  pub read_failed: usize,
  pub total: usize,
}

impl ProcessingSummary {
  /// Records one outcome.
  pub const fn record(&mut self, outcome: Outcome) {
    self.total += 1;
    match outcome {
      Outcome::Updated => self.updated += 1,
      Outcome::AlreadyLicensed => self.already_licensed += 1,
      Outcome::NotLicensed => self.not_licensed += 1,
      Outcome::Excluded => self.excluded += 1,
      Outcome::Unsupported => self.unsupported += 1,
      Outcome::ReadFailed => self.read_failed += 1,
    }
  }

  /// Builds a summary from a full outcome list.
  pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
    let mut summary = Self::default();
    for file in outcomes {
      summary.record(file.outcome);
    }
    summary
  }

  /// Count of files skipped for any non-update reason.
  pub const fn skipped(&self) -> usize {
    self.already_licensed + self.not_licensed + self.excluded + self.unsupported + self.read_failed
  }
}

/// Prints the end-of-run summary line, respecting quiet mode.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let files_word = if summary.total == 1 { "file" } else { "files" };
  println!(
    "{} {} processed: {} updated, {} skipped",
    summary.total,
    files_word,
    summary
      .updated
      .if_supports_color(Stream::Stdout, |count| count.green()),
    summary.skipped(),
  );
}

/// Writes the run's outcome list and summary as a JSON report.
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Creates a report generator targeting `output_path`.
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Generates the JSON report.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails or the report cannot be
  /// written to disk.
  pub fn generate(&self, files: &[FileOutcome], summary: &ProcessingSummary) -> Result<()> {
    #[derive(Serialize)]
    struct Report<'r> {
      generated: String,
      summary: &'r ProcessingSummary,
      files: &'r [FileOutcome],
    }

    let report = Report {
      generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      summary,
      files,
    };

    let content = serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize JSON report")?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
