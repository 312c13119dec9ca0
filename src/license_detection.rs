//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license
//! detection algorithms. It allows for easily replacing the detection
//! algorithm without modifying the header transform.

use std::sync::LazyLock;

use regex::Regex;

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a
/// file already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  fn has_license(&self, content: &str) -> bool;
}

/// Default detector: scans a bounded window of leading lines for a
/// copyright or license token.
///
/// Only the first `scan_lines + 1` lines are inspected, so a notice buried
/// deeper in the file is deliberately not detected. The match is
/// case-insensitive.
pub struct ScanWindowDetector {
  scan_lines: usize,
}

impl ScanWindowDetector {
  /// Default number of lines past the first that are scanned.
  pub const DEFAULT_SCAN_LINES: usize = 10;

  /// Creates a detector with the default scan window.
  pub const fn new() -> Self {
    Self {
      scan_lines: Self::DEFAULT_SCAN_LINES,
    }
  }

  /// Creates a detector with a custom scan window.
  pub const fn with_scan_lines(scan_lines: usize) -> Self {
    Self { scan_lines }
  }
}

impl Default for ScanWindowDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl LicenseDetector for ScanWindowDetector {
  fn has_license(&self, content: &str) -> bool {
    static TOKEN: LazyLock<Regex> =
      LazyLock::new(|| Regex::new(r"(?i)copyright|license").expect("detection regex must compile"));

    content
      .split('\n')
      .take(self.scan_lines + 1)
      .any(|line| TOKEN.is_match(line))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_detects_copyright_token() {
    let detector = ScanWindowDetector::new();

    assert!(detector.has_license("// Copyright (c) 2024 Test Company\n\nfn main() {}"));
    assert!(detector.has_license("/* copyright 2024 */\n\nfn main() {}"));
    assert!(detector.has_license("# Licensed under the MIT License\nimport os\n"));
  }

  #[test]
  fn test_detection_is_case_insensitive() {
    let detector = ScanWindowDetector::new();

    assert!(detector.has_license("// COPYRIGHT 2024\n"));
    assert!(detector.has_license("// LiCeNsE\n"));
  }

  #[test]
  fn test_no_token_means_no_license() {
    let detector = ScanWindowDetector::new();

    assert!(!detector.has_license("fn main() {\n    println!(\"plain code\");\n}"));
  }

  #[test]
  fn test_token_outside_scan_window_is_ignored() {
    let detector = ScanWindowDetector::new();

    // Eleven filler lines push the notice to line 12, one past the window
    let mut content = "x\n".repeat(11);
    content.push_str("// Copyright (c) 2024\n");
    assert!(!detector.has_license(&content));

    // On line 11 it is still inside the window
    let mut content = "x\n".repeat(10);
    content.push_str("// Copyright (c) 2024\n");
    assert!(detector.has_license(&content));
  }

  #[test]
  fn test_custom_scan_window() {
    let detector = ScanWindowDetector::with_scan_lines(0);

    assert!(detector.has_license("// Copyright first line\ncode\n"));
    assert!(!detector.has_license("code\n// Copyright second line\n"));
  }
}
