//! # Header Module
//!
//! This module implements the header transform: given one file's content and
//! a formatted license block, decide whether a header is already present and
//! perform the insertion or removal.
//!
//! A file is in one of two states, detected by the configured
//! [`LicenseDetector`](crate::license_detection::LicenseDetector): it either
//! has a header or it does not. `add` is a no-op on a file that has one,
//! `remove` is a no-op on a file that does not; both no-ops are reported as
//! skips, not errors. Transforms never mutate the input content; they
//! produce a new string.

use crate::license_detection::LicenseDetector;
use crate::syntax::SyntaxRule;

/// Maximum number of leading lines scanned for an `after` placement match.
pub const PLACEMENT_SCAN_LINES: usize = 10;

/// Why a transform declined to touch a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// `add` found an existing header within the detection window
  AlreadyLicensed,
  /// `remove` found no header within the detection window
  NotLicensed,
}

/// Result of one header transform over one file.
#[derive(Debug, PartialEq, Eq)]
pub enum HeaderOutcome {
  /// The transform produced new content for the file
  Updated(String),
  /// The transform was a no-op
  Skipped(SkipReason),
}

/// The header transform for one syntax rule.
pub struct HeaderTransform<'a> {
  rule: &'a SyntaxRule,
  detector: &'a dyn LicenseDetector,
}

impl<'a> HeaderTransform<'a> {
  /// Creates a transform bound to a syntax rule and a detector.
  pub const fn new(rule: &'a SyntaxRule, detector: &'a dyn LicenseDetector) -> Self {
    Self { rule, detector }
  }

  /// Inserts the formatted license into the content.
  ///
  /// When the rule has no `after` patterns the license is prepended. With
  /// `after` patterns, at most the first [`PLACEMENT_SCAN_LINES`] lines are
  /// scanned; on the first line matching any pattern (line order outer,
  /// pattern order inner) the license is inserted immediately after that
  /// line and scanning stops. When nothing matches, placement degrades to
  /// prepending. Everything around the insertion point is preserved
  /// byte-exactly, original line terminators included.
  pub fn add(&self, content: &str, formatted: &str) -> HeaderOutcome {
    if self.detector.has_license(content) {
      return HeaderOutcome::Skipped(SkipReason::AlreadyLicensed);
    }

    if self.rule.after.is_empty() {
      return HeaderOutcome::Updated(format!("{formatted}{content}"));
    }

    if let Some(insert_at) = self.placement_offset(content) {
      let mut updated = String::with_capacity(content.len() + formatted.len() + 1);
      updated.push_str(&content[..insert_at]);
      if !updated.ends_with('\n') {
        // The matched line is the last line of the file and has no
        // terminator; the header cannot start mid-line.
        updated.push('\n');
      }
      updated.push_str(formatted);
      updated.push_str(&content[insert_at..]);
      return HeaderOutcome::Updated(updated);
    }

    HeaderOutcome::Updated(format!("{formatted}{content}"))
  }

  /// Removes every exact occurrence of the formatted license from the
  /// content.
  ///
  /// Detection only gates whether removal is attempted; the removal itself
  /// is a global exact-substring replacement, not a positional one. A
  /// detection hit with no exact occurrence (a mismatched license text)
  /// yields the original content unchanged.
  pub fn remove(&self, content: &str, formatted: &str) -> HeaderOutcome {
    if !self.detector.has_license(content) {
      return HeaderOutcome::Skipped(SkipReason::NotLicensed);
    }

    HeaderOutcome::Updated(content.replace(formatted, ""))
  }

  /// Byte offset just past the first line matching an `after` pattern
  /// within the scan window, or `None` when no line matches.
  fn placement_offset(&self, content: &str) -> Option<usize> {
    let mut offset = 0;

    for line in content.split_inclusive('\n').take(PLACEMENT_SCAN_LINES) {
      offset += line.len();
      let text = line.strip_suffix('\n').unwrap_or(line);
      if self.rule.after.iter().any(|pattern| pattern.is_match(text)) {
        return Some(offset);
      }
    }

    None
  }
}

#[cfg(test)]
mod tests {
  use regex::Regex;

  use super::*;
  use crate::license_detection::ScanWindowDetector;
  use crate::syntax::{CommentStyle, SyntaxRule};

  fn plain_rule() -> SyntaxRule {
    SyntaxRule {
      comment: CommentStyle::line("// "),
      after: Vec::new(),
      before: Vec::new(),
    }
  }

  fn shebang_rule() -> SyntaxRule {
    SyntaxRule {
      comment: CommentStyle::line("# "),
      after: vec![Regex::new("^#!").expect("pattern must compile")],
      before: Vec::new(),
    }
  }

  const LICENSE: &str = "// Copyright (c) 2026 ACME Inc.\n";

  #[test]
  fn test_add_prepends_without_placement_patterns() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let outcome = transform.add("fn main() {}\n", LICENSE);
    assert_eq!(
      outcome,
      HeaderOutcome::Updated("// Copyright (c) 2026 ACME Inc.\nfn main() {}\n".to_string())
    );
  }

  #[test]
  fn test_add_skips_when_header_already_present() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let content = "// Copyright (c) 2026 ACME Inc.\nfn main() {}\n";
    assert_eq!(
      transform.add(content, LICENSE),
      HeaderOutcome::Skipped(SkipReason::AlreadyLicensed)
    );
  }

  #[test]
  fn test_add_inserts_after_shebang() {
    let rule = shebang_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let license = "# Copyright (c) 2026 ACME Inc.\n";
    let outcome = transform.add("#!/usr/bin/env x\nbody\n", license);
    assert_eq!(
      outcome,
      HeaderOutcome::Updated("#!/usr/bin/env x\n# Copyright (c) 2026 ACME Inc.\nbody\n".to_string())
    );
  }

  #[test]
  fn test_add_prepends_when_no_line_matches() {
    let rule = shebang_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let license = "# Copyright (c) 2026 ACME Inc.\n";
    let outcome = transform.add("body line one\nbody line two\n", license);
    assert_eq!(
      outcome,
      HeaderOutcome::Updated("# Copyright (c) 2026 ACME Inc.\nbody line one\nbody line two\n".to_string())
    );
  }

  #[test]
  fn test_add_ignores_matches_outside_scan_window() {
    let rule = shebang_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    // A shebang-looking line on line 11 is past the placement window
    let mut content = "x\n".repeat(PLACEMENT_SCAN_LINES);
    content.push_str("#!/late/shebang\n");

    let license = "# notice\n";
    let HeaderOutcome::Updated(updated) = transform.add(&content, license) else {
      panic!("expected updated content");
    };
    assert!(updated.starts_with("# notice\nx\n"));
  }

  #[test]
  fn test_add_first_matching_line_wins() {
    let rule = SyntaxRule {
      comment: CommentStyle::line("# "),
      after: vec![
        Regex::new("^#!").expect("pattern must compile"),
        Regex::new("^second").expect("pattern must compile"),
      ],
      before: Vec::new(),
    };
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let license = "# notice\n";
    let outcome = transform.add("#!/bin/sh\nsecond\nthird\n", license);
    assert_eq!(
      outcome,
      HeaderOutcome::Updated("#!/bin/sh\n# notice\nsecond\nthird\n".to_string())
    );
  }

  #[test]
  fn test_add_matched_line_without_terminator_gains_one() {
    let rule = shebang_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let license = "# notice\n";
    let outcome = transform.add("#!/bin/sh", license);
    assert_eq!(outcome, HeaderOutcome::Updated("#!/bin/sh\n# notice\n".to_string()));
  }

  #[test]
  fn test_remove_skips_when_no_header_detected() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    assert_eq!(
      transform.remove("fn main() {}\n", LICENSE),
      HeaderOutcome::Skipped(SkipReason::NotLicensed)
    );
  }

  #[test]
  fn test_remove_deletes_every_occurrence() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let content = format!("{LICENSE}fn main() {{}}\n{LICENSE}");
    assert_eq!(
      transform.remove(&content, LICENSE),
      HeaderOutcome::Updated("fn main() {}\n".to_string())
    );
  }

  #[test]
  fn test_remove_with_mismatched_license_leaves_content_unchanged() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let content = "// Copyright (c) 2020 Someone Else\nfn main() {}\n";
    assert_eq!(
      transform.remove(content, LICENSE),
      HeaderOutcome::Updated(content.to_string())
    );
  }

  #[test]
  fn test_add_then_remove_round_trips() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let original = "fn main() {\n    println!(\"hi\");\n}\n";
    let HeaderOutcome::Updated(with_header) = transform.add(original, LICENSE) else {
      panic!("expected updated content");
    };
    let HeaderOutcome::Updated(restored) = transform.remove(&with_header, LICENSE) else {
      panic!("expected updated content");
    };
    assert_eq!(restored, original);
  }

  #[test]
  fn test_add_is_idempotent_via_detection() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    let original = "fn main() {}\n";
    let HeaderOutcome::Updated(once) = transform.add(original, LICENSE) else {
      panic!("expected updated content");
    };
    assert_eq!(
      transform.add(&once, LICENSE),
      HeaderOutcome::Skipped(SkipReason::AlreadyLicensed)
    );
  }

  #[test]
  fn test_add_inserts_second_header_when_notice_is_outside_window() {
    let rule = plain_rule();
    let detector = ScanWindowDetector::new();
    let transform = HeaderTransform::new(&rule, &detector);

    // A notice on line 12 is invisible to the detector, so add proceeds
    let mut content = "x\n".repeat(11);
    content.push_str("// Copyright (c) 2020 Someone\n");

    let HeaderOutcome::Updated(updated) = transform.add(&content, LICENSE) else {
      panic!("expected updated content");
    };
    assert!(updated.starts_with(LICENSE));
    assert!(updated.contains("// Copyright (c) 2020 Someone\n"));
  }
}
