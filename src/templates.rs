//! # Templates Module
//!
//! This module provides functionality for loading license templates,
//! rendering them with project-specific variables (software name,
//! description, years, holders), word-wrapping the result, and formatting it
//! with the comment delimiters of a target file type.
//!
//! Rendering is pure and deterministic: the same template and variables
//! always produce the same [`RenderedLicense`], and formatting the same
//! rendered license with the same [`CommentStyle`] always yields a
//! byte-identical string. Header removal relies on this to find an exact
//! match.
//!
//! ## Example
//!
//! ```rust
//! use headstamp::syntax::CommentStyle;
//! use headstamp::templates::{LicenseTemplate, LicenseVars, format_license};
//!
//! let vars = LicenseVars {
//!   software: "Widget".to_string(),
//!   description: "A widget assembler".to_string(),
//!   years: "2026".to_string(),
//!   holders: "ACME Inc.".to_string(),
//! };
//!
//! let template = LicenseTemplate::from_source("Copyright (c) {{years}} {{holders}}", vars, 80);
//! let rendered = template.render();
//! let header = format_license(&rendered, &CommentStyle::line("// "));
//! assert!(header.contains("Copyright (c) 2026 ACME Inc."));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::syntax::CommentStyle;
use crate::verbose_log;

/// The default maximum line width used when word-wrapping license text.
pub const DEFAULT_WORD_WRAP: usize = 80;

/// Error type for license template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The license template file could not be read. Fatal for the whole run:
  /// without a rendered license no file can be transformed.
  #[error("unable to open license template '{path}'")]
  NotFound {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// The fixed set of variables substituted into a license template.
///
/// Placeholders use the `{{name}}` delimiter pair so they cannot collide
/// with ordinary license prose. Substitution is a static lookup of these
/// four fields; templates cannot execute arbitrary expressions.
#[derive(Debug, Clone, Default)]
pub struct LicenseVars {
  /// Name of the software the license applies to (`{{software}}`)
  pub software: String,

  /// One-line description of the software (`{{description}}`)
  pub description: String,

  /// Copyright years, e.g. "2026" or "2019-2026" (`{{years}}`)
  pub years: String,

  /// Copyright holders (`{{holders}}`)
  pub holders: String,
}

/// A license template: source text, the variable set, and a word-wrap width.
///
/// Constructed once per run from configuration and reused for every file.
#[derive(Debug)]
pub struct LicenseTemplate {
  /// The raw template text with `{{name}}` placeholders
  source: String,

  /// Variables substituted into the template
  vars: LicenseVars,

  /// Maximum line width applied after substitution
  word_wrap: usize,
}

impl LicenseTemplate {
  /// Loads a license template from a file.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::NotFound`] if the file does not exist or
  /// cannot be read as UTF-8 text.
  pub fn load(path: &Path, vars: LicenseVars, word_wrap: usize) -> Result<Self, TemplateError> {
    verbose_log!("Loading license template from: {}", path.display());

    let source = fs::read_to_string(path).map_err(|source| TemplateError::NotFound {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Self {
      source,
      vars,
      word_wrap,
    })
  }

  /// Creates a template directly from source text.
  pub fn from_source(source: impl Into<String>, vars: LicenseVars, word_wrap: usize) -> Self {
    Self {
      source: source.into(),
      vars,
      word_wrap,
    }
  }

  /// Renders the template into a [`RenderedLicense`].
  ///
  /// Substitutes all placeholders from the variable set, guarantees exactly
  /// one trailing newline, and word-wraps every logical line to the
  /// configured width. Pure and deterministic for a given template and
  /// variable set.
  pub fn render(&self) -> RenderedLicense {
    let mut rendered = self
      .source
      .replace("{{software}}", &self.vars.software)
      .replace("{{description}}", &self.vars.description)
      .replace("{{years}}", &self.vars.years)
      .replace("{{holders}}", &self.vars.holders);

    if !rendered.ends_with('\n') {
      rendered.push('\n');
    }

    RenderedLicense::new(&word_wrap(&rendered, self.word_wrap))
  }
}

/// An immutable, tokenized rendering of a license template.
///
/// The token sequence alternates content tokens and `"\n"` tokens such that
/// concatenating all tokens reproduces the wrapped text byte-exactly. Blank
/// lines appear as an empty content token followed by a newline token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLicense {
  tokens: Vec<String>,
}

impl RenderedLicense {
  /// Splits wrapped license text into content and newline tokens.
  ///
  /// A trailing empty segment after the final newline is dropped; interior
  /// and leading empty segments are kept so blank lines survive.
  fn new(text: &str) -> Self {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len().saturating_sub(1);

    let mut tokens = Vec::with_capacity(segments.len() * 2);
    for (i, segment) in segments.iter().enumerate() {
      if i > 0 {
        tokens.push("\n".to_string());
      }
      if !segment.is_empty() || i < last {
        tokens.push((*segment).to_string());
      }
    }

    Self { tokens }
  }

  /// The token sequence, alternating content and newline tokens.
  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  /// Reconstructs the wrapped license text by concatenating all tokens.
  pub fn text(&self) -> String {
    self.tokens.concat()
  }
}

/// Word-wraps text to a maximum line width.
///
/// Each logical line is broken at the nearest whitespace boundary at or
/// before the width limit; the boundary whitespace character is replaced by
/// the inserted newline. A segment with no whitespace boundary within the
/// limit is left unbroken up to the next whitespace, so a single long word
/// is never split mid-word.
pub fn word_wrap(text: &str, max_width: usize) -> String {
  let mut out = String::with_capacity(text.len());

  for line in text.split_inclusive('\n') {
    let (body, terminator) = match line.strip_suffix('\n') {
      Some(body) => (body, "\n"),
      None => (line, ""),
    };
    wrap_line(body, max_width, &mut out);
    out.push_str(terminator);
  }

  out
}

/// Wraps a single line (no terminator) into `out`.
fn wrap_line(line: &str, max_width: usize, out: &mut String) {
  let mut rest = line;

  loop {
    if rest.chars().count() <= max_width {
      out.push_str(rest);
      return;
    }

    // The break candidate is the last whitespace character within the width
    // limit (needing at least one preceding character), falling back to the
    // first whitespace past the limit.
    let mut chosen: Option<usize> = None;
    for (pos, (idx, ch)) in rest.char_indices().enumerate() {
      if pos == 0 || !ch.is_whitespace() {
        continue;
      }
      if pos <= max_width {
        chosen = Some(idx);
      } else {
        if chosen.is_none() {
          chosen = Some(idx);
        }
        break;
      }
    }

    match chosen {
      Some(idx) => {
        out.push_str(&rest[..idx]);
        out.push('\n');
        let ws_len = rest[idx..].chars().next().map_or(1, char::len_utf8);
        rest = &rest[idx + ws_len..];
      }
      None => {
        // No whitespace at all: the line stays unbroken.
        out.push_str(rest);
        return;
      }
    }
  }
}

/// Formats a rendered license with the given comment style.
///
/// Concatenates the open delimiter, then every token with the line prefix
/// prepended (newline tokens included — the prefix lands on both text and
/// newline segments, which duplicates prefixes around blank lines; this
/// matches the established output format and must not change, since removal
/// depends on reproducing it byte-exactly), then the close delimiter.
/// Afterwards any literal backslash-n sequence is replaced with a real
/// newline so delimiters from config files may embed escaped newlines.
pub fn format_license(rendered: &RenderedLicense, style: &CommentStyle) -> String {
  let mut result = String::new();

  result.push_str(&style.open);
  for token in rendered.tokens() {
    result.push_str(&style.prefix);
    result.push_str(token);
  }
  result.push_str(&style.close);

  result.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vars() -> LicenseVars {
    LicenseVars {
      software: "Widget".to_string(),
      description: "A widget assembler".to_string(),
      years: "2026".to_string(),
      holders: "ACME Inc.".to_string(),
    }
  }

  #[test]
  fn test_render_substitutes_all_variables() {
    let template = LicenseTemplate::from_source(
      "{{software}} - {{description}}\nCopyright (c) {{years}} {{holders}}",
      vars(),
      DEFAULT_WORD_WRAP,
    );

    let text = template.render().text();
    assert!(text.contains("Widget - A widget assembler"));
    assert!(text.contains("Copyright (c) 2026 ACME Inc."));
  }

  #[test]
  fn test_render_appends_exactly_one_trailing_newline() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}}", vars(), DEFAULT_WORD_WRAP);
    let text = template.render().text();
    assert!(text.ends_with('\n'));
    assert!(!text.ends_with("\n\n"));

    // A template that already ends in a newline does not gain another
    let template = LicenseTemplate::from_source("Copyright (c) {{years}}\n", vars(), DEFAULT_WORD_WRAP);
    assert_eq!(template.render().text(), "Copyright (c) 2026\n");
  }

  #[test]
  fn test_render_is_deterministic() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}} {{holders}}", vars(), DEFAULT_WORD_WRAP);
    assert_eq!(template.render(), template.render());
  }

  #[test]
  fn test_tokens_reconstruct_wrapped_text() {
    let template = LicenseTemplate::from_source("line one\n\nline three\n", vars(), DEFAULT_WORD_WRAP);
    let rendered = template.render();
    assert_eq!(rendered.text(), "line one\n\nline three\n");
    // Blank line appears as an empty content token between newline tokens
    assert_eq!(rendered.tokens(), &["line one", "\n", "", "\n", "line three", "\n"]);
  }

  #[test]
  fn test_word_wrap_breaks_at_whitespace_boundary() {
    let wrapped = word_wrap("aaa bbb ccc\n", 7);
    assert_eq!(wrapped, "aaa bbb\nccc\n");
  }

  #[test]
  fn test_word_wrap_prefers_last_boundary_in_range() {
    let wrapped = word_wrap("aa bb cc dd\n", 8);
    assert_eq!(wrapped, "aa bb cc\ndd\n");
  }

  #[test]
  fn test_word_wrap_leaves_long_word_unbroken() {
    let long_word = "x".repeat(30);
    let wrapped = word_wrap(&format!("{long_word} tail\n"), 10);
    // The long word exceeds the width but is never split mid-word
    assert_eq!(wrapped, format!("{long_word}\ntail\n"));
  }

  #[test]
  fn test_word_wrap_line_without_whitespace_is_untouched() {
    let long_word = format!("{}\n", "y".repeat(25));
    assert_eq!(word_wrap(&long_word, 10), long_word);
  }

  #[test]
  fn test_word_wrap_short_lines_are_untouched() {
    assert_eq!(word_wrap("short\nlines\n", 80), "short\nlines\n");
  }

  #[test]
  fn test_format_with_line_style() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}}\nAll rights reserved.\n", vars(), 80);
    let rendered = template.render();

    let formatted = format_license(&rendered, &CommentStyle::line("// "));
    assert_eq!(formatted, "// Copyright (c) 2026// \n// All rights reserved.// \n");
  }

  #[test]
  fn test_format_with_block_style() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}}\n", vars(), 80);
    let rendered = template.render();

    let style = CommentStyle::block("/*\n", " * ", " */\n");
    let formatted = format_license(&rendered, &style);
    assert_eq!(formatted, "/*\n * Copyright (c) 2026 * \n */\n");
  }

  #[test]
  fn test_format_duplicates_prefix_around_blank_lines() {
    let template = LicenseTemplate::from_source("a\n\nb\n", vars(), 80);
    let rendered = template.render();

    let formatted = format_license(&rendered, &CommentStyle::line("# "));
    // The empty content token and the newline token each receive the prefix
    assert_eq!(formatted, "# a# \n# # \n# b# \n");
  }

  #[test]
  fn test_format_unescapes_literal_newline_sequences() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}}\n", vars(), 80);
    let rendered = template.render();

    let style = CommentStyle::block("#\\n", "# ", "#\\n");
    let formatted = format_license(&rendered, &style);
    assert_eq!(formatted, "#\n# Copyright (c) 2026# \n#\n");
  }

  #[test]
  fn test_format_is_deterministic() {
    let template = LicenseTemplate::from_source("Copyright (c) {{years}} {{holders}}\n", vars(), 80);
    let rendered = template.render();
    let style = CommentStyle::line("// ");

    assert_eq!(format_license(&rendered, &style), format_license(&rendered, &style));
  }

  #[test]
  fn test_load_missing_template_fails() {
    let result = LicenseTemplate::load(Path::new("/nonexistent/LICENSE.erb"), vars(), 80);
    assert!(matches!(result, Err(TemplateError::NotFound { .. })));
  }
}
