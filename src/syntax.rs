//! # Syntax Module
//!
//! This module maps file extensions to comment syntax rules: the comment
//! delimiters used to wrap a license block and the placement patterns that
//! decide where in a file the block must be inserted (e.g. after a shebang
//! line or an XML prolog).
//!
//! Rules are grouped by format name in a TOML document, each format listing
//! the extensions that share its comment style and placement hints. The
//! table flattens to an extension-keyed lookup; when two formats claim the
//! same extension, the one appearing later in the document wins. A builtin
//! table covering the common languages is used when no config file is given.
//!
//! ## Config example
//!
//! ```toml
//! [hash]
//! ext = [".py", ".sh"]
//! after = ['^#!']
//! comment = { open = '#\n', close = '#\n', prefix = "# " }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::verbose_log;

/// The comment delimiters used to wrap a license block.
///
/// `open` is prepended once before the whole block, `close` appended once
/// after it, and `prefix` is prepended to every token of the rendered
/// license. Delimiter strings may embed the two-character sequence `\n`,
/// which is converted to a real newline when the block is formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentStyle {
  /// String emitted once before the license block (e.g. `/*\n`)
  #[serde(default)]
  pub open: String,

  /// String emitted once after the license block (e.g. ` */\n`)
  #[serde(default)]
  pub close: String,

  /// String prepended to every token of the license block (e.g. `// `)
  #[serde(default)]
  pub prefix: String,
}

impl CommentStyle {
  /// Create a line-comment style (no open/close delimiters).
  pub fn line(prefix: &str) -> Self {
    Self {
      open: String::new(),
      close: String::new(),
      prefix: prefix.to_string(),
    }
  }

  /// Create a block-comment style.
  pub fn block(open: &str, prefix: &str, close: &str) -> Self {
    Self {
      open: open.to_string(),
      close: close.to_string(),
      prefix: prefix.to_string(),
    }
  }

  /// Whether all three delimiter strings are empty.
  pub fn is_empty(&self) -> bool {
    self.open.is_empty() && self.close.is_empty() && self.prefix.is_empty()
  }
}

/// The syntax rule for one file extension: comment delimiters plus optional
/// placement patterns.
///
/// `after` patterns identify a line after which the header must be inserted
/// (first match wins). `before` is the parallel concept for insertion ahead
/// of a matched line; it is parsed and carried but no rule uses it yet.
#[derive(Debug, Clone)]
pub struct SyntaxRule {
  /// Comment delimiters for this extension
  pub comment: CommentStyle,

  /// Patterns matched against the first lines of a file; the header is
  /// inserted immediately after the first matching line
  pub after: Vec<Regex>,

  /// Reserved counterpart of `after`; unused by default
  pub before: Vec<Regex>,
}

/// Error type for syntax table operations. All variants are fatal: without
/// a syntax table no file can be transformed.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
  /// The syntax config file could not be read.
  #[error("failed to read syntax config '{path}'")]
  ReadError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The syntax config file contains invalid TOML.
  #[error("failed to parse syntax config '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A format entry is structurally valid TOML but describes a bad rule.
  #[error("invalid syntax rule for format '{format}': {message}")]
  InvalidRule { format: String, message: String },
}

/// One format group as it appears in the TOML config.
#[derive(Debug, Deserialize)]
struct FormatConfig {
  /// Extensions sharing this format, each with its leading dot
  ext: Vec<String>,

  /// Comment delimiters for the format
  comment: CommentStyle,

  /// Placement patterns, compiled as regular expressions
  #[serde(default)]
  after: Vec<String>,

  /// Reserved placement patterns, compiled but unused by default
  #[serde(default)]
  before: Vec<String>,
}

/// Extension-keyed lookup of syntax rules.
///
/// Keys are exact extension strings including the leading dot, matched
/// case-sensitively (`".rs"`, not `"rs"` or `".RS"`). Constructed once per
/// run and reused for every file.
pub struct SyntaxTable {
  rules: HashMap<String, SyntaxRule>,
}

impl SyntaxTable {
  /// Loads a syntax table from a TOML config file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, or
  /// contains an invalid rule (bad extension spelling, empty comment style,
  /// or a placement pattern that fails to compile).
  pub fn load(path: &Path) -> Result<Self, SyntaxError> {
    verbose_log!("Loading syntax config from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| SyntaxError::ReadError {
      path: path.to_path_buf(),
      source,
    })?;

    let table = Self::from_toml(&content, path)?;
    verbose_log!("Loaded syntax rules for {} extensions", table.rules.len());
    Ok(table)
  }

  /// Parses a TOML document into a syntax table.
  ///
  /// Formats are processed in document order, so on duplicate extensions
  /// the last-loaded format wins.
  fn from_toml(content: &str, path: &Path) -> Result<Self, SyntaxError> {
    let document: toml::Table = toml::from_str(content).map_err(|source| SyntaxError::ParseError {
      path: path.to_path_buf(),
      source,
    })?;

    let mut rules = HashMap::new();
    for (format, value) in document {
      let config: FormatConfig = value.try_into().map_err(|source| SyntaxError::ParseError {
        path: path.to_path_buf(),
        source,
      })?;

      let rule = compile_rule(&format, &config)?;
      for ext in &config.ext {
        validate_extension(&format, ext)?;
        rules.insert(ext.clone(), rule.clone());
      }
    }

    Ok(Self { rules })
  }

  /// The builtin default table covering common languages.
  ///
  /// Script languages carry shebang/encoding placement patterns, markup
  /// carries prolog and doctype patterns, and PHP carries its opening tag.
  pub fn builtin() -> Self {
    let mut table = Self { rules: HashMap::new() };

    table.insert_format(
      &[".c", ".h", ".cc", ".cpp", ".hh", ".hpp", ".m", ".mm"],
      CommentStyle::block("/*\n", " * ", " */\n\n"),
      &[],
    );
    table.insert_format(
      &[
        ".rs", ".go", ".cs", ".swift", ".dart", ".proto", ".java", ".scala", ".kt", ".kts", ".groovy",
      ],
      CommentStyle::block("//\n", "// ", "//\n\n"),
      &[],
    );
    table.insert_format(
      &[".js", ".mjs", ".cjs", ".jsx", ".ts", ".tsx", ".css", ".scss"],
      CommentStyle::block("/**\n", " * ", " */\n\n"),
      &[],
    );
    table.insert_format(
      &[
        ".py", ".rb", ".rake", ".sh", ".bash", ".pl", ".tcl", ".yaml", ".yml", ".toml", ".tf",
      ],
      CommentStyle::block("#\n", "# ", "#\n\n"),
      &["^#!", "^# +encoding:", "^# +frozen_string_literal:", "^# +-\\*-"],
    );
    table.insert_format(
      &[".html", ".htm", ".xml", ".svg", ".vue"],
      CommentStyle::block("<!--\n", " ", "-->\n\n"),
      &["^<\\?xml", "(?i)^<!doctype"],
    );
    table.insert_format(&[".php"], CommentStyle::block("/*\n", " * ", " */\n\n"), &["^<\\?php"]);
    table.insert_format(&[".sql", ".hs"], CommentStyle::block("--\n", "-- ", "--\n\n"), &[]);
    table.insert_format(&[".el", ".lisp"], CommentStyle::line(";; "), &[]);
    table.insert_format(&[".erl"], CommentStyle::line("% "), &[]);
    table.insert_format(&[".ml", ".mli"], CommentStyle::block("(*\n", "   ", "*)\n\n"), &[]);

    table
  }

  /// Inserts a builtin format. Patterns are static and known-good.
  fn insert_format(&mut self, extensions: &[&str], comment: CommentStyle, after: &[&str]) {
    let rule = SyntaxRule {
      comment,
      after: after
        .iter()
        .map(|pattern| Regex::new(pattern).expect("builtin placement pattern must compile"))
        .collect(),
      before: Vec::new(),
    };

    for ext in extensions {
      self.rules.insert((*ext).to_string(), rule.clone());
    }
  }

  /// Whether a syntax rule exists for the path's extension.
  pub fn supported(&self, path: &Path) -> bool {
    self.rules.contains_key(&extension(path))
  }

  /// The syntax rule for the path's extension, if any.
  pub fn rule_for(&self, path: &Path) -> Option<&SyntaxRule> {
    self.rules.get(&extension(path))
  }

  /// Number of extensions with a rule.
  pub fn len(&self) -> usize {
    self.rules.len()
  }

  /// Whether the table has no rules at all.
  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }
}

/// Compiles a format config into a rule.
fn compile_rule(format: &str, config: &FormatConfig) -> Result<SyntaxRule, SyntaxError> {
  if config.comment.is_empty() {
    return Err(SyntaxError::InvalidRule {
      format: format.to_string(),
      message: "comment style has no delimiters".to_string(),
    });
  }

  Ok(SyntaxRule {
    comment: config.comment.clone(),
    after: compile_patterns(format, &config.after)?,
    before: compile_patterns(format, &config.before)?,
  })
}

/// Compiles a pattern list, attributing failures to the format.
fn compile_patterns(format: &str, patterns: &[String]) -> Result<Vec<Regex>, SyntaxError> {
  patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern).map_err(|e| SyntaxError::InvalidRule {
        format: format.to_string(),
        message: format!("bad placement pattern '{pattern}': {e}"),
      })
    })
    .collect()
}

/// Validates one extension entry of a format.
fn validate_extension(format: &str, ext: &str) -> Result<(), SyntaxError> {
  if !ext.starts_with('.') || ext.len() < 2 {
    return Err(SyntaxError::InvalidRule {
      format: format.to_string(),
      message: format!("extension '{ext}' must include the leading dot"),
    });
  }
  Ok(())
}

/// Extracts the path's extension including the leading dot, case preserved.
///
/// Dotfiles (`.bashrc`) and names without a dot yield the empty string, so
/// they never match a rule.
pub fn extension(path: &Path) -> String {
  match path.file_name().and_then(|name| name.to_str()) {
    Some(name) => match name.rfind('.') {
      Some(idx) if idx > 0 => name[idx..].to_string(),
      _ => String::new(),
    },
    None => String::new(),
  }
}
