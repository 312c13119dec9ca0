//! # Logging Module
//!
//! This module provides logging utilities for the headstamp tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Tracing subscriber initialization for structured diagnostics
//!
//! Per-file outcome lines go to stdout so they can be piped; verbose detail
//! and structured tracing go to stderr.
//!
//! ## Example
//!
//! ```rust
//! use headstamp::logging::{ColorMode, set_verbose};
//! use headstamp::{info_log, verbose_log};
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Processing file: {}", "example.rs");
//!
//! // Log an info message (goes to stdout)
//! info_log!("UPDATE {}", "example.rs");
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::EnvFilter;

/// Global atomic value holding the current output mode.
///
/// Initialized to `0` (Normal); switched via [`set_verbose`] / [`set_quiet`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Apply this color mode process-wide via owo-colors' override mechanism.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

impl std::fmt::Display for ColorMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ColorMode::Auto => write!(f, "auto"),
      ColorMode::Never => write!(f, "never"),
      ColorMode::Always => write!(f, "always"),
    }
  }
}

/// Initialize the tracing subscriber for structured diagnostics.
///
/// The filter defaults are derived from the CLI verbosity flags but can be
/// overridden with the `RUST_LOG` environment variable. Output goes to
/// stderr so it never interferes with piped stdout.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let default_directive = if quiet {
    "error"
  } else {
    match verbose {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  // try_init so repeated initialization (e.g. in tests) is harmless
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Sets the global verbose logging flag.
///
/// When verbose logging is enabled, the [`verbose_log!`] macro will output
/// messages to stderr. When disabled, verbose log messages are suppressed.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Sets the global quiet flag, suppressing [`info_log!`] output.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
///
/// This function is used internally by the [`verbose_log!`] macro to determine
/// whether to output verbose log messages.
pub fn is_verbose() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Quiet)
}

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose
/// mode is enabled via [`set_verbose`](crate::logging::set_verbose). It uses
/// the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// This macro is used for per-file outcome lines and other information that
/// should normally be displayed to the user. It uses the same format string
/// syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function used by the [`info_log!`] macro to print messages with
/// color support.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
