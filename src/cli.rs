//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with an `add` and a `remove`
//! subcommand sharing one set of options.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Datelike;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::diff::DiffManager;
use crate::exclude::ExclusionSet;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{ContentSink, DryRunSink, InPlaceSink, MirrorSink};
use crate::processor::{Operation, Processor};
use crate::report::{ProcessingSummary, ReportGenerator, print_summary};
use crate::syntax::SyntaxTable;
use crate::templates::{DEFAULT_WORD_WRAP, LicenseTemplate, LicenseVars};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert headers across a source tree, in place
  headstamp add src/ --license-file LICENSE.erb --software Widget --holders \"ACME Inc.\"

  # Preview what would change without writing anything
  headstamp add src/ --license-file LICENSE.erb --dry-run --show-diff

  # Write transformed files to a mirrored output tree
  headstamp add src/ --license-file LICENSE.erb --output-dir build/licensed

  # Remove previously inserted headers
  headstamp remove src/ --license-file LICENSE.erb --software Widget --holders \"ACME Inc.\"

  # Use a custom syntax table and extra exclusions
  headstamp add . --license-file LICENSE.erb --syntax syntax.toml --exclude '\\.generated\\.'
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Insert license headers into source files under PATH
  Add(TransformArgs),
  /// Remove license headers from source files under PATH
  Remove(TransformArgs),
}

/// Options shared by the add and remove subcommands
#[derive(Args, Debug)]
pub struct TransformArgs {
  /// File or directory to process. Directories are processed recursively;
  /// anything else is treated as a glob pattern.
  pub path: String,

  /// License template file, with {{software}}, {{description}}, {{years}},
  /// and {{holders}} placeholders
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: PathBuf,

  /// TOML syntax table mapping extensions to comment styles and placement
  /// patterns (default: builtin table)
  #[arg(long, value_name = "FILE")]
  pub syntax: Option<PathBuf>,

  /// Name of the software, substituted for {{software}}
  #[arg(long, value_name = "NAME", default_value = "")]
  pub software: String,

  /// One-line description, substituted for {{description}}
  #[arg(long, value_name = "TEXT", default_value = "")]
  pub description: String,

  /// Copyright years, substituted for {{years}} [default: current year]
  #[arg(long, value_name = "YEARS")]
  pub years: Option<String>,

  /// Copyright holders, substituted for {{holders}}
  #[arg(long, value_name = "NAMES", default_value = "")]
  pub holders: String,

  /// Maximum line width when word-wrapping the license text
  #[arg(long, value_name = "WIDTH", default_value_t = DEFAULT_WORD_WRAP)]
  pub word_wrap: usize,

  /// Write transformed files under this directory instead of in place,
  /// mirroring the input tree
  #[arg(long, value_name = "DIR", conflicts_with = "dry_run")]
  pub output_dir: Option<PathBuf>,

  /// Print transformed content instead of writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Show a diff of the changes in dry run mode
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// Save a consolidated diff of the changes to a file in dry run mode
  #[arg(long, value_name = "FILE", requires = "dry_run")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of per-file outcomes and save to the specified
  /// path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Additional filename patterns to exclude (regular expressions,
  /// repeatable)
  #[arg(long, short = 'e', value_name = "PATTERN")]
  pub exclude: Vec<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Parse CLI arguments and run the selected operation.
pub fn run() -> Result<()> {
  let cli = Cli::parse();

  let (operation, args) = match cli.command {
    Command::Add(args) => (Operation::Add, args),
    Command::Remove(args) => (Operation::Remove, args),
  };

  execute(operation, args)
}

/// Run one transform operation with fully parsed arguments.
pub fn execute(operation: Operation, args: TransformArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  debug!(?operation, path = %args.path, "starting run");

  let years = args.years.clone().unwrap_or_else(current_year);
  let vars = LicenseVars {
    software: args.software.clone(),
    description: args.description.clone(),
    years,
    holders: args.holders.clone(),
  };

  // Template and syntax failures are fatal: nothing can be transformed
  // without them.
  let template = LicenseTemplate::load(&args.license_file, vars, args.word_wrap)?;
  let syntax = match args.syntax {
    Some(ref path) => SyntaxTable::load(path)?,
    None => SyntaxTable::builtin(),
  };
  let exclude = ExclusionSet::standard().with_patterns(&args.exclude)?;

  let diff = if args.dry_run {
    DiffManager::new(args.show_diff, args.save_diff.clone())
  } else {
    DiffManager::disabled()
  };

  let processor = Processor::new(&template, syntax, exclude, diff);
  let mut sink = make_sink(&args)?;
  let outcomes = processor.process(operation, &args.path, sink.as_mut())?;

  let summary = ProcessingSummary::from_outcomes(&outcomes);
  print_summary(&summary);

  if let Some(ref report_path) = args.report_json {
    ReportGenerator::new(report_path).generate(&outcomes, &summary)?;
  }

  Ok(())
}

/// Selects the write collaborator for the run.
fn make_sink(args: &TransformArgs) -> Result<Box<dyn ContentSink>> {
  if args.dry_run {
    // When a diff is shown, printing the full content as well would drown it
    return Ok(Box::new(DryRunSink::new(!args.show_diff)));
  }

  match args.output_dir {
    Some(ref dir) => Ok(Box::new(MirrorSink::new(dir.clone())?)),
    None => Ok(Box::new(InPlaceSink)),
  }
}

fn current_year() -> String {
  chrono::Local::now().year().to_string()
}
