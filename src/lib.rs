//! # headstamp
//!
//! A tool that inserts or removes copyright license headers across a tree of
//! source files, selecting the correct comment syntax per file extension and
//! rendering a license template with project-specific variables.
//!
//! `headstamp` is a batch text transformer: each file is read once,
//! transformed into a new content string, and handed wholesale to a write
//! collaborator (in place, to a mirrored output tree, or printed in a dry
//! run). It avoids adding a header to any file that already has one, knows
//! where a header must land relative to shebangs and markup prologs, and
//! can reverse its own insertions losslessly.
//!
//! ## Usage as a Library
//!
//! This crate can be used as a library in your Rust projects:
//!
//! ```rust,no_run
//! use headstamp::diff::DiffManager;
//! use headstamp::exclude::ExclusionSet;
//! use headstamp::output::InPlaceSink;
//! use headstamp::processor::{Operation, Processor};
//! use headstamp::syntax::SyntaxTable;
//! use headstamp::templates::{DEFAULT_WORD_WRAP, LicenseTemplate, LicenseVars};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let vars = LicenseVars {
//!         software: "Widget".to_string(),
//!         description: "A widget assembler".to_string(),
//!         years: "2026".to_string(),
//!         holders: "ACME Inc.".to_string(),
//!     };
//!
//!     // Fatal if the template cannot be read: no file can be transformed
//!     let template = LicenseTemplate::load(Path::new("LICENSE.erb"), vars, DEFAULT_WORD_WRAP)?;
//!
//!     let processor = Processor::new(
//!         &template,
//!         SyntaxTable::builtin(),
//!         ExclusionSet::standard(),
//!         DiffManager::disabled(),
//!     );
//!
//!     let mut sink = InPlaceSink;
//!     let outcomes = processor.process(Operation::Add, "src", &mut sink)?;
//!     println!("{} files visited", outcomes.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Orchestration of per-file header operations
//! * [`templates`] - License template rendering and comment formatting
//! * [`syntax`] - Extension-to-comment-style mapping and placement rules
//! * [`header`] - The per-file insertion/removal transform
//! * [`exclude`] - Filenames never subject to transformation
//! * [`output`] - Write collaborators (dry-run, in-place, mirrored)
//! * [`report`] - Outcome aggregation and JSON reports
//! * [`logging`] - Logging utilities for verbose output

pub mod cli;
pub mod diff;
pub mod exclude;
pub mod header;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod syntax;
pub mod templates;
