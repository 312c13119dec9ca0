//! # headstamp
//!
//! A tool that inserts or removes copyright license headers in source files.

use anyhow::Result;

fn main() -> Result<()> {
  headstamp::cli::run()
}
