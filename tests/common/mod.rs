#![allow(dead_code)]

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

/// License template shared by the integration tests.
pub const TEMPLATE: &str = "Copyright (c) {{years}} {{holders}}\nAll rights reserved.\n";

/// The header the builtin Rust style produces for [`TEMPLATE`] with the
/// years/holders used by [`setup_tree`].
pub const RUST_HEADER: &str = "//\n// Copyright (c) 2026 ACME Inc.// \n// All rights reserved.// \n//\n\n";

/// Creates a temp workspace with a license template and a small source tree.
pub fn setup_tree() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;

  fs::write(temp_dir.path().join("license.erb"), TEMPLATE)?;

  let src_dir = temp_dir.path().join("src");
  fs::create_dir_all(&src_dir)?;

  fs::write(src_dir.join("main.rs"), "fn main() {\n    println!(\"hi\");\n}\n")?;
  fs::write(src_dir.join("lib.rs"), "pub fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n")?;
  fs::write(src_dir.join("script.py"), "#!/usr/bin/env python3\n\ndef main():\n    pass\n")?;
  fs::write(src_dir.join("README.md"), "# readme\n")?;
  fs::write(src_dir.join("data.xyz"), "opaque\n")?;

  Ok(temp_dir)
}

/// Builds a command for the headstamp binary.
pub fn headstamp() -> assert_cmd::Command {
  assert_cmd::Command::cargo_bin("headstamp").expect("headstamp binary should build")
}

/// The add/remove argument tail shared by most invocations.
pub fn standard_args() -> Vec<&'static str> {
  vec![
    "--license-file",
    "license.erb",
    "--years",
    "2026",
    "--holders",
    "ACME Inc.",
    "--colors",
    "never",
  ]
}
