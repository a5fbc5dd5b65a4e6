//! `sync-panels`: propagate canonical dashboard panels across level files.
//!
//! Usage:
//!   sync-panels <dashboards-dir> [source-dashboard] [--all-panels] [--panel ID]...
//!
//! Prints `Updated <path>` for every rewritten file. Exits 1 on any error.

use std::process::ExitCode;

fn main() -> ExitCode {
    levelboard::cli::main(std::env::args_os())
}
