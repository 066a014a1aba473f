//! # Modparm CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/modparm/cli/`,
//! while this file only invokes `cli::run()`.
//!
//! The tool has a single exit path. Errors that escape the session (no home
//! directory for `--test`, a broken terminal) are reported on stderr and the
//! process still ends normally.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
    }
}
