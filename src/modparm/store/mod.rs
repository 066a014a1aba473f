//! # Storage Layer
//!
//! Kernel modules expose their tunables as one small text file per parameter:
//!
//! ```text
//! <root>/module/<module_name>/parameters/<parameter_name>
//! ```
//!
//! Each file holds a decimal integer, `cat`-style. Writing a new decimal value
//! as the whole content changes the parameter.
//!
//! ## Layers
//!
//! - [`backend::ParamBackend`]: the raw capability (list a directory, read a
//!   file, write a file). Nothing above it touches `std::fs`.
//! - [`param_store::ParamStore`]: the "what". Discovers modules and their
//!   parameters, classifies them, owns the in-memory copy and persists edits.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production backend over the real filesystem.
//!   Listings are sorted by name; writes happen in place.
//! - [`mem_backend::MemBackend`]: in-memory fake for tests. Listings keep
//!   insertion order, failures can be injected.
//!
//! ## Failure Policy
//!
//! Discovery never fails as a whole. A module directory that can't be listed
//! yields a module with no parameters, a parameter file that can't be read
//! yields value 0. Each such problem is recorded in a [`DiscoveryReport`] so
//! the UI can show it. Persistence errors are returned to the caller; the
//! in-memory value stays as edited either way.

use std::fmt;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod param_store;

/// Name of the per-module control file that is not a tunable.
pub const HOTMOD_ENTRY: &str = "hotmod";

/// A problem met during discovery. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryIssue {
    UnlistableModule { module: String, reason: String },
    UnreadableParameter {
        module: String,
        parameter: String,
        reason: String,
    },
}

impl fmt::Display for DiscoveryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryIssue::UnlistableModule { module, reason } => {
                write!(f, "cannot list parameters of {}: {}", module, reason)
            }
            DiscoveryIssue::UnreadableParameter {
                module,
                parameter,
                reason,
            } => write!(f, "cannot read {}/{}: {}", module, parameter, reason),
        }
    }
}

/// Report from the `discover` operation.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub modules: usize,
    pub parameters: usize,
    pub issues: Vec<DiscoveryIssue>,
}

impl DiscoveryReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
