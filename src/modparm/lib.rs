//! # Modparm Architecture
//!
//! Modparm is an interactive editor for the runtime-tunable parameters of a
//! fixed set of kernel modules. Each module exposes its parameters as one
//! pseudo-file per parameter under `/sys/module/<name>/parameters/`; modparm
//! lists them, lets the operator pick one, and writes edited values straight
//! back.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, reads keystrokes, renders screens      │
//! │  - The ONLY place that knows about stdout/stderr/terminals  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Menu Layer (menu.rs, editor.rs)                            │
//! │  - Finite-state machine fed one key or line at a time       │
//! │  - Dispatches to the plain or bitmask editor                │
//! │  - Returns structured messages, never prints                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ParamStore: discovery, classification, persistence       │
//! │  - ParamBackend trait: FsBackend (production),              │
//! │    MemBackend (testing)                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `menu.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types
//! - **Never** writes to stdout/stderr
//! - **Never** touches the filesystem except through a `ParamBackend`
//!
//! The whole interactive flow can therefore be tested by feeding a scripted
//! sequence of keys into a [`menu::Menu`] over a [`store::mem_backend::MemBackend`].
//!
//! ## Module Overview
//!
//! - [`menu`]: The state machine and operator messages
//! - [`editor`]: Plain and bitmask value editors
//! - [`store`]: Discovery, persistence and storage backends
//! - [`model`]: Core data types (`Module`, `Parameter`, `Radix`, `Session`)
//! - [`radix`]: Value parsing and hex/binary formatting
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, input sources and rendering for the binary (not part of the lib API)

pub mod config;
pub mod editor;
pub mod error;
pub mod menu;
pub mod model;
pub mod radix;
pub mod store;
