//! # CLI
//!
//! One UI client for the library: it reads keys, prints screens and sets up
//! logging. Nothing here decides what a key means; that is [`modparm::menu`].
//!
//! ## Input modes
//!
//! - **Terminal**: single keystrokes, screen cleared before each redraw.
//! - **Pipe**: one key per line and one value per line, screens appended.
//!   Scripts like `printf '0\n0\n0\nq\nq\nq\n' | modparm --root DIR` work.
//!
//! Input closing in any state ends the session.

mod commands;
mod input;
mod render;
mod setup;
mod styles;

pub use commands::run;
