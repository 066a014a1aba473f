//! # CLI Layer
//!
//! The CLI is the only place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Handles argument parsing and logging setup
//! - Formats output for human consumption
//!
//! Everything else lives in the library: the store discovers and persists
//! parameters, the menu decides what each keystroke means. This module wires
//! them to a terminal (or a pipe) and loops until the menu reaches `Exit`.

use super::input::{KeySource, LineKeys, TermKeys};
use super::render::{render_messages, render_screen};
use super::setup::{parse_cli, Cli};
use console::Term;
use directories::BaseDirs;
use modparm::config::ModparmConfig;
use modparm::error::{ModparmError, Result};
use modparm::menu::{CmdMessage, Menu};
use modparm::model::Session;
use modparm::store::backend::ParamBackend;
use modparm::store::fs_backend::FsBackend;
use modparm::store::param_store::ParamStore;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`tracing_subscriber` syntax).
pub const LOG_ENV: &str = "MODPARM_LOG";

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let mut pending = Vec::new();
    let config = match ModparmConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            pending.push(CmdMessage::warning(format!(
                "config not loaded ({}), using defaults",
                e
            )));
            ModparmConfig::default()
        }
    };

    let root = resolve_root(&cli, &config)?;
    debug!(root = %root.display(), modules = ?config.modules, "starting");

    let mut store = ParamStore::with_backend(FsBackend::new(), root);
    let report = store.discover(&config.modules[..]);
    info!(
        modules = report.modules,
        parameters = report.parameters,
        issues = report.issues.len(),
        "parameters loaded"
    );
    pending.extend(
        report
            .issues
            .iter()
            .map(|issue| CmdMessage::warning(issue.to_string())),
    );

    let mut menu = Menu::new(store, Session::new(config.radix));

    let use_color = io::stdout().is_terminal();
    colored::control::set_override(use_color);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match input_mode(io::stdin().is_terminal(), Term::stdout().is_term()) {
        InputMode::Keystrokes => {
            drive(&mut menu, &mut TermKeys::new(), &mut out, pending, use_color)
        }
        InputMode::Lines => {
            let stdin = io::stdin();
            let mut keys = LineKeys::new(stdin.lock());
            drive(&mut menu, &mut keys, &mut out, pending, use_color)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Keystrokes,
    Lines,
}

/// Raw keystrokes only when stdin and stdout are both terminals; `console`
/// reads keys through the stdout `Term`.
fn input_mode(stdin_is_term: bool, stdout_is_term: bool) -> InputMode {
    if stdin_is_term && stdout_is_term {
        InputMode::Keystrokes
    } else {
        InputMode::Lines
    }
}

/// Logs go to stderr so they never mix with the screens on stdout.
fn init_logging(verbose: bool) {
    // Warnings already reach the operator as messages above the menu.
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// `--root` wins, then `--test` (the home directory), then the configured root.
fn resolve_root(cli: &Cli, config: &ModparmConfig) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    if cli.test {
        return BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| ModparmError::Backend("cannot determine home directory".to_string()));
    }
    Ok(config.root.clone())
}

/// Runs the menu loop until the menu exits or input closes.
///
/// `pending` holds messages to show above the first screen.
pub fn drive<B, K, W>(
    menu: &mut Menu<B>,
    keys: &mut K,
    out: &mut W,
    mut pending: Vec<CmdMessage>,
    use_color: bool,
) -> Result<()>
where
    B: ParamBackend,
    K: KeySource,
    W: Write,
{
    while !menu.state().is_exit() {
        if keys.is_interactive() {
            Term::stdout().clear_screen()?;
        }
        write!(out, "{}", render_messages(&pending, use_color))?;
        write!(out, "{}", render_screen(menu, use_color))?;
        out.flush()?;

        let step = if menu.state().wants_line() {
            keys.read_line()?.map(|line| menu.submit_value(&line))
        } else {
            keys.read_key()?.map(|key| menu.handle_key(key))
        };

        match step {
            Some(step) => pending = step.messages,
            None => {
                debug!("input closed");
                writeln!(out)?;
                menu.quit();
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use modparm::store::mem_backend::MemBackend;
    use std::io::Cursor;
    use std::path::Path;

    fn menu() -> Menu<MemBackend> {
        let backend = MemBackend::new();
        backend.add_file("/sys/module/ipmi_si/parameters/debugflag", "5\n");
        backend.add_file("/sys/module/ipmi_si/parameters/timeout", "10\n");
        let mut store = ParamStore::with_backend(backend, "/sys");
        store.discover(&["ipmi_si"]);
        Menu::new(store, Session::default())
    }

    fn run_script(menu: &mut Menu<MemBackend>, script: &str) -> String {
        let mut keys = LineKeys::new(Cursor::new(script.to_string()));
        let mut out = Vec::new();
        drive(menu, &mut keys, &mut out, Vec::new(), false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn keystrokes_only_with_both_ends_on_a_terminal() {
        assert_eq!(input_mode(true, true), InputMode::Keystrokes);
        // `modparm > log.txt` at a terminal.
        assert_eq!(input_mode(true, false), InputMode::Lines);
        assert_eq!(input_mode(false, true), InputMode::Lines);
        assert_eq!(input_mode(false, false), InputMode::Lines);
    }

    #[test]
    fn toggling_a_bit_writes_the_file() {
        let mut menu = menu();
        let out = run_script(&mut menu, "0\n0\n0\nq\nq\nq\n");

        assert!(menu.state().is_exit());
        assert!(out.contains("00000100"));
        assert!(out.contains("ipmi_si/debugflag = 4 (0x04)"));
        let store = menu.into_store();
        assert_eq!(
            store
                .backend()
                .content(Path::new("/sys/module/ipmi_si/parameters/debugflag"))
                .as_deref(),
            Some("4\n")
        );
    }

    #[test]
    fn plain_value_is_parsed_in_session_radix() {
        let mut menu = menu();
        let out = run_script(&mut menu, "0\n1\n1a\nq\nq\n");

        assert!(out.contains("ipmi_si/timeout = 26 (0x1a)"));
        assert_eq!(menu.into_store().get(0, 1).map(|p| p.value), Some(26));
    }

    #[test]
    fn invalid_value_reprompts() {
        let mut menu = menu();
        let out = run_script(&mut menu, "r\n0\n1\n1a\n7\nq\nq\n");

        assert!(out.contains("invalid number, try again"));
        assert_eq!(menu.into_store().get(0, 1).map(|p| p.value), Some(7));
    }

    #[test]
    fn closed_input_exits_from_any_state() {
        let mut menu = menu();
        run_script(&mut menu, "0\n1\n");
        assert!(menu.state().is_exit());
        assert!(menu.into_store().backend().writes().is_empty());
    }

    #[test]
    fn pending_messages_come_first() {
        let mut menu = menu();
        let mut keys = LineKeys::new(Cursor::new("q\n"));
        let mut out = Vec::new();
        drive(
            &mut menu,
            &mut keys,
            &mut out,
            vec![CmdMessage::warning("cannot list parameters of ipmi_devintf")],
            false,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("cannot list parameters of ipmi_devintf"));
    }
}
