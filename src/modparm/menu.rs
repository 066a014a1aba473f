//! # Menu State Machine
//!
//! The interactive tool is a finite-state machine. Input is fed in one event
//! at a time and the machine answers with the messages the operator should
//! see; it never reads a terminal or prints anything itself, so it can be
//! driven from a script in tests exactly as from a keyboard.
//!
//! ```text
//!              q                    q
//!   Exit <── ModuleMenu <──────── ParameterMenu(m) <──────────────┐
//!                │  index m          │  index p                    │
//!                └──────────────────>│                             │ value accepted
//!                                    ├── plain ──> EditPlain(m,p) ─┤
//!                                    └── bitmask ─> EditBitmask(m,p) ── q
//!                                                     │   ^
//!                                                   v │   │ value accepted
//!                                                     └─> (value prompt)
//! ```
//!
//! - Selection keys are single hex digits, so only the first 16 modules and
//!   the first 16 parameters of a module can be addressed.
//! - `r` toggles the session radix in both menus. The radix only affects how
//!   typed values are parsed.
//! - Every accepted edit is persisted immediately; a failed write is reported
//!   as a warning and the in-memory value is kept.
//! - Unknown keys do nothing.

use crate::editor::{edit_plain, toggle_bit, BitmaskKey};
use crate::error::ModparmError;
use crate::model::{Parameter, ParamKind, Session};
use crate::radix::format_hex;
use crate::store::backend::ParamBackend;
use crate::store::param_store::ParamStore;
use tracing::{debug, warn};

/// Number of entries addressable by a single hex digit.
pub const MAX_SELECTABLE: usize = 16;

pub const INVALID_NUMBER_MESSAGE: &str = "invalid number, try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    ModuleMenu,
    ParameterMenu {
        module: usize,
    },
    EditPlain {
        module: usize,
        parameter: usize,
    },
    /// `entering_value` is set while the `v` prompt is open.
    EditBitmask {
        module: usize,
        parameter: usize,
        entering_value: bool,
    },
    Exit,
}

impl MenuState {
    /// Whether the next input is a line of text rather than a keystroke.
    pub fn wants_line(&self) -> bool {
        matches!(
            self,
            MenuState::EditPlain { .. }
                | MenuState::EditBitmask {
                    entering_value: true,
                    ..
                }
        )
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, MenuState::Exit)
    }
}

/// Maps a selection keystroke to an index. Only single hex digits qualify.
pub fn key_index(key: char) -> Option<usize> {
    key.to_digit(16).map(|d| d as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Feedback produced by one input event.
#[derive(Debug, Default)]
pub struct StepResult {
    pub messages: Vec<CmdMessage>,
}

impl StepResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

pub struct Menu<B: ParamBackend> {
    store: ParamStore<B>,
    session: Session,
    state: MenuState,
}

impl<B: ParamBackend> Menu<B> {
    pub fn new(store: ParamStore<B>, session: Session) -> Self {
        Self {
            store,
            session,
            state: MenuState::ModuleMenu,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn store(&self) -> &ParamStore<B> {
        &self.store
    }

    pub fn into_store(self) -> ParamStore<B> {
        self.store
    }

    /// The parameter being edited, in the two editor states.
    pub fn current_parameter(&self) -> Option<&Parameter> {
        match self.state {
            MenuState::EditPlain { module, parameter }
            | MenuState::EditBitmask {
                module, parameter, ..
            } => self.store.get(module, parameter),
            _ => None,
        }
    }

    /// Ends the session from any state (input closed).
    pub fn quit(&mut self) {
        self.transition(MenuState::Exit);
    }

    /// Feeds one keystroke. Ignored while a value prompt is open.
    pub fn handle_key(&mut self, key: char) -> StepResult {
        let mut result = StepResult::default();

        match self.state {
            MenuState::ModuleMenu => match key {
                'q' => self.transition(MenuState::Exit),
                'r' => self.session.toggle_radix(),
                c => {
                    if let Some(module) = self.selectable(c, self.store.modules().len()) {
                        self.transition(MenuState::ParameterMenu { module });
                    }
                }
            },
            MenuState::ParameterMenu { module } => match key {
                'q' => self.transition(MenuState::ModuleMenu),
                'r' => self.session.toggle_radix(),
                c => {
                    let count = self
                        .store
                        .module(module)
                        .map_or(0, |m| m.parameters.len());
                    if let Some(parameter) = self.selectable(c, count) {
                        self.open_editor(module, parameter);
                    }
                }
            },
            MenuState::EditBitmask {
                module,
                parameter,
                entering_value: false,
            } => match BitmaskKey::from_key(key) {
                BitmaskKey::Toggle(bit) => {
                    if let Some(param) = self.store.get_mut(module, parameter) {
                        toggle_bit(param, bit);
                        self.persist(module, parameter, &mut result);
                    }
                }
                BitmaskKey::EnterValue => self.transition(MenuState::EditBitmask {
                    module,
                    parameter,
                    entering_value: true,
                }),
                BitmaskKey::Back => self.transition(MenuState::ParameterMenu { module }),
                BitmaskKey::Ignore => {}
            },
            MenuState::EditPlain { .. } | MenuState::EditBitmask { .. } | MenuState::Exit => {}
        }

        result
    }

    /// Feeds one line typed at a value prompt. Ignored outside a prompt.
    ///
    /// Invalid numbers leave the prompt open for another try.
    pub fn submit_value(&mut self, input: &str) -> StepResult {
        let mut result = StepResult::default();

        let (module, parameter, next) = match self.state {
            MenuState::EditPlain { module, parameter } => {
                (module, parameter, MenuState::ParameterMenu { module })
            }
            MenuState::EditBitmask {
                module,
                parameter,
                entering_value: true,
            } => (
                module,
                parameter,
                MenuState::EditBitmask {
                    module,
                    parameter,
                    entering_value: false,
                },
            ),
            _ => return result,
        };

        let radix = self.session.radix;
        let Some(param) = self.store.get_mut(module, parameter) else {
            self.transition(next);
            return result;
        };

        match edit_plain(param, input, radix) {
            Ok(_) => {
                self.persist(module, parameter, &mut result);
                self.transition(next);
            }
            Err(ModparmError::InvalidNumber(text)) => {
                debug!(input = %text, %radix, "rejected value");
                result.add_message(CmdMessage::error(INVALID_NUMBER_MESSAGE));
            }
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        }

        result
    }

    fn selectable(&self, key: char, count: usize) -> Option<usize> {
        key_index(key).filter(|&index| index < count.min(MAX_SELECTABLE))
    }

    fn open_editor(&mut self, module: usize, parameter: usize) {
        let Some(param) = self.store.get(module, parameter) else {
            return;
        };
        let next = match param.kind {
            ParamKind::Bitmask => MenuState::EditBitmask {
                module,
                parameter,
                entering_value: false,
            },
            ParamKind::Plain => MenuState::EditPlain { module, parameter },
        };
        self.transition(next);
    }

    fn persist(&self, module: usize, parameter: usize, result: &mut StepResult) {
        let Some(param) = self.store.get(module, parameter) else {
            return;
        };
        let label = format!("{}/{}", param.module_name, param.name);

        match self.store.persist(module, parameter) {
            Ok(()) => result.add_message(CmdMessage::success(format!(
                "{} = {} (0x{})",
                label,
                param.value,
                format_hex(param.value)
            ))),
            Err(e) => {
                warn!(parameter = %label, error = %e, "write failed, keeping in-memory value");
                result.add_message(CmdMessage::warning(format!(
                    "could not write {}: {}",
                    label, e
                )));
            }
        }
    }

    fn transition(&mut self, next: MenuState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "menu transition");
            self.state = next;
        }
    }
}
