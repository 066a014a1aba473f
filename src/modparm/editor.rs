//! Value editors.
//!
//! Both editors are plain functions over a borrowed [`Parameter`]; they keep
//! no state between calls and never persist. Writing the result back is the
//! caller's job (see [`crate::menu`]).

use crate::error::Result;
use crate::model::{Parameter, Radix};
use crate::radix::{parse_value, BITMASK_WIDTH};

/// Outcome of a whole-value edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainEdit {
    Unchanged,
    Replaced { old: i64, new: i64 },
}

/// Replaces the value of `param` with `input` parsed in `radix`.
///
/// Empty input keeps the value. On a parse error the parameter is untouched.
pub fn edit_plain(param: &mut Parameter, input: &str, radix: Radix) -> Result<PlainEdit> {
    match parse_value(input, radix)? {
        None => Ok(PlainEdit::Unchanged),
        Some(new) => {
            let old = param.value;
            param.value = new;
            Ok(PlainEdit::Replaced { old, new })
        }
    }
}

/// Flips bit `bit` of the value. Applying it twice restores the value.
pub fn toggle_bit(param: &mut Parameter, bit: u32) {
    param.value ^= 1i64 << bit;
}

/// What a keystroke means inside the bitmask editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmaskKey {
    Toggle(u32),
    EnterValue,
    Back,
    Ignore,
}

impl BitmaskKey {
    pub fn from_key(key: char) -> Self {
        match key {
            'v' => BitmaskKey::EnterValue,
            'q' => BitmaskKey::Back,
            c => match c.to_digit(10) {
                Some(bit) if bit < BITMASK_WIDTH => BitmaskKey::Toggle(bit),
                _ => BitmaskKey::Ignore,
            },
        }
    }
}
