use serde::{Deserialize, Serialize};
use std::fmt;

/// Substrings that mark a parameter as a bitmask ("dbg" is the usual
/// abbreviation of "debug" in module parameter names).
pub const BITMASK_MARKERS: [&str; 2] = ["debug", "dbg"];

/// How a parameter is edited. Decided once, at discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Plain,
    Bitmask,
}

impl ParamKind {
    pub fn classify(name: &str) -> Self {
        if BITMASK_MARKERS.iter().any(|marker| name.contains(marker)) {
            ParamKind::Bitmask
        } else {
            ParamKind::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub module_name: String,
    pub name: String,
    pub value: i64,
    pub kind: ParamKind,
}

impl Parameter {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>, value: i64) -> Self {
        let name = name.into();
        Self {
            module_name: module_name.into(),
            kind: ParamKind::classify(&name),
            name,
            value,
        }
    }

    pub fn is_bitmask(&self) -> bool {
        self.kind == ParamKind::Bitmask
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }
}

/// Base used to interpret operator-entered values. Display never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Radix {
    Hex,
    Decimal,
}

impl TryFrom<String> for Radix {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "hex" | "hexadecimal" | "16" => Ok(Radix::Hex),
            "dec" | "decimal" | "10" => Ok(Radix::Decimal),
            other => Err(format!("unknown radix {:?} (expected hex or dec)", other)),
        }
    }
}

impl From<Radix> for String {
    fn from(radix: Radix) -> Self {
        radix.to_string()
    }
}

impl Radix {
    pub fn toggled(self) -> Self {
        match self {
            Radix::Hex => Radix::Decimal,
            Radix::Decimal => Radix::Hex,
        }
    }

    pub fn base(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Decimal => 10,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radix::Hex => write!(f, "hex"),
            Radix::Decimal => write!(f, "dec"),
        }
    }
}

/// Per-run settings carried alongside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub radix: Radix,
}

impl Default for Session {
    fn default() -> Self {
        Self { radix: Radix::Hex }
    }
}

impl Session {
    pub fn new(radix: Radix) -> Self {
        Self { radix }
    }

    pub fn toggle_radix(&mut self) {
        self.radix = self.radix.toggled();
    }
}
