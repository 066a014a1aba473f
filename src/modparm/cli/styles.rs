//! Styles for the modparm screens.
//!
//! Screens are built from semantic pieces (an index, a name, a value) and each
//! piece has one named style here, so the look can change in one place.
//! Rendering decides per call whether styles are applied at all, which keeps
//! piped output and tests free of escape codes.

use console::Style;
use once_cell::sync::Lazy;
use std::fmt::Display;

pub struct Theme {
    pub title: Style,
    pub index: Style,
    pub name: Style,
    pub decimal: Style,
    pub hex: Style,
    pub binary: Style,
    pub tag: Style,
    pub hint: Style,
    pub prompt: Style,
}

pub static MODPARM_THEME: Lazy<Theme> = Lazy::new(|| Theme {
    title: Style::new().bold(),
    index: Style::new().yellow(),
    name: Style::new(),
    decimal: Style::new().bold(),
    hex: Style::new().cyan(),
    binary: Style::new().magenta(),
    tag: Style::new().color256(246).italic(),
    hint: Style::new().color256(246),
    prompt: Style::new().green(),
});

/// Applies `style` to `text`, or leaves it plain when colour is off.
pub fn paint(style: &Style, text: impl Display, use_color: bool) -> String {
    style
        .clone()
        .force_styling(use_color)
        .apply_to(text)
        .to_string()
}
