//! # Rendering Module
//!
//! Turns the menu state into the text of one screen. Every function returns a
//! `String`; printing (and clearing the terminal) is left to the caller.
//!
//! Values are always shown in decimal and hex together, bitmask values also as
//! 8 binary digits. The session radix is shown so the operator knows how the
//! next typed value will be read, but it never changes what is displayed.

use super::styles::{paint, MODPARM_THEME};
use colored::Colorize;
use modparm::menu::{CmdMessage, Menu, MenuState, MessageLevel, MAX_SELECTABLE};
use modparm::model::{Module, Parameter, Radix, Session};
use modparm::radix::{format_binary, format_hex};
use modparm::store::backend::ParamBackend;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

pub const MODULE_HELP: &str = "[0-f] select module   r radix   q quit";
pub const PARAMETER_HELP: &str = "[0-f] edit parameter   r radix   q back";
pub const BITMASK_HELP: &str = "[0-7] toggle bit   v enter value   q back";
pub const BIT_RULER: &str = "76543210";

/// Renders the screen for the current menu state.
///
/// Prompt screens end with the prompt itself, without a trailing newline.
pub fn render_screen<B: ParamBackend>(menu: &Menu<B>, use_color: bool) -> String {
    let store = menu.store();
    let session = menu.session();

    match menu.state() {
        MenuState::ModuleMenu => {
            render_module_menu(store.modules(), store.root(), session, use_color)
        }
        MenuState::ParameterMenu { module } => match store.module(module) {
            Some(m) => render_parameter_menu(m, session, use_color),
            None => String::new(),
        },
        MenuState::EditPlain { .. } => match menu.current_parameter() {
            Some(p) => render_plain_editor(p, session.radix, use_color),
            None => String::new(),
        },
        MenuState::EditBitmask { entering_value, .. } => match menu.current_parameter() {
            Some(p) if entering_value => {
                let mut out = render_bitmask_editor(p, use_color);
                out.push_str(&render_value_prompt(session.radix, use_color));
                out
            }
            Some(p) => render_bitmask_editor(p, use_color),
            None => String::new(),
        },
        MenuState::Exit => String::new(),
    }
}

pub fn render_module_menu(
    modules: &[Module],
    root: &Path,
    session: Session,
    use_color: bool,
) -> String {
    let theme = &*MODPARM_THEME;
    let mut out = String::new();

    out.push_str(&paint(
        &theme.title,
        format!("Kernel module parameters ({})", root.display()),
        use_color,
    ));
    out.push('\n');

    if modules.is_empty() {
        out.push_str("  No modules configured.\n");
    }

    let name_width = column_width(modules.iter().map(|m| m.name.as_str()));
    for (i, module) in modules.iter().enumerate() {
        let count = module.parameters.len();
        out.push_str(&format!(
            "  {}  {}  {}\n",
            paint(&theme.index, index_label(i), use_color),
            paint(&theme.name, pad(&module.name, name_width), use_color),
            paint(
                &theme.tag,
                format!(
                    "({} parameter{})",
                    count,
                    if count == 1 { "" } else { "s" }
                ),
                use_color
            ),
        ));
    }

    out.push_str(&render_footer(session.radix, MODULE_HELP, use_color));
    out
}

pub fn render_parameter_menu(module: &Module, session: Session, use_color: bool) -> String {
    let theme = &*MODPARM_THEME;
    let mut out = String::new();

    out.push_str(&paint(&theme.title, &module.name, use_color));
    out.push('\n');

    if module.parameters.is_empty() {
        out.push_str("  No parameters found.\n");
    }

    let name_width = column_width(module.parameters.iter().map(|p| p.name.as_str()));
    let value_width = module
        .parameters
        .iter()
        .map(|p| p.value.to_string().len())
        .max()
        .unwrap_or(0);

    for (i, param) in module.parameters.iter().enumerate() {
        out.push_str(&format!(
            "  {}  {}  {}",
            paint(&theme.index, index_label(i), use_color),
            paint(&theme.name, pad(&param.name, name_width), use_color),
            render_value(param, value_width, use_color),
        ));
        if param.is_bitmask() {
            out.push_str(&format!("  {}", paint(&theme.tag, "[bitmask]", use_color)));
        }
        out.push('\n');
    }

    out.push_str(&render_footer(session.radix, PARAMETER_HELP, use_color));
    out
}

pub fn render_plain_editor(param: &Parameter, radix: Radix, use_color: bool) -> String {
    let mut out = render_parameter_header(param, use_color);
    out.push_str(&render_value_prompt(radix, use_color));
    out
}

pub fn render_bitmask_editor(param: &Parameter, use_color: bool) -> String {
    let theme = &*MODPARM_THEME;
    let mut out = render_parameter_header(param, use_color);
    // The ruler starts under the first binary digit.
    let binary_column = format!(
        "{}/{} = {} (0x{}) ",
        param.module_name,
        param.name,
        param.value,
        format_hex(param.value)
    )
    .width();
    out.push_str(&" ".repeat(binary_column));
    out.push_str(&paint(&theme.hint, BIT_RULER, use_color));
    out.push('\n');
    out.push_str(&paint(&theme.hint, BITMASK_HELP, use_color));
    out.push('\n');
    out
}

pub fn render_value_prompt(radix: Radix, use_color: bool) -> String {
    paint(
        &MODPARM_THEME.prompt,
        format!("new value ({}, empty keeps current): ", radix),
        use_color,
    )
}

/// Renders operator messages, one per line, coloured by level.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        if !use_color {
            out.push_str(&message.content);
            out.push('\n');
            continue;
        }
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

fn render_parameter_header(param: &Parameter, use_color: bool) -> String {
    let theme = &*MODPARM_THEME;
    let mut out = format!(
        "{} = {} ({})",
        paint(
            &theme.title,
            format!("{}/{}", param.module_name, param.name),
            use_color
        ),
        paint(&theme.decimal, param.value, use_color),
        paint(&theme.hex, format!("0x{}", format_hex(param.value)), use_color),
    );
    if param.is_bitmask() {
        out.push(' ');
        out.push_str(&paint(&theme.binary, format_binary(param.value), use_color));
    }
    out.push('\n');
    out
}

fn render_value(param: &Parameter, width: usize, use_color: bool) -> String {
    let theme = &*MODPARM_THEME;
    let mut out = format!(
        "{}  {}",
        paint(
            &theme.decimal,
            format!("{:>width$}", param.value, width = width),
            use_color
        ),
        paint(&theme.hex, format!("(0x{})", format_hex(param.value)), use_color),
    );
    if param.is_bitmask() {
        out.push_str(&format!(
            "  {}",
            paint(&theme.binary, format_binary(param.value), use_color)
        ));
    }
    out
}

fn render_footer(radix: Radix, help: &str, use_color: bool) -> String {
    let theme = &*MODPARM_THEME;
    format!(
        "radix: {}\n{}\n",
        paint(&theme.prompt, radix, use_color),
        paint(&theme.hint, help, use_color)
    )
}

/// Hex selection digit, or blanks past the addressable range.
fn index_label(index: usize) -> String {
    if index < MAX_SELECTABLE {
        format!("{:x}", index)
    } else {
        " ".to_string()
    }
}

fn column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.width()).max().unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modparm::store::mem_backend::MemBackend;
    use modparm::store::param_store::ParamStore;

    fn ipmi_si() -> Module {
        Module {
            name: "ipmi_si".to_string(),
            parameters: vec![
                Parameter::new("ipmi_si", "timeout", 10),
                Parameter::new("ipmi_si", "debugflag", 5),
            ],
        }
    }

    #[test]
    fn module_menu_lists_modules_with_hex_indexes() {
        let modules = vec![ipmi_si(), Module::new("ipmi_devintf")];
        let out = render_module_menu(&modules, Path::new("/sys"), Session::default(), false);

        assert!(out.starts_with("Kernel module parameters (/sys)\n"));
        assert!(out.contains("  0  ipmi_si       (2 parameters)\n"));
        assert!(out.contains("  1  ipmi_devintf  (0 parameters)\n"));
        assert!(out.contains("radix: hex\n"));
        assert!(out.ends_with(&format!("{}\n", MODULE_HELP)));
    }

    #[test]
    fn unreachable_modules_have_no_index() {
        let modules: Vec<Module> = (0..17).map(|i| Module::new(format!("m{:02}", i))).collect();
        let out = render_module_menu(&modules, Path::new("/sys"), Session::default(), false);

        assert!(out.contains("  f  m15"));
        assert!(out.contains("     m16"));
    }

    #[test]
    fn parameter_menu_shows_decimal_hex_and_bits() {
        let out = render_parameter_menu(&ipmi_si(), Session::new(Radix::Decimal), false);

        assert!(out.contains("  0  timeout    10  (0x0a)\n"));
        assert!(out.contains("  1  debugflag   5  (0x05)  00000101  [bitmask]\n"));
        assert!(out.contains("radix: dec\n"));
        assert!(out.contains(PARAMETER_HELP));
    }

    #[test]
    fn unreachable_parameters_have_no_index() {
        let module = Module {
            name: "ipmi_si".to_string(),
            parameters: (0..17)
                .map(|i| Parameter::new("ipmi_si", format!("p{:02}", i), 1))
                .collect(),
        };
        let out = render_parameter_menu(&module, Session::default(), false);

        assert!(out.contains("  f  p15  1  (0x01)\n"));
        assert!(out.contains("     p16  1  (0x01)\n"));
    }

    #[test]
    fn plain_editor_ends_with_prompt() {
        let param = Parameter::new("ipmi_si", "timeout", 26);
        let out = render_plain_editor(&param, Radix::Hex, false);

        assert_eq!(
            out,
            "ipmi_si/timeout = 26 (0x1a)\nnew value (hex, empty keeps current): "
        );
    }

    #[test]
    fn bitmask_editor_shows_binary_and_ruler() {
        let param = Parameter::new("ipmi_si", "debugflag", 4);
        let out = render_bitmask_editor(&param, false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ipmi_si/debugflag = 4 (0x04) 00000100");
        assert!(lines[1].ends_with(BIT_RULER));
        // Each ruler digit lines up with its bit.
        assert_eq!(lines[1].find('7'), lines[0].find("00000100"));
        assert_eq!(lines[2], BITMASK_HELP);
    }

    #[test]
    fn screen_follows_menu_state() {
        let backend = MemBackend::new();
        backend.add_file("/sys/module/ipmi_si/parameters/debugflag", "5\n");
        let mut store = ParamStore::with_backend(backend, "/sys");
        store.discover(&["ipmi_si"]);
        let mut menu = Menu::new(store, Session::default());

        assert!(render_screen(&menu, false).contains("0  ipmi_si"));
        menu.handle_key('0');
        assert!(render_screen(&menu, false).contains("debugflag  5  (0x05)"));
        menu.handle_key('0');
        assert!(render_screen(&menu, false).ends_with(&format!("{}\n", BITMASK_HELP)));
        menu.handle_key('v');
        assert!(render_screen(&menu, false).ends_with("empty keeps current): "));
        menu.quit();
        assert!(render_screen(&menu, false).is_empty());
    }

    #[test]
    fn messages_keep_their_text() {
        let messages = [
            CmdMessage::error("invalid number, try again"),
            CmdMessage::success("ipmi_si/timeout = 26 (0x1a)"),
        ];
        let out = render_messages(&messages, false);
        assert_eq!(out, "invalid number, try again\nipmi_si/timeout = 26 (0x1a)\n");
    }
}
