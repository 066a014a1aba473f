//! Operator input.
//!
//! The menu needs two kinds of input: single keystrokes for navigation and
//! whole lines at value prompts. A terminal gives us real keystrokes; anything
//! else (a pipe, a script) is read line by line, one keystroke or one value
//! per line.

use console::Term;
use std::io::{self, BufRead, ErrorKind};

pub trait KeySource {
    /// Next keystroke, `None` once input is closed.
    fn read_key(&mut self) -> io::Result<Option<char>>;

    /// Next line typed at a prompt, without its line ending. `None` once input is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Whether keystrokes come from a live terminal.
    fn is_interactive(&self) -> bool;
}

/// Raw keystrokes from the controlling terminal.
pub struct TermKeys {
    term: Term,
}

impl TermKeys {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermKeys {
    fn default() -> Self {
        Self::new()
    }
}

fn closed_as_none<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::Interrupted) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

impl KeySource for TermKeys {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        closed_as_none(self.term.read_char())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        closed_as_none(self.term.read_line())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Line-oriented input: each line is one keystroke (its first character) or,
/// at a prompt, one value. An empty line is a keystroke that does nothing.
pub struct LineKeys<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineKeys<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead> KeySource for LineKeys<R> {
    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(self
            .next_line()?
            .map(|line| line.chars().next().unwrap_or('\n')))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.next_line()
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn one_key_per_line() {
        let mut keys = LineKeys::new(Cursor::new("0\nqx\n\nr"));
        assert_eq!(keys.read_key().unwrap(), Some('0'));
        assert_eq!(keys.read_key().unwrap(), Some('q'));
        assert_eq!(keys.read_key().unwrap(), Some('\n'));
        assert_eq!(keys.read_key().unwrap(), Some('r'));
        assert_eq!(keys.read_key().unwrap(), None);
    }

    #[test]
    fn lines_drop_their_ending() {
        let mut keys = LineKeys::new(Cursor::new("1a\r\n\n"));
        assert_eq!(keys.read_line().unwrap().as_deref(), Some("1a"));
        assert_eq!(keys.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(keys.read_line().unwrap(), None);
        assert!(!keys.is_interactive());
    }
}
