use std::io::{self, Write};

use super::Console;
use super::ansi::LineWidth;

/// Console backend for output that does not understand escape sequences,
/// such as a dumb terminal or a redirected stream.
///
/// The cursor cannot be controlled, so [`show_cursor`](Console::show_cursor)
/// does nothing. A line is cleared by returning to its start and overwriting
/// everything written on it with spaces.
#[derive(Debug)]
pub struct PlainConsole<W = io::Stdout> {
    out: W,
    width: LineWidth,
    erase: String,
}

impl PlainConsole {
    /// Write to the standard output of the process
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PlainConsole<W> {
    /// Write to any output stream
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: LineWidth::default(),
            erase: String::new(),
        }
    }

    /// Get the underlying output stream back
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Console for PlainConsole<W> {
    fn show_cursor(&mut self, _visible: bool) {}

    fn clear_line(&mut self) {
        self.erase.clear();
        self.width.erase_sequence(&mut self.erase);
        let _ = self.out.write_all(self.erase.as_bytes());
    }

    fn write_str(&mut self, text: &str) {
        self.width.advance(text);
        let _ = self.out.write_all(text.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrites_previous_frame() {
        let mut console = PlainConsole::new(Vec::new());
        console.show_cursor(false);
        console.clear_line();
        console.write_str("Load: ##");
        console.clear_line();
        console.write_str("Load: ###\n");
        console.clear_line();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "\rLoad: ##\r        \rLoad: ###\n\r");
    }
}
