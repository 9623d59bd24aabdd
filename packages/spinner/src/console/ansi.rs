use std::io::{self, Write};

use super::Console;

pub(crate) const CURSOR_SHOW: &str = "\x1b[?25h";
pub(crate) const CURSOR_HIDE: &str = "\x1b[?25l";
/// Move to the beginning of the line and erase the whole line
pub(crate) const CLEAR_LINE: &str = "\r\x1b[2K";

/// Console backend that controls the terminal with ANSI escape sequences
///
/// This is the backend used on unix terminals, and on Windows terminals
/// that are known to understand virtual terminal sequences.
#[derive(Debug)]
pub struct AnsiConsole<W = io::Stdout> {
    out: W,
}

impl AnsiConsole {
    /// Write to the standard output of the process
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AnsiConsole<W> {
    /// Write to any output stream. The stream is assumed to be a terminal
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Get the underlying output stream back
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Console for AnsiConsole<W> {
    fn show_cursor(&mut self, visible: bool) {
        let control = if visible { CURSOR_SHOW } else { CURSOR_HIDE };
        let _ = self.out.write_all(control.as_bytes());
    }

    fn clear_line(&mut self) {
        let _ = self.out.write_all(CLEAR_LINE.as_bytes());
    }

    fn write_str(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

/// Tracks the display width of the text on the current line,
/// for backends that need to erase a line by overwriting it with spaces
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LineWidth {
    column: usize,
}

impl LineWidth {
    /// Display width of the current line
    pub fn get(&self) -> usize {
        self.column
    }

    /// Account for text written at the cursor
    pub fn advance(&mut self, text: &str) {
        for (c, w) in with_width(text.chars()) {
            match c {
                '\r' | '\n' => self.column = 0,
                _ => self.column += w,
            }
        }
    }

    /// Build the sequence that blanks the current line and returns to its start
    pub fn erase_sequence(&mut self, out: &mut String) {
        out.push('\r');
        if self.column > 0 {
            for _ in 0..self.column {
                out.push(' ');
            }
            out.push('\r');
        }
        self.column = 0;
    }
}

/// Iterator of (char, width)
pub(crate) fn with_width(x: std::str::Chars<'_>) -> AnsiWidthIter<'_> {
    AnsiWidthIter {
        is_escaping: false,
        chars: x,
    }
}

pub(crate) struct AnsiWidthIter<'a> {
    is_escaping: bool,
    chars: std::str::Chars<'a>,
}

impl Iterator for AnsiWidthIter<'_> {
    type Item = (char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let width = if self.is_escaping {
            if is_esc_end(c) {
                self.is_escaping = false;
            }
            0
        } else if c == '\x1b' {
            self.is_escaping = true;
            0
        } else {
            use unicode_width::UnicodeWidthChar;
            c.width().unwrap_or(0)
        };

        Some((c, width))
    }
}

fn is_esc_end(c: char) -> bool {
    // we only do very basic check right now
    c < u8::MAX as char && b"mAKGJBCDEFHSTfhlin".contains(&(c as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_sequences() {
        let mut console = AnsiConsole::new(Vec::new());
        console.show_cursor(false);
        console.clear_line();
        console.write_str("Progress: |");
        console.show_cursor(true);
        console.flush();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "\x1b[?25l\r\x1b[2KProgress: |\x1b[?25h");
    }

    #[test]
    fn test_width_skips_escapes() {
        let mut width = LineWidth::default();
        width.advance("\x1b[1;32mok\x1b[0m");
        assert_eq!(width.get(), 2);
        width.advance(" █░");
        assert_eq!(width.get(), 5);
    }

    #[test]
    fn test_width_resets_on_line_break() {
        let mut width = LineWidth::default();
        width.advance("Progress: ▁");
        width.advance("\n");
        assert_eq!(width.get(), 0);
        width.advance("ab\rc");
        assert_eq!(width.get(), 1);
    }

    #[test]
    fn test_erase_sequence() {
        let mut width = LineWidth::default();
        width.advance("abc");
        let mut out = String::new();
        width.erase_sequence(&mut out);
        assert_eq!(out, "\r   \r");
        assert_eq!(width.get(), 0);

        out.clear();
        width.erase_sequence(&mut out);
        assert_eq!(out, "\r");
    }
}
