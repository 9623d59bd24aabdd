//! Console backends
//!
//! Every indicator owns one [`Console`] and draws through it. The indicator
//! decides *what* is on the line (label, glyphs, completion text); the
//! console decides *how* the terminal is told to hide the cursor or clear
//! the line.
//!
//! [`Terminal::stdout()`] picks a backend for the standard output of the
//! process, and is what the indicator constructors use by default.
//! Use the `with_console` constructors to inject another backend,
//! such as [`Capture`] in tests.
use std::io::{self, IsTerminal as _};

mod ansi;
pub use ansi::AnsiConsole;
mod plain;
pub use plain::PlainConsole;
mod capture;
pub use capture::{Capture, Event};
#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsConsole;

/// Capability to control the line an indicator is drawn on
///
/// Implementations are best-effort: write failures are swallowed,
/// since losing a progress frame should never fail the program.
pub trait Console: Send {
    /// Show or hide the terminal cursor
    fn show_cursor(&mut self, visible: bool);
    /// Move to the beginning of the current line and erase it
    fn clear_line(&mut self);
    /// Write literal text at the cursor
    fn write_str(&mut self, text: &str);
    /// Flush buffered output to the terminal
    fn flush(&mut self);
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn show_cursor(&mut self, visible: bool) {
        (**self).show_cursor(visible)
    }
    fn clear_line(&mut self) {
        (**self).clear_line()
    }
    fn write_str(&mut self, text: &str) {
        (**self).write_str(text)
    }
    fn flush(&mut self) {
        (**self).flush()
    }
}

/// The console backend for standard output, selected for the current platform
///
/// - Output that is not a terminal, or `TERM=dumb`: [`PlainConsole`]
/// - Windows: [`WindowsConsole`](crate::console::WindowsConsole)
/// - Anything else: [`AnsiConsole`]
#[derive(Debug)]
pub enum Terminal {
    Ansi(AnsiConsole),
    Plain(PlainConsole),
    #[cfg(windows)]
    Windows(WindowsConsole),
}

impl Terminal {
    /// Select a backend for the standard output of the process
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        if !stdout.is_terminal() || is_dumb_term() {
            log::debug!("stdout is not an interactive terminal, using plain console");
            return Self::Plain(PlainConsole::new(stdout));
        }
        #[cfg(windows)]
        {
            Self::Windows(WindowsConsole::new())
        }
        #[cfg(not(windows))]
        {
            Self::Ansi(AnsiConsole::new(stdout))
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Console for Terminal {
    fn show_cursor(&mut self, visible: bool) {
        match self {
            Self::Ansi(x) => x.show_cursor(visible),
            Self::Plain(x) => x.show_cursor(visible),
            #[cfg(windows)]
            Self::Windows(x) => x.show_cursor(visible),
        }
    }
    fn clear_line(&mut self) {
        match self {
            Self::Ansi(x) => x.clear_line(),
            Self::Plain(x) => x.clear_line(),
            #[cfg(windows)]
            Self::Windows(x) => x.clear_line(),
        }
    }
    fn write_str(&mut self, text: &str) {
        match self {
            Self::Ansi(x) => x.write_str(text),
            Self::Plain(x) => x.write_str(text),
            #[cfg(windows)]
            Self::Windows(x) => x.write_str(text),
        }
    }
    fn flush(&mut self) {
        match self {
            Self::Ansi(x) => x.flush(),
            Self::Plain(x) => x.flush(),
            #[cfg(windows)]
            Self::Windows(x) => x.flush(),
        }
    }
}

fn is_dumb_term() -> bool {
    std::env::var("TERM")
        .map(|x| x.trim() == "dumb")
        .unwrap_or_default()
}
