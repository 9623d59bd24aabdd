use std::io::{self, Write};

use windows_sys::Win32::System::Console::{
    CONSOLE_CURSOR_INFO, ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleCursorInfo,
    GetConsoleMode, GetStdHandle, STD_OUTPUT_HANDLE, SetConsoleCursorInfo, SetConsoleMode,
    SetConsoleOutputCP,
};

use super::Console;
use super::ansi::{CLEAR_LINE, LineWidth};

const CP_UTF8: u32 = 65001;

/// Console backend using the native Windows console API
///
/// Creating the backend switches the console output code page to UTF-8
/// so multi-byte glyphs display correctly, and tries to turn on virtual
/// terminal processing. Cursor visibility always goes through the console
/// API. Lines are cleared with an escape sequence when virtual terminal
/// processing is on, or by overwriting them with spaces on older consoles.
#[derive(Debug)]
pub struct WindowsConsole {
    out: io::Stdout,
    vt_enabled: bool,
    width: LineWidth,
    erase: String,
}

impl WindowsConsole {
    pub fn new() -> Self {
        set_utf8();
        let vt_enabled = enable_vt_processing();
        log::debug!("windows console: virtual terminal processing = {vt_enabled}");
        Self {
            out: io::stdout(),
            vt_enabled,
            width: LineWidth::default(),
            erase: String::new(),
        }
    }
}

impl Default for WindowsConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for WindowsConsole {
    fn show_cursor(&mut self, visible: bool) {
        // pending text must reach the console before the cursor changes
        let _ = self.out.flush();
        // SAFETY: the handle comes from GetStdHandle and the info struct
        // is a valid out pointer for the duration of the calls
        unsafe {
            let handle = GetStdHandle(STD_OUTPUT_HANDLE);
            let mut info = CONSOLE_CURSOR_INFO {
                dwSize: 0,
                bVisible: 0,
            };
            if GetConsoleCursorInfo(handle, &mut info) == 0 {
                return;
            }
            info.bVisible = i32::from(visible);
            SetConsoleCursorInfo(handle, &info);
        }
    }

    fn clear_line(&mut self) {
        if self.vt_enabled {
            let _ = self.out.write_all(CLEAR_LINE.as_bytes());
            return;
        }
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

fn set_utf8() {
    // SAFETY: plain FFI call without pointers
    unsafe {
        SetConsoleOutputCP(CP_UTF8);
    }
}

fn enable_vt_processing() -> bool {
    // SAFETY: the handle comes from GetStdHandle and mode is a valid out pointer
    unsafe {
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        let mut mode = 0;
        if GetConsoleMode(handle, &mut mode) == 0 {
            return false;
        }
        if mode & ENABLE_VIRTUAL_TERMINAL_PROCESSING != 0 {
            return true;
        }
        SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) != 0
    }
}
