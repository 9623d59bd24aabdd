use crate::console::Console;

/// Lifecycle shared by every indicator
///
/// All methods take `&self`: each indicator keeps its state behind one lock
/// that also guards its console writes, so an indicator can be shared between
/// threads and a frame is never torn by a concurrent update.
pub trait Indicator {
    /// Begin displaying the indicator
    fn start(&self);
    /// Finish the indicator: print the label followed by the completed label
    /// on its own line and show the cursor again
    fn stop(&self);
    /// Replace the label in front of the indicator
    fn update_text(&self, text: &str);
}

/// An indicator that displays a percentage
pub trait Progress: Indicator {
    /// Set the progress in percent. Values outside of `[0, 100]` are clamped
    fn update_progress(&self, percentage: f64);
}

/// Clamp a percentage into `[0, 100]`, treating NaN as 0
pub(crate) fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

/// The line an indicator draws on: the label, the console, and what
/// the indicator has done to the terminal so far.
///
/// Always accessed under the lock of the indicator that owns it.
#[derive(Debug)]
pub(crate) struct Line<C> {
    pub label: String,
    console: C,
    /// If we hid the cursor and did not show it yet
    cursor_hidden: bool,
    /// If a frame is on the line that was not finished by a new line
    pending: bool,
    /// Frame buffer, to avoid reallocation
    buffer: String,
}

impl<C: Console> Line<C> {
    pub fn new(label: String, console: C) -> Self {
        Self {
            label,
            console,
            cursor_hidden: false,
            pending: false,
            buffer: String::new(),
        }
    }

    pub fn hide_cursor(&mut self) {
        if !self.cursor_hidden {
            self.console.show_cursor(false);
            self.cursor_hidden = true;
        }
    }

    fn show_cursor(&mut self) {
        self.console.show_cursor(true);
        self.cursor_hidden = false;
    }

    /// Clear the line and draw the label followed by what `format` puts
    /// in the buffer.
    ///
    /// A frame that is not final is flushed to the terminal right away.
    /// A final frame is about to be replaced by the completion line.
    pub fn draw(&mut self, is_final: bool, format: impl FnOnce(&mut String)) {
        self.hide_cursor();
        self.buffer.clear();
        self.buffer.push_str(&self.label);
        format(&mut self.buffer);
        self.console.clear_line();
        self.console.write_str(&self.buffer);
        if !is_final {
            self.console.flush();
        }
        self.pending = true;
    }

    /// Replace the line with the label and the completed label,
    /// end the line, and show the cursor
    pub fn finish(&mut self, completed_label: &str) {
        self.buffer.clear();
        self.buffer.push_str(&self.label);
        self.buffer.push_str(completed_label);
        self.buffer.push('\n');
        self.console.clear_line();
        self.console.write_str(&self.buffer);
        self.show_cursor();
        self.console.flush();
        self.pending = false;
    }

    /// Leave the line without a completion message, restoring the terminal
    /// if a frame is still on it or the cursor is still hidden
    pub fn abandon(&mut self) {
        if !self.pending && !self.cursor_hidden {
            return;
        }
        if self.pending {
            self.console.write_str("\n");
            self.pending = false;
        }
        self.show_cursor();
        self.console.flush();
    }
}
