use std::sync::{Arc, Mutex};

use super::Console;

/// One call made to a [`Capture`] console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `show_cursor(visible)`
    ShowCursor(bool),
    /// `clear_line()`
    ClearLine,
    /// `write_str(text)`
    Text(String),
    /// `flush()`
    Flush,
}

/// In-memory console backend that records every call
///
/// Cloning the capture gives another handle to the same record, so one clone
/// can be moved into an indicator while the other inspects what it rendered.
///
/// ```rust
/// # use pistonite_spinner as spinner;
/// use spinner::{Capture, HProgressBar, HProgressBarOptions, Progress};
///
/// let capture = Capture::new();
/// let options = HProgressBarOptions::default().segments(4).use_brackets(false);
/// let bar = HProgressBar::with_console(options, capture.clone()).unwrap();
/// bar.update_progress(50.0);
/// assert_eq!(capture.last_frame().unwrap(), "Progress: ██░░");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Forget everything recorded so far
    pub fn reset(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// All text written, concatenated, with cursor and clear calls left out
    pub fn output(&self) -> String {
        let mut out = String::new();
        for event in self.events() {
            if let Event::Text(text) = event {
                out.push_str(&text);
            }
        }
        out
    }

    /// The text written after each `clear_line`, in order
    ///
    /// Text written before the first clear is not part of any frame.
    /// Frames with no text are skipped.
    pub fn frames(&self) -> Vec<String> {
        let mut frames = Vec::new();
        let mut current: Option<String> = None;
        for event in self.events() {
            match event {
                Event::ClearLine => {
                    if let Some(frame) = current.take() {
                        if !frame.is_empty() {
                            frames.push(frame);
                        }
                    }
                    current = Some(String::new());
                }
                Event::Text(text) => {
                    if let Some(frame) = current.as_mut() {
                        frame.push_str(&text);
                    }
                }
                _ => {}
            }
        }
        if let Some(frame) = current {
            if !frame.is_empty() {
                frames.push(frame);
            }
        }
        frames
    }

    /// The most recent frame that is not a completion line
    pub fn last_frame(&self) -> Option<String> {
        self.frames().into_iter().rev().find(|x| !x.ends_with('\n'))
    }

    /// Frames that finished their line, with the newline removed
    pub fn completed_lines(&self) -> Vec<String> {
        self.frames()
            .into_iter()
            .filter_map(|x| x.strip_suffix('\n').map(str::to_string))
            .collect()
    }

    /// Visibility from the last `show_cursor` call, if there was one
    pub fn cursor_visible(&self) -> Option<bool> {
        self.events().into_iter().rev().find_map(|x| match x {
            Event::ShowCursor(visible) => Some(visible),
            _ => None,
        })
    }

    fn push(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Console for Capture {
    fn show_cursor(&mut self, visible: bool) {
        self.push(Event::ShowCursor(visible));
    }

    fn clear_line(&mut self) {
        self.push(Event::ClearLine);
    }

    fn write_str(&mut self, text: &str) {
        self.push(Event::Text(text.to_string()));
    }

    fn flush(&mut self) {
        self.push(Event::Flush);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_split_on_clear() {
        let capture = Capture::new();
        let mut console = capture.clone();
        console.write_str("ignored");
        console.clear_line();
        console.write_str("a");
        console.write_str("b");
        console.clear_line();
        console.clear_line();
        console.write_str("done\n");
        assert_eq!(capture.frames(), vec!["ab", "done\n"]);
        assert_eq!(capture.last_frame().as_deref(), Some("ab"));
        assert_eq!(capture.completed_lines(), vec!["done"]);
        assert_eq!(capture.output(), "ignoredabdone\n");
    }

    #[test]
    fn test_cursor_visible() {
        let capture = Capture::new();
        assert_eq!(capture.cursor_visible(), None);
        let mut console = capture.clone();
        console.show_cursor(false);
        console.write_str("x");
        assert_eq!(capture.cursor_visible(), Some(false));
        console.show_cursor(true);
        assert_eq!(capture.cursor_visible(), Some(true));
        capture.reset();
        assert!(capture.events().is_empty());
    }
}
