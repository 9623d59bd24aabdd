use std::sync::Mutex;

use crate::console::{Console, Terminal};
use crate::indicator::{Indicator, Line, Progress, clamp_percentage};
use crate::options::{BarGlyphs, HProgressBarOptions};
use crate::Result;

/// Horizontal progress bar, made of a fixed number of segments
///
/// ```text
/// Progress: [███████████████░░░░░░░░░░░░░░░]
/// ```
///
/// The percentage is quantized to whole segments, rounding half away from
/// zero. The cursor is hidden as soon as the bar is built, and the bar is
/// first drawn by [`start`](Indicator::start) or the first update.
///
/// ```rust,no_run
/// # use pistonite_spinner as spinner;
/// use spinner::{HProgressBar, HProgressBarOptions, Indicator, Progress};
///
/// # fn main() -> spinner::Result<()> {
/// let bar = HProgressBar::new(HProgressBarOptions::default().label("Loading: "))?;
/// bar.start();
/// for i in (0..=100).step_by(5) {
///     bar.update_progress(i as f64);
/// }
/// bar.stop();
/// # Ok(()) }
/// ```
///
/// `stop` prints the completion line every time it is called. If the bar is
/// dropped with a frame still on the line, the line is ended and the cursor is
/// shown, without printing the completion line.
#[derive(Debug)]
pub struct HProgressBar<C: Console = Terminal> {
    glyphs: BarGlyphs,
    total_segments: usize,
    completed_label: String,
    state: Mutex<State<C>>,
}

#[derive(Debug)]
struct State<C> {
    line: Line<C>,
    current_segments: usize,
}

impl HProgressBar {
    /// Build a bar that draws on standard output
    pub fn new(options: HProgressBarOptions) -> Result<Self> {
        Self::build(options, Terminal::stdout)
    }
}

impl<C: Console> HProgressBar<C> {
    /// Build a bar that draws on the given console
    pub fn with_console(options: HProgressBarOptions, console: C) -> Result<Self> {
        Self::build(options, || console)
    }

    fn build(options: HProgressBarOptions, console: impl FnOnce() -> C) -> Result<Self> {
        let glyphs = options
            .resolve()
            .inspect_err(|e| log::debug!("cannot build horizontal bar: {e}"))?;
        let mut line = Line::new(options.label, console());
        line.hide_cursor();
        Ok(Self {
            glyphs,
            total_segments: options.segments,
            completed_label: options.completed_label,
            state: Mutex::new(State {
                line,
                current_segments: 0,
            }),
        })
    }

    /// Number of segments currently filled
    pub fn current_segments(&self) -> usize {
        match self.state.lock() {
            Ok(state) => state.current_segments,
            Err(_) => 0,
        }
    }

    /// Number of segments in the bar
    pub fn total_segments(&self) -> usize {
        self.total_segments
    }

    fn redraw(&self, state: &mut State<C>, is_final: bool) {
        let current = state.current_segments;
        state
            .line
            .draw(is_final, |out| self.format_track(current, out));
    }

    fn format_track(&self, current: usize, out: &mut String) {
        if let Some((open, _)) = &self.glyphs.brackets {
            out.push_str(open);
        }
        for _ in 0..current {
            out.push_str(&self.glyphs.filled);
        }
        for _ in current..self.total_segments {
            out.push_str(&self.glyphs.empty);
        }
        if let Some((_, close)) = &self.glyphs.brackets {
            out.push_str(close);
        }
    }
}

impl<C: Console> Indicator for HProgressBar<C> {
    fn start(&self) {
        self.update_progress(0.0);
    }

    fn stop(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let state = &mut *state;
        state.current_segments = self.total_segments;
        self.redraw(state, true);
        state.line.finish(&self.completed_label);
    }

    fn update_text(&self, text: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let state = &mut *state;
        state.line.label.clear();
        state.line.label.push_str(text);
        self.redraw(state, false);
    }
}

impl<C: Console> Progress for HProgressBar<C> {
    fn update_progress(&self, percentage: f64) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let state = &mut *state;
        state.current_segments = segments_for(percentage, self.total_segments);
        self.redraw(state, false);
    }
}

impl<C: Console> Drop for HProgressBar<C> {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            state.line.abandon();
        }
    }
}

/// Number of filled segments for a percentage
fn segments_for(percentage: f64, total: usize) -> usize {
    let percentage = clamp_percentage(percentage);
    // round() is half away from zero
    let segments = (percentage / 100.0 * total as f64).round() as usize;
    segments.min(total)
}
