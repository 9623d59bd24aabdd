use std::sync::Mutex;

use crate::console::{Console, Terminal};
use crate::indicator::{Indicator, Line, Progress, clamp_percentage};
use crate::options::VProgressBarOptions;
use crate::{ConfigError, Result};

/// Percentage at which the last glyph of the ramp is reached
const FINAL_FRAME_THRESHOLD: f64 = 75.0;

/// Vertical progress bar, displayed as a single glyph from a ramp
///
/// ```text
/// Progress: ▅
/// ```
///
/// The glyph is picked by scaling the percentage so the ramp is full at
/// 75%: the last glyph shows before the work is done, and the completion line
/// replaces it at 100%.
///
/// Reaching 100% stops the bar automatically (once). Updating the text
/// afterwards, or going back below 100%, makes the bar live again, so the same
/// bar can be reused for the next phase of work:
///
/// ```rust,no_run
/// # use pistonite_spinner as spinner;
/// use spinner::{Indicator, Progress, VProgressBar, VProgressBarOptions};
///
/// # fn main() -> spinner::Result<()> {
/// let bar = VProgressBar::new(VProgressBarOptions::default().label("Download: "))?;
/// for i in 0..=10 {
///     bar.update_progress(i as f64 * 10.0);
/// }
/// // completion line was printed at 100%
/// bar.update_text("Install: ");
/// for i in 0..=10 {
///     bar.update_progress(i as f64 * 10.0);
/// }
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct VProgressBar<C: Console = Terminal> {
    glyphs: Vec<String>,
    tick: f64,
    completed_label: String,
    state: Mutex<State<C>>,
}

#[derive(Debug)]
struct State<C> {
    line: Line<C>,
    percentage: f64,
    /// Set when 100% is reached, so completion is only printed once
    completed: bool,
}

impl VProgressBar {
    /// Build a bar that draws on standard output. The bar is drawn at 0%
    pub fn new(options: VProgressBarOptions) -> Result<Self> {
        Self::build(options, Terminal::stdout)
    }
}

impl<C: Console> VProgressBar<C> {
    /// Build a bar that draws on the given console. The bar is drawn at 0%
    pub fn with_console(options: VProgressBarOptions, console: C) -> Result<Self> {
        Self::build(options, || console)
    }

    fn build(options: VProgressBarOptions, console: impl FnOnce() -> C) -> Result<Self> {
        if options.glyphs.is_empty() {
            log::debug!("cannot build vertical bar: no glyphs");
            return Err(ConfigError::EmptyGlyphs.into());
        }
        let tick = match options.glyphs.len() {
            // a single glyph is always full
            1 => 100.0,
            n => 100.0 / (n - 1) as f64,
        };
        let bar = Self {
            glyphs: options.glyphs,
            tick,
            completed_label: options.completed_label,
            state: Mutex::new(State {
                line: Line::new(options.label, console()),
                percentage: 0.0,
                completed: false,
            }),
        };
        if let Ok(mut state) = bar.state.lock() {
            bar.redraw(&mut state);
        }
        Ok(bar)
    }

    /// The percentage step that advances the ramp by one glyph,
    /// `100 / (glyphs - 1)`
    pub fn tick(&self) -> f64 {
        self.tick
    }

    /// Current percentage, in `[0, 100]`
    pub fn percentage(&self) -> f64 {
        match self.state.lock() {
            Ok(state) => state.percentage,
            Err(_) => 0.0,
        }
    }

    /// Index of the glyph for the current percentage
    pub fn frame_index(&self) -> usize {
        frame_index(self.percentage(), self.glyphs.len())
    }

    /// If 100% was reached and the bar has not been reused since
    pub fn is_completed(&self) -> bool {
        match self.state.lock() {
            Ok(state) => state.completed,
            Err(_) => false,
        }
    }

    fn redraw(&self, state: &mut State<C>) {
        let glyph = &self.glyphs[frame_index(state.percentage, self.glyphs.len())];
        state.line.draw(false, |out| out.push_str(glyph));
    }
}

impl<C: Console> Indicator for VProgressBar<C> {
    /// Does nothing, the bar is live as soon as it is built
    fn start(&self) {}

    fn stop(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.line.finish(&self.completed_label);
    }

    fn update_text(&self, text: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let state = &mut *state;
        state.line.label.clear();
        state.line.label.push_str(text);
        state.completed = false;
        self.redraw(state);
    }
}

impl<C: Console> Progress for VProgressBar<C> {
    fn update_progress(&self, percentage: f64) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let state = &mut *state;
        let percentage = clamp_percentage(percentage);
        if percentage >= 100.0 {
            if state.completed {
                // already printed the completion line
                return;
            }
            state.completed = true;
            state.percentage = 100.0;
            state.line.finish(&self.completed_label);
            return;
        }
        state.completed = false;
        state.percentage = percentage;
        self.redraw(state);
    }
}

impl<C: Console> Drop for VProgressBar<C> {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            state.line.abandon();
        }
    }
}

/// Map a percentage to an index in a ramp of `len` glyphs (`len > 0`)
fn frame_index(percentage: f64, len: usize) -> usize {
    let last = len - 1;
    let scaled = percentage.min(100.0) / FINAL_FRAME_THRESHOLD;
    let index = (scaled * last as f64).floor() as usize;
    index.min(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Capture;

    #[test]
    fn test_frame_index_saturates_at_75() {
        assert_eq!(frame_index(0.0, 5), 0);
        assert_eq!(frame_index(18.0, 5), 0);
        assert_eq!(frame_index(18.75, 5), 1);
        assert_eq!(frame_index(50.0, 5), 2);
        assert_eq!(frame_index(74.9, 5), 3);
        assert_eq!(frame_index(75.0, 5), 4);
        assert_eq!(frame_index(100.0, 5), 4);
        assert_eq!(frame_index(100.0, 1), 0);
    }

    #[test]
    fn test_frame_index_is_monotonic() {
        let mut last = 0;
        for p in 0..=1000 {
            let index = frame_index(p as f64 / 10.0, 9);
            assert!(index >= last);
            assert!(index < 9);
            last = index;
        }
        assert_eq!(last, 8);
    }

    #[test]
    fn test_tick() {
        let capture = Capture::new();
        let bar = VProgressBar::with_console(VProgressBarOptions::default(), capture.clone())
            .unwrap();
        assert_eq!(bar.tick(), 12.5);

        let bar = VProgressBar::with_console(
            VProgressBarOptions::default().glyphs(["█"]),
            capture.clone(),
        )
        .unwrap();
        assert_eq!(bar.tick(), 100.0);
        assert_eq!(bar.frame_index(), 0);
    }

    #[test]
    fn test_initial_frame() {
        let capture = Capture::new();
        let _bar = VProgressBar::with_console(
            VProgressBarOptions::default().glyphs(["a", "b", "c"]),
            capture.clone(),
        )
        .unwrap();
        assert_eq!(capture.frames(), vec!["Progress: a"]);
        assert_eq!(capture.cursor_visible(), Some(false));
    }

    #[test]
    fn test_completed_latch_suppresses_repeat() {
        let capture = Capture::new();
        let bar = VProgressBar::with_console(
            VProgressBarOptions::default().glyphs(["a", "b"]),
            capture.clone(),
        )
        .unwrap();
        bar.update_progress(100.0);
        bar.update_progress(120.0);
        bar.update_progress(100.0);
        assert!(bar.is_completed());
        assert_eq!(capture.completed_lines(), vec!["Progress:  ✓ OK!"]);
        assert_eq!(capture.cursor_visible(), Some(true));
    }

    #[test]
    fn test_going_back_below_100_redraws_and_hides_cursor() {
        let capture = Capture::new();
        let bar = VProgressBar::with_console(
            VProgressBarOptions::default().glyphs(["a", "b"]),
            capture.clone(),
        )
        .unwrap();
        bar.update_progress(100.0);
        bar.update_progress(10.0);
        assert!(!bar.is_completed());
        assert_eq!(capture.last_frame().unwrap(), "Progress: a");
        assert_eq!(capture.cursor_visible(), Some(false));
        bar.update_progress(100.0);
        assert_eq!(capture.completed_lines().len(), 2);
    }
}
