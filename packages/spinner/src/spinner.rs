use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::console::{Console, Terminal};
use crate::indicator::{Indicator, Line};
use crate::options::ProgressSpinnerOptions;
use crate::{ConfigError, Result};

/// Lifecycle of a [`ProgressSpinner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinnerState {
    /// Built, not started. Nothing is drawn yet
    Idle,
    /// The animation thread is running
    Running,
    /// Stopped for good. The spinner cannot be started again
    Stopped,
}

/// Spinner animated by a background thread
///
/// ```text
/// Working: ⠹
/// ```
///
/// [`start`](Indicator::start) draws the first glyph and spawns a thread
/// that draws the next glyph of the cycle every update interval, independent
/// of how often the caller does anything. [`stop`](Indicator::stop) wakes and
/// joins the thread, then prints the completion line. Stopping more than once
/// does nothing, and dropping the spinner stops it.
///
/// ```rust,no_run
/// # use pistonite_spinner as spinner;
/// use spinner::{Indicator, ProgressSpinner, ProgressSpinnerOptions};
///
/// # fn main() -> spinner::Result<()> {
/// let spinner = ProgressSpinner::new(ProgressSpinnerOptions::default().label("Working: "))?;
/// spinner.start();
/// std::thread::sleep(std::time::Duration::from_secs(2));
/// spinner.update_text("Halfway there: ");
/// std::thread::sleep(std::time::Duration::from_secs(2));
/// spinner.stop();
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct ProgressSpinner<C: Console + 'static = Terminal> {
    shared: Arc<Shared<C>>,
    completed_label: String,
    interval: Duration,
    /// The animation thread. Locked for the whole `start` so `stop`
    /// always sees the handle of a thread that was spawned
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// State shared with the animation thread
#[derive(Debug)]
struct Shared<C> {
    glyphs: Vec<String>,
    inner: Mutex<Inner<C>>,
    /// Signaled when the spinner is stopped
    wake: Condvar,
}

#[derive(Debug)]
struct Inner<C> {
    line: Line<C>,
    state: SpinnerState,
    index: usize,
}

impl ProgressSpinner {
    /// Build a spinner that draws on standard output
    pub fn new(options: ProgressSpinnerOptions) -> Result<Self> {
        Self::build(options, Terminal::stdout)
    }
}

impl<C: Console + 'static> ProgressSpinner<C> {
    /// Build a spinner that draws on the given console
    pub fn with_console(options: ProgressSpinnerOptions, console: C) -> Result<Self> {
        Self::build(options, || console)
    }

    fn build(options: ProgressSpinnerOptions, console: impl FnOnce() -> C) -> Result<Self> {
        if options.glyphs.is_empty() {
            log::debug!("cannot build spinner: no glyphs");
            return Err(ConfigError::EmptyGlyphs.into());
        }
        if options.update_interval_ms == 0 {
            log::debug!("cannot build spinner: update interval is 0");
            return Err(ConfigError::ZeroInterval.into());
        }
        let shared = Shared {
            glyphs: options.glyphs,
            inner: Mutex::new(Inner {
                line: Line::new(options.label, console()),
                state: SpinnerState::Idle,
                index: 0,
            }),
            wake: Condvar::new(),
        };
        Ok(Self {
            shared: Arc::new(shared),
            completed_label: options.completed_label,
            interval: Duration::from_millis(options.update_interval_ms),
            worker: Mutex::new(None),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SpinnerState {
        match self.shared.inner.lock() {
            Ok(inner) => inner.state,
            Err(_) => SpinnerState::Stopped,
        }
    }

    /// Index of the glyph currently displayed
    pub fn frame_index(&self) -> usize {
        match self.shared.inner.lock() {
            Ok(inner) => inner.index,
            Err(_) => 0,
        }
    }

    /// Time between frames
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<C: Console + 'static> Indicator for ProgressSpinner<C> {
    /// Start the animation. Does nothing if the spinner is already
    /// running or was stopped
    fn start(&self) {
        let Ok(mut worker) = self.worker.lock() else {
            return;
        };
        {
            let Ok(mut inner) = self.shared.inner.lock() else {
                return;
            };
            if inner.state != SpinnerState::Idle {
                log::debug!("spinner is {:?}, not starting again", inner.state);
                return;
            }
            inner.state = SpinnerState::Running;
            inner.index = 0;
            let inner = &mut *inner;
            let glyph = &self.shared.glyphs[0];
            inner.line.draw(false, |out| out.push_str(glyph));
        }
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        let spawned = std::thread::Builder::new()
            .name("spinner".to_string())
            .spawn(move || animate(&shared, interval));
        match spawned {
            Ok(handle) => {
                log::debug!("spinner thread started, interval {interval:?}");
                *worker = Some(handle);
            }
            Err(e) => {
                log::warn!("failed to spawn spinner thread, spinner will not animate: {e}");
            }
        }
    }

    fn stop(&self) {
        {
            let Ok(mut inner) = self.shared.inner.lock() else {
                return;
            };
            if inner.state == SpinnerState::Stopped {
                return;
            }
            inner.state = SpinnerState::Stopped;
            self.shared.wake.notify_all();
        }
        let handle = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            let _: std::thread::Result<()> = handle.join();
            log::debug!("spinner thread joined");
        }
        let Ok(mut inner) = self.shared.inner.lock() else {
            return;
        };
        inner.line.finish(&self.completed_label);
    }

    /// Replace the label. The new label shows on the next frame
    fn update_text(&self, text: &str) {
        let Ok(mut inner) = self.shared.inner.lock() else {
            return;
        };
        inner.line.label.clear();
        inner.line.label.push_str(text);
    }
}

impl<C: Console + 'static> Drop for ProgressSpinner<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the animation thread: draw the next glyph every interval
/// until the spinner leaves the running state
fn animate<C: Console>(shared: &Shared<C>, interval: Duration) {
    let Ok(mut inner) = shared.inner.lock() else {
        return;
    };
    loop {
        // the lock is released while waiting
        let Ok((guard, _)) = shared
            .wake
            .wait_timeout_while(inner, interval, |x| x.state == SpinnerState::Running)
        else {
            return;
        };
        inner = guard;
        if inner.state != SpinnerState::Running {
            break;
        }
        inner.index = (inner.index + 1) % shared.glyphs.len();
        log::trace!("spinner frame {}", inner.index);
        let inner = &mut *inner;
        let glyph = &shared.glyphs[inner.index];
        inner.line.draw(false, |out| out.push_str(glyph));
    }
}
