//! Progress indicators that draw on one line of the terminal
//!
//! Three indicators are provided. All of them draw by repeatedly overwriting
//! the current line, hide the cursor while they are live, and finish by
//! printing the label followed by a completed label (`" ✓ OK!"` by default)
//! on its own line.
//!
//! | Indicator | Looks like | Driven by |
//! |-|-|-|
//! | [`ProgressSpinner`] | `Progress: /` | a background thread, every update interval |
//! | [`HProgressBar`] | `Progress: [█████░░░░░]` | [`update_progress`](Progress::update_progress) |
//! | [`VProgressBar`] | `Progress: ▅` | [`update_progress`](Progress::update_progress) |
//!
//! The lifecycle is shared through the [`Indicator`] trait (`start`, `stop`,
//! `update_text`), and the two bars also implement [`Progress`].
//!
//! ```rust,no_run
//! # use pistonite_spinner as spinner;
//! use spinner::{HProgressBar, HProgressBarOptions, Indicator, Progress};
//!
//! # fn main() -> spinner::Result<()> {
//! let bar = HProgressBar::new(
//!     HProgressBarOptions::default()
//!         .label("Loading: ")
//!         .glyphs(["-", "#"]),
//! )?;
//! bar.start();
//! for i in (0..=100).step_by(2) {
//!     bar.update_progress(i as f64);
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//! }
//! bar.stop();
//! # Ok(()) }
//! ```
//!
//! # Options
//! Each indicator is built from an options struct with defaults and builder
//! methods, see [`options`]. Invalid options are the only error in this
//! crate: building fails with [`Error::InvalidConfiguration`] and nothing is
//! written to the terminal. Everything after that is best-effort; percentages
//! out of range are clamped, and failures to write to the terminal are ignored.
//!
//! # Threads
//! Every operation takes `&self`. Each indicator has one lock that guards
//! both its state and its writes to the console, so an indicator can be
//! shared between threads (for example with `Arc`) and frames never tear.
//! The spinner owns one background thread between `start` and `stop`.
//!
//! There is no coordination between *different* indicators: two live
//! indicators on the same terminal will overwrite each other's line and fight
//! over cursor visibility.
//!
//! # Console
//! Indicators draw through a [`Console`] backend. [`Terminal::stdout()`] (the
//! default) picks ANSI escape sequences, the native Windows console API, or
//! plain overwriting when stdout is not a terminal. Use the `with_console`
//! constructors to draw somewhere else, for example into a [`Capture`]
//! in tests.
//!
//! # Logging
//! Lifecycle events are logged through the [`log`](https://docs.rs/log) facade
//! at `debug` level, and each spinner frame at `trace` level.
//! This crate never installs a logger.

mod error;
pub use error::{ConfigError, Error, Result};

pub mod console;
pub use console::{Capture, Console, Terminal};

pub mod options;
pub use options::{HProgressBarOptions, ProgressSpinnerOptions, VProgressBarOptions};

mod indicator;
pub use indicator::{Indicator, Progress};

mod hbar;
pub use hbar::HProgressBar;
mod vbar;
pub use vbar::VProgressBar;
mod spinner;
pub use spinner::{ProgressSpinner, SpinnerState};
