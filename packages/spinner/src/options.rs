//! Options for building indicators
//!
//! Each indicator has an options struct that implements `Default` with the
//! stock look of that indicator. Use the builder methods to change parts of it:
//!
//! ```rust
//! # use pistonite_spinner as spinner;
//! let options = spinner::ProgressSpinnerOptions::default()
//!     .label("Working: ")
//!     .glyphs(["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
//!     .update_interval_ms(80);
//! ```
//!
//! Options are only checked when the indicator is built, and building fails
//! with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
//! if they cannot produce a usable indicator.
//!
//! With the `serde` feature, the options can also be deserialized. Missing
//! fields take their default value.
use crate::{ConfigError, Result};

/// Default label shown before the progress
pub const DEFAULT_LABEL: &str = "Progress: ";
/// Default text shown after the label when the progress is done
pub const DEFAULT_COMPLETED_LABEL: &str = " ✓ OK!";
/// Default number of segments in a horizontal bar
pub const DEFAULT_SEGMENTS: usize = 30;
/// Default spinner frame interval
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;

const DEFAULT_BAR_GLYPHS: [&str; 2] = ["░", "█"];
const DEFAULT_BRACKETS: [&str; 2] = ["[", "]"];
const DEFAULT_RAMP: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
const DEFAULT_SPINNER_GLYPHS: [&str; 4] = ["|", "/", "-", "\\"];

/// Options for [`HProgressBar`](crate::HProgressBar)
///
/// Defaults:
/// - Label: `"Progress: "`
/// - Completed label: `" ✓ OK!"`
/// - Segments: 30
/// - Glyphs: `░` (empty), `█` (filled)
/// - Brackets: `[` and `]`, turned on
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HProgressBarOptions {
    /// Text before the bar
    pub label: String,
    /// Text after the label once the bar is stopped
    pub completed_label: String,
    /// Number of segments in the bar
    pub segments: usize,
    /// The empty and filled glyph, in that order
    pub glyphs: Vec<String>,
    /// The opening and closing bracket, in that order.
    /// `None` means `[` and `]`
    pub brackets: Option<Vec<String>>,
    /// If the bar is surrounded by brackets
    pub use_brackets: bool,
}

impl Default for HProgressBarOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            completed_label: DEFAULT_COMPLETED_LABEL.to_string(),
            segments: DEFAULT_SEGMENTS,
            glyphs: to_strings(DEFAULT_BAR_GLYPHS),
            brackets: None,
            use_brackets: true,
        }
    }
}

impl HProgressBarOptions {
    /// Build options from one combined frame list, with brackets turned on
    /// or off.
    ///
    /// With brackets, the list is either `[empty, filled]` (default brackets
    /// are added) or `[open, close, empty, filled]`. Without brackets, the list
    /// must be `[empty, filled]`.
    ///
    /// ```rust
    /// # use pistonite_spinner as spinner;
    /// let options = spinner::HProgressBarOptions::from_frames(["<", ">", "-", "#"], true).unwrap();
    /// assert_eq!(options.brackets, Some(vec!["<".to_string(), ">".to_string()]));
    /// assert_eq!(options.glyphs, vec!["-".to_string(), "#".to_string()]);
    /// ```
    pub fn from_frames<I>(frames: I, use_brackets: bool) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut frames = to_strings(frames);
        let len = frames.len();
        let brackets = match (len, use_brackets) {
            (2, _) => None,
            (4, true) => Some(frames.drain(..2).collect()),
            _ => return Err(ConfigError::FrameCount { len, use_brackets }.into()),
        };
        Ok(Self {
            glyphs: frames,
            brackets,
            use_brackets,
            ..Default::default()
        })
    }

    /// Set the text before the bar
    #[inline(always)]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the text shown after the label once the bar is stopped
    #[inline(always)]
    pub fn completed_label(mut self, label: impl Into<String>) -> Self {
        self.completed_label = label.into();
        self
    }

    /// Set the number of segments. Must be greater than 0
    #[inline(always)]
    pub fn segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Set the empty and filled glyph
    ///
    /// ```rust
    /// # use pistonite_spinner as spinner;
    /// spinner::HProgressBarOptions::default().glyphs(["-", "#"]);
    /// ```
    #[inline(always)]
    pub fn glyphs<I>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.glyphs = to_strings(glyphs);
        self
    }

    /// Set the opening and closing bracket. This does not turn on
    /// brackets if they are turned off
    #[inline(always)]
    pub fn brackets<I>(mut self, brackets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.brackets = Some(to_strings(brackets));
        self
    }

    /// Set if the bar is surrounded by brackets
    #[inline(always)]
    pub fn use_brackets(mut self, use_brackets: bool) -> Self {
        self.use_brackets = use_brackets;
        self
    }

    /// Check the options and resolve them into the glyphs to draw with
    pub(crate) fn resolve(&self) -> Result<BarGlyphs> {
        if self.segments == 0 {
            return Err(ConfigError::ZeroSegments.into());
        }
        let [empty, filled] = self.glyphs.as_slice() else {
            return Err(ConfigError::GlyphPair(self.glyphs.len()).into());
        };
        if empty.is_empty() || filled.is_empty() {
            return Err(ConfigError::EmptyGlyph.into());
        }
        let brackets = if self.use_brackets {
            match &self.brackets {
                None => Some((
                    DEFAULT_BRACKETS[0].to_string(),
                    DEFAULT_BRACKETS[1].to_string(),
                )),
                Some(pair) => {
                    let [open, close] = pair.as_slice() else {
                        return Err(ConfigError::BracketPair(pair.len()).into());
                    };
                    Some((open.clone(), close.clone()))
                }
            }
        } else {
            None
        };
        Ok(BarGlyphs {
            empty: empty.clone(),
            filled: filled.clone(),
            brackets,
        })
    }
}

/// Resolved glyphs of a horizontal bar
#[derive(Debug, Clone)]
pub(crate) struct BarGlyphs {
    pub empty: String,
    pub filled: String,
    pub brackets: Option<(String, String)>,
}

/// Options for [`VProgressBar`](crate::VProgressBar)
///
/// Defaults:
/// - Label: `"Progress: "`
/// - Completed label: `" ✓ OK!"`
/// - Glyphs: `" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VProgressBarOptions {
    /// Text before the glyph
    pub label: String,
    /// Text after the label once the bar is stopped
    pub completed_label: String,
    /// Ramp of glyphs, from empty to full
    pub glyphs: Vec<String>,
}

impl Default for VProgressBarOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            completed_label: DEFAULT_COMPLETED_LABEL.to_string(),
            glyphs: to_strings(DEFAULT_RAMP),
        }
    }
}

impl VProgressBarOptions {
    /// Set the text before the glyph
    #[inline(always)]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the text shown after the label once the bar is stopped
    #[inline(always)]
    pub fn completed_label(mut self, label: impl Into<String>) -> Self {
        self.completed_label = label.into();
        self
    }

    /// Set the ramp of glyphs, from empty to full. Must not be empty
    #[inline(always)]
    pub fn glyphs<I>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.glyphs = to_strings(glyphs);
        self
    }
}

/// Options for [`ProgressSpinner`](crate::ProgressSpinner)
///
/// Defaults:
/// - Label: `"Progress: "`
/// - Completed label: `" ✓ OK!"`
/// - Glyphs: `|`, `/`, `-`, `\`
/// - Update interval: 100ms
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressSpinnerOptions {
    /// Text before the glyph
    pub label: String,
    /// Text after the label once the spinner is stopped
    pub completed_label: String,
    /// Glyphs to cycle through
    pub glyphs: Vec<String>,
    /// Time between frames, in milliseconds
    pub update_interval_ms: u64,
}

impl Default for ProgressSpinnerOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            completed_label: DEFAULT_COMPLETED_LABEL.to_string(),
            glyphs: to_strings(DEFAULT_SPINNER_GLYPHS),
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
        }
    }
}

impl ProgressSpinnerOptions {
    /// Set the text before the glyph
    #[inline(always)]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the text shown after the label once the spinner is stopped
    #[inline(always)]
    pub fn completed_label(mut self, label: impl Into<String>) -> Self {
        self.completed_label = label.into();
        self
    }

    /// Set the glyphs to cycle through. Must not be empty
    #[inline(always)]
    pub fn glyphs<I>(mut self, glyphs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.glyphs = to_strings(glyphs);
        self
    }

    /// Set the time between frames. Must be greater than 0
    #[inline(always)]
    pub fn update_interval_ms(mut self, ms: u64) -> Self {
        self.update_interval_ms = ms;
        self
    }
}

fn to_strings<I>(glyphs: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    glyphs.into_iter().map(Into::into).collect()
}
