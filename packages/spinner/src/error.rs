/// Result type returned when building an indicator
pub type Result<T> = std::result::Result<T, Error>;

/// Error from building an indicator
///
/// Only construction can fail. Once an indicator exists, every operation
/// on it is best-effort: out-of-range percentages are clamped and console
/// write failures are ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The options cannot produce a usable indicator
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// The reason an [`Error::InvalidConfiguration`] was raised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The glyph ramp or cycle has no entries
    #[error("glyph list cannot be empty")]
    EmptyGlyphs,
    /// Horizontal bar with no segments
    #[error("total segments must be greater than 0")]
    ZeroSegments,
    /// The empty/filled pair does not have exactly 2 entries
    #[error("expected exactly 2 progress glyphs (empty, filled), got {0}")]
    GlyphPair(usize),
    /// One of the empty/filled glyphs is an empty string
    #[error("progress glyphs cannot be empty strings")]
    EmptyGlyph,
    /// The bracket pair does not have exactly 2 entries
    #[error("expected exactly 2 bracket glyphs (open, close), got {0}")]
    BracketPair(usize),
    /// A combined frame list has a length that does not fit the bracket setting
    #[error("with brackets, frames must have 2 or 4 entries; without, exactly 2 (got {len})")]
    FrameCount {
        /// Number of frames supplied
        len: usize,
        /// If brackets were requested
        use_brackets: bool,
    },
    /// Spinner interval of 0ms
    #[error("update interval must be greater than 0ms")]
    ZeroInterval,
}
