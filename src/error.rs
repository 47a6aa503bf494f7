/// Result type for notechroma operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building color tables or selecting voices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A pitch class has no entry in the base color table
    #[error("No base color mapped for pitch class {pitch_class}")]
    NoMapping {
        /// Pitch class (0-11) that is missing
        pitch_class: u8,
    },

    /// A table entry names a pitch class outside 0-11
    #[error("Invalid pitch class: {0} (expected 0-11)")]
    InvalidPitchClass(u8),

    /// Color string is not `#rrggbb` or `hsl(h, s%, l%)`
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// Instrument name not present in the catalog
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Visualizer name not present in the catalog
    #[error("Unknown visualizer: {0}")]
    UnknownVisualizer(String),

    /// Mapper configuration that cannot produce valid colors
    #[error("Invalid mapper config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create an invalid color format error from any string-like input
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Error::InvalidColorFormat(input.into())
    }
}
