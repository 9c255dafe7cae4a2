/// Default number of bytes read per backward step.
pub const DEFAULT_WINDOW_SIZE: usize = 64 * 1024;

/// Configuration options for [`ReverseLineReader`].
///
/// Neither option changes which lines are produced or their order; the
/// window size only controls how many bytes each backward read covers.
///
/// # Examples
///
/// ```rust
/// use revlines::{DecodeMode, ReaderOptions};
///
/// let options = ReaderOptions {
///     window_size: 4096,
///     decode: DecodeMode::Lossy,
/// };
/// assert_eq!(ReaderOptions::default().window_size, 65_536);
/// # let _ = options;
/// ```
///
/// [`ReverseLineReader`]: crate::ReverseLineReader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Size in bytes of the reusable read window.
    ///
    /// Must be at least one. Smaller windows mean more, smaller reads; the
    /// emitted lines are identical for every size.
    ///
    /// # Default
    ///
    /// `65536`
    pub window_size: usize,

    /// How finalized lines are turned into text.
    ///
    /// # Default
    ///
    /// [`DecodeMode::Strict`]
    pub decode: DecodeMode,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            decode: DecodeMode::default(),
        }
    }
}

impl ReaderOptions {
    /// Options with the given window size and the default decode policy.
    #[must_use]
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }
}

/// UTF-8 decoding policy, applied uniformly to every emitted line.
///
/// - `Strict`: invalid UTF-8 fails the sequence with
///   [`ReaderError::DecodeFailure`](crate::ReaderError::DecodeFailure).
/// - `Lossy`: invalid sequences are replaced with U+FFFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodeMode {
    /// Reject invalid UTF-8.
    #[default]
    Strict,
    /// Substitute U+FFFD for invalid sequences.
    Lossy,
}
