//! Pull-driven backward line reader.
//!
//! Overview
//! - `ReverseLineReader` walks a source from its end toward offset 0 in
//!   fixed-size windows. Every read is an ordinary forward read of the window
//!   that ends at the cursor; the cursor then moves down to the window start.
//! - Each `pull` performs at most one window read, splits the window at `\n`
//!   bytes, stitches the pieces onto the pending prefix carried over from
//!   later windows, and returns the lines completed by that window, last line
//!   of the file first.
//! - When a `pull` finds the cursor at 0, the residual prefix (the file's
//!   first line, which has no delimiter before it) is flushed and the reader
//!   becomes `Exhausted`.
//!
//! States
//! - `NotStarted -> Open -> Exhausted`, with `Cancelled` reachable from the
//!   first two and `Failed` entered on any error.
//! - The source and the window buffer only exist in `Open`; every transition
//!   out of `Open` drops both, which closes the source. Dropping the reader
//!   has the same effect.

use std::{
    fs::File,
    io, mem,
    path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::{
    ReaderError, ReaderOptions,
    decode::decode_line,
    pending::{PendingPrefix, RawLine},
    source::WindowSource,
    window::Window,
};

/// Lifecycle state of a [`ReverseLineReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Created; the source has not been opened yet.
    NotStarted,
    /// The source is open and lines remain.
    Open,
    /// Every line has been produced and the source is closed.
    Exhausted,
    /// Stopped by [`ReverseLineReader::cancel`]; the source is closed.
    Cancelled,
    /// Stopped by an error; the source is closed.
    Failed,
}

impl ReaderState {
    /// `true` once no further lines can be produced.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Cancelled | Self::Failed)
    }
}

#[derive(Debug)]
enum Origin<S> {
    Path(PathBuf, fn(&Path) -> io::Result<S>),
    Source(S),
}

#[derive(Debug)]
enum State<S> {
    NotStarted(Origin<S>),
    Open { source: S, window: Window },
    Exhausted,
    Cancelled,
    Failed,
}

/// Reads the lines of a UTF-8 source from last to first.
///
/// Only one window of `window_size` bytes is held in memory, plus the
/// fragments of the single line that straddles the current window boundary.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// use revlines::{ReaderOptions, ReverseLineReader};
///
/// let source = Cursor::new(b"first\nsecond\nthird\n".to_vec());
/// let reader = ReverseLineReader::from_source(source, ReaderOptions::with_window_size(4));
/// let lines: Vec<String> = reader.into_lines().collect::<Result<_, _>>().unwrap();
/// assert_eq!(lines, ["third", "second", "first"]);
/// ```
#[derive(Debug)]
pub struct ReverseLineReader<S = File> {
    state: State<S>,
    options: ReaderOptions,
    /// Start of the next unread window; counts down to 0.
    pos: u64,
    size: Option<u64>,
    pending: PendingPrefix,
    staged: Vec<RawLine>,
}

fn open_file(path: &Path) -> io::Result<File> {
    File::open(path)
}

impl ReverseLineReader<File> {
    /// Reader over the file at `path` with default options.
    ///
    /// The file is not touched until [`start`](Self::start) or the first
    /// [`pull`](Self::pull).
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_options(path, ReaderOptions::default())
    }

    /// Reader over the file at `path`.
    ///
    /// # Panics
    ///
    /// Panics if `options.window_size` is zero.
    #[must_use]
    pub fn with_options(path: impl AsRef<Path>, options: ReaderOptions) -> Self {
        Self::from_origin(
            Origin::Path(path.as_ref().to_path_buf(), open_file),
            options,
        )
    }
}

impl<S: WindowSource> ReverseLineReader<S> {
    /// Reader over an already-open source.
    ///
    /// # Panics
    ///
    /// Panics if `options.window_size` is zero.
    #[must_use]
    pub fn from_source(source: S, options: ReaderOptions) -> Self {
        Self::from_origin(Origin::Source(source), options)
    }

    fn from_origin(origin: Origin<S>, options: ReaderOptions) -> Self {
        assert!(
            options.window_size > 0,
            "window size must be at least one byte"
        );
        Self {
            state: State::NotStarted(origin),
            options,
            pos: 0,
            size: None,
            pending: PendingPrefix::new(),
            staged: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ReaderState {
        match self.state {
            State::NotStarted(_) => ReaderState::NotStarted,
            State::Open { .. } => ReaderState::Open,
            State::Exhausted => ReaderState::Exhausted,
            State::Cancelled => ReaderState::Cancelled,
            State::Failed => ReaderState::Failed,
        }
    }

    /// Offset of the first byte already read; equal to the source size right
    /// after `start` and 0 once the whole source has been read.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Source size in bytes, known once the reader has started.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// The options this reader was created with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Open the source and place the cursor at its end.
    ///
    /// Does nothing if the reader has already started.
    ///
    /// # Errors
    ///
    /// [`ReaderError::OpenFailure`] if the source cannot be opened or sized.
    /// The reader is then [`Failed`](ReaderState::Failed).
    pub fn start(&mut self) -> Result<(), ReaderError> {
        let origin = match mem::replace(&mut self.state, State::Failed) {
            State::NotStarted(origin) => origin,
            other => {
                self.state = other;
                return Ok(());
            }
        };

        let (path, opened) = match origin {
            Origin::Path(path, open) => {
                let opened = open(&path);
                (Some(path), opened)
            }
            Origin::Source(source) => (None, Ok(source)),
        };
        let source = match opened.and_then(|mut s| s.size().map(|size| (s, size))) {
            Ok((source, size)) => {
                self.size = Some(size);
                self.pos = size;
                source
            }
            Err(source) => return Err(self.fail(ReaderError::OpenFailure { path, source })),
        };
        // Never allocate more than the source can fill.
        let capacity = usize::try_from(self.pos)
            .unwrap_or(usize::MAX)
            .min(self.options.window_size)
            .max(1);
        debug!(
            "opened {} for reverse reading ({} bytes, window {capacity})",
            path.as_deref().map_or_else(|| "source".into(), Path::to_string_lossy),
            self.pos,
        );

        self.state = State::Open {
            source,
            window: Window::new(capacity),
        };
        Ok(())
    }

    /// Read one more window and return the lines it completed.
    ///
    /// Starts the reader if needed. Returns `Ok(Some(lines))` with the lines
    /// ordered last-in-file first; the vector is empty when the window held
    /// no delimiter. Returns `Ok(None)` once the reader is exhausted,
    /// cancelled or failed.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::OpenFailure`] if starting fails.
    /// - [`ReaderError::ReadFailure`] if the window read fails.
    /// - [`ReaderError::DecodeFailure`] if a completed line is not UTF-8 and
    ///   the reader decodes strictly.
    ///
    /// Every error leaves the reader [`Failed`](ReaderState::Failed) with its
    /// source closed.
    pub fn pull(&mut self) -> Result<Option<Vec<String>>, ReaderError> {
        if matches!(self.state, State::NotStarted(_)) {
            self.start()?;
        }
        let State::Open { source, window } = &mut self.state else {
            return Ok(None);
        };

        if self.pos == 0 {
            let residual = self.pending.flush();
            let line = match residual.map(|raw| decode_line(raw, self.options.decode)) {
                Some(Ok(line)) => Some(line),
                Some(Err(e)) => return Err(self.fail(e)),
                None => None,
            };
            debug!("reverse reading finished");
            self.release(State::Exhausted);
            return Ok(line.map(|line| vec![line]));
        }

        let (offset, len) = window.span_before(self.pos);
        trace!("reading {len} bytes at offset {offset}");
        if let Err(source) = window.read_before(source, &mut self.pos) {
            return Err(self.fail(ReaderError::ReadFailure {
                offset,
                len,
                source,
            }));
        }
        self.pending.stitch(window, &mut self.staged);

        let mode = self.options.decode;
        let decoded: Result<Vec<String>, ReaderError> = self
            .staged
            .drain(..)
            .map(|raw| decode_line(raw, mode))
            .collect();
        match decoded {
            Ok(lines) => Ok(Some(lines)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Stop reading: close the source and discard every buffered fragment.
    ///
    /// No further lines are produced. Does nothing once the reader is
    /// exhausted, cancelled or failed.
    pub fn cancel(&mut self) {
        if self.state().is_terminal() {
            return;
        }
        debug!("reverse reading cancelled at offset {}", self.pos);
        self.release(State::Cancelled);
    }

    /// Iterate over the remaining lines, pulling windows lazily.
    #[must_use]
    pub fn into_lines(self) -> crate::ReverseLines<S> {
        crate::ReverseLines::new(self)
    }

    fn fail(&mut self, err: ReaderError) -> ReaderError {
        debug!("reverse reading failed: {err}");
        self.release(State::Failed);
        err
    }

    /// Move to a terminal state, dropping the source and window.
    fn release(&mut self, terminal: State<S>) {
        self.state = terminal;
        self.pending.clear();
        self.staged.clear();
    }
}
