use std::{collections::VecDeque, fs::File, iter::FusedIterator};

use crate::{ReaderError, ReaderState, ReverseLineReader, source::WindowSource};

/// Iterator over the lines of a source, last line first.
///
/// Windows are read lazily: a new window is pulled only once every line
/// completed by the previous one has been handed out. An error is yielded
/// once, after which the iterator is finished. Dropping the iterator closes
/// the source.
#[derive(Debug)]
pub struct ReverseLines<S = File> {
    reader: ReverseLineReader<S>,
    ready: VecDeque<String>,
}

impl<S: WindowSource> ReverseLines<S> {
    pub(crate) fn new(reader: ReverseLineReader<S>) -> Self {
        Self {
            reader,
            ready: VecDeque::new(),
        }
    }

    /// The underlying reader.
    #[must_use]
    pub fn reader(&self) -> &ReverseLineReader<S> {
        &self.reader
    }

    /// Lifecycle state of the underlying reader.
    ///
    /// Lines already pulled from the source may still be buffered here after
    /// the reader reports [`ReaderState::Exhausted`].
    #[must_use]
    pub fn state(&self) -> ReaderState {
        self.reader.state()
    }

    /// Stop iterating and close the source. Buffered lines are discarded.
    pub fn cancel(&mut self) {
        self.ready.clear();
        self.reader.cancel();
    }
}

impl<S: WindowSource> Iterator for ReverseLines<S> {
    type Item = Result<String, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            match self.reader.pull() {
                Ok(Some(lines)) => self.ready.extend(lines),
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S: WindowSource> FusedIterator for ReverseLines<S> {}

impl<S: WindowSource> IntoIterator for ReverseLineReader<S> {
    type Item = Result<String, ReaderError>;
    type IntoIter = ReverseLines<S>;

    fn into_iter(self) -> Self::IntoIter {
        ReverseLines::new(self)
    }
}
