use std::{
    cell::Cell,
    io::{self, Cursor, Read, Seek, SeekFrom},
    rc::Rc,
};

use crate::{DecodeMode, ReaderOptions, ReverseLineReader};

pub(crate) fn reader_over(content: &[u8], window_size: usize) -> ReverseLineReader<Cursor<Vec<u8>>> {
    ReverseLineReader::from_source(
        Cursor::new(content.to_vec()),
        ReaderOptions::with_window_size(window_size),
    )
}

/// Drain a reader over `content`, panicking on any error.
pub(crate) fn collect_lines(content: &[u8], window_size: usize) -> Vec<String> {
    reader_over(content, window_size)
        .into_lines()
        .collect::<Result<_, _>>()
        .expect("reading from memory cannot fail")
}

pub(crate) fn collect_lossy(content: &[u8], window_size: usize) -> Vec<String> {
    let options = ReaderOptions {
        window_size,
        decode: DecodeMode::Lossy,
    };
    ReverseLineReader::from_source(Cursor::new(content.to_vec()), options)
        .into_lines()
        .collect::<Result<_, _>>()
        .expect("lossy decoding cannot fail")
}

/// Reference answer computed by splitting the whole text up front.
pub(crate) fn naive_reverse_lines(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = content.split('\n').map(str::to_owned).collect();
    if content.ends_with('\n') {
        lines.pop();
    }
    lines.reverse();
    lines
}

/// Shared view of what happened to a [`TrackedSource`] after it was moved
/// into a reader.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probe {
    closed: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
}

impl Probe {
    pub(crate) fn closed(&self) -> bool {
        self.closed.get()
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }
}

/// In-memory source that records reads and its own drop, and can be told to
/// fail a given read.
#[derive(Debug)]
pub(crate) struct TrackedSource {
    inner: Cursor<Vec<u8>>,
    probe: Probe,
    fail_on_read: Option<usize>,
    fail_size: bool,
}

impl TrackedSource {
    pub(crate) fn new(content: &[u8]) -> (Self, Probe) {
        let probe = Probe::default();
        let source = Self {
            inner: Cursor::new(content.to_vec()),
            probe: probe.clone(),
            fail_on_read: None,
            fail_size: false,
        };
        (source, probe)
    }

    /// Fail the `n`th read (1-based).
    pub(crate) fn failing_on_read(mut self, n: usize) -> Self {
        self.fail_on_read = Some(n);
        self
    }
}

impl TrackedSource {
    /// Refuse to report the source length.
    pub(crate) fn failing_size(mut self) -> Self {
        self.fail_size = true;
        self
    }
}

impl Read for TrackedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.probe.reads.get() + 1;
        self.probe.reads.set(n);
        if self.fail_on_read == Some(n) {
            return Err(io::Error::other("injected read failure"));
        }
        self.inner.read(buf)
    }
}

impl Seek for TrackedSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.fail_size && matches!(pos, SeekFrom::End(_)) {
            return Err(io::Error::other("injected size failure"));
        }
        self.inner.seek(pos)
    }
}

impl Drop for TrackedSource {
    fn drop(&mut self) {
        self.probe.closed.set(true);
    }
}

#[test]
fn naive_reference_examples() {
    assert_eq!(naive_reverse_lines(""), Vec::<String>::new());
    assert_eq!(naive_reverse_lines("a\nb\nc\n"), ["c", "b", "a"]);
    assert_eq!(naive_reverse_lines("a\nb\nc"), ["c", "b", "a"]);
    assert_eq!(naive_reverse_lines("\n"), [""]);
}
