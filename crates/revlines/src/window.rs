use std::io;

use bstr::ByteSlice;

use crate::source::WindowSource;

pub(crate) const DELIMITER: u8 = b'\n';

/// Reusable read window plus the delimiter offsets found in it.
///
/// The buffer is allocated once and overwritten by every read; only
/// `bytes()` (the first `len` bytes of the latest read) is meaningful.
#[derive(Debug)]
pub(crate) struct Window {
    buf: Box<[u8]>,
    len: usize,
    /// File offset of `buf[0]` for the latest read.
    start: u64,
    delimiters: Vec<usize>,
}

impl Window {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window size must be at least one byte");
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            len: 0,
            start: 0,
            delimiters: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub(crate) fn start(&self) -> u64 {
        self.start
    }

    /// Offsets of `\n` within `bytes()`, increasing.
    pub(crate) fn delimiters(&self) -> &[usize] {
        &self.delimiters
    }

    /// File offset and length of the window that ends at `pos`.
    pub(crate) fn span_before(&self, pos: u64) -> (u64, usize) {
        let len = usize::try_from(pos).map_or(self.capacity(), |p| p.min(self.capacity()));
        (pos - len as u64, len)
    }

    /// Read the window that ends at `*pos` and move `*pos` to its start.
    ///
    /// `*pos` is left untouched when the read fails.
    pub(crate) fn read_before<S: WindowSource>(
        &mut self,
        source: &mut S,
        pos: &mut u64,
    ) -> io::Result<()> {
        debug_assert!(*pos > 0, "no bytes left before the cursor");
        let (start, len) = self.span_before(*pos);

        self.len = 0;
        self.delimiters.clear();
        source.read_exact_at(start, &mut self.buf[..len])?;

        self.len = len;
        self.start = start;
        *pos = start;
        self.scan();
        Ok(())
    }

    fn scan(&mut self) {
        let Self {
            buf,
            len,
            delimiters,
            ..
        } = self;
        delimiters.extend(buf[..*len].find_iter(&[DELIMITER]));
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, start: u64, bytes: &[u8]) {
        self.buf[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
        self.start = start;
        self.delimiters.clear();
        self.scan();
    }
}
