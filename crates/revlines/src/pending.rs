//! Stitching of line fragments across window boundaries.
//!
//! Windows arrive in decreasing file order, so the line that straddles a
//! window boundary is built up back to front: every undelimited window is
//! *prepended* to what was collected from later windows. Fragments are
//! copies; the window buffer is overwritten by the next read.

use std::collections::VecDeque;

use crate::window::Window;

/// A complete line's bytes together with the file offset of its first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawLine {
    pub(crate) offset: u64,
    pub(crate) bytes: Vec<u8>,
}

/// The line currently being assembled.
///
/// `open == false` before the first byte of the source has been seen and
/// after the final flush. It distinguishes "the file ends with a
/// delimiter" (nothing to emit after it) from "the first line is empty"
/// (emit `""`).
#[derive(Debug, Default)]
pub(crate) struct PendingPrefix {
    /// Ordered file-start-ward to file-end-ward.
    fragments: VecDeque<Vec<u8>>,
    /// File offset of `fragments[0]`.
    offset: u64,
    open: bool,
}

impl PendingPrefix {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    /// Number of bytes collected so far.
    pub(crate) fn len(&self) -> usize {
        self.fragments.iter().map(Vec::len).sum()
    }

    /// Split the latest window into complete lines, later lines first.
    ///
    /// Lines are appended to `out`. A window without delimiters only extends
    /// the pending prefix.
    pub(crate) fn stitch(&mut self, window: &Window, out: &mut Vec<RawLine>) {
        let bytes = window.bytes();
        let start = window.start();
        let (Some(&first), Some(&last)) = (window.delimiters().first(), window.delimiters().last())
        else {
            self.prepend(start, bytes);
            return;
        };

        let tail = &bytes[last + 1..];
        if let Some(line) = self.finish(start + (last + 1) as u64, tail) {
            out.push(line);
        }

        for pair in window.delimiters().windows(2).rev() {
            let (lo, hi) = (pair[0] + 1, pair[1]);
            out.push(RawLine {
                offset: start + lo as u64,
                bytes: bytes[lo..hi].to_vec(),
            });
        }

        self.restart(start, &bytes[..first]);
    }

    /// Take the residual prefix once the cursor has reached offset 0.
    pub(crate) fn flush(&mut self) -> Option<RawLine> {
        self.finish(self.offset, &[])
    }

    pub(crate) fn clear(&mut self) {
        self.fragments.clear();
        self.offset = 0;
        self.open = false;
    }

    fn prepend(&mut self, offset: u64, bytes: &[u8]) {
        self.fragments.push_front(bytes.to_vec());
        self.offset = offset;
        self.open = true;
    }

    /// Complete the pending line with `head`, the bytes that precede it.
    fn finish(&mut self, offset: u64, head: &[u8]) -> Option<RawLine> {
        if !self.open && head.is_empty() {
            return None;
        }
        let mut line = Vec::with_capacity(head.len() + self.len());
        line.extend_from_slice(head);
        for fragment in self.fragments.drain(..) {
            line.extend_from_slice(&fragment);
        }
        self.open = false;
        Some(RawLine {
            offset,
            bytes: line,
        })
    }

    fn restart(&mut self, offset: u64, bytes: &[u8]) {
        debug_assert!(self.fragments.is_empty());
        if !bytes.is_empty() {
            self.fragments.push_back(bytes.to_vec());
        }
        self.offset = offset;
        self.open = true;
    }
}
