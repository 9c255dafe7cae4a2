use std::io::{self, Read, Seek, SeekFrom};

/// A byte source the reader can walk backward.
///
/// Only forward, positioned reads are needed: the reader asks for the window
/// ending at its cursor and moves the cursor down by the window length.
/// Closing a source is dropping it.
///
/// Every `Read + Seek` type (files, `Cursor<Vec<u8>>`, ...) implements this
/// trait through a seek followed by `read_exact`.
pub trait WindowSource {
    /// Total length of the source in bytes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the size cannot be determined.
    fn size(&mut self) -> io::Result<u64>;

    /// Fill `buf` entirely with the bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or [`io::ErrorKind::UnexpectedEof`]
    /// if fewer than `buf.len()` bytes are available at `offset`.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

impl<T: Read + Seek> WindowSource for T {
    fn size(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }
}
