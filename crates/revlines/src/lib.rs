//! Read a UTF-8 text file backward, one line at a time.
//!
//! [`ReverseLineReader`] walks a file (or any [`WindowSource`]) from its end
//! toward its beginning in fixed-size windows and produces its lines last
//! line first, without loading the file into memory. Consumers that only
//! need the most recent entries of a log can stop at any point; the cost of
//! reading is bounded by the number of windows actually pulled.
//!
//! Only `\n` separates lines. A trailing `\n` at the end of the file does not
//! start an extra empty line, and `\r` is left in place.
//!
//! ```rust,no_run
//! use revlines::ReverseLineReader;
//!
//! # fn main() -> Result<(), revlines::ReaderError> {
//! for line in ReverseLineReader::new("/var/log/app.log").into_lines().take(10) {
//!     println!("{}", line?);
//! }
//! # Ok(())
//! # }
//! ```

mod decode;
mod error;
mod lines;
mod options;
mod pending;
mod reader;
mod source;
mod window;

#[cfg(test)]
mod tests;

pub use error::ReaderError;
pub use lines::ReverseLines;
pub use options::{DEFAULT_WINDOW_SIZE, DecodeMode, ReaderOptions};
pub use reader::{ReaderState, ReverseLineReader};
pub use source::WindowSource;
