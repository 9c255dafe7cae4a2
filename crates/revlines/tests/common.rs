#![allow(missing_docs, dead_code)]

use std::io::Write;

use revlines::{ReaderOptions, ReverseLineReader};
use tempfile::NamedTempFile;

/// A small application log, oldest entry first.
pub const LOG: &str = "\
2024-05-01T10:00:00Z INFO  service starting
2024-05-01T10:00:01Z INFO  listening on 0.0.0.0:8080
2024-05-01T10:00:05Z WARN  slow request path=/search took_ms=812
2024-05-01T10:00:09Z ERROR upstream refused connection retry=1
2024-05-01T10:00:10Z INFO  upstream reconnected
2024-05-01T10:00:12Z INFO  shutting down
";

pub fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn read_file(file: &NamedTempFile, window_size: usize) -> Vec<String> {
    ReverseLineReader::with_options(file.path(), ReaderOptions::with_window_size(window_size))
        .into_lines()
        .collect::<Result<_, _>>()
        .expect("read temp file backward")
}
