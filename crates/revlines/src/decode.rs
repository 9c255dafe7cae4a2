use bstr::ByteVec;

use crate::{DecodeMode, ReaderError, pending::RawLine};

/// Turn a finalized line into text according to `mode`.
///
/// Valid input is moved into the `String` without copying in both modes.
pub(crate) fn decode_line(line: RawLine, mode: DecodeMode) -> Result<String, ReaderError> {
    match mode {
        DecodeMode::Strict => {
            String::from_utf8(line.bytes).map_err(|e| ReaderError::DecodeFailure {
                offset: line.offset,
                source: e.utf8_error(),
            })
        }
        DecodeMode::Lossy => Ok(line.bytes.into_string_lossy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(offset: u64, bytes: &[u8]) -> RawLine {
        RawLine {
            offset,
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn strict_accepts_multibyte_text() {
        let text = decode_line(raw(0, "añ😊".as_bytes()), DecodeMode::Strict).unwrap();
        assert_eq!(text, "añ😊");
    }

    #[test]
    fn strict_reports_line_offset() {
        let err = decode_line(raw(42, b"ok\xffno"), DecodeMode::Strict).unwrap_err();
        match err {
            ReaderError::DecodeFailure { offset, source } => {
                assert_eq!(offset, 42);
                assert_eq!(source.valid_up_to(), 2);
            }
            other => panic!("expected decode failure, got {other:?}"),
        }
    }

    #[test]
    fn lossy_replaces_invalid_sequences() {
        let text = decode_line(raw(0, b"ok\xffno"), DecodeMode::Lossy).unwrap();
        assert_eq!(text, "ok\u{FFFD}no");
    }
}
