#![no_main]
use std::io::Cursor;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use revlines::{DecodeMode, ReaderError, ReaderOptions, ReverseLineReader};

#[derive(Debug, Arbitrary)]
struct Input {
    window: u16,
    lossy: bool,
    /// Stop after this many lines when set.
    take: Option<u8>,
    content: Vec<u8>,
}

/// Split the whole buffer up front; the reader must agree with this.
fn reference(content: &[u8], mode: DecodeMode) -> Result<Vec<String>, usize> {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let mut out = Vec::new();
    let mut end = body.len();
    for start in body
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, b)| **b == b'\n')
        .map(|(i, _)| i + 1)
        .chain(std::iter::once(0))
    {
        let bytes = &body[start..end];
        match mode {
            DecodeMode::Strict => match std::str::from_utf8(bytes) {
                Ok(s) => out.push(s.to_owned()),
                Err(_) => return Err(start),
            },
            DecodeMode::Lossy => out.push(String::from_utf8_lossy(bytes).into_owned()),
        }
        end = start.saturating_sub(1);
    }
    Ok(out)
}

fn reader(input: Input) {
    let mode = if input.lossy {
        DecodeMode::Lossy
    } else {
        DecodeMode::Strict
    };
    let options = ReaderOptions {
        window_size: usize::from(input.window) + 1,
        decode: mode,
    };
    let expected = reference(&input.content, mode);
    let lines = ReverseLineReader::from_source(Cursor::new(input.content), options).into_lines();

    let limit = input.take.map_or(usize::MAX, usize::from);
    let mut got = Vec::new();
    for line in lines.take(limit) {
        match line {
            Ok(line) => got.push(line),
            Err(ReaderError::DecodeFailure { offset, .. }) => {
                let failed_at = expected.as_ref().expect_err("reader rejected valid input");
                assert_eq!(offset, *failed_at as u64);
                return;
            }
            Err(e) => panic!("unexpected error from in-memory source: {e}"),
        }
    }

    match expected {
        Ok(all) => {
            assert_eq!(got.len(), all.len().min(limit));
            assert_eq!(got, all[..got.len()]);
        }
        Err(_) => assert_eq!(got.len(), limit, "invalid input accepted"),
    }
}

fuzz_target!(|input: Input| reader(input));
