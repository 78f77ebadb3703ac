//! Incremental newline-delimited JSON decoding

use serde_json::Value;
use thiserror::Error;

/// Longest line accepted before the stream is declared broken.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("engine sent a line longer than {limit} bytes")]
pub struct LineTooLong {
    pub limit: usize,
}

/// Splits a byte stream into JSON records, one per line.
///
/// Lines that are not valid JSON are kept as JSON strings so nothing the
/// engine sends is lost. Bytes already searched for a newline are not
/// searched again.
#[derive(Debug)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
    scanned: usize,
    max_line: usize,
}

impl Default for NdjsonDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
            max_line,
        }
    }

    /// Feed bytes and return every record completed by them.
    ///
    /// An oversized line yields a [`LineTooLong`] in its place and is
    /// discarded.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Result<Value, LineTooLong>> {
        self.buffer.extend_from_slice(bytes);

        let mut records = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|b| *b == b'\n') {
            let end = self.scanned + offset;
            if end - start > self.max_line {
                records.push(Err(self.too_long()));
            } else if let Some(record) = parse_line(&self.buffer[start..end]) {
                records.push(Ok(record));
            }
            start = end + 1;
            self.scanned = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();

        if self.buffer.len() > self.max_line {
            self.buffer.clear();
            self.scanned = 0;
            records.push(Err(self.too_long()));
        }
        records
    }

    /// Record left in the buffer when the stream ends without a newline.
    pub fn finish(&mut self) -> Option<Value> {
        self.scanned = 0;
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&rest)
    }

    fn too_long(&self) -> LineTooLong {
        LineTooLong {
            limit: self.max_line,
        }
    }
}

fn parse_line(line: &[u8]) -> Option<Value> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}
