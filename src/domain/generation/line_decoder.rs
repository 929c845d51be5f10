//! Incremental line decoder for event-stream bodies.

/// Buffers raw bytes and yields complete lines.
///
/// Lines are decoded one at a time, so a multi-byte character split across
/// two chunks is reassembled before decoding.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    overflowed: bool,
}

impl LineDecoder {
    /// Maximum buffered partial line (1MB).
    pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns every line it completed, in order.
    ///
    /// The trailing `\r` of a CRLF line ending is removed. Once a partial
    /// line outgrows `MAX_BUFFER_SIZE` the decoder is spent and yields nothing.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.overflowed {
            return Vec::new();
        }
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            lines.push(decode_line(&self.buffer[start..end]));
            start = end + 1;
        }
        self.buffer.drain(..start);

        if self.buffer.len() > Self::MAX_BUFFER_SIZE {
            tracing::warn!(
                buffered = self.buffer.len(),
                "Event stream line exceeded buffer limit"
            );
            self.buffer.clear();
            self.overflowed = true;
        }

        lines
    }

    /// Returns the unterminated trailing line, if any, and empties the buffer.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = decode_line(&self.buffer);
        self.buffer.clear();
        Some(line)
    }

    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
