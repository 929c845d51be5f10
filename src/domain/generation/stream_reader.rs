//! Read-until-terminal state machine over a generation event stream.
//!
//! Independent of the transport: feed it raw chunks in arrival order and
//! stop reading as soon as `is_terminal()` reports true.

use super::frame::{GenerationFrame, StreamFailure};
use super::line_decoder::LineDecoder;

/// Reader state. `Resolved` and `Failed` are absorbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamState {
    Reading,
    Resolved(String),
    Failed(StreamFailure),
}

/// Consumes chunks until the first terminal frame.
#[derive(Debug)]
pub struct ImageStreamReader {
    decoder: LineDecoder,
    state: StreamState,
    frames_seen: usize,
}

impl Default for ImageStreamReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStreamReader {
    pub fn new() -> Self {
        Self {
            decoder: LineDecoder::new(),
            state: StreamState::Reading,
            frames_seen: 0,
        }
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state != StreamState::Reading
    }

    /// Number of data frames consumed so far, terminal frame included.
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    /// Feeds one chunk. Ignored once the reader is terminal.
    pub fn push(&mut self, chunk: &[u8]) -> &StreamState {
        if self.is_terminal() {
            return &self.state;
        }
        for line in self.decoder.push(chunk) {
            self.consume_line(&line);
            if self.is_terminal() {
                break;
            }
        }
        if !self.is_terminal() && self.decoder.overflowed() {
            self.state = StreamState::Failed(StreamFailure::MalformedFrame(format!(
                "event stream line exceeded {} bytes",
                LineDecoder::MAX_BUFFER_SIZE
            )));
        }
        &self.state
    }

    /// Signals end of stream and returns the outcome.
    pub fn finish(mut self) -> Result<String, StreamFailure> {
        if !self.is_terminal() {
            if let Some(line) = self.decoder.finish() {
                self.consume_line(&line);
            }
        }
        match self.state {
            StreamState::Resolved(url) => Ok(url),
            StreamState::Failed(failure) => Err(failure),
            StreamState::Reading => Err(StreamFailure::MissingImageUrl),
        }
    }

    fn consume_line(&mut self, line: &str) {
        let Some(parsed) = GenerationFrame::from_line(line) else {
            return;
        };
        self.frames_seen += 1;

        self.state = match parsed {
            Ok(GenerationFrame::Complete { image_url }) => StreamState::Resolved(image_url),
            Ok(GenerationFrame::Failed { message }) => {
                StreamState::Failed(StreamFailure::Rejected { message })
            }
            Ok(GenerationFrame::Progress { status }) => {
                tracing::trace!(status = %status, "Image generation progress");
                StreamState::Reading
            }
            Err(failure) => StreamState::Failed(failure),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PROGRESS_THEN_COMPLETE: &str = "data: {\"status\":\"progress\",\"progress\":50}\n\n\
        data: {\"status\":\"complete\",\"imageUrl\":\"https://x/y.png\"}\n\n";

    fn read_all(chunks: &[&[u8]]) -> Result<String, StreamFailure> {
        let mut reader = ImageStreamReader::new();
        for chunk in chunks {
            reader.push(chunk);
            if reader.is_terminal() {
                break;
            }
        }
        reader.finish()
    }

    #[test]
    fn resolves_after_progress_frame() {
        let result = read_all(&[PROGRESS_THEN_COMPLETE.as_bytes()]);
        assert_eq!(result, Ok("https://x/y.png".to_string()));
    }

    #[test]
    fn error_frame_fails() {
        let result = read_all(&[b"data: {\"status\":\"error\",\"message\":\"boom\"}\n"]);
        assert_eq!(
            result,
            Err(StreamFailure::Rejected {
                message: "boom".to_string()
            })
        );
    }

    #[test]
    fn stream_without_terminal_frame_is_missing_url() {
        let result = read_all(&[b"data: {\"status\":\"progress\"}\n", b"data: {\"status\":\"queued\"}\n"]);
        assert_eq!(result, Err(StreamFailure::MissingImageUrl));
    }

    #[test]
    fn empty_stream_is_missing_url() {
        assert_eq!(read_all(&[]), Err(StreamFailure::MissingImageUrl));
    }

    #[test]
    fn malformed_frame_fails() {
        let result = read_all(&[b"data: {oops\n"]);
        assert!(matches!(result, Err(StreamFailure::MalformedFrame(_))));
    }

    #[test]
    fn oversized_line_fails_as_malformed() {
        let huge = vec![b'x'; LineDecoder::MAX_BUFFER_SIZE / 2 + 1];
        let mut reader = ImageStreamReader::new();

        reader.push(b"data: {\"status\":\"progress\"}\ndata: {\"imageUrl\":\"");
        reader.push(&huge);
        assert_eq!(reader.state(), &StreamState::Reading);
        reader.push(&huge);
        assert!(reader.is_terminal());

        let result = reader.finish();
        assert!(
            matches!(result, Err(StreamFailure::MalformedFrame(ref message)) if message.contains("exceeded")),
            "{:?}",
            result
        );
    }

    #[test]
    fn terminal_frame_before_oversized_tail_still_resolves() {
        let mut chunk = b"data: {\"status\":\"complete\",\"imageUrl\":\"https://x\"}\n".to_vec();
        chunk.resize(chunk.len() + LineDecoder::MAX_BUFFER_SIZE + 1, b'x');

        assert_eq!(read_all(&[chunk.as_slice()]), Ok("https://x".to_string()));
    }

    #[test]
    fn first_terminal_frame_wins() {
        let mut reader = ImageStreamReader::new();
        reader.push(
            b"data: {\"status\":\"complete\",\"imageUrl\":\"https://first\"}\n\
              data: {\"status\":\"error\",\"message\":\"late\"}\n",
        );
        assert_eq!(reader.state(), &StreamState::Resolved("https://first".to_string()));
        assert_eq!(reader.frames_seen(), 1);

        reader.push(b"data: {\"status\":\"complete\",\"imageUrl\":\"https://second\"}\n");
        assert_eq!(reader.finish(), Ok("https://first".to_string()));
    }

    #[test]
    fn non_data_lines_are_ignored() {
        let result = read_all(&[b"event: message\nid: 1\n: comment\ndata: {\"status\":\"complete\",\"imageUrl\":\"https://x\"}\n"]);
        assert_eq!(result, Ok("https://x".to_string()));
    }

    #[test]
    fn unterminated_final_line_is_consumed_on_finish() {
        let result = read_all(&[b"data: {\"status\":\"complete\",\"imageUrl\":\"https://tail\"}"]);
        assert_eq!(result, Ok("https://tail".to_string()));
    }

    proptest! {
        #[test]
        fn outcome_is_independent_of_chunk_boundaries(split in 1usize..PROGRESS_THEN_COMPLETE.len()) {
            let (head, tail) = PROGRESS_THEN_COMPLETE.as_bytes().split_at(split);
            let result = read_all(&[head, tail]);
            prop_assert_eq!(result, Ok("https://x/y.png".to_string()));
        }
    }
}
