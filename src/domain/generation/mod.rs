//! Generation module - decoding of the image generation event stream.
//!
//! The stream is line-delimited `data: <json>` frames. `LineDecoder` turns
//! byte chunks into lines, `GenerationFrame` parses payloads, and
//! `ImageStreamReader` stops at the first terminal frame.

mod frame;
mod line_decoder;
mod stream_reader;

pub use frame::{GenerationFrame, StreamFailure, DATA_PREFIX};
pub use line_decoder::LineDecoder;
pub use stream_reader::{ImageStreamReader, StreamState};
