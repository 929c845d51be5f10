//! Image generation event frames.

use serde::Deserialize;
use thiserror::Error;

/// Prefix of an event-stream data line.
pub const DATA_PREFIX: &str = "data: ";

/// Terminal failures detected while reading a generation stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamFailure {
    /// The service sent an explicit error frame.
    #[error("image generation failed: {message}")]
    Rejected { message: String },

    /// A data line did not carry a valid JSON payload.
    #[error("malformed event frame: {0}")]
    MalformedFrame(String),

    /// The stream ended before any terminal frame.
    #[error("image URL not returned")]
    MissingImageUrl,
}

/// A decoded frame of the generation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFrame {
    /// Terminal success carrying the generated image location.
    Complete { image_url: String },
    /// Terminal failure reported by the service.
    Failed { message: String },
    /// Any non-terminal update (queued, progress, ...).
    Progress { status: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FramePayload {
    #[serde(default)]
    status: String,
    image_url: Option<String>,
    message: Option<String>,
}

impl GenerationFrame {
    /// Parses the JSON payload of a data line.
    ///
    /// A `complete` status without an `imageUrl` is not terminal.
    pub fn parse(data: &str) -> Result<Self, StreamFailure> {
        let payload: FramePayload = serde_json::from_str(data)
            .map_err(|e| StreamFailure::MalformedFrame(format!("{}: {}", e, preview(data))))?;

        Ok(match (payload.status.as_str(), payload.image_url) {
            ("complete", Some(image_url)) => GenerationFrame::Complete { image_url },
            ("error", _) => GenerationFrame::Failed {
                message: payload
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            },
            _ => GenerationFrame::Progress {
                status: payload.status,
            },
        })
    }

    /// Parses a raw line. Lines without the data prefix yield `None`.
    pub fn from_line(line: &str) -> Option<Result<Self, StreamFailure>> {
        line.strip_prefix(DATA_PREFIX).map(Self::parse)
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GenerationFrame::Progress { .. })
    }
}

fn preview(data: &str) -> String {
    if data.chars().count() > 200 {
        format!("{}...", data.chars().take(200).collect::<String>())
    } else {
        data.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_frame() {
        let frame = GenerationFrame::parse(r#"{"status":"complete","imageUrl":"https://x/y.png"}"#).unwrap();
        assert_eq!(
            frame,
            GenerationFrame::Complete {
                image_url: "https://x/y.png".to_string()
            }
        );
        assert!(frame.is_terminal());
    }

    #[test]
    fn parses_error_frame() {
        let frame = GenerationFrame::parse(r#"{"status":"error","message":"boom"}"#).unwrap();
        assert_eq!(
            frame,
            GenerationFrame::Failed {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn progress_frame_is_not_terminal() {
        let frame = GenerationFrame::parse(r#"{"status":"progress","progress":40}"#).unwrap();
        assert!(!frame.is_terminal());
    }

    #[test]
    fn complete_without_url_is_not_terminal() {
        let frame = GenerationFrame::parse(r#"{"status":"complete"}"#).unwrap();
        assert!(!frame.is_terminal());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let result = GenerationFrame::parse("{not json");
        assert!(matches!(result, Err(StreamFailure::MalformedFrame(_))));
    }

    #[test]
    fn non_data_lines_are_skipped() {
        assert!(GenerationFrame::from_line("event: ping").is_none());
        assert!(GenerationFrame::from_line(": keep-alive").is_none());
        assert!(GenerationFrame::from_line("").is_none());
    }
}
