//! The normalized response handed back to the conversation layer.

use serde::{Deserialize, Serialize};

/// What the response content holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Displayable prose.
    Text,
    /// A publicly resolvable image URL.
    Image,
}

/// Normalized assistant response.
///
/// # Invariants
///
/// - `kind == Image` implies `content` is a URL
/// - `kind == Text` implies `content` is displayable text with `\n` line endings
///
/// Fields are private so the two can only be set together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "type")]
    kind: ResponseKind,
    content: String,
}

impl ApiResponse {
    /// Creates a text response, normalizing line endings.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Text,
            content: content.into().replace("\r\n", "\n"),
        }
    }

    /// Creates an image response carrying the public URL.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Image,
            content: url.into(),
        }
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_image(&self) -> bool {
        self.kind == ResponseKind::Image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_response_normalizes_line_endings() {
        let response = ApiResponse::text("line one\r\nline two");
        assert_eq!(response.kind(), ResponseKind::Text);
        assert_eq!(response.content(), "line one\nline two");
    }

    #[test]
    fn image_response_keeps_url() {
        let response = ApiResponse::image("https://cdn.example.com/img_1.png");
        assert!(response.is_image());
        assert_eq!(response.content(), "https://cdn.example.com/img_1.png");
    }

    #[test]
    fn serializes_with_type_field() {
        let json = serde_json::to_value(ApiResponse::image("https://x/y.png")).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["content"], "https://x/y.png");
    }
}
