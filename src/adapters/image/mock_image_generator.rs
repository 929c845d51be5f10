//! Mock Image Generator for testing.
//!
//! Either returns canned outcomes or replays raw event-stream chunks through
//! the same `ImageStreamReader` the HTTP client uses. Also implements
//! `ImageDownloader` with canned bytes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::generation::ImageStreamReader;
use crate::ports::{ImageDownloader, ImageGenerationError, ImageGenerator};

/// A configured generation outcome.
#[derive(Debug, Clone)]
pub enum MockImageOutcome {
    /// Resolve to this URL.
    Url(String),
    /// Replay these chunks as the event stream body.
    Stream(Vec<Vec<u8>>),
    /// Fail with an HTTP status.
    HttpStatus(u16),
    /// Fail with a network error.
    Network(String),
}

/// Mock image generator and downloader.
#[derive(Debug, Clone)]
pub struct MockImageGenerator {
    outcomes: Arc<Mutex<VecDeque<MockImageOutcome>>>,
    image_bytes: Arc<Mutex<Option<Vec<u8>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    downloads: Arc<Mutex<Vec<String>>>,
    /// Simulated latency per generation.
    delay: Duration,
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            image_bytes: Arc::new(Mutex::new(Some(vec![0x89, b'P', b'N', b'G']))),
            prompts: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful generation.
    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.push(MockImageOutcome::Url(url.into()))
    }

    /// Queues a raw event stream, one entry per network chunk.
    pub fn with_stream<I, C>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let chunks = chunks.into_iter().map(|c| c.as_ref().to_vec()).collect();
        self.push(MockImageOutcome::Stream(chunks))
    }

    /// Queues an HTTP status failure.
    pub fn with_http_status(self, status: u16) -> Self {
        self.push(MockImageOutcome::HttpStatus(status))
    }

    /// Queues a network failure.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.push(MockImageOutcome::Network(message.into()))
    }

    /// Sets the bytes returned by `download`.
    pub fn with_image_bytes(self, bytes: Vec<u8>) -> Self {
        *self.image_bytes.lock().unwrap() = Some(bytes);
        self
    }

    /// Makes every download fail.
    pub fn with_failing_download(self) -> Self {
        *self.image_bytes.lock().unwrap() = None;
        self
    }

    /// Sets simulated latency per generation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Prompts passed to `generate`, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// URLs passed to `download`, in call order.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn push(self, outcome: MockImageOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }
}

/// Replays chunks through the stream reader, stopping at the first terminal frame.
fn replay(chunks: &[Vec<u8>]) -> Result<String, ImageGenerationError> {
    let mut reader = ImageStreamReader::new();
    for chunk in chunks {
        reader.push(chunk);
        if reader.is_terminal() {
            break;
        }
    }
    reader.finish().map_err(ImageGenerationError::from)
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ImageGenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockImageOutcome::Url("https://images.test/mock.png".to_string()));

        match outcome {
            MockImageOutcome::Url(url) => Ok(url),
            MockImageOutcome::Stream(chunks) => replay(&chunks),
            MockImageOutcome::HttpStatus(status) => Err(ImageGenerationError::Http {
                status,
                body: String::new(),
            }),
            MockImageOutcome::Network(message) => Err(ImageGenerationError::network(message)),
        }
    }
}

#[async_trait]
impl ImageDownloader for MockImageGenerator {
    async fn download(&self, url: &str) -> Result<Vec<u8>, ImageGenerationError> {
        self.downloads.lock().unwrap().push(url.to_string());

        self.image_bytes
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ImageGenerationError::download(format!("{} returned 404", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::StreamFailure;

    #[tokio::test]
    async fn progress_then_complete_resolves_url() {
        let generator = MockImageGenerator::new().with_stream([
            "data: {\"status\":\"processing\",\"message\":\"queued\"}\n",
            "data: {\"status\":\"complete\",\"imageUrl\":\"https://x/y.png\"}\n",
        ]);

        assert_eq!(generator.generate("a cat").await.unwrap(), "https://x/y.png");
    }

    #[tokio::test]
    async fn frames_after_terminal_are_ignored() {
        let generator = MockImageGenerator::new().with_stream([
            "data: {\"status\":\"complete\",\"imageUrl\":\"https://x/first.png\"}\n\
             data: {\"status\":\"complete\",\"imageUrl\":\"https://x/second.png\"}\n",
        ]);

        assert_eq!(generator.generate("a cat").await.unwrap(), "https://x/first.png");
    }

    #[tokio::test]
    async fn error_frame_fails_generation() {
        let generator = MockImageGenerator::new()
            .with_stream(["data: {\"status\":\"error\",\"message\":\"boom\"}\n"]);

        let err = generator.generate("a cat").await.unwrap_err();
        assert!(matches!(
            err,
            ImageGenerationError::Stream(StreamFailure::Rejected { ref message }) if message == "boom"
        ));
    }

    #[tokio::test]
    async fn stream_without_terminal_frame_reports_missing_url() {
        let generator = MockImageGenerator::new()
            .with_stream(["data: {\"status\":\"processing\"}\n", ": keep-alive\n"]);

        let err = generator.generate("a cat").await.unwrap_err();
        assert!(matches!(
            err,
            ImageGenerationError::Stream(StreamFailure::MissingImageUrl)
        ));
    }

    #[tokio::test]
    async fn records_prompts_and_downloads() {
        let generator = MockImageGenerator::new().with_image_bytes(vec![1, 2, 3]);

        let url = generator.generate("a red dragon").await.unwrap();
        let bytes = generator.download(&url).await.unwrap();

        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(generator.prompts(), vec!["a red dragon"]);
        assert_eq!(generator.downloads(), vec![url]);
    }

    #[tokio::test]
    async fn applies_delay() {
        let generator = MockImageGenerator::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        generator.generate("a cat").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn failing_download_returns_error() {
        let generator = MockImageGenerator::new().with_failing_download();
        let result = generator.download("https://x/y.png").await;
        assert!(matches!(result, Err(ImageGenerationError::Download(_))));
    }
}
