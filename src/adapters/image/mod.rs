//! Image Generator Adapters.
//!
//! - `HttpImageGenerator` - streaming client for the generation service
//! - `MockImageGenerator` - canned outcomes and replayed streams for testing

mod http_image_generator;
mod mock_image_generator;

pub use http_image_generator::HttpImageGenerator;
pub use mock_image_generator::{MockImageGenerator, MockImageOutcome};
