//! Text Generator Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `GeminiTextGenerator` - Google Gemini `generateContent`
//! - `MockTextGenerator` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiTextGenerator};
pub use mock_provider::{MockError, MockResponse, MockTextGenerator};
