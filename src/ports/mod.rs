//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ImageGenerator` / `ImageDownloader` - Image generation service
//! - `ImageStore` - First-party hosting of generated images
//! - `TextGenerator` - Conversational text model

mod image_generator;
mod image_store;
mod text_generator;

pub use image_generator::{ImageDownloader, ImageGenerationError, ImageGenerator};
pub use image_store::{ImageStore, StorageError};
pub use text_generator::{
    AIError, TextGenerationRequest, TextGenerationResponse, TextGenerator,
    TokenUsage,
};
