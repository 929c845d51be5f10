//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text generation (Gemini, mock)
//! - `image` - Streaming image generation (HTTP, mock)
//! - `storage` - Image re-hosting (Supabase, in-memory)
//! - `http` - axum REST surface

pub mod ai;
pub mod http;
pub mod image;
pub mod storage;

pub use ai::{GeminiConfig, GeminiTextGenerator, MockTextGenerator};
pub use image::{HttpImageGenerator, MockImageGenerator};
pub use storage::{InMemoryImageStore, SupabaseImageStore};
