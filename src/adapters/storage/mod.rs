//! Storage Adapters
//!
//! Implementations of the ImageStore port for re-hosting generated images.
//!
//! ## Available Adapters
//!
//! - **SupabaseImageStore** - Supabase storage REST API
//! - **InMemoryImageStore** - Stores images in memory (testing/development)

mod in_memory_image_store;
mod supabase_image_store;

pub use in_memory_image_store::{InMemoryImageStore, StoredImage};
pub use supabase_image_store::SupabaseImageStore;
