//! Assistant Command and Query Handlers
//!
//! ## Commands
//! - `SynthesizeImage` - Generate an image and re-host it
//! - `GenerateReply` - Conversational text reply
//!
//! ## Queries
//! - `GetApiResponse` - Classify a prompt and resolve it to a text or image response

mod generate_reply;
mod get_api_response;
mod synthesize_image;

pub use generate_reply::{GenerateReplyCommand, GenerateReplyHandler, COLD_START_PREFIX};
pub use get_api_response::{
    GetApiResponseHandler, GetApiResponseQuery, IMAGE_FAILURE_MESSAGE, TEXT_FAILURE_MESSAGE,
};
pub use synthesize_image::{
    image_file_name, SynthesizeImageCommand, SynthesizeImageError, SynthesizeImageHandler,
    SynthesizeImageResult, IMAGE_CONTENT_TYPE,
};
