mod analyzer;
mod api;
mod prepared_image;
pub mod prompts;
mod provider;

pub use analyzer::ContentAnalyzer;
pub use api::LlmApiClient;
pub use prepared_image::{PreparedImage, INVALID_IMAGE_FORMAT};
pub use provider::{LlmBackend, LlmProvider};
