use async_trait::async_trait;

use crate::error::Result;

use super::PreparedImage;

/// A generative model that turns a prompt (optionally with an image) into
/// prose.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Name reported to clients as `model_used`.
    fn model_name(&self) -> &str;

    fn is_available(&self) -> bool;

    async fn analyze_text(&self, prompt: &str) -> Result<String>;

    async fn analyze_image(&self, prompt: &str, image: &PreparedImage) -> Result<String>;
}
