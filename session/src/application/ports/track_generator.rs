// Driven port - remote lofi track generator (output port)

use async_trait::async_trait;

use crate::application::errors::GenerationError;
use crate::domain::TrackReference;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackGenerator: Send + Sync {
    /// Issues exactly one generation request. No retries.
    async fn generate(&self, prompt: &str) -> Result<TrackReference, GenerationError>;
}
