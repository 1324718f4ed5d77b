use async_trait::async_trait;
use reqwest::Client;
use shared::{GenerateRequest, GenerateResponse, GENERATE_PATH};
use std::time::Duration;
use tracing::{error, info};
use url::Url;

use crate::application::errors::GenerationError;
use crate::application::ports::TrackGenerator;
use crate::domain::TrackReference;

/// Track generator backed by the HTTP generation service
pub struct HttpTrackGenerator {
    client: Client,
    base_url: Url,
    endpoint: Url,
}

impl HttpTrackGenerator {
    /// `base_url` may carry a path prefix (`http://host/lofi`); the endpoint
    /// is resolved beneath it.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid generator URL '{}': {}", base_url, e))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let endpoint = base_url.join(GENERATE_PATH.trim_start_matches('/'))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolves the returned audio reference. Relative paths such as
    /// `/media/<id>.mp3` are served by the generator itself.
    fn resolve(&self, audio_url: &str) -> Result<TrackReference, GenerationError> {
        self.base_url
            .join(audio_url)
            .map(|url| TrackReference::new(url.to_string()))
            .map_err(|e| GenerationError::Transport(format!("invalid audio URL '{}': {}", audio_url, e)))
    }
}

#[async_trait]
impl TrackGenerator for HttpTrackGenerator {
    async fn generate(&self, prompt: &str) -> Result<TrackReference, GenerationError> {
        info!(endpoint = %self.endpoint, %prompt, "Requesting new track");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.json::<GenerateResponse>().await;

        if !status.is_success() {
            let message = body.ok().and_then(|b| b.error);
            error!(%status, ?message, "Generator rejected request");
            return Err(GenerationError::rejected(message));
        }

        let body = body.map_err(|e| GenerationError::Transport(format!("unreadable response: {}", e)))?;
        match body.audio_url {
            Some(audio_url) if !audio_url.trim().is_empty() => self.resolve(audio_url.trim()),
            _ => Err(GenerationError::rejected(body.error)),
        }
    }
}
