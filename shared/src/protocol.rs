use serde::{Deserialize, Serialize};

/// Path of the track generation endpoint, relative to the generator base URL.
pub const GENERATE_PATH: &str = "/api/generate";

/// Body sent to the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Body returned by the generation endpoint.
///
/// A successful response carries `audioUrl`; a failed one carries `error`
/// next to a non-success status code. Both fields are optional so that a
/// malformed body still decodes and the caller can pick a default message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn success(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: Some(audio_url.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            audio_url: None,
            error: Some(error.into()),
        }
    }
}
