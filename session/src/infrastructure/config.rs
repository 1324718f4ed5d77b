use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::countdown::DEFAULT_TIMER_SECONDS;
use crate::application::ports::CaptureConstraints;
use crate::application::session::{ViewModelOptions, DEFAULT_PROMPT};
use crate::domain::Volume;

/// Runtime settings.
///
/// Layered: built-in defaults, then `focus.toml` in the working directory if
/// present, then `FOCUS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub generator_url: String,
    pub prompt: String,
    pub request_timeout_secs: u64,
    pub timer_seconds: u32,
    pub camera_width: u32,
    pub camera_height: u32,
    pub initial_volume: f32,
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

impl Settings {
    /// Loads `.env` if present, then the layered sources.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_sources(
            Some(File::with_name("focus").required(false)),
            Environment::with_prefix("FOCUS").try_parsing(true),
        )
    }

    fn from_sources<F>(file: Option<F>, env: Environment) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder()
            .set_default("generator_url", "http://localhost:5000")?
            .set_default("prompt", DEFAULT_PROMPT)?
            .set_default("request_timeout_secs", 30)?
            .set_default("timer_seconds", i64::from(DEFAULT_TIMER_SECONDS))?
            .set_default("camera_width", 640)?
            .set_default("camera_height", 360)?
            .set_default("initial_volume", f64::from(Volume::DEFAULT.level()))?;
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder
            .add_source(env)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Parses settings from a TOML document layered over the defaults
    #[cfg(test)]
    fn from_toml(toml: &str) -> Result<Self> {
        Self::from_sources(
            Some(File::from_str(toml, config::FileFormat::Toml)),
            Environment::with_prefix("FOCUS").source(Some(Default::default())),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn view_model_options(&self) -> ViewModelOptions {
        ViewModelOptions {
            prompt: self.prompt.clone(),
            capture: CaptureConstraints {
                width: self.camera_width,
                height: self.camera_height,
            },
            initial_volume: Volume::new(self.initial_volume),
        }
    }
}
