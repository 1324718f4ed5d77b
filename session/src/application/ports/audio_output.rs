// Driven port - audio output element (output port)

use async_trait::async_trait;

use crate::application::errors::PlaybackError;
use crate::domain::{TrackReference, Volume};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioOutput: Send + Sync {
    fn set_source(&self, track: &TrackReference);
    async fn play(&self) -> Result<(), PlaybackError>;
    fn pause(&self);
    fn set_volume(&self, volume: Volume);
    fn set_looping(&self, looping: bool);
    /// Stops playback and frees the underlying output
    fn release(&self);
}
