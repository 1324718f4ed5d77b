use anyhow::{Context, Result};
use async_trait::async_trait;
use gstreamer as gst;
use gstreamer::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{init_gstreamer, pop_bus_error, spawn_bus_watch};
use crate::application::errors::PlaybackError;
use crate::application::ports::AudioOutput;
use crate::domain::{TrackReference, Volume};

/// How long a network track may take to start
const PLAY_TIMEOUT_SECS: u64 = 15;

/// Audio output built on a `playbin` element.
///
/// Looping is done by seeking back to the start on end-of-stream.
pub struct GstAudioOutput {
    playbin: gst::Element,
    looping: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl GstAudioOutput {
    pub fn new(volume: Volume) -> Result<Self> {
        init_gstreamer()?;

        let playbin = gst::ElementFactory::make("playbin")
            .name("focus-audio")
            .property("volume", f64::from(volume.level()))
            .property_from_str("flags", "audio")
            .build()
            .context("Failed to create playbin")?;

        let looping = Arc::new(AtomicBool::new(false));
        let released = Arc::new(AtomicBool::new(false));

        let loop_flag = Arc::clone(&looping);
        spawn_bus_watch(&playbin, "audio", Arc::clone(&released), move |playbin| {
            if !loop_flag.load(Ordering::SeqCst) {
                return;
            }
            if let Err(e) = playbin.seek_simple(
                gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
                gst::ClockTime::ZERO,
            ) {
                warn!(error = %e, "Failed to loop track");
            }
        });

        Ok(Self {
            playbin,
            looping,
            released,
        })
    }
}

#[async_trait]
impl AudioOutput for GstAudioOutput {
    fn set_source(&self, track: &TrackReference) {
        // playbin only accepts a new URI below PAUSED
        if let Err(e) = self.playbin.set_state(gst::State::Null) {
            warn!(error = %e, "Failed to reset audio output");
        }
        self.playbin.set_property("uri", track.as_str());
        info!(track = %track, "Audio source set");
    }

    async fn play(&self) -> Result<(), PlaybackError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(PlaybackError("audio output released".to_string()));
        }
        let playbin = self.playbin.clone();
        tokio::task::spawn_blocking(move || {
            let reached = playbin.set_state(gst::State::Playing).is_ok()
                && playbin
                    .state(gst::ClockTime::from_seconds(PLAY_TIMEOUT_SECS))
                    .0
                    .is_ok();
            if reached {
                return Ok(());
            }
            let cause = pop_bus_error(&playbin)
                .map(|e| e.to_string())
                .unwrap_or_else(|| "audio output did not start".to_string());
            let _ = playbin.set_state(gst::State::Paused);
            Err(PlaybackError(cause))
        })
        .await
        .map_err(|e| PlaybackError(e.to_string()))?
    }

    fn pause(&self) {
        if let Err(e) = self.playbin.set_state(gst::State::Paused) {
            warn!(error = %e, "Failed to pause audio output");
        }
    }

    fn set_volume(&self, volume: Volume) {
        self.playbin.set_property("volume", f64::from(volume.level()));
        debug!(volume = volume.level(), "Volume changed");
    }

    fn set_looping(&self, looping: bool) {
        self.looping.store(looping, Ordering::SeqCst);
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.playbin.set_state(gst::State::Null);
        info!("Audio output released");
    }
}

impl Drop for GstAudioOutput {
    fn drop(&mut self) {
        self.release();
    }
}
