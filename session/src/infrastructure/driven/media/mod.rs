// GStreamer-backed media devices

pub mod preview;
pub mod camera;
pub mod audio;

pub use preview::{PreviewFrame, PreviewSink};
pub use camera::GstCamera;
pub use audio::GstAudioOutput;

use anyhow::{Context, Result};
use gstreamer as gst;
use gstreamer::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

pub(crate) fn init_gstreamer() -> Result<()> {
    gst::init().context("Failed to initialize GStreamer")
}

/// An error message taken off a pipeline bus
#[derive(Debug)]
pub(crate) struct BusError {
    pub error: gst::glib::Error,
    pub debug: Option<String>,
}

impl BusError {
    pub fn not_authorized(&self) -> bool {
        self.error.matches(gst::ResourceError::NotAuthorized)
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.debug {
            Some(debug) => write!(f, "{} ({})", self.error, debug),
            None => write!(f, "{}", self.error),
        }
    }
}

/// First error waiting on the element's bus, if any
pub(crate) fn pop_bus_error(element: &gst::Element) -> Option<BusError> {
    let bus = element.bus()?;
    let msg = bus.pop_filtered(&[gst::MessageType::Error])?;
    match msg.view() {
        gst::MessageView::Error(err) => Some(BusError {
            error: err.error(),
            debug: err.debug().map(|d| d.to_string()),
        }),
        _ => None,
    }
}

/// Watches an element's bus on a background thread until `stopped` is set.
///
/// Errors are logged; `on_eos` runs on every end-of-stream.
pub(crate) fn spawn_bus_watch<F>(
    element: &gst::Element,
    label: &'static str,
    stopped: Arc<AtomicBool>,
    on_eos: F,
) where
    F: Fn(&gst::Element) + Send + 'static,
{
    let Some(bus) = element.bus() else {
        warn!("[{}] element has no bus, not watching", label);
        return;
    };
    let element = element.clone();
    std::thread::spawn(move || {
        while !stopped.load(Ordering::SeqCst) {
            let Some(msg) = bus.timed_pop(gst::ClockTime::from_mseconds(250)) else {
                continue;
            };
            match msg.view() {
                gst::MessageView::Error(err) => {
                    error!(
                        "[{}] GStreamer error: {} (debug: {:?})",
                        label,
                        err.error(),
                        err.debug()
                    );
                }
                gst::MessageView::Eos(..) => {
                    info!("[{}] GStreamer EOS", label);
                    on_eos(&element);
                }
                _ => (),
            }
        }
    });
}
