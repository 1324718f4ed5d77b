use anyhow::{Context, Result};
use async_trait::async_trait;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{init_gstreamer, pop_bus_error, spawn_bus_watch, PreviewFrame, PreviewSink};
use crate::application::errors::DeviceError;
use crate::application::ports::{CameraDevice, CaptureConstraints, MediaStream};

const DEFAULT_SOURCE: &str = "autovideosrc";
const START_TIMEOUT_SECS: u64 = 5;

/// Local camera captured through GStreamer.
///
/// Frames are converted to RGBA at the requested size and pushed to the
/// shared [`PreviewSink`].
pub struct GstCamera {
    source_factory: String,
    preview: PreviewSink,
}

impl GstCamera {
    pub fn new(preview: PreviewSink) -> Result<Self> {
        init_gstreamer()?;
        Ok(Self {
            source_factory: DEFAULT_SOURCE.to_string(),
            preview,
        })
    }

    /// Uses another source element, e.g. `v4l2src` or `videotestsrc`.
    pub fn with_source(mut self, factory: impl Into<String>) -> Self {
        self.source_factory = factory.into();
        self
    }

    fn build_pipeline(&self, constraints: CaptureConstraints) -> Result<gst::Pipeline> {
        let source = gst::ElementFactory::make(&self.source_factory)
            .name("camera-source")
            .build()
            .with_context(|| format!("Failed to create {}", self.source_factory))?;

        let videoconvert = gst::ElementFactory::make("videoconvert")
            .build()
            .context("Failed to create videoconvert")?;

        let videoscale = gst::ElementFactory::make("videoscale")
            .build()
            .context("Failed to create videoscale")?;

        let capsfilter = gst::ElementFactory::make("capsfilter")
            .property(
                "caps",
                &gst::Caps::builder("video/x-raw")
                    .field("format", "RGBA")
                    .field("width", constraints.width as i32)
                    .field("height", constraints.height as i32)
                    .build(),
            )
            .build()
            .context("Failed to create capsfilter")?;

        let appsink = gst::ElementFactory::make("appsink")
            .name("preview")
            .property("sync", false)
            .property_from_str("max-buffers", "1")
            .property("drop", true)
            .build()
            .context("Failed to create appsink")?;

        let pipeline = gst::Pipeline::default();
        pipeline.add_many([&source, &videoconvert, &videoscale, &capsfilter, &appsink])?;
        gst::Element::link_many([&source, &videoconvert, &videoscale, &capsfilter, &appsink])
            .context("Failed to link camera pipeline")?;

        let appsink = appsink
            .downcast::<AppSink>()
            .map_err(|_| anyhow::anyhow!("Failed to downcast to AppSink"))?;

        let preview = self.preview.clone();
        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Some(frame) = frame_from_sample(&sample) {
                        preview.publish(frame);
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        Ok(pipeline)
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<PreviewFrame> {
    let info = VideoInfo::from_caps(sample.caps()?).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let width = info.width();
    let height = info.height();
    let row = width as usize * 4;
    let stride = info.stride()[0] as usize;
    let data = map.as_slice();

    let rgba = if stride == row {
        data.get(..row * height as usize)?.to_vec()
    } else {
        let mut packed = Vec::with_capacity(row * height as usize);
        for y in 0..height as usize {
            packed.extend_from_slice(data.get(y * stride..y * stride + row)?);
        }
        packed
    };

    Some(PreviewFrame {
        width,
        height,
        rgba,
    })
}

/// Brings the pipeline to `Playing`, classifying failures.
fn start_pipeline(pipeline: &gst::Pipeline) -> Result<(), DeviceError> {
    let started = pipeline.set_state(gst::State::Playing).is_ok()
        && pipeline
            .state(gst::ClockTime::from_seconds(START_TIMEOUT_SECS))
            .0
            .is_ok();
    if started {
        return Ok(());
    }

    let cause = pop_bus_error(pipeline.upcast_ref());
    let _ = pipeline.set_state(gst::State::Null);
    match cause {
        Some(err) if err.not_authorized() => Err(DeviceError::PermissionDenied(err.to_string())),
        Some(err) => Err(DeviceError::Unavailable(err.to_string())),
        None => Err(DeviceError::Unavailable("camera did not start".to_string())),
    }
}

#[async_trait]
impl CameraDevice for GstCamera {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<Box<dyn MediaStream>, DeviceError> {
        info!(
            "Acquiring camera via {} at {}x{}",
            self.source_factory, constraints.width, constraints.height
        );
        let pipeline = self
            .build_pipeline(constraints)
            .map_err(|e| DeviceError::Unavailable(format!("{:#}", e)))?;

        // opening a device can block in the driver
        let pipeline = tokio::task::spawn_blocking(move || start_pipeline(&pipeline).map(|()| pipeline))
            .await
            .map_err(|e| DeviceError::Unavailable(e.to_string()))??;

        let stopped = Arc::new(AtomicBool::new(false));
        spawn_bus_watch(pipeline.upcast_ref(), "camera", Arc::clone(&stopped), |_| ());

        Ok(Box::new(GstStream {
            pipeline,
            preview: self.preview.clone(),
            stopped,
        }))
    }
}

/// A running camera pipeline. Dropping it stops capture.
struct GstStream {
    pipeline: gst::Pipeline,
    preview: PreviewSink,
    stopped: Arc<AtomicBool>,
}

impl MediaStream for GstStream {
    fn live_tracks(&self) -> usize {
        if self.stopped.load(Ordering::SeqCst) {
            0
        } else {
            1
        }
    }

    fn stop_all_tracks(&mut self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            warn!(error = %e, "Failed to stop camera pipeline");
        }
        self.preview.clear();
        debug!("Camera pipeline stopped");
    }
}

impl Drop for GstStream {
    fn drop(&mut self) {
        self.stop_all_tracks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs GStreamer's base plugins; skipped quietly when they are missing.
    #[tokio::test]
    async fn test_test_source_streams_and_stops() {
        let preview = PreviewSink::new();
        let camera = match GstCamera::new(preview.clone()) {
            Ok(camera) => camera.with_source("videotestsrc"),
            Err(_) => return,
        };
        if gst::ElementFactory::find("videotestsrc").is_none() {
            return;
        }

        let mut stream = camera
            .acquire(CaptureConstraints { width: 64, height: 36 })
            .await
            .unwrap();
        assert_eq!(stream.live_tracks(), 1);

        stream.stop_all_tracks();
        assert_eq!(stream.live_tracks(), 0);
        stream.stop_all_tracks();
        assert!(matches!(preview.newer_than(u64::MAX), Some((_, None))));
    }

    #[tokio::test]
    async fn test_missing_source_is_unavailable() {
        let camera = match GstCamera::new(PreviewSink::new()) {
            Ok(camera) => camera.with_source("no-such-camera-element"),
            Err(_) => return,
        };
        let err = camera.acquire(CaptureConstraints::default()).await.err().unwrap();
        assert!(matches!(err, DeviceError::Unavailable(_)));
    }
}
