// Driven port - local camera device (output port)

use async_trait::async_trait;

use crate::application::errors::DeviceError;

/// Resolution hint passed to the camera. The device may pick something close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
        }
    }
}

/// A live capture handle. Whoever holds it must stop it.
pub trait MediaStream: Send {
    /// Number of tracks still producing media
    fn live_tracks(&self) -> usize;

    /// Stops every track. Safe to call more than once.
    fn stop_all_tracks(&mut self);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CameraDevice: Send + Sync {
    async fn acquire(&self, constraints: CaptureConstraints) -> Result<Box<dyn MediaStream>, DeviceError>;
}
