// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod local_store;
pub mod camera;
pub mod audio_output;
pub mod track_generator;
pub mod presence_source;

pub use local_store::LocalStore;
pub use camera::{CameraDevice, CaptureConstraints, MediaStream};
pub use audio_output::AudioOutput;
pub use track_generator::TrackGenerator;
pub use presence_source::PresenceSource;

#[cfg(test)]
pub use local_store::MockLocalStore;
#[cfg(test)]
pub use camera::MockCameraDevice;
#[cfg(test)]
pub use audio_output::MockAudioOutput;
#[cfg(test)]
pub use track_generator::MockTrackGenerator;
