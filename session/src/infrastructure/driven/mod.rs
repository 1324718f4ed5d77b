pub mod storage;
pub mod presence;
pub mod generation;
pub mod media;

pub use storage::{FileStore, MemoryStore};
pub use presence::StaticPresence;
pub use generation::HttpTrackGenerator;
pub use media::{GstAudioOutput, GstCamera, PreviewFrame, PreviewSink};
