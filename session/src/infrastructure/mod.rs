// Infrastructure layer - external concerns (storage, HTTP, GStreamer, runtime)
// Implements interfaces defined in application layer

pub mod config;
pub mod driven;    // Output adapters (local store, generator client, media devices)
pub mod driving;   // Input adapters (session runtime fed by the front-end)

pub use config::Settings;
