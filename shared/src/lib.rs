//! Wire types shared between the FocUS client and the track generation service.

pub mod protocol;

pub use protocol::{GenerateRequest, GenerateResponse, GENERATE_PATH};
