// Application layer - session view model and countdown driver
// Orchestrates domain logic, talks to the outside world through ports only

pub mod errors;
pub mod ports;
pub mod identity;
pub mod session;
pub mod countdown;

pub use errors::{DeviceError, GenerationError, PlaybackError, SessionError, StorageError};
pub use session::{SessionPorts, SessionSnapshot, SessionViewModel, ViewModelOptions};
pub use countdown::{Countdown, TimerSnapshot};
