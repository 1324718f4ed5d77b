//! Study-room session core: identity, camera, generated music and the
//! countdown, behind ports with GStreamer and HTTP adapters.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::{
    Countdown, SessionError, SessionPorts, SessionSnapshot, SessionViewModel, TimerSnapshot,
    ViewModelOptions,
};
pub use domain::{format_mmss, Avatar, PresenceTile, TileFace, TimerState, Volume};
pub use infrastructure::driving::{Command, SessionHandle, SessionRuntime};
pub use infrastructure::Settings;
