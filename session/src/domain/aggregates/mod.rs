pub mod countdown;
pub mod room;

pub use countdown::{format_mmss, CountdownTimer, TimerState};
pub use room::{presence_tiles, PresenceTile, TileFace};
