use serde::{Deserialize, Serialize};

/// Playback volume, always within `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Volume(f32);

impl Volume {
    pub const DEFAULT: Volume = Volume(0.25);

    /// Clamps `level` into range. NaN is treated as silence.
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            return Self(0.0);
        }
        Self(level.clamp(0.0, 1.0))
    }

    pub fn level(&self) -> f32 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::DEFAULT
    }
}
