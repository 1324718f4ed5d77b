use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored in place of an avatar reference when the user prefers initials.
pub const NO_AVATAR_SENTINEL: &str = "null";

/// One of the fixed avatar presets offered in the identity editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Avatar {
    Scholar,
    CoolGirl,
    CoolGuy,
    AnimeGirl,
}

impl Avatar {
    pub const ALL: [Avatar; 4] = [
        Avatar::Scholar,
        Avatar::CoolGirl,
        Avatar::CoolGuy,
        Avatar::AnimeGirl,
    ];

    /// Image reference persisted for this preset
    pub fn reference(&self) -> &'static str {
        match self {
            Avatar::Scholar => "avatars/scholar.jpg",
            Avatar::CoolGirl => "avatars/cool-girl.webp",
            Avatar::CoolGuy => "avatars/cool-guy.png",
            Avatar::AnimeGirl => "avatars/anime-girl.jpg",
        }
    }

    pub fn from_reference(reference: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.reference() == reference)
    }

    /// Short label drawn in place of the image
    pub fn label(&self) -> &'static str {
        match self {
            Avatar::Scholar => "Scholar",
            Avatar::CoolGirl => "Cool girl",
            Avatar::CoolGuy => "Cool guy",
            Avatar::AnimeGirl => "Anime girl",
        }
    }

    /// Encodes an avatar selection for the local store.
    pub fn encode_selection(selection: Option<Avatar>) -> &'static str {
        selection.map_or(NO_AVATAR_SENTINEL, |a| a.reference())
    }

    /// Decodes a stored selection. `None` means the value is unknown;
    /// `Some(None)` is the explicit "show initials" sentinel.
    pub fn decode_selection(stored: &str) -> Option<Option<Avatar>> {
        if stored == NO_AVATAR_SENTINEL {
            return Some(None);
        }
        Self::from_reference(stored).map(Some)
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::Scholar
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())
    }
}
