use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::Avatar;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Another participant in the room. Read-only: supplied by a presence source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub id: PeerId,
    pub display_name: String,
    pub avatar: Option<Avatar>,
}

impl Peer {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, avatar: Option<Avatar>) -> Self {
        Self {
            id: PeerId::new(id),
            display_name: display_name.into(),
            avatar,
        }
    }
}
