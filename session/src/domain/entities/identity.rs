use crate::domain::value_objects::*;

/// The local user's confirmed identity
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    display_name: DisplayName,
    avatar: Option<Avatar>,
}

impl Identity {
    pub fn new(display_name: DisplayName, avatar: Option<Avatar>) -> Self {
        Self {
            display_name,
            avatar,
        }
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// `None` means the user chose initials instead of an image.
    pub fn avatar(&self) -> Option<Avatar> {
        self.avatar
    }
}
