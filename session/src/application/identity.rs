// Persisted identity: two keys in the local store, read once at startup and
// written only when the user confirms an edit.

use tracing::warn;

use crate::application::errors::StorageError;
use crate::application::ports::LocalStore;
use crate::domain::{Avatar, DisplayName, Identity};

pub const NAME_KEY: &str = "focus:name";
pub const AVATAR_KEY: &str = "focus:profileImage";

/// What the local store holds at startup. Either key may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredIdentity {
    pub display_name: Option<DisplayName>,
    /// `Some(None)` is an explicit "initials" choice
    pub avatar: Option<Option<Avatar>>,
}

pub fn load(store: &dyn LocalStore) -> Result<StoredIdentity, StorageError> {
    let display_name = store
        .get(NAME_KEY)?
        .and_then(|raw| DisplayName::new(&raw).ok());

    let avatar = match store.get(AVATAR_KEY)? {
        Some(raw) => {
            let decoded = Avatar::decode_selection(&raw);
            if decoded.is_none() {
                warn!(stored = %raw, "Ignoring unknown avatar reference");
            }
            decoded
        }
        None => None,
    };

    Ok(StoredIdentity {
        display_name,
        avatar,
    })
}

/// Writes both keys. If the avatar cannot be written the previous name is put
/// back, so a failed save leaves the stored identity as it was.
pub fn save(store: &dyn LocalStore, identity: &Identity) -> Result<(), StorageError> {
    let previous_name = store.get(NAME_KEY)?;
    store.set(NAME_KEY, identity.display_name().as_str())?;

    if let Err(e) = store.set(AVATAR_KEY, Avatar::encode_selection(identity.avatar())) {
        // a blank name reads back as "no name"
        let restore = previous_name.as_deref().unwrap_or("");
        if let Err(restore_err) = store.set(NAME_KEY, restore) {
            warn!(error = %restore_err, "Failed to restore previous display name");
        }
        return Err(e);
    }
    Ok(())
}
