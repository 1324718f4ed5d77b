use crate::domain::entities::{Identity, Peer};
use crate::domain::value_objects::display_name::initials;
use crate::domain::value_objects::Avatar;

/// Name shown on the local tile before a display name is confirmed
pub const SELF_FALLBACK_NAME: &str = "You";

/// What a presence tile draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileFace {
    /// Camera is streaming
    Live,
    Avatar(Avatar),
    Initials(String),
}

/// One participant slot in the room grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceTile {
    pub name: String,
    pub face: TileFace,
    pub is_self: bool,
}

impl PresenceTile {
    /// Tile for the local user. `identity` is the persisted identity, if any.
    pub fn for_self(identity: Option<&Identity>, avatar: Option<Avatar>, camera_live: bool) -> Self {
        let name = identity
            .map(|i| i.display_name().as_str().to_string())
            .unwrap_or_else(|| SELF_FALLBACK_NAME.to_string());
        let face = if camera_live {
            TileFace::Live
        } else {
            face_for(identity.map(|i| i.display_name().as_str()), avatar)
        };
        Self {
            name,
            face,
            is_self: true,
        }
    }

    pub fn for_peer(peer: &Peer) -> Self {
        Self {
            name: peer.display_name.clone(),
            face: face_for(Some(peer.display_name.as_str()), peer.avatar),
            is_self: false,
        }
    }
}

fn face_for(name: Option<&str>, avatar: Option<Avatar>) -> TileFace {
    match avatar {
        Some(avatar) => TileFace::Avatar(avatar),
        None => {
            let text = name.map(initials).unwrap_or_default();
            if text.is_empty() {
                TileFace::Initials("?".to_string())
            } else {
                TileFace::Initials(text)
            }
        }
    }
}

/// Builds the room grid: the local tile first, then every peer in order.
pub fn presence_tiles(self_tile: PresenceTile, peers: &[Peer]) -> Vec<PresenceTile> {
    std::iter::once(self_tile)
        .chain(peers.iter().map(PresenceTile::for_peer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;

    fn ada() -> Identity {
        Identity::new(DisplayName::new("Ada Lovelace").unwrap(), None)
    }

    #[test]
    fn test_self_tile_without_identity() {
        let tile = PresenceTile::for_self(None, None, false);
        assert_eq!(tile.name, "You");
        assert_eq!(tile.face, TileFace::Initials("?".to_string()));
    }

    #[test]
    fn test_live_camera_wins_over_avatar() {
        let identity = ada();
        let tile = PresenceTile::for_self(Some(&identity), Some(Avatar::CoolGuy), true);
        assert_eq!(tile.face, TileFace::Live);
        assert_eq!(tile.name, "Ada Lovelace");
    }

    #[test]
    fn test_initials_fallback() {
        let identity = ada();
        let tile = PresenceTile::for_self(Some(&identity), None, false);
        assert_eq!(tile.face, TileFace::Initials("AL".to_string()));
    }

    #[test]
    fn test_grid_lists_self_first() {
        let peers = vec![
            Peer::new("p1", "Ava Chen", Some(Avatar::AnimeGirl)),
            Peer::new("p5", "Liam P.", None),
        ];
        let tiles = presence_tiles(PresenceTile::for_self(None, Some(Avatar::Scholar), false), &peers);
        assert_eq!(tiles.len(), 3);
        assert!(tiles[0].is_self);
        assert_eq!(tiles[1].face, TileFace::Avatar(Avatar::AnimeGirl));
        assert_eq!(tiles[2].face, TileFace::Initials("LP".to_string()));
    }
}
