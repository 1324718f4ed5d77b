use crate::application::ports::PresenceSource;
use crate::domain::{Avatar, Peer};

/// Fixed roster standing in for realtime presence
pub struct StaticPresence {
    peers: Vec<Peer>,
}

impl StaticPresence {
    pub fn new(peers: Vec<Peer>) -> Self {
        Self { peers }
    }

    /// The six mock students shown in the library room
    pub fn mock_room() -> Self {
        Self::new(vec![
            Peer::new("p1", "Ava Chen", Some(Avatar::AnimeGirl)),
            Peer::new("p2", "Diego S.", Some(Avatar::CoolGuy)),
            Peer::new("p3", "Maya R.", Some(Avatar::CoolGirl)),
            Peer::new("p4", "Samir K.", Some(Avatar::Scholar)),
            Peer::new("p5", "Liam P.", None),
            Peer::new("p6", "Noah F.", Some(Avatar::AnimeGirl)),
        ])
    }
}

impl PresenceSource for StaticPresence {
    fn peers(&self) -> Vec<Peer> {
        self.peers.clone()
    }
}
