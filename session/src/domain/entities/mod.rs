pub mod identity;
pub mod peer;

pub use identity::Identity;
pub use peer::{Peer, PeerId};
