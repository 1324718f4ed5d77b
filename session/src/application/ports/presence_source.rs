// Driven port - who else is in the room (output port)

use crate::domain::Peer;

pub trait PresenceSource: Send + Sync {
    fn peers(&self) -> Vec<Peer>;
}
