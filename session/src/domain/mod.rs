// Domain layer - identity, presence and timer rules
// No dependencies on other layers

pub mod entities;
pub mod aggregates;
pub mod value_objects;

pub use entities::*;
pub use aggregates::*;
pub use value_objects::*;
