pub mod display_name;
pub mod avatar;
pub mod volume;
pub mod track_reference;

pub use display_name::DisplayName;
pub use avatar::Avatar;
pub use volume::Volume;
pub use track_reference::TrackReference;
