mod app;
pub mod labels;

pub use app::FocusApp;
