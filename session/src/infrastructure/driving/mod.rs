pub mod runtime;

pub use runtime::{Command, SessionHandle, SessionRuntime};
