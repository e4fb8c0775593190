pub mod command;
pub mod key_bindings;

pub use command::Command;
pub use key_bindings::{KeyBinding, KeyBindings};
