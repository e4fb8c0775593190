pub mod adapter;
pub mod core;
pub mod runtime;
pub mod source;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::candidate::{Candidate, SuggestionSet};
pub use crate::core::config::Config;
pub use crate::core::notify::{Origin, PreSelect, WidgetEvent};
pub use crate::core::registry::Registry;
pub use crate::core::value::Value;
pub use widgets::autocomplete::Autocomplete;
