pub mod attributes;
pub mod options_file;

pub use attributes::{WidgetSetup, attribute_name};
pub use options_file::{ConfigError, FilterKind, ListSpec, SortKind, SourceCommand, WidgetOptions};
