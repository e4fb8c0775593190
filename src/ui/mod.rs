pub mod frame;
pub mod highlight;
pub mod item;
pub mod span;
pub mod style;
pub mod theme;
