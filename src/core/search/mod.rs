pub mod matcher;
pub mod ranker;

pub use matcher::{Matcher, find_ranges};
pub use ranker::Ranker;
