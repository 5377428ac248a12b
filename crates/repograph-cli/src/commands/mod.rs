//! Command implementations.

mod analyze;
mod languages;

pub use analyze::execute as analyze_execute;
pub use languages::execute as languages_execute;
