pub mod types;
pub mod widest;
pub mod resolver;
pub mod report;

pub use report::{cleanup_week, CleanupReport};
