pub mod common;
pub mod fleet;
pub mod report;
