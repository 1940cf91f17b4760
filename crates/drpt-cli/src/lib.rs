//! Library components of the drpt command-line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
