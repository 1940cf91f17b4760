//! Recipe execution for data release preparation.
//!
//! - **resolver**: fullmatch pattern resolution against column names
//! - **limits**: the limits store used by the scale step
//! - **executors**: one function per column action
//! - **pipeline**: the release engine running actions in order

pub mod error;
pub mod executors;
pub mod limits;
pub mod pipeline;
pub mod resolver;

pub use error::{Result, TransformError};
pub use limits::LimitsStore;
pub use pipeline::{ReleaseEngine, ReleaseOutcome};
pub use resolver::{PatternMatch, resolve};
