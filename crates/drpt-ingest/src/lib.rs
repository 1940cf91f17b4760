//! Input loading for data release preparation.
//!
//! - **dataset**: CSV and Parquet datasets into a Polars `DataFrame`
//! - **recipe**: JSON recipe files, validated on load
//! - **limits**: external scaling limits in CSV or JSON

pub mod dataset;
pub mod error;
pub mod limits;
pub mod recipe;

pub use dataset::{DatasetFormat, read_dataset};
pub use error::{IngestError, Result};
pub use limits::read_limits;
pub use recipe::load_recipe;
