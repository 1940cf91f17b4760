//! Output writers for data release preparation.
//!
//! - **report**: the release report as CSV
//! - **dataset**: the transformed dataset as CSV or Parquet
//! - **limits**: the scaling limits used, reusable as a limits file

mod common;
mod dataset;
pub mod error;
mod limits;
mod report;

pub use common::{default_output_path, ensure_parent_dir, report_path_for};
pub use dataset::write_dataset;
pub use error::{ReportError, Result};
pub use limits::write_limits;
pub use report::{report_to_csv_string, write_report, write_report_to};
