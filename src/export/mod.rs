//! Export functionality for training progress
//!
//! Currently supports CSV export of the per-epoch evaluation wins.

mod progress_csv;

pub use progress_csv::{PROGRESS_FILE_PREFIX, ProgressSample, ProgressSeries, timestamped_file_name};
