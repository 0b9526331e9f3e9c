//! Staleness classification and run orchestration.

mod classifier;
mod coordinator;

pub use classifier::{elapsed_days, is_archive_eligible, parse_timestamp};
pub use coordinator::{ArchiveCoordinator, ArchiveOptions, RunStep, RunSummary, StepError};
