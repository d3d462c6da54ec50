//! CLI command implementations

mod init;
mod segment;

pub use init::init_config;
pub use segment::{segment_file, OutputFormat, SegmentArgs};
