//! Utility modules

pub mod memory_directory;
pub mod validation;

pub use memory_directory::MemoryDirectory;
pub use validation::{validate_records, validate_sector_directory, validate_unit};
