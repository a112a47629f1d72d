//! # Inventory Core
//!
//! Core inventory reconciliation: compare a locally maintained inventory
//! of physical assets against an external asset registry, classify each
//! record, and resolve free-text sector names into the registry's
//! canonical sector identifiers for a later write-back step.
//!
//! ## Features
//!
//! - **Text normalization**: accent- and padding-insensitive comparison
//!   of sector and equipment labels across the two systems
//! - **Equipment classification**: stable partition of records into
//!   registry buckets using an injectable vocabulary
//! - **Reconciliation engine**: per-record registry lookup with a
//!   three-way outcome (matched, sector mismatch, missing) and fail-fast
//!   session semantics
//! - **Sector resolution**: mapping of mismatch markers and plain sector
//!   names onto canonical directory ids
//! - **Reporting**: fixed-width manual-review report plus a JSON
//!   pending-action document consumed by the write-back batch
//! - **Registry abstraction**: the external directory sits behind an
//!   async trait; browser automation or a direct API are adapters
//!
//! ## Quick Start
//!
//! ```rust
//! use inventory_core::{classify, EquipmentVocabulary, AssetRecord};
//!
//! let records = vec![AssetRecord::new("TI", "CPU", "BR123")];
//! let classified = classify(records, &EquipmentVocabulary::default());
//! assert_eq!(classified.computer.len(), 1);
//! ```

pub mod classify;
pub mod directory;
pub mod ingest;
pub mod normalize;
pub mod reconciliation;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;
pub mod writeback;

// Re-export commonly used types
pub use classify::{classify, ClassifiedRecords, EquipmentVocabulary};
pub use directory::{RegistryEndpoints, SearchTarget};
pub use ingest::{records_from_rows, RawRow, DEFAULT_HEADER_ROWS};
pub use normalize::normalize;
pub use reconciliation::{resolve, ReconciliationEngine, ReconciliationOutcomes, ResolvedBuckets};
pub use report::{persist, render, RenderedReport};
pub use traits::{DirectoryClient, DirectorySession};
pub use types::*;
pub use writeback::{load_document, WritebackBatch};
