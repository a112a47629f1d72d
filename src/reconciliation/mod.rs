//! Reconciliation of local inventory against the external registry
//!
//! The engine classifies every record as matched, sector-mismatched, or
//! missing; the resolver maps sector names onto canonical registry ids
//! for the records headed to write-back.

pub mod engine;
pub mod resolver;

pub use engine::{ReconciliationEngine, ReconciliationOutcomes};
pub use resolver::{resolve, ResolvedBuckets};
