//! Core types and data structures for the reconciliation system

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Equipment categories recognized by the external registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// Desktop or tower computers
    Computer,
    /// Display monitors
    Monitor,
    /// Printers and multifunction devices
    Printer,
    /// Everything else (peripherals, network gear, etc.)
    Other,
}

impl EquipmentKind {
    /// Fixed iteration order used everywhere buckets are walked
    pub const ALL: [EquipmentKind; 4] = [
        EquipmentKind::Computer,
        EquipmentKind::Monitor,
        EquipmentKind::Printer,
        EquipmentKind::Other,
    ];
}

/// One physical-equipment entry from the source inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Free-text sector/location label as authored in the spreadsheet
    pub sector: String,
    /// Raw equipment text from the spreadsheet (kept for display)
    pub equipment: String,
    /// Serial number used as the registry lookup key
    pub serial: String,
}

impl AssetRecord {
    pub fn new(
        sector: impl Into<String>,
        equipment: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            equipment: equipment.into(),
            serial: serial.into(),
        }
    }

    /// A record with all three fields blank carries no information and is
    /// filtered out before processing.
    pub fn is_blank(&self) -> bool {
        self.sector.trim().is_empty()
            && self.equipment.trim().is_empty()
            && self.serial.trim().is_empty()
    }
}

/// Result of a registry lookup for one serial number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryLookupResult {
    /// The registry holds an asset page for this search
    Found {
        /// Serial number extracted from the registry page
        serial: String,
        /// Location/sector label on record; may be empty
        location: String,
    },
    /// No asset matched the serial
    NotFound,
}

/// An asset whose serial exists in the registry under a different location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorMismatch {
    /// The original inventory record, unchanged
    pub record: AssetRecord,
    /// Location currently on record in the registry; may be empty
    pub registry_location: String,
}

impl SectorMismatch {
    /// Textual marker consumed by the sector resolver and the write-back
    /// batch. The text right of `=>` is the authoritative sector name.
    pub fn display_sector(&self) -> String {
        if !self.registry_location.is_empty() {
            format!("{} => {}", self.record.sector, self.registry_location)
        } else if !self.record.sector.is_empty() {
            format!("n/a => {}", self.record.sector)
        } else {
            self.record.sector.clone()
        }
    }

    /// The record as persisted in the pending-action document: same
    /// equipment and serial, sector replaced by the `=>` marker.
    pub fn to_pending_record(&self) -> AssetRecord {
        AssetRecord {
            sector: self.display_sector(),
            equipment: self.record.equipment.clone(),
            serial: self.record.serial.clone(),
        }
    }
}

/// Classification assigned to one asset record after comparison with the
/// external directory. Every input record maps to exactly one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationOutcome {
    /// Serial and sector both match the registry
    Matched(AssetRecord),
    /// Serial matches but the location differs
    SectorMismatch(SectorMismatch),
    /// Serial absent from the registry
    Missing(AssetRecord),
}

/// One row of the local sector directory used for canonical-id lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorDirectoryEntry {
    /// Canonical sector identifier in the external registry
    pub id: String,
    /// Sector name as the registry spells it
    pub sector: String,
}

/// Asset record with its sector resolved to a canonical registry id,
/// ready for write-back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssetRecord {
    /// Authoritative sector name after resolution
    pub sector: String,
    /// Canonical id, or `None` when no directory entry matched
    pub id_sector: Option<String>,
    pub equipment: String,
    pub serial: String,
}

/// Persisted result of a reconciliation run, consumed later by the
/// write-back batch. All three lists are always present, in
/// reconciliation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingActionDocument {
    /// Records absent from the registry, pending creation
    pub missing: Vec<AssetRecord>,
    /// Records pending a sector update; the `sector` field carries the
    /// `"<local> => <registry>"` marker
    pub sector_updates: Vec<AssetRecord>,
    /// Records already registered with a matching location
    pub found: Vec<AssetRecord>,
}

/// Unified timeout policy for external directory adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutPolicy {
    /// Budget for a full page navigation
    pub navigation: Duration,
    /// Budget for an element/field to become available
    pub element_wait: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(35),
            element_wait: Duration::from_secs(10),
        }
    }
}

/// What to do when a sector name has no directory match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedSectorPolicy {
    /// Keep the record with `id_sector = None` and log a warning
    #[default]
    Flag,
    /// Fail the resolution pass with [`ReconError::UnresolvedSector`]
    Abort,
}

/// Run configuration for the reconciliation engine and resolver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub timeouts: TimeoutPolicy,
    /// Extra attempts for read-only lookups after a transient failure.
    /// Mutations are never retried.
    pub lookup_retries: u32,
    pub unresolved_sectors: UnresolvedSectorPolicy,
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Transient external error: {0}")]
    Transient(String),
    #[error("Unresolved sector: {0}")]
    UnresolvedSector(String),
    #[error("Unit not found: {0}")]
    UnitNotFound(String),
    #[error("Directory error: {0}")]
    Directory(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
