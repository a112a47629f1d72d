//! Traits for the external-directory abstraction

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::*;

/// Pre-authenticated handle to one stateful registry session.
///
/// Login is performed by an authentication collaborator; the core only
/// consumes an already-established session. The handle is passed by
/// reference to every [`DirectoryClient`] operation instead of being held
/// as mutable client state, because the underlying session has a single
/// "current view" that every navigation mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySession {
    /// Identifier for this session, for logging and teardown accounting
    pub id: Uuid,
    /// Organizational unit selected for this session, if any
    pub unit: Option<String>,
}

impl DirectorySession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            unit: None,
        }
    }

    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit: Some(unit.into()),
        }
    }
}

impl Default for DirectorySession {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the external asset registry.
///
/// Implementations may drive a scripted browser or a direct API; either
/// way the contract is the same: given a key, return typed data. All
/// operations run against one stateful session and are **not idempotent**
/// from the registry's point of view — callers must never re-issue
/// `apply_sector_update` or `create_asset` for the same logical change
/// without an explicit re-drive.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Look up an asset by serial number within an equipment category.
    ///
    /// `serial` and `location` in the result are extracted by field label
    /// (the registry's tables shift position between kinds), so the result
    /// serial must be compared against the query before it is trusted.
    /// Fails with [`ReconError::Transient`] on timeout.
    async fn lookup(
        &self,
        session: &DirectorySession,
        kind: EquipmentKind,
        serial: &str,
    ) -> ReconResult<DirectoryLookupResult>;

    /// Select the organizational unit the following mutations apply to.
    /// Fails with [`ReconError::UnitNotFound`] when the unit tree has no
    /// matching entry.
    async fn select_unit(&self, session: &DirectorySession, unit_name: &str) -> ReconResult<()>;

    /// Move an existing asset to the sector identified by `sector_id`.
    /// Real external mutation; never retried.
    async fn apply_sector_update(
        &self,
        session: &DirectorySession,
        kind: EquipmentKind,
        serial: &str,
        sector_name: &str,
        sector_id: &str,
    ) -> ReconResult<()>;

    /// Register a new asset under the given unit. Real external mutation;
    /// never retried.
    async fn create_asset(
        &self,
        session: &DirectorySession,
        kind: EquipmentKind,
        record: &ResolvedAssetRecord,
        unit: &str,
    ) -> ReconResult<()>;

    /// Tear the session down. The engine guarantees exactly one close per
    /// run, on both the success and failure paths.
    async fn close(&self, session: &DirectorySession) -> ReconResult<()>;
}
