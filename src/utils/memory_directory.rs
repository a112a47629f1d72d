//! In-memory directory client for testing and development

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::traits::{DirectoryClient, DirectorySession};
use crate::types::*;

#[derive(Debug, Default)]
struct Inner {
    assets: HashMap<(EquipmentKind, String), String>,
    units: HashSet<String>,
    lookup_calls: u64,
    fail_lookup_at: Option<u64>,
    call_count: usize,
    close_count: usize,
    update_journal: Vec<(String, String)>,
    created_serials: Vec<String>,
}

/// In-memory [`DirectoryClient`] with programmable transient failures and
/// call journals, for asserting run semantics without a real registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset the lookups will find
    pub fn insert_asset(&self, kind: EquipmentKind, serial: &str, location: &str) {
        self.inner
            .write()
            .unwrap()
            .assets
            .insert((kind, serial.to_string()), location.to_string());
    }

    /// Add a unit to the registry's unit tree
    pub fn add_unit(&self, name: &str) {
        self.inner.write().unwrap().units.insert(name.to_string());
    }

    /// Make the `n`th lookup call (1-based) fail with a transient error
    pub fn fail_lookup_at(&self, n: u64) {
        self.inner.write().unwrap().fail_lookup_at = Some(n);
    }

    /// Total operations issued, teardown excluded
    pub fn call_count(&self) -> usize {
        self.inner.read().unwrap().call_count
    }

    pub fn close_count(&self) -> usize {
        self.inner.read().unwrap().close_count
    }

    /// `(serial, sector_id)` pairs in the order updates were applied
    pub fn update_journal(&self) -> Vec<(String, String)> {
        self.inner.read().unwrap().update_journal.clone()
    }

    pub fn created_serials(&self) -> Vec<String> {
        self.inner.read().unwrap().created_serials.clone()
    }
}

#[async_trait]
impl DirectoryClient for MemoryDirectory {
    async fn lookup(
        &self,
        _session: &DirectorySession,
        kind: EquipmentKind,
        serial: &str,
    ) -> ReconResult<DirectoryLookupResult> {
        let mut inner = self.inner.write().unwrap();
        inner.call_count += 1;
        inner.lookup_calls += 1;
        if inner.fail_lookup_at == Some(inner.lookup_calls) {
            return Err(ReconError::Transient(
                "timed out waiting for the registry page".to_string(),
            ));
        }
        Ok(match inner.assets.get(&(kind, serial.to_string())) {
            Some(location) => DirectoryLookupResult::Found {
                serial: serial.to_string(),
                location: location.clone(),
            },
            None => DirectoryLookupResult::NotFound,
        })
    }

    async fn select_unit(&self, _session: &DirectorySession, unit_name: &str) -> ReconResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.call_count += 1;
        if inner.units.contains(unit_name) {
            Ok(())
        } else {
            Err(ReconError::UnitNotFound(format!(
                "no unit named '{unit_name}' in the registry tree"
            )))
        }
    }

    async fn apply_sector_update(
        &self,
        _session: &DirectorySession,
        _kind: EquipmentKind,
        serial: &str,
        _sector_name: &str,
        sector_id: &str,
    ) -> ReconResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.call_count += 1;
        inner
            .update_journal
            .push((serial.to_string(), sector_id.to_string()));
        Ok(())
    }

    async fn create_asset(
        &self,
        _session: &DirectorySession,
        kind: EquipmentKind,
        record: &ResolvedAssetRecord,
        _unit: &str,
    ) -> ReconResult<()> {
        let mut inner = self.inner.write().unwrap();
        inner.call_count += 1;
        inner.created_serials.push(record.serial.clone());
        inner.assets.insert(
            (kind, record.serial.clone()),
            record.sector.clone(),
        );
        Ok(())
    }

    async fn close(&self, _session: &DirectorySession) -> ReconResult<()> {
        self.inner.write().unwrap().close_count += 1;
        Ok(())
    }
}
