//! Write-back batch: applies a pending-action document to the registry
//!
//! Consumes the document persisted by a reconciliation run and drives the
//! two mutation paths, sector updates for assets the registry already
//! knows and creation for assets it does not. All mutations are real,
//! non-idempotent external changes: nothing here retries, and a failure
//! means the operator re-drives explicitly after checking the registry.

use std::path::Path;

use tracing::{info, warn};

use crate::reconciliation::resolver::ResolvedBuckets;
use crate::traits::{DirectoryClient, DirectorySession};
use crate::types::*;
use crate::utils::validation::validate_unit;

/// Sequential driver for registry mutations
pub struct WritebackBatch<C: DirectoryClient> {
    client: C,
}

impl<C: DirectoryClient> WritebackBatch<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Apply a sector update for every resolved record. Records whose
    /// sector never resolved to an id are skipped and logged, not sent.
    /// The session is closed exactly once before returning.
    pub async fn run_sector_updates(
        &self,
        session: &DirectorySession,
        resolved: &ResolvedBuckets,
    ) -> ReconResult<usize> {
        let result = self.apply_updates(session, resolved).await;
        self.teardown(session, result).await
    }

    /// Register every resolved record as a new asset under `unit`.
    ///
    /// The unit name is validated against `known_units` before any
    /// external call, then selected once for the whole batch. The session
    /// is closed exactly once before returning.
    pub async fn register_assets(
        &self,
        session: &DirectorySession,
        unit: &str,
        known_units: &[String],
        resolved: &ResolvedBuckets,
    ) -> ReconResult<usize> {
        validate_unit(unit, known_units)?;
        let result = self.create_assets(session, unit, resolved).await;
        self.teardown(session, result).await
    }

    async fn apply_updates(
        &self,
        session: &DirectorySession,
        resolved: &ResolvedBuckets,
    ) -> ReconResult<usize> {
        let mut applied = 0;
        for (kind, records) in resolved.iter_buckets() {
            for record in records {
                let Some(id) = &record.id_sector else {
                    warn!(serial = %record.serial, sector = %record.sector, "skipping update without sector id");
                    continue;
                };
                self.client
                    .apply_sector_update(session, kind, &record.serial, &record.sector, id)
                    .await?;
                applied += 1;
            }
        }
        info!(applied, "sector updates applied");
        Ok(applied)
    }

    async fn create_assets(
        &self,
        session: &DirectorySession,
        unit: &str,
        resolved: &ResolvedBuckets,
    ) -> ReconResult<usize> {
        self.client.select_unit(session, unit).await?;

        let mut created = 0;
        for (kind, records) in resolved.iter_buckets() {
            for record in records {
                self.client.create_asset(session, kind, record, unit).await?;
                created += 1;
            }
        }
        info!(created, unit, "assets registered");
        Ok(created)
    }

    /// Single teardown on both paths; a close failure never masks the
    /// batch result.
    async fn teardown(
        &self,
        session: &DirectorySession,
        result: ReconResult<usize>,
    ) -> ReconResult<usize> {
        if let Err(close_err) = self.client.close(session).await {
            warn!(session = %session.id, error = %close_err, "session close failed");
            if result.is_ok() {
                return Err(close_err);
            }
        }
        result
    }
}

/// Re-read a previously persisted pending-action document.
pub fn load_document(path: impl AsRef<Path>) -> ReconResult<PendingActionDocument> {
    let raw = std::fs::read_to_string(path.as_ref()).map_err(|_| {
        ReconError::Validation(
            "pending-action document not found; run a reconciliation first and check the registry and spreadsheet".to_string(),
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        ReconError::Validation(format!("pending-action document is corrupt: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_directory::MemoryDirectory;

    fn resolved_one(id: Option<&str>) -> ResolvedBuckets {
        ResolvedBuckets {
            computer: vec![ResolvedAssetRecord {
                sector: "Financeiro".to_string(),
                id_sector: id.map(str::to_string),
                equipment: "CPU".to_string(),
                serial: "BR123".to_string(),
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn updates_are_applied_once_each() {
        let batch = WritebackBatch::new(MemoryDirectory::new());
        let session = DirectorySession::new();
        let applied = batch
            .run_sector_updates(&session, &resolved_one(Some("12")))
            .await
            .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(batch.client().update_journal().len(), 1);
        assert_eq!(batch.client().close_count(), 1);
    }

    #[tokio::test]
    async fn unresolved_records_are_skipped_not_sent() {
        let batch = WritebackBatch::new(MemoryDirectory::new());
        let session = DirectorySession::new();
        let applied = batch
            .run_sector_updates(&session, &resolved_one(None))
            .await
            .unwrap();
        assert_eq!(applied, 0);
        assert!(batch.client().update_journal().is_empty());
    }

    #[tokio::test]
    async fn unknown_unit_fails_before_any_external_call() {
        let batch = WritebackBatch::new(MemoryDirectory::new());
        let session = DirectorySession::new();
        let err = batch
            .register_assets(
                &session,
                "Unidade Z",
                &["Unidade A".to_string()],
                &resolved_one(Some("12")),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReconError::Validation(_)));
        assert_eq!(batch.client().call_count(), 0);
        // Session was never opened against the registry, so no teardown
        assert_eq!(batch.client().close_count(), 0);
    }

    #[tokio::test]
    async fn register_selects_unit_then_creates() {
        let client = MemoryDirectory::new();
        client.add_unit("Unidade A");
        let batch = WritebackBatch::new(client);
        let session = DirectorySession::new();
        let created = batch
            .register_assets(
                &session,
                "Unidade A",
                &["Unidade A".to_string()],
                &resolved_one(Some("12")),
            )
            .await
            .unwrap();
        assert_eq!(created, 1);
        assert_eq!(batch.client().created_serials(), vec!["BR123"]);
        assert_eq!(batch.client().close_count(), 1);
    }

    #[tokio::test]
    async fn select_unit_failure_closes_session_once() {
        let client = MemoryDirectory::new();
        // Unit known locally but absent in the registry tree
        let batch = WritebackBatch::new(client);
        let session = DirectorySession::new();
        let err = batch
            .register_assets(
                &session,
                "Unidade A",
                &["Unidade A".to_string()],
                &resolved_one(Some("12")),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReconError::UnitNotFound(_)));
        assert_eq!(batch.client().close_count(), 1);
        assert!(batch.client().created_serials().is_empty());
    }

    #[test]
    fn load_document_missing_file_is_a_validation_error() {
        let err = load_document("/nonexistent/pending.json").unwrap_err();
        assert!(matches!(err, ReconError::Validation(_)));
    }
}
