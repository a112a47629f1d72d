//! Reconciliation engine driving per-record registry lookups

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::classify::ClassifiedRecords;
use crate::normalize::normalize;
use crate::traits::{DirectoryClient, DirectorySession};
use crate::types::*;

/// Per-bucket reconciliation outcomes, one outcome per input record,
/// in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutcomes {
    pub computer: Vec<ReconciliationOutcome>,
    pub monitor: Vec<ReconciliationOutcome>,
    pub printer: Vec<ReconciliationOutcome>,
    pub others: Vec<ReconciliationOutcome>,
}

impl ReconciliationOutcomes {
    /// All outcomes in bucket order
    pub fn iter(&self) -> impl Iterator<Item = &ReconciliationOutcome> {
        self.computer
            .iter()
            .chain(&self.monitor)
            .chain(&self.printer)
            .chain(&self.others)
    }

    pub fn total(&self) -> usize {
        self.computer.len() + self.monitor.len() + self.printer.len() + self.others.len()
    }

    fn bucket_mut(&mut self, kind: EquipmentKind) -> &mut Vec<ReconciliationOutcome> {
        match kind {
            EquipmentKind::Computer => &mut self.computer,
            EquipmentKind::Monitor => &mut self.monitor,
            EquipmentKind::Printer => &mut self.printer,
            EquipmentKind::Other => &mut self.others,
        }
    }
}

/// Drives registry lookups for every classified record and assigns each
/// one a terminal outcome.
///
/// Holds no per-run state: outcomes accumulate in a local value returned
/// to the caller, so a failed run leaves nothing behind and a re-run
/// reprocesses every record.
pub struct ReconciliationEngine<C: DirectoryClient> {
    client: C,
    config: ReconcileConfig,
}

impl<C: DirectoryClient> ReconciliationEngine<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: ReconcileConfig::default(),
        }
    }

    pub fn with_config(client: C, config: ReconcileConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Reconcile every bucket sequentially against the registry.
    ///
    /// Any transient failure (after the configured lookup retries are
    /// exhausted) aborts the whole run; no partial outcome list escapes.
    /// The session is left open — use [`reconcile_and_close`] for the
    /// guaranteed-teardown wrapper.
    ///
    /// [`reconcile_and_close`]: ReconciliationEngine::reconcile_and_close
    pub async fn reconcile(
        &self,
        session: &DirectorySession,
        classified: &ClassifiedRecords,
    ) -> ReconResult<ReconciliationOutcomes> {
        info!(
            session = %session.id,
            records = classified.total(),
            "starting reconciliation run"
        );

        // Malformed input fails the run before the first external call
        for (_, records) in classified.iter_buckets() {
            crate::utils::validation::validate_records(records)?;
        }

        let mut outcomes = ReconciliationOutcomes::default();
        for (kind, records) in classified.iter_buckets() {
            for record in records {
                let lookup = self.lookup_with_retry(session, kind, &record.serial).await?;
                let outcome = classify_lookup(record, lookup);
                debug!(kind = ?kind, serial = %record.serial, outcome = ?outcome_tag(&outcome), "record reconciled");
                outcomes.bucket_mut(kind).push(outcome);
            }
        }

        info!(session = %session.id, outcomes = outcomes.total(), "reconciliation run complete");
        Ok(outcomes)
    }

    /// [`reconcile`] wrapped with the single guaranteed session teardown:
    /// `close` is invoked exactly once, on both the success and failure
    /// paths, before any error propagates.
    ///
    /// [`reconcile`]: ReconciliationEngine::reconcile
    pub async fn reconcile_and_close(
        &self,
        session: &DirectorySession,
        classified: &ClassifiedRecords,
    ) -> ReconResult<ReconciliationOutcomes> {
        let result = self.reconcile(session, classified).await;
        if let Err(close_err) = self.client.close(session).await {
            // The run result wins; a teardown failure must not mask it.
            warn!(session = %session.id, error = %close_err, "session close failed");
            if result.is_ok() {
                return Err(close_err);
            }
        }
        if let Err(err) = &result {
            error!(session = %session.id, error = %err, "reconciliation run aborted");
        }
        result
    }

    /// Lookup with bounded retry on transient failure. Retries apply to
    /// this read-only operation only; mutations are never re-issued.
    async fn lookup_with_retry(
        &self,
        session: &DirectorySession,
        kind: EquipmentKind,
        serial: &str,
    ) -> ReconResult<DirectoryLookupResult> {
        let mut attempts_left = self.config.lookup_retries;
        loop {
            match self.client.lookup(session, kind, serial).await {
                Err(ReconError::Transient(msg)) if attempts_left > 0 => {
                    warn!(serial, attempts_left, error = %msg, "transient lookup failure, retrying");
                    attempts_left -= 1;
                }
                other => return other,
            }
        }
    }
}

/// Assign the terminal outcome for one record given its lookup result.
///
/// The extracted serial is compared against the record's before anything
/// else: label-keyed extraction can surface an unrelated row, and a serial
/// that does not answer for itself counts as absent.
fn classify_lookup(record: &AssetRecord, lookup: DirectoryLookupResult) -> ReconciliationOutcome {
    match lookup {
        DirectoryLookupResult::NotFound => ReconciliationOutcome::Missing(record.clone()),
        DirectoryLookupResult::Found { serial, .. } if serial != record.serial => {
            ReconciliationOutcome::Missing(record.clone())
        }
        DirectoryLookupResult::Found { location, .. } => {
            if normalize(&location) == normalize(&record.sector) {
                ReconciliationOutcome::Matched(record.clone())
            } else {
                ReconciliationOutcome::SectorMismatch(SectorMismatch {
                    record: record.clone(),
                    registry_location: location,
                })
            }
        }
    }
}

fn outcome_tag(outcome: &ReconciliationOutcome) -> &'static str {
    match outcome {
        ReconciliationOutcome::Matched(_) => "matched",
        ReconciliationOutcome::SectorMismatch(_) => "sector_mismatch",
        ReconciliationOutcome::Missing(_) => "missing",
    }
}
