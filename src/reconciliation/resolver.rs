//! Sector-id resolution against the local sector directory

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::ClassifiedRecords;
use crate::normalize::normalize;
use crate::types::*;

/// Serial value marking a placeholder row that represents no real asset
const PLACEHOLDER_SERIAL: &str = "n/a";

/// Separator carried by sector-update records: the text to its right is
/// the authoritative sector name
const SECTOR_MARKER: &str = "=>";

/// Resolved records grouped by the same four equipment buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBuckets {
    pub computer: Vec<ResolvedAssetRecord>,
    pub monitor: Vec<ResolvedAssetRecord>,
    pub printer: Vec<ResolvedAssetRecord>,
    pub others: Vec<ResolvedAssetRecord>,
}

impl ResolvedBuckets {
    /// Buckets in fixed kind order
    pub fn iter_buckets(&self) -> impl Iterator<Item = (EquipmentKind, &[ResolvedAssetRecord])> {
        [
            (EquipmentKind::Computer, self.computer.as_slice()),
            (EquipmentKind::Monitor, self.monitor.as_slice()),
            (EquipmentKind::Printer, self.printer.as_slice()),
            (EquipmentKind::Other, self.others.as_slice()),
        ]
        .into_iter()
    }

    fn bucket_mut(&mut self, kind: EquipmentKind) -> &mut Vec<ResolvedAssetRecord> {
        match kind {
            EquipmentKind::Computer => &mut self.computer,
            EquipmentKind::Monitor => &mut self.monitor,
            EquipmentKind::Printer => &mut self.printer,
            EquipmentKind::Other => &mut self.others,
        }
    }

    pub fn total(&self) -> usize {
        self.computer.len() + self.monitor.len() + self.printer.len() + self.others.len()
    }
}

/// Resolve every record's sector to its canonical directory id.
///
/// Applied to the `missing` and `sector_updates` lists of a pending-action
/// document (matched records need no write-back). Placeholder rows whose
/// serial is the `"N/A"` sentinel are dropped. A sector with no directory
/// match is handled per `policy`: flagged with `id_sector = None`, or a
/// run-fatal [`ReconError::UnresolvedSector`].
pub fn resolve(
    classified: &ClassifiedRecords,
    directory: &[SectorDirectoryEntry],
    policy: UnresolvedSectorPolicy,
) -> ReconResult<ResolvedBuckets> {
    let mut resolved = ResolvedBuckets::default();
    for (kind, records) in classified.iter_buckets() {
        for record in records {
            match resolve_record(record, directory, policy)? {
                Some(entry) => resolved.bucket_mut(kind).push(entry),
                None => {
                    warn!(serial = %record.serial, "dropping placeholder row");
                }
            }
        }
    }
    debug!(resolved = resolved.total(), "sector resolution complete");
    Ok(resolved)
}

fn resolve_record(
    record: &AssetRecord,
    directory: &[SectorDirectoryEntry],
    policy: UnresolvedSectorPolicy,
) -> ReconResult<Option<ResolvedAssetRecord>> {
    // Marker path: the registry-side name right of "=>" is authoritative.
    if let Some((_, target)) = record.sector.split_once(SECTOR_MARKER) {
        let target = target.trim();
        if !target.is_empty() {
            let needle = normalize(target);
            let id = directory
                .iter()
                .find(|entry| normalize(&entry.sector).contains(&needle))
                .map(|entry| entry.id.clone());
            let id = apply_policy(id, target, policy)?;
            return Ok(Some(ResolvedAssetRecord {
                sector: target.to_string(),
                id_sector: id,
                equipment: record.equipment.clone(),
                serial: record.serial.clone(),
            }));
        }
    }

    // Placeholder rows never reach write-back.
    if record.serial.eq_ignore_ascii_case(PLACEHOLDER_SERIAL) {
        return Ok(None);
    }

    // Exact-match path, taking the directory's canonical spelling.
    let needle = normalize(&record.sector);
    let entry = directory
        .iter()
        .find(|entry| normalize(&entry.sector) == needle);
    match entry {
        Some(entry) => Ok(Some(ResolvedAssetRecord {
            sector: entry.sector.clone(),
            id_sector: apply_policy(Some(entry.id.clone()), &record.sector, policy)?,
            equipment: record.equipment.clone(),
            serial: record.serial.clone(),
        })),
        None => Ok(Some(ResolvedAssetRecord {
            sector: record.sector.clone(),
            id_sector: apply_policy(None, &record.sector, policy)?,
            equipment: record.equipment.clone(),
            serial: record.serial.clone(),
        })),
    }
}

fn apply_policy(
    id: Option<String>,
    sector: &str,
    policy: UnresolvedSectorPolicy,
) -> ReconResult<Option<String>> {
    if id.is_none() {
        match policy {
            UnresolvedSectorPolicy::Abort => {
                return Err(ReconError::UnresolvedSector(format!(
                    "no directory entry matches sector '{sector}'"
                )));
            }
            UnresolvedSectorPolicy::Flag => {
                warn!(sector, "no directory entry matches sector");
            }
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, EquipmentVocabulary};

    fn directory() -> Vec<SectorDirectoryEntry> {
        vec![
            SectorDirectoryEntry {
                id: "12".to_string(),
                sector: "financeiro".to_string(),
            },
            SectorDirectoryEntry {
                id: "7".to_string(),
                sector: "Depósito 03".to_string(),
            },
        ]
    }

    fn resolve_one(record: AssetRecord) -> ReconResult<ResolvedBuckets> {
        let classified = classify(vec![record], &EquipmentVocabulary::default());
        resolve(&classified, &directory(), UnresolvedSectorPolicy::Flag)
    }

    #[test]
    fn marker_record_resolves_by_substring() {
        let resolved = resolve_one(AssetRecord::new("TI => Financeiro", "CPU", "BR123")).unwrap();
        let entry = &resolved.computer[0];
        assert_eq!(entry.sector, "Financeiro");
        assert_eq!(entry.id_sector.as_deref(), Some("12"));
        assert_eq!(entry.serial, "BR123");
    }

    #[test]
    fn plain_record_resolves_by_exact_match() {
        let resolved = resolve_one(AssetRecord::new("deposito 3", "Monitor", "BR200")).unwrap();
        let entry = &resolved.monitor[0];
        // Canonical spelling comes from the directory
        assert_eq!(entry.sector, "Depósito 03");
        assert_eq!(entry.id_sector.as_deref(), Some("7"));
    }

    #[test]
    fn placeholder_serial_is_dropped() {
        let resolved = resolve_one(AssetRecord::new("TI", "CPU", "N/A")).unwrap();
        assert_eq!(resolved.total(), 0);
    }

    #[test]
    fn marker_takes_precedence_over_placeholder_serial() {
        let resolved = resolve_one(AssetRecord::new("TI => Financeiro", "CPU", "n/a")).unwrap();
        assert_eq!(resolved.total(), 1);
    }

    #[test]
    fn unresolved_sector_flagged_as_none() {
        let resolved = resolve_one(AssetRecord::new("Sala Inexistente", "CPU", "BR300")).unwrap();
        let entry = &resolved.computer[0];
        assert_eq!(entry.id_sector, None);
        assert_eq!(entry.sector, "Sala Inexistente");
    }

    #[test]
    fn unresolved_sector_aborts_under_abort_policy() {
        let classified = classify(
            vec![AssetRecord::new("Sala Inexistente", "CPU", "BR300")],
            &EquipmentVocabulary::default(),
        );
        let err = resolve(&classified, &directory(), UnresolvedSectorPolicy::Abort).unwrap_err();
        assert!(matches!(err, ReconError::UnresolvedSector(_)));
    }

    #[test]
    fn buckets_are_preserved() {
        let classified = classify(
            vec![
                AssetRecord::new("financeiro", "CPU", "BR001"),
                AssetRecord::new("financeiro", "Impressora", "BR002"),
            ],
            &EquipmentVocabulary::default(),
        );
        let resolved = resolve(&classified, &directory(), UnresolvedSectorPolicy::Flag).unwrap();
        assert_eq!(resolved.computer.len(), 1);
        assert_eq!(resolved.printer.len(), 1);
    }
}
