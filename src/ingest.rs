//! Spreadsheet-row boundary
//!
//! The ingestion collaborator hands over raw spreadsheet rows; this module
//! turns them into clean [`AssetRecord`]s. Only three of the six columns
//! matter to reconciliation, a fixed number of header rows precedes the
//! data, and rows without an equipment value are treated as placeholders.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::AssetRecord;

/// Header rows preceding data in the standard inventory spreadsheet
pub const DEFAULT_HEADER_ROWS: usize = 11;

/// One raw spreadsheet row in source column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub sector: String,
    pub equipment: String,
    pub model: String,
    pub asset_tag: String,
    /// Column present in the sheet but never consumed
    pub unused: String,
    pub serial: String,
}

impl RawRow {
    pub fn new(
        sector: impl Into<String>,
        equipment: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        Self {
            sector: sector.into(),
            equipment: equipment.into(),
            serial: serial.into(),
            ..Default::default()
        }
    }
}

/// Convert raw rows into asset records: skip the header rows, trim the
/// consumed fields, blank out rows with no equipment value, and drop
/// records that end up fully blank.
pub fn records_from_rows(
    rows: impl IntoIterator<Item = RawRow>,
    header_rows: usize,
) -> Vec<AssetRecord> {
    let records: Vec<AssetRecord> = rows
        .into_iter()
        .skip(header_rows)
        .map(|row| {
            if row.equipment.trim().is_empty() {
                // No equipment means a spacer or note row; normalize it to
                // blank so the filter below removes it.
                AssetRecord::new("", "", "")
            } else {
                AssetRecord::new(
                    row.sector.trim(),
                    row.equipment.trim(),
                    row.serial.trim(),
                )
            }
        })
        .filter(|record| !record.is_blank())
        .collect();
    debug!(records = records.len(), "ingested spreadsheet rows");
    records
}
