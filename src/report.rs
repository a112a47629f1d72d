//! Manual-review report and pending-action document rendering

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::reconciliation::ReconciliationOutcomes;
use crate::types::*;

/// Column widths for the found and sector-update tables
const WIDE: [usize; 3] = [40, 15, 18];
/// Column widths for the pending-creation table
const NARROW: [usize; 3] = [30, 15, 18];

/// Rendered result of one reconciliation run: the human-readable text
/// report and the machine-readable pending-action document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReport {
    pub text: String,
    pub document: PendingActionDocument,
    pub generated_at: DateTime<Utc>,
}

/// Render the outcomes of a run into a report and a document.
///
/// The text report holds three bordered tables: assets found in the
/// registry, assets pending creation, and assets pending a sector update.
/// The document carries the same records under three distinct keys, in
/// reconciliation order; sector-update entries keep the `=>` marker in
/// their `sector` field for the resolver.
pub fn render(outcomes: &ReconciliationOutcomes) -> RenderedReport {
    let mut document = PendingActionDocument::default();
    for outcome in outcomes.iter() {
        match outcome {
            ReconciliationOutcome::Matched(record) => document.found.push(record.clone()),
            ReconciliationOutcome::SectorMismatch(mismatch) => {
                document.sector_updates.push(mismatch.to_pending_record());
            }
            ReconciliationOutcome::Missing(record) => document.missing.push(record.clone()),
        }
    }

    let generated_at = Utc::now();
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Inventory reconciliation report ({})",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    text.push_str("\n\nFound in the registry.\n\n");
    render_table(&mut text, &document.found, WIDE);

    text.push_str("\n\nPending creation in the registry.\n\n");
    render_table(&mut text, &document.missing, NARROW);

    text.push_str("\n\nPending sector update in the registry.\n");
    text.push_str("LOCAL SECTOR => REGISTRY SECTOR.\n\n");
    render_table(&mut text, &document.sector_updates, WIDE);

    RenderedReport {
        text,
        document,
        generated_at,
    }
}

/// Write the text report and the JSON document to their well-known
/// locations. Callers invoke this only after a fully successful run, so
/// an aborted run never persists partial results.
pub fn persist(
    report: &RenderedReport,
    report_path: impl AsRef<Path>,
    document_path: impl AsRef<Path>,
) -> ReconResult<()> {
    std::fs::write(report_path.as_ref(), &report.text)?;
    let json = serde_json::to_string_pretty(&report.document)
        .map_err(|e| ReconError::Validation(format!("document serialization failed: {e}")))?;
    std::fs::write(document_path.as_ref(), json)?;
    info!(
        report = %report_path.as_ref().display(),
        document = %document_path.as_ref().display(),
        "reconciliation artifacts written"
    );
    Ok(())
}

fn render_table(out: &mut String, records: &[AssetRecord], widths: [usize; 3]) {
    let border = border_line(widths);
    out.push_str(&border);
    render_row(
        out,
        &center("SECTOR", widths[0]),
        &center("EQUIPMENT", widths[1]),
        &center("SERIAL", widths[2]),
        widths,
    );
    out.push_str(&border);
    for record in records {
        render_row(out, &record.sector, &record.equipment, &record.serial, widths);
        out.push_str(&border);
    }
}

fn render_row(out: &mut String, sector: &str, equipment: &str, serial: &str, widths: [usize; 3]) {
    let _ = writeln!(
        out,
        "| {} | {} | {} |",
        pad(sector, widths[0]),
        pad(equipment, widths[1]),
        pad(serial, widths[2]),
    );
}

fn border_line(widths: [usize; 3]) -> String {
    format!(
        "+{}+{}+{}+\n",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2),
    )
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn center(value: &str, width: usize) -> String {
    format!("{value:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::ReconciliationOutcomes;

    fn outcomes() -> ReconciliationOutcomes {
        ReconciliationOutcomes {
            computer: vec![
                ReconciliationOutcome::Matched(AssetRecord::new("TI", "CPU", "BR123")),
                ReconciliationOutcome::Missing(AssetRecord::new("RH", "CPU", "BR999")),
            ],
            monitor: vec![ReconciliationOutcome::SectorMismatch(SectorMismatch {
                record: AssetRecord::new("TI", "Monitor", "BR200"),
                registry_location: "Financeiro".to_string(),
            })],
            printer: Vec::new(),
            others: Vec::new(),
        }
    }

    #[test]
    fn document_has_three_distinct_lists() {
        let report = render(&outcomes());
        assert_eq!(report.document.found.len(), 1);
        assert_eq!(report.document.missing.len(), 1);
        assert_eq!(report.document.sector_updates.len(), 1);
        assert_eq!(report.document.found[0].serial, "BR123");
        assert_eq!(report.document.missing[0].serial, "BR999");
    }

    #[test]
    fn sector_update_entries_carry_the_marker() {
        let report = render(&outcomes());
        assert_eq!(report.document.sector_updates[0].sector, "TI => Financeiro");
    }

    #[test]
    fn text_report_has_all_three_sections() {
        let report = render(&outcomes());
        assert!(report.text.contains("Found in the registry."));
        assert!(report.text.contains("Pending creation in the registry."));
        assert!(report.text.contains("Pending sector update in the registry."));
        assert!(report.text.contains("LOCAL SECTOR => REGISTRY SECTOR."));
    }

    #[test]
    fn rows_are_padded_to_fixed_widths() {
        let report = render(&outcomes());
        let row = format!("| {} | {} | {} |", pad("TI", 40), pad("CPU", 15), pad("BR123", 18));
        assert!(report.text.contains(&row), "missing padded row in:\n{}", report.text);

        let narrow = format!("| {} | {} | {} |", pad("RH", 30), pad("CPU", 15), pad("BR999", 18));
        assert!(report.text.contains(&narrow));
    }

    #[test]
    fn document_json_round_trips() {
        let report = render(&outcomes());
        let json = serde_json::to_string_pretty(&report.document).unwrap();
        let back: PendingActionDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report.document);
    }

    #[test]
    fn empty_run_still_renders_every_section() {
        let report = render(&ReconciliationOutcomes::default());
        assert!(report.document.found.is_empty());
        assert!(report.document.missing.is_empty());
        assert!(report.document.sector_updates.is_empty());
        assert!(report.text.contains("Found in the registry."));
    }
}
