//! Basic reconciliation run example

use inventory_core::utils::MemoryDirectory;
use inventory_core::{
    classify, persist, records_from_rows, render, DirectorySession, EquipmentKind,
    EquipmentVocabulary, RawRow, ReconciliationEngine,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📋 Inventory Core - Reconciliation Example\n");

    // Stand-in for the real registry: an in-memory directory with a few
    // assets already registered
    let client = MemoryDirectory::new();
    client.insert_asset(EquipmentKind::Computer, "BR001", "TI");
    client.insert_asset(EquipmentKind::Monitor, "BR002", "Financeiro");

    // 1. Ingest spreadsheet rows (one header row, then data)
    println!("📥 Ingesting spreadsheet rows...");
    let rows = vec![
        RawRow::new("Setor", "Equipamento", "Serie"),
        RawRow::new("TI", "CPU", "BR001"),
        RawRow::new("TI", "Monitor", "BR002"),
        RawRow::new("Depósito 3", "Impressora", "BR003"),
        RawRow::new("", "", ""),
    ];
    let records = records_from_rows(rows, 1);
    println!("  ✓ {} records ingested\n", records.len());

    // 2. Classify into equipment buckets
    let classified = classify(records, &EquipmentVocabulary::default());
    println!(
        "🗂️  Classified: {} computers, {} monitors, {} printers, {} others\n",
        classified.computer.len(),
        classified.monitor.len(),
        classified.printer.len(),
        classified.others.len(),
    );

    // 3. Reconcile against the registry, one sequential session
    println!("🔎 Reconciling against the registry...");
    let engine = ReconciliationEngine::new(client);
    let session = DirectorySession::new();
    let outcomes = engine.reconcile_and_close(&session, &classified).await?;
    println!("  ✓ {} outcomes produced\n", outcomes.total());

    // 4. Render the report and pending-action document
    let report = render(&outcomes);
    println!("{}", report.text);
    println!(
        "📄 Document: {} found, {} pending creation, {} pending sector update",
        report.document.found.len(),
        report.document.missing.len(),
        report.document.sector_updates.len(),
    );

    let dir = std::env::temp_dir();
    let report_path = dir.join("pending-report.txt");
    let document_path = dir.join("pending-actions.json");
    persist(&report, &report_path, &document_path)?;
    println!("💾 Artifacts written to {}", dir.display());

    Ok(())
}
