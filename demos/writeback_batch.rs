//! Write-back batch example: applying a pending-action document

use inventory_core::utils::MemoryDirectory;
use inventory_core::{
    classify, resolve, AssetRecord, DirectorySession, EquipmentVocabulary, PendingActionDocument,
    SectorDirectoryEntry, UnresolvedSectorPolicy, WritebackBatch,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔧 Inventory Core - Write-back Example\n");

    // A pending-action document as a previous reconciliation run left it
    let document = PendingActionDocument {
        missing: vec![AssetRecord::new("Depósito 3", "Impressora", "BR003")],
        sector_updates: vec![AssetRecord::new("TI => Financeiro", "Monitor", "BR002")],
        found: vec![AssetRecord::new("TI", "CPU", "BR001")],
    };

    // Local sector directory with the registry's canonical ids
    let directory = vec![
        SectorDirectoryEntry {
            id: "12".to_string(),
            sector: "financeiro".to_string(),
        },
        SectorDirectoryEntry {
            id: "7".to_string(),
            sector: "Depósito 03".to_string(),
        },
    ];

    let client = MemoryDirectory::new();
    client.add_unit("Unidade A");
    let batch = WritebackBatch::new(client);
    let vocabulary = EquipmentVocabulary::default();

    // 1. Sector updates: resolve the "=>" markers, then apply
    println!("🔁 Applying sector updates...");
    let updates = classify(document.sector_updates, &vocabulary);
    let resolved = resolve(&updates, &directory, UnresolvedSectorPolicy::Flag)?;
    let session = DirectorySession::new();
    let applied = batch.run_sector_updates(&session, &resolved).await?;
    println!("  ✓ {applied} sector updates applied\n");

    // 2. Creations: resolve plain sector names, then register under a unit
    println!("🆕 Registering missing assets...");
    let missing = classify(document.missing, &vocabulary);
    let resolved = resolve(&missing, &directory, UnresolvedSectorPolicy::Flag)?;
    let session = DirectorySession::with_unit("Unidade A");
    let created = batch
        .register_assets(&session, "Unidade A", &["Unidade A".to_string()], &resolved)
        .await?;
    println!("  ✓ {created} assets registered");

    Ok(())
}
