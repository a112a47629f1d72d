//! Validation utilities

use crate::types::*;

/// Validate a batch of asset records before a run starts
pub fn validate_records(records: &[AssetRecord]) -> ReconResult<()> {
    for (index, record) in records.iter().enumerate() {
        if record.is_blank() {
            return Err(ReconError::Validation(format!(
                "record {index} is blank; blank rows must be filtered at ingestion"
            )));
        }
        if record.equipment.trim().is_empty() {
            return Err(ReconError::Validation(format!(
                "record {index} (serial '{}') has no equipment value",
                record.serial
            )));
        }
    }
    Ok(())
}

/// Validate a unit name against the locally known unit list
pub fn validate_unit(unit: &str, known_units: &[String]) -> ReconResult<()> {
    if unit.trim().is_empty() {
        return Err(ReconError::Validation("unit name cannot be empty".to_string()));
    }
    if !known_units.iter().any(|known| known == unit) {
        return Err(ReconError::Validation(format!("invalid unit '{unit}'")));
    }
    Ok(())
}

/// Validate the local sector directory before it is used for resolution
pub fn validate_sector_directory(directory: &[SectorDirectoryEntry]) -> ReconResult<()> {
    if directory.is_empty() {
        return Err(ReconError::Validation(
            "sector directory is empty".to_string(),
        ));
    }
    for entry in directory {
        if entry.id.trim().is_empty() {
            return Err(ReconError::Validation(format!(
                "sector directory entry '{}' has no id",
                entry.sector
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_is_rejected() {
        let records = vec![AssetRecord::new("", "", "")];
        assert!(validate_records(&records).is_err());
    }

    #[test]
    fn valid_records_pass() {
        let records = vec![AssetRecord::new("TI", "CPU", "BR123")];
        assert!(validate_records(&records).is_ok());
    }

    #[test]
    fn unit_must_be_known() {
        let known = vec!["Unidade A".to_string()];
        assert!(validate_unit("Unidade A", &known).is_ok());
        assert!(validate_unit("Unidade B", &known).is_err());
        assert!(validate_unit("", &known).is_err());
    }

    #[test]
    fn directory_entries_need_ids() {
        let directory = vec![SectorDirectoryEntry {
            id: String::new(),
            sector: "TI".to_string(),
        }];
        assert!(validate_sector_directory(&directory).is_err());
        assert!(validate_sector_directory(&[]).is_err());
    }
}
