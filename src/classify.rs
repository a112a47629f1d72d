//! Equipment classification into registry buckets

use serde::{Deserialize, Serialize};

use crate::types::{AssetRecord, EquipmentKind};

/// Case-insensitive exact-match table mapping raw equipment text to a
/// registry bucket. The vocabulary is locale-specific (the default table
/// matches the Portuguese-language spreadsheets this system ingests), so
/// it is injected rather than hard-coded in the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentVocabulary {
    entries: Vec<(String, EquipmentKind)>,
}

impl EquipmentVocabulary {
    /// Build a vocabulary from `(label, kind)` pairs. Labels are folded to
    /// lowercase once, at construction.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, EquipmentKind)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, kind)| (label.into().to_lowercase(), kind))
                .collect(),
        }
    }

    /// Bucket for a raw equipment label; anything not in the table is
    /// [`EquipmentKind::Other`].
    pub fn kind_of(&self, equipment: &str) -> EquipmentKind {
        let folded = equipment.to_lowercase();
        self.entries
            .iter()
            .find(|(label, _)| *label == folded)
            .map(|(_, kind)| *kind)
            .unwrap_or(EquipmentKind::Other)
    }
}

impl Default for EquipmentVocabulary {
    fn default() -> Self {
        Self::new([
            ("cpu", EquipmentKind::Computer),
            ("monitor", EquipmentKind::Monitor),
            ("impressora", EquipmentKind::Printer),
        ])
    }
}

/// Asset records partitioned by equipment kind, relative order preserved
/// within each bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecords {
    pub computer: Vec<AssetRecord>,
    pub monitor: Vec<AssetRecord>,
    pub printer: Vec<AssetRecord>,
    pub others: Vec<AssetRecord>,
}

impl ClassifiedRecords {
    /// Buckets in fixed kind order, for sequential per-kind processing
    pub fn iter_buckets(&self) -> impl Iterator<Item = (EquipmentKind, &[AssetRecord])> {
        [
            (EquipmentKind::Computer, self.computer.as_slice()),
            (EquipmentKind::Monitor, self.monitor.as_slice()),
            (EquipmentKind::Printer, self.printer.as_slice()),
            (EquipmentKind::Other, self.others.as_slice()),
        ]
        .into_iter()
    }

    pub fn bucket(&self, kind: EquipmentKind) -> &[AssetRecord] {
        match kind {
            EquipmentKind::Computer => &self.computer,
            EquipmentKind::Monitor => &self.monitor,
            EquipmentKind::Printer => &self.printer,
            EquipmentKind::Other => &self.others,
        }
    }

    pub fn bucket_mut(&mut self, kind: EquipmentKind) -> &mut Vec<AssetRecord> {
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

/// Partition records into equipment buckets. Deterministic and stable:
/// a single pass, each record landing in exactly one bucket.
pub fn classify(records: Vec<AssetRecord>, vocabulary: &EquipmentVocabulary) -> ClassifiedRecords {
    let mut classified = ClassifiedRecords::default();
    for record in records {
        let kind = vocabulary.kind_of(&record.equipment);
        classified.bucket_mut(kind).push(record);
    }
    classified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<AssetRecord> {
        vec![
            AssetRecord::new("TI", "CPU", "BR001"),
            AssetRecord::new("TI", "Monitor", "BR002"),
            AssetRecord::new("RH", "Impressora", "BR003"),
            AssetRecord::new("RH", "Nobreak", "BR004"),
            AssetRecord::new("TI", "cpu", "BR005"),
        ]
    }

    #[test]
    fn buckets_by_vocabulary_case_insensitive() {
        let classified = classify(sample(), &EquipmentVocabulary::default());
        assert_eq!(classified.computer.len(), 2);
        assert_eq!(classified.monitor.len(), 1);
        assert_eq!(classified.printer.len(), 1);
        assert_eq!(classified.others.len(), 1);
    }

    #[test]
    fn partition_is_stable_and_complete() {
        let input = sample();
        let classified = classify(input.clone(), &EquipmentVocabulary::default());

        // Relative order preserved within the computer bucket
        assert_eq!(classified.computer[0].serial, "BR001");
        assert_eq!(classified.computer[1].serial, "BR005");

        // Concatenation is a permutation of the input
        assert_eq!(classified.total(), input.len());
        let mut seen: Vec<&str> = classified
            .iter_buckets()
            .flat_map(|(_, bucket)| bucket.iter().map(|r| r.serial.as_str()))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = input.iter().map(|r| r.serial.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn no_normalization_beyond_case_folding() {
        // "Impressora 2" is exact-match vocabulary, so it falls to others
        let records = vec![AssetRecord::new("RH", "Impressora 2", "BR010")];
        let classified = classify(records, &EquipmentVocabulary::default());
        assert_eq!(classified.others.len(), 1);
    }

    #[test]
    fn custom_vocabulary() {
        let vocab = EquipmentVocabulary::new([("desktop", EquipmentKind::Computer)]);
        assert_eq!(vocab.kind_of("DESKTOP"), EquipmentKind::Computer);
        assert_eq!(vocab.kind_of("cpu"), EquipmentKind::Other);
    }
}
