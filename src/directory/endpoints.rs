//! Navigation targets for registry adapters
//!
//! The registry exposes one search front-end per equipment category, each
//! with its own URL prefix and a fixed query suffix. Adapters receive the
//! whole table as configuration instead of carrying hard-coded URLs, so
//! the engine stays testable against any concrete registry deployment.

use serde::{Deserialize, Serialize};

use crate::types::{EquipmentKind, TimeoutPolicy};

/// Search URL pieces for one equipment category: the serial number is
/// spliced between `path` and `base`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTarget {
    /// URL up to the point where the search value is inserted
    pub path: String,
    /// Query suffix appended after the search value
    pub base: String,
}

impl SearchTarget {
    pub fn new(path: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
        }
    }
}

/// Per-kind navigation table plus the timeout policy adapters apply to
/// page navigation and element waits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEndpoints {
    pub computer: SearchTarget,
    pub monitor: SearchTarget,
    pub printer: SearchTarget,
    pub other: SearchTarget,
    /// Form URL used when registering a new asset
    pub create_form: String,
    #[serde(default)]
    pub timeouts: TimeoutPolicy,
}

impl RegistryEndpoints {
    pub fn target(&self, kind: EquipmentKind) -> &SearchTarget {
        match kind {
            EquipmentKind::Computer => &self.computer,
            EquipmentKind::Monitor => &self.monitor,
            EquipmentKind::Printer => &self.printer,
            EquipmentKind::Other => &self.other,
        }
    }

    /// Full search URL for one serial within a category
    pub fn search_url(&self, kind: EquipmentKind, serial: &str) -> String {
        let target = self.target(kind);
        format!("{}{}{}", target.path, serial, target.base)
    }
}
