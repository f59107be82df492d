use std::collections::HashSet;

use serde::Serialize;

use crate::model::{BookingRecord, Resource, ResourceKind};

// ---------------------------------------------------------------------------
// Validation result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validate implementation
// ---------------------------------------------------------------------------

/// Validate a catalog + ledger snapshot pair, returning errors (contract
/// violations upstream must fix) and warnings (anomalies the engine tolerates
/// by degrading). Errors are listed before warnings.
pub fn validate(catalog: &[Resource], ledger: &[BookingRecord]) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // Build resource ID set for quick lookup
    let resource_ids: HashSet<&str> = catalog.iter().map(|r| r.id.as_str()).collect();

    // -----------------------------------------------------------------------
    // Error: duplicate resource IDs within a kind
    // -----------------------------------------------------------------------
    {
        let mut seen: HashSet<(&str, ResourceKind)> = HashSet::new();
        for resource in catalog {
            if !seen.insert((resource.id.as_str(), resource.kind)) {
                errors.push(format!(
                    "Duplicate resource ID '{}' -- IDs must be unique within a kind",
                    resource.id
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-resource errors
    // -----------------------------------------------------------------------
    for resource in catalog {
        if resource.id.trim().is_empty() {
            errors.push(format!(
                "Resource '{}' has an empty ID",
                resource.name
            ));
        }

        if resource.group.main_group.trim().is_empty() {
            errors.push(format!(
                "Resource '{}' has no main group -- every resource needs a folder",
                resource.name
            ));
        }

        // A subgroup that exists but is blank renders as an unnamed folder.
        if matches!(resource.group.sub_group.as_deref(), Some(s) if s.trim().is_empty()) {
            warnings.push(format!(
                "Resource '{}' has a blank subgroup name",
                resource.name
            ));
        }
    }

    // -----------------------------------------------------------------------
    // Per-booking checks
    // -----------------------------------------------------------------------
    let crew_ids: HashSet<&str> = catalog
        .iter()
        .filter(|r| r.kind == ResourceKind::Crew)
        .map(|r| r.id.as_str())
        .collect();

    for record in ledger {
        if record.resource_id.trim().is_empty() {
            errors.push(format!(
                "Booking for project '{}' on {} has an empty resource ID",
                record.project, record.date
            ));
            continue;
        }

        // Error: zero quantities are a contract violation (serde can bypass
        // the constructor check)
        if record.quantity == 0 {
            errors.push(format!(
                "Booking for '{}' on {} has zero quantity -- zero-quantity claims are never recorded",
                record.resource_id, record.date
            ));
        }

        // Warning: ledger cites a resource the catalog doesn't know. The two
        // snapshots are fetched independently and can transiently disagree;
        // the engine degrades rather than failing, but the host should know.
        if !resource_ids.contains(record.resource_id.as_str()) {
            warnings.push(format!(
                "Booking for '{}' on {} references a resource missing from the catalog",
                record.resource_id, record.date
            ));
        }

        // Warning: crew tallying counts records, not quantities
        if crew_ids.contains(record.resource_id.as_str()) && record.quantity != 1 {
            warnings.push(format!(
                "Crew booking for '{}' on {} carries quantity {} -- crew assignments count as 1 each",
                record.resource_id, record.date, record.quantity
            ));
        }
    }

    ValidationResult { errors, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
