use std::collections::BTreeMap;

use crate::model::{BookingRecord, DateRange, ProjectUsage};

// ---------------------------------------------------------------------------
// Project usage aggregation
// ---------------------------------------------------------------------------

/// Build the per-resource project breakdown for expandable drill-down rows.
///
/// The ledger is fetched for a wider buffer than what is on screen, so the
/// visible window is applied here as a filter -- a record outside the window
/// never contributes, no matter how wide the fetch was. Resources with no
/// record inside the window are simply absent from the returned map; callers
/// treat absence as "nothing to expand".
pub fn project_usage_index(
    ledger: &[BookingRecord],
    visible: &DateRange,
) -> BTreeMap<String, ProjectUsage> {
    let mut per_resource: BTreeMap<String, BTreeMap<String, BTreeMap<chrono::NaiveDate, u32>>> =
        BTreeMap::new();

    for record in ledger.iter().filter(|b| visible.contains(b.date)) {
        let quantities = per_resource
            .entry(record.resource_id.clone())
            .or_default()
            .entry(record.project.clone())
            .or_default();
        // Same resource, same project, same day: multi-event bookings fold
        // into one drill-down cell.
        *quantities.entry(record.date).or_insert(0) += record.quantity;
    }

    per_resource
        .into_iter()
        .map(|(resource_id, quantities)| {
            let projects: Vec<String> = quantities.keys().cloned().collect();
            (resource_id, ProjectUsage { projects, quantities })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
