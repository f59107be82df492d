use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{BookingRecord, DailyUsage, DateRange, Resource, ResourceKind};

// ---------------------------------------------------------------------------
// Kind strategy
// ---------------------------------------------------------------------------

// All kind-specific booking arithmetic lives here. Call sites never branch on
// the kind themselves.
impl ResourceKind {
    /// Tally one day's matching records into a usage total. Equipment sums
    /// quantities; for Crew the record itself is the unit, so quantities are
    /// ignored and records are counted.
    pub(crate) fn tally(self, bookings: &[BookingRecord]) -> u32 {
        match self {
            ResourceKind::Equipment => bookings.iter().map(|b| b.quantity).sum(),
            ResourceKind::Crew => bookings.len() as u32,
        }
    }

    /// Remaining capacity and overbooking flag for one day's total.
    /// Equipment goes negative when overbooked; Crew availability is binary
    /// and any second same-day assignment is a conflict.
    pub(crate) fn assess(self, capacity: u32, total_used: u32) -> (i64, bool) {
        match self {
            ResourceKind::Equipment => (
                i64::from(capacity) - i64::from(total_used),
                total_used > capacity,
            ),
            ResourceKind::Crew => (i64::from(u32::from(total_used == 0)), total_used > 1),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-day usage
// ---------------------------------------------------------------------------

fn build_usage(
    resource_id: &str,
    kind: ResourceKind,
    capacity: u32,
    date: NaiveDate,
    bookings: Vec<BookingRecord>,
) -> DailyUsage {
    let total_used = kind.tally(&bookings);
    let (available, is_overbooked) = kind.assess(capacity, total_used);
    DailyUsage {
        resource_id: resource_id.to_string(),
        date,
        total_used,
        available,
        is_overbooked,
        bookings,
    }
}

/// Compute the usage summary for one resource on one day.
///
/// Pure over the ledger snapshot: only records matching the resource ID and
/// the exact calendar day contribute. A day with no matching records returns
/// the fully specified zero result, never an absent one.
pub fn daily_usage(resource: &Resource, date: NaiveDate, ledger: &[BookingRecord]) -> DailyUsage {
    let bookings: Vec<BookingRecord> = ledger
        .iter()
        .filter(|b| b.resource_id == resource.id && b.date == date)
        .cloned()
        .collect();
    build_usage(
        &resource.id,
        resource.kind,
        resource.effective_capacity(),
        date,
        bookings,
    )
}

/// Catalog-lookup variant of [`daily_usage`].
///
/// Catalog and ledger are fetched independently and can transiently disagree,
/// so an unknown resource ID degrades to a conservative result (zero
/// capacity, zero usage, not overbooked) and logs a data-integrity warning
/// instead of failing.
pub fn daily_usage_by_id(
    catalog: &[Resource],
    ledger: &[BookingRecord],
    resource_id: &str,
    date: NaiveDate,
) -> DailyUsage {
    match catalog.iter().find(|r| r.id == resource_id) {
        Some(resource) => daily_usage(resource, date, ledger),
        None => {
            tracing::warn!(resource_id, "usage queried for a resource missing from the catalog");
            DailyUsage {
                resource_id: resource_id.to_string(),
                date,
                total_used: 0,
                available: 0,
                is_overbooked: false,
                bookings: Vec::new(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Range queries
// ---------------------------------------------------------------------------

/// Group the resource's ledger records by day, once, so range scans don't
/// re-filter the whole ledger per date.
fn bookings_by_day(resource_id: &str, ledger: &[BookingRecord]) -> HashMap<NaiveDate, Vec<BookingRecord>> {
    let mut by_day: HashMap<NaiveDate, Vec<BookingRecord>> = HashMap::new();
    for record in ledger.iter().filter(|b| b.resource_id == resource_id) {
        by_day.entry(record.date).or_default().push(record.clone());
    }
    by_day
}

/// Per-day usage for every day of the range, in date order: one calendar grid
/// row. Empty ranges produce an empty row.
pub fn usage_for_range(
    resource: &Resource,
    range: &DateRange,
    ledger: &[BookingRecord],
) -> Vec<DailyUsage> {
    let mut by_day = bookings_by_day(&resource.id, ledger);
    range
        .days()
        .map(|date| {
            let bookings = by_day.remove(&date).unwrap_or_default();
            build_usage(
                &resource.id,
                resource.kind,
                resource.effective_capacity(),
                date,
                bookings,
            )
        })
        .collect()
}

/// Catalog-lookup variant of [`usage_for_range`]. An unknown resource ID
/// yields a row of conservative zero cells and the data-integrity warning,
/// mirroring [`daily_usage_by_id`].
pub fn usage_for_range_by_id(
    catalog: &[Resource],
    ledger: &[BookingRecord],
    resource_id: &str,
    range: &DateRange,
) -> Vec<DailyUsage> {
    match catalog.iter().find(|r| r.id == resource_id) {
        Some(resource) => usage_for_range(resource, range, ledger),
        None => {
            tracing::warn!(resource_id, "usage queried for a resource missing from the catalog");
            range
                .days()
                .map(|date| DailyUsage {
                    resource_id: resource_id.to_string(),
                    date,
                    total_used: 0,
                    available: 0,
                    is_overbooked: false,
                    bookings: Vec::new(),
                })
                .collect()
        }
    }
}

/// The days within the range on which the resource is overbooked, for
/// conflict markers. Empty when there is no conflict.
pub fn overbooked_dates(
    resource: &Resource,
    range: &DateRange,
    ledger: &[BookingRecord],
) -> Vec<NaiveDate> {
    usage_for_range(resource, range, ledger)
        .into_iter()
        .filter(|usage| usage.is_overbooked)
        .map(|usage| usage.date)
        .collect()
}

/// Minimum availability across the range, clamped to a floor of 0 for
/// display. The signed per-day values stay visible through [`daily_usage`];
/// only this rollup clamps.
///
/// An empty range returns the resource's effective capacity. An unknown
/// resource ID returns 0 and logs the same data-integrity warning as
/// [`daily_usage_by_id`].
pub fn lowest_available(
    catalog: &[Resource],
    ledger: &[BookingRecord],
    resource_id: &str,
    range: &DateRange,
) -> u32 {
    let Some(resource) = catalog.iter().find(|r| r.id == resource_id) else {
        tracing::warn!(resource_id, "availability queried for a resource missing from the catalog");
        return 0;
    };

    if range.is_empty() {
        return resource.effective_capacity();
    }

    let by_day = bookings_by_day(resource_id, ledger);
    let lowest = range
        .days()
        .map(|date| {
            let total_used = match by_day.get(&date) {
                Some(day_bookings) => resource.kind.tally(day_bookings),
                None => 0,
            };
            resource.kind.assess(resource.effective_capacity(), total_used).0
        })
        .min()
        .unwrap_or_else(|| i64::from(resource.effective_capacity()));

    lowest.max(0) as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
