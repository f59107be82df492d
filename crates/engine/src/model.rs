use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Booking for '{resource_id}' on {date} has zero quantity")]
    ZeroQuantity { resource_id: String, date: NaiveDate },
    #[error("Invalid date '{0}' -- expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parse a calendar day from the `YYYY-MM-DD` form used on the JSON and
/// bindings boundaries.
pub fn parse_day(s: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ModelError::InvalidDate(s.to_string()))
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Category of a bookable resource, which determines how capacity and booking
/// quantities are interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Physical stock with an integer count (e.g. 6 identical mixers).
    Equipment,
    /// A single person. One assignment per day is normal; a second one on the
    /// same day is a conflict, not a capacity question.
    Crew,
}

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// Position of a resource in the folder hierarchy shown in the calendar
/// sidebar (e.g. "Mixers" / "Digital Mixers", or a department / role pair).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupPath {
    /// Top-level folder or department. Never empty.
    pub main_group: String,
    /// Optional subfolder or role bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
}

impl GroupPath {
    pub fn new(main_group: impl Into<String>) -> Self {
        Self {
            main_group: main_group.into(),
            sub_group: None,
        }
    }

    pub fn with_sub(main_group: impl Into<String>, sub_group: impl Into<String>) -> Self {
        Self {
            main_group: main_group.into(),
            sub_group: Some(sub_group.into()),
        }
    }
}

/// A bookable entity from the catalog: an equipment item or a crew member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Opaque identifier, unique within its kind. Immutable once created.
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    /// Stock count for Equipment. Stored but ignored for Crew, whose
    /// effective capacity is always 1.
    pub capacity: u32,
    pub group: GroupPath,
}

impl Resource {
    pub fn equipment(
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
        group: GroupPath,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ResourceKind::Equipment,
            capacity,
            group,
        }
    }

    pub fn crew(id: impl Into<String>, name: impl Into<String>, group: GroupPath) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ResourceKind::Crew,
            capacity: 1,
            group,
        }
    }

    /// Capacity as the engine sees it: the stock count for Equipment, 1 for
    /// Crew regardless of the stored field.
    pub fn effective_capacity(&self) -> u32 {
        match self.kind {
            ResourceKind::Equipment => self.capacity,
            ResourceKind::Crew => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger types
// ---------------------------------------------------------------------------

/// One demand line: a single project/event's claim on a resource for a single
/// calendar day. Several records may share the same (resource, day) -- for
/// Equipment that is how overbooking arises, for Crew it is a conflict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// References a `Resource` by its ID. The referenced resource may be
    /// missing from the catalog snapshot when fetches race.
    pub resource_id: String,
    pub date: NaiveDate,
    /// Units requested. Always > 0 for Equipment; ignored for Crew tallying,
    /// where the record itself is the unit.
    pub quantity: u32,
    /// Name of the project this claim belongs to.
    pub project: String,
    /// Name of the event within the project.
    pub event: String,
    /// Crew-only: the role the person is booked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Display hint for the host UI. The engine never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_color: Option<String>,
}

impl BookingRecord {
    /// Equipment booking. Rejects zero quantity -- zero-quantity claims are
    /// never recorded.
    pub fn new(
        resource_id: impl Into<String>,
        date: NaiveDate,
        quantity: u32,
        project: impl Into<String>,
        event: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let resource_id = resource_id.into();
        if quantity == 0 {
            return Err(ModelError::ZeroQuantity { resource_id, date });
        }
        Ok(Self {
            resource_id,
            date,
            quantity,
            project: project.into(),
            event: event.into(),
            role: None,
            event_color: None,
        })
    }

    /// Crew assignment: one person, one day, one event. Quantity is pinned
    /// to 1.
    pub fn assignment(
        resource_id: impl Into<String>,
        date: NaiveDate,
        project: impl Into<String>,
        event: impl Into<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            date,
            quantity: 1,
            project: project.into(),
            event: event.into(),
            role,
            event_color: None,
        }
    }

    pub fn with_event_color(mut self, color: impl Into<String>) -> Self {
        self.event_color = Some(color.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive range of calendar days. Also used as the visible window for
/// windowed queries. The range is empty when `start > end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate the days of the range in order. Yields nothing for an empty
    /// range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.succ_opt())
            .take_while(move |d| *d <= end)
    }
}

// ---------------------------------------------------------------------------
// Derived output types
// ---------------------------------------------------------------------------

/// Usage summary for one (resource, day) cell. Computed on demand, never
/// persisted. A day with no bookings is a fully specified zero result, not an
/// absent one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    pub resource_id: String,
    pub date: NaiveDate,
    /// Units booked for Equipment; number of same-day assignments for Crew.
    pub total_used: u32,
    /// Remaining capacity. Negative when overbooked; 0 or 1 for Crew.
    pub available: i64,
    pub is_overbooked: bool,
    /// The contributing records, verbatim, for drill-down display.
    pub bookings: Vec<BookingRecord>,
}

/// Per-resource project breakdown within the visible window: which projects
/// touch the resource, and how much of it each claims per day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUsage {
    /// Distinct project names, sorted lexicographically (case-sensitive).
    pub projects: Vec<String>,
    /// project -> day -> summed quantity. Same-day bookings from one project
    /// to the same resource are folded together.
    pub quantities: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
}

/// A subfolder of the display tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSubGroup {
    pub name: String,
    pub resources: Vec<Resource>,
}

/// A top-level folder of the display tree: directly contained resources plus
/// named subfolders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub name: String,
    pub resources: Vec<Resource>,
    pub subgroups: Vec<ResourceSubGroup>,
}

/// Host-supplied display ordering. Groups listed here sort by list position;
/// anything unlisted sorts alphabetically after the listed entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupOrdering {
    #[serde(default)]
    pub groups: Vec<String>,
    /// Per-group subfolder priority lists, keyed by main group name.
    #[serde(default)]
    pub subgroups: BTreeMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn booking_rejects_zero_quantity() {
        let err = BookingRecord::new("cam1", day("2025-01-10"), 0, "Alpha", "Load-in").unwrap_err();
        assert!(matches!(err, ModelError::ZeroQuantity { .. }));
    }

    #[test]
    fn assignment_pins_quantity_to_one() {
        let rec = BookingRecord::assignment(
            "alice",
            day("2025-02-01"),
            "Alpha",
            "Show day",
            Some("FOH".to_string()),
        );
        assert_eq!(rec.quantity, 1);
        assert_eq!(rec.role.as_deref(), Some("FOH"));
    }

    #[test]
    fn crew_effective_capacity_is_one() {
        let r = Resource::crew("alice", "Alice", GroupPath::new("Sound"));
        assert_eq!(r.effective_capacity(), 1);

        let e = Resource::equipment("cam1", "Camera A", 3, GroupPath::new("Video"));
        assert_eq!(e.effective_capacity(), 3);
    }

    #[test]
    fn date_range_days_inclusive() {
        let range = DateRange::new(day("2025-01-10"), day("2025-01-12"));
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days, vec![day("2025-01-10"), day("2025-01-11"), day("2025-01-12")]);
        assert!(range.contains(day("2025-01-11")));
        assert!(!range.contains(day("2025-01-13")));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = DateRange::new(day("2025-01-12"), day("2025-01-10"));
        assert!(range.is_empty());
        assert_eq!(range.days().count(), 0);
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(matches!(parse_day("10/01/2025"), Err(ModelError::InvalidDate(_))));
        assert!(parse_day("2025-01-10").is_ok());
    }

    #[test]
    fn booking_serde_is_camel_case() {
        let rec = BookingRecord::new("cam1", day("2025-01-10"), 2, "Alpha", "Load-in").unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""resourceId":"cam1""#));
        assert!(json.contains(r#""date":"2025-01-10""#));
        // Unset display hints stay off the wire entirely.
        assert!(!json.contains("eventColor"));
    }
}
