#![deny(clippy::all)]

use napi_derive::napi;
use gigplan_engine::model as engine;

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

// Dates cross the JS boundary as `YYYY-MM-DD` strings; malformed input
// surfaces as a napi error rather than a panic.

fn parse_day(s: &str) -> napi::Result<chrono::NaiveDate> {
    engine::parse_day(s).map_err(|e| napi::Error::from_reason(e.to_string()))
}

fn format_day(d: chrono::NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Equipment,
    Crew,
}

impl From<ResourceKind> for engine::ResourceKind {
    fn from(v: ResourceKind) -> Self {
        match v {
            ResourceKind::Equipment => engine::ResourceKind::Equipment,
            ResourceKind::Crew => engine::ResourceKind::Crew,
        }
    }
}

impl From<engine::ResourceKind> for ResourceKind {
    fn from(v: engine::ResourceKind) -> Self {
        match v {
            engine::ResourceKind::Equipment => ResourceKind::Equipment,
            engine::ResourceKind::Crew => ResourceKind::Crew,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: catalog / ledger input side
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct GroupPath {
    pub main_group: String,
    pub sub_group: Option<String>,
}

impl From<GroupPath> for engine::GroupPath {
    fn from(v: GroupPath) -> Self {
        engine::GroupPath {
            main_group: v.main_group,
            sub_group: v.sub_group,
        }
    }
}

impl From<engine::GroupPath> for GroupPath {
    fn from(v: engine::GroupPath) -> Self {
        GroupPath {
            main_group: v.main_group,
            sub_group: v.sub_group,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    pub capacity: u32,
    pub group: GroupPath,
}

impl From<Resource> for engine::Resource {
    fn from(v: Resource) -> Self {
        engine::Resource {
            id: v.id,
            name: v.name,
            kind: v.kind.into(),
            capacity: v.capacity,
            group: v.group.into(),
        }
    }
}

impl From<engine::Resource> for Resource {
    fn from(v: engine::Resource) -> Self {
        Resource {
            id: v.id,
            name: v.name,
            kind: v.kind.into(),
            capacity: v.capacity,
            group: v.group.into(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub resource_id: String,
    /// Calendar day as YYYY-MM-DD.
    pub date: String,
    pub quantity: u32,
    pub project: String,
    pub event: String,
    pub role: Option<String>,
    pub event_color: Option<String>,
}

impl TryFrom<BookingRecord> for engine::BookingRecord {
    type Error = napi::Error;

    fn try_from(v: BookingRecord) -> napi::Result<Self> {
        Ok(engine::BookingRecord {
            resource_id: v.resource_id,
            date: parse_day(&v.date)?,
            quantity: v.quantity,
            project: v.project,
            event: v.event,
            role: v.role,
            event_color: v.event_color,
        })
    }
}

impl From<engine::BookingRecord> for BookingRecord {
    fn from(v: engine::BookingRecord) -> Self {
        BookingRecord {
            resource_id: v.resource_id,
            date: format_day(v.date),
            quantity: v.quantity,
            project: v.project,
            event: v.event,
            role: v.role,
            event_color: v.event_color,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl TryFrom<DateRange> for engine::DateRange {
    type Error = napi::Error;

    fn try_from(v: DateRange) -> napi::Result<Self> {
        Ok(engine::DateRange {
            start: parse_day(&v.start)?,
            end: parse_day(&v.end)?,
        })
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct SubgroupOrder {
    pub group: String,
    pub subgroups: Vec<String>,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct GroupOrdering {
    pub groups: Vec<String>,
    pub subgroups: Vec<SubgroupOrder>,
}

impl From<GroupOrdering> for engine::GroupOrdering {
    fn from(v: GroupOrdering) -> Self {
        engine::GroupOrdering {
            groups: v.groups,
            subgroups: v
                .subgroups
                .into_iter()
                .map(|s| (s.group, s.subgroups))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: engine output
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct DailyUsage {
    pub resource_id: String,
    pub date: String,
    pub total_used: u32,
    /// Remaining capacity; negative when overbooked.
    pub available: i64,
    pub is_overbooked: bool,
    pub bookings: Vec<BookingRecord>,
}

impl From<engine::DailyUsage> for DailyUsage {
    fn from(v: engine::DailyUsage) -> Self {
        DailyUsage {
            resource_id: v.resource_id,
            date: format_day(v.date),
            total_used: v.total_used,
            available: v.available,
            is_overbooked: v.is_overbooked,
            bookings: v.bookings.into_iter().map(Into::into).collect(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct DayQuantity {
    pub date: String,
    pub quantity: u32,
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ProjectQuantities {
    pub project: String,
    pub days: Vec<DayQuantity>,
}

/// One resource's drill-down breakdown. The nested maps flatten to arrays on
/// this boundary; both stay in deterministic sorted order.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ProjectUsage {
    pub resource_id: String,
    pub projects: Vec<String>,
    pub quantities: Vec<ProjectQuantities>,
}

impl ProjectUsage {
    fn from_engine(resource_id: String, usage: engine::ProjectUsage) -> Self {
        let quantities = usage
            .quantities
            .into_iter()
            .map(|(project, days)| ProjectQuantities {
                project,
                days: days
                    .into_iter()
                    .map(|(date, quantity)| DayQuantity {
                        date: format_day(date),
                        quantity,
                    })
                    .collect(),
            })
            .collect();
        ProjectUsage {
            resource_id,
            projects: usage.projects,
            quantities,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ResourceSubGroup {
    pub name: String,
    pub resources: Vec<Resource>,
}

impl From<engine::ResourceSubGroup> for ResourceSubGroup {
    fn from(v: engine::ResourceSubGroup) -> Self {
        ResourceSubGroup {
            name: v.name,
            resources: v.resources.into_iter().map(Into::into).collect(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    pub name: String,
    pub resources: Vec<Resource>,
    pub subgroups: Vec<ResourceSubGroup>,
}

impl From<engine::ResourceGroup> for ResourceGroup {
    fn from(v: engine::ResourceGroup) -> Self {
        ResourceGroup {
            name: v.name,
            resources: v.resources.into_iter().map(Into::into).collect(),
            subgroups: v.subgroups.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation result
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<gigplan_engine::validator::ValidationResult> for ValidationResult {
    fn from(v: gigplan_engine::validator::ValidationResult) -> Self {
        ValidationResult {
            errors: v.errors,
            warnings: v.warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn to_engine_catalog(catalog: Vec<Resource>) -> Vec<engine::Resource> {
    catalog.into_iter().map(Into::into).collect()
}

fn to_engine_ledger(ledger: Vec<BookingRecord>) -> napi::Result<Vec<engine::BookingRecord>> {
    ledger.into_iter().map(TryInto::try_into).collect()
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Validate a catalog + ledger snapshot pair, returning errors and warnings.
#[napi]
pub fn validate(
    catalog: Vec<Resource>,
    ledger: Vec<BookingRecord>,
) -> napi::Result<ValidationResult> {
    let catalog = to_engine_catalog(catalog);
    let ledger = to_engine_ledger(ledger)?;
    Ok(gigplan_engine::validator::validate(&catalog, &ledger).into())
}

/// Usage summary for one resource on one day. Unknown resources degrade to
/// the conservative zero result rather than throwing.
#[napi]
pub fn daily_usage(
    catalog: Vec<Resource>,
    ledger: Vec<BookingRecord>,
    resource_id: String,
    date: String,
) -> napi::Result<DailyUsage> {
    let catalog = to_engine_catalog(catalog);
    let ledger = to_engine_ledger(ledger)?;
    let date = parse_day(&date)?;
    Ok(gigplan_engine::availability::daily_usage_by_id(&catalog, &ledger, &resource_id, date).into())
}

/// Per-day usage cells for one resource across an inclusive date range.
#[napi]
pub fn usage_range(
    catalog: Vec<Resource>,
    ledger: Vec<BookingRecord>,
    resource_id: String,
    start: String,
    end: String,
) -> napi::Result<Vec<DailyUsage>> {
    let catalog = to_engine_catalog(catalog);
    let ledger = to_engine_ledger(ledger)?;
    let range = engine::DateRange::new(parse_day(&start)?, parse_day(&end)?);
    Ok(
        gigplan_engine::availability::usage_for_range_by_id(&catalog, &ledger, &resource_id, &range)
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}

/// Minimum availability across the range, clamped at 0 for display. An empty
/// range returns the resource's capacity.
#[napi]
pub fn lowest_available(
    catalog: Vec<Resource>,
    ledger: Vec<BookingRecord>,
    resource_id: String,
    start: String,
    end: String,
) -> napi::Result<u32> {
    let catalog = to_engine_catalog(catalog);
    let ledger = to_engine_ledger(ledger)?;
    let range = engine::DateRange::new(parse_day(&start)?, parse_day(&end)?);
    Ok(gigplan_engine::availability::lowest_available(
        &catalog,
        &ledger,
        &resource_id,
        &range,
    ))
}

/// Per-resource project drill-down data for the visible window. Resources
/// with nothing inside the window are omitted.
#[napi]
pub fn project_usage(
    ledger: Vec<BookingRecord>,
    window: DateRange,
) -> napi::Result<Vec<ProjectUsage>> {
    let ledger = to_engine_ledger(ledger)?;
    let window = engine::DateRange::try_from(window)?;
    Ok(gigplan_engine::projects::project_usage_index(&ledger, &window)
        .into_iter()
        .map(|(resource_id, usage)| ProjectUsage::from_engine(resource_id, usage))
        .collect())
}

/// Build the ordered folder tree for the calendar sidebar.
#[napi]
pub fn build_tree(
    catalog: Vec<Resource>,
    ordering: Option<GroupOrdering>,
) -> napi::Result<Vec<ResourceGroup>> {
    let catalog = to_engine_catalog(catalog);
    let ordering = ordering.map(Into::into).unwrap_or_default();
    Ok(gigplan_engine::grouping::build_resource_tree(&catalog, &ordering)
        .into_iter()
        .map(Into::into)
        .collect())
}
