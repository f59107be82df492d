pub mod availability;
pub mod expansion;
pub mod grouping;
pub mod model;
pub mod projects;
pub mod validator;

pub use availability::{
    daily_usage, daily_usage_by_id, lowest_available, overbooked_dates, usage_for_range,
    usage_for_range_by_id,
};
pub use expansion::{group_key, ExpansionState};
pub use grouping::build_resource_tree;
pub use model::{
    BookingRecord, DailyUsage, DateRange, GroupOrdering, GroupPath, ModelError, ProjectUsage,
    Resource, ResourceGroup, ResourceKind, ResourceSubGroup,
};
pub use projects::project_usage_index;
pub use validator::{validate, ValidationResult};
