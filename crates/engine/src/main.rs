use std::io::{self, Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use gigplan_engine::model::{BookingRecord, DateRange, GroupOrdering, Resource};
use gigplan_engine::{availability, grouping, projects, validator};

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum Request {
    Validate {
        catalog: Vec<Resource>,
        ledger: Vec<BookingRecord>,
    },
    #[serde(rename_all = "camelCase")]
    DailyUsage {
        catalog: Vec<Resource>,
        ledger: Vec<BookingRecord>,
        resource_id: String,
        date: NaiveDate,
    },
    #[serde(rename_all = "camelCase")]
    UsageRange {
        catalog: Vec<Resource>,
        ledger: Vec<BookingRecord>,
        resource_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[serde(rename_all = "camelCase")]
    LowestAvailable {
        catalog: Vec<Resource>,
        ledger: Vec<BookingRecord>,
        resource_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    ProjectUsage {
        ledger: Vec<BookingRecord>,
        window: DateRange,
    },
    Tree {
        catalog: Vec<Resource>,
        #[serde(default)]
        ordering: GroupOrdering,
    },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp).unwrap_or_else(|_| {
        "{\"ok\":false,\"error\":\"double serialization error\"}".to_string()
    });
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    // Engine data-integrity warnings go to stderr; stdout carries only the
    // JSON protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Read all of stdin
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        write_err(format!("Failed to read stdin: {}", e));
    }

    // Parse request
    let request: Request = match serde_json::from_str(&input) {
        Ok(r) => r,
        Err(e) => write_err(format!("Invalid JSON input: {}", e)),
    };

    match request {
        Request::Validate { catalog, ledger } => {
            write_ok(validator::validate(&catalog, &ledger));
        }
        Request::DailyUsage {
            catalog,
            ledger,
            resource_id,
            date,
        } => {
            write_ok(availability::daily_usage_by_id(
                &catalog,
                &ledger,
                &resource_id,
                date,
            ));
        }
        Request::UsageRange {
            catalog,
            ledger,
            resource_id,
            start,
            end,
        } => {
            let range = DateRange::new(start, end);
            write_ok(availability::usage_for_range_by_id(
                &catalog,
                &ledger,
                &resource_id,
                &range,
            ));
        }
        Request::LowestAvailable {
            catalog,
            ledger,
            resource_id,
            start,
            end,
        } => {
            let range = DateRange::new(start, end);
            write_ok(availability::lowest_available(
                &catalog,
                &ledger,
                &resource_id,
                &range,
            ));
        }
        Request::ProjectUsage { ledger, window } => {
            write_ok(projects::project_usage_index(&ledger, &window));
        }
        Request::Tree { catalog, ordering } => {
            write_ok(grouping::build_resource_tree(&catalog, &ordering));
        }
    }
}
