//! Request handlers.

mod page;
mod reports;

pub use page::{index_page, PageQuery};
pub use reports::{get_report, list_reports};

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
