//! JSON output formatting

use crate::launcher::Plan;
use serde_json::json;

pub fn format_json(plan: &Plan) -> String {
    let data = serde_json::to_value(plan.view()).unwrap_or(json!(null));
    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
