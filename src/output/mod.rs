//! Output formatting for `--dry-run`

pub mod human;
pub mod json;

use crate::launcher::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Render a plan in the requested format.
pub fn format_plan(plan: &Plan, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_human(plan),
        OutputFormat::Json => json::format_json(plan),
    }
}
