//! Human-readable output formatting

use crate::launcher::Plan;

/// One shell-quoted command line per step, in execution order.
pub fn format_human(plan: &Plan) -> String {
    let mut lines = Vec::with_capacity(2);
    if let Some(build) = &plan.build {
        lines.push(build.command_line());
    }
    lines.push(plan.run.command_line());
    lines.join("\n")
}
