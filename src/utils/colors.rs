//! ANSI color helper utilities for terminal output.

use crate::models::ChangeType;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// new → green, removed → red, changed → yellow.
pub fn color_for_change(kind: ChangeType) -> &'static str {
    match kind {
        ChangeType::NewRecord => GREEN,
        ChangeType::RemovedRecord => RED,
        ChangeType::ValueChanged => YELLOW,
    }
}

/// Grey out empty cells, leave the others as they are.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}-{RESET}")
    } else {
        value.to_string()
    }
}
