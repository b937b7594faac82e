use crate::models::{ChangeType, DiffOutput};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW, color_for_change};
use std::fmt;

const BOLD: &str = "\x1b[1m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_DRY: &str = "🧪";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// Announce a write that was skipped because of `--dry-run`.
pub fn dry_run<T: fmt::Display>(msg: T) {
    println!("{YELLOW}{ICON_DRY} [dry-run]{RESET} {msg}");
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{CYAN}{BOLD}====================== {msg}{RESET}\n");
}

/// One line per change type, coloured, followed by the long-row count.
pub fn diff_summary(label: &str, diff: &DiffOutput) {
    println!("{BOLD}{label}{RESET}");
    for kind in [
        ChangeType::NewRecord,
        ChangeType::RemovedRecord,
        ChangeType::ValueChanged,
    ] {
        println!(
            "  {}{:<15}{} {}",
            color_for_change(kind),
            kind.as_str(),
            RESET,
            diff.count(kind)
        );
    }
    println!("  {:<15} {}", "long rows", diff.long.len());
}
