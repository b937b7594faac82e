use crate::errors::AppResult;
use crate::store::approval_log::{self, BACKUP_CREATED, LIVE_SEEDED, ROW_ADDED, ROW_UPDATED};
use ansi_term::Colour;
use std::path::Path;

const TARGET_WIDTH: usize = 60;

/// Colour of each operation of the approval log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        ROW_ADDED => Colour::Green,
        ROW_UPDATED => Colour::Yellow,
        BACKUP_CREATED => Colour::Blue,
        LIVE_SEEDED => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() > TARGET_WIDTH {
        let mut t: String = s.chars().take(TARGET_WIDTH - 3).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print every entry of the approval log, numbered from 1.
    pub fn print_log(path: &Path) -> AppResult<usize> {
        let entries = approval_log::read(path)?;
        if entries.is_empty() {
            println!("📜 Approval log is empty: {}", path.display());
            return Ok(0);
        }

        let id_w = entries.len().to_string().len();
        let op_w = entries.iter().map(|e| e.operation.len()).max().unwrap_or(0);

        println!("📜 Approval log:\n");
        for (i, e) in entries.iter().enumerate() {
            let color = color_for_operation(&e.operation);
            let padding = " ".repeat(op_w.saturating_sub(e.operation.len()));
            println!(
                "{:>id_w$}: {} | {}{} => {}",
                i + 1,
                e.stamp,
                color.paint(e.operation.as_str()),
                padding,
                truncate(&e.target),
                id_w = id_w
            );
        }

        Ok(entries.len())
    }
}
