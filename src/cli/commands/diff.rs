use crate::cli::parser::{Commands, DiffFormat};
use crate::config::Config;
use crate::core::clean::normalize_headers;
use crate::core::diff::diff;
use crate::errors::{AppError, AppResult};
use crate::models::{DiffOutput, Snapshot};
use crate::store::csv_io;
use crate::ui::messages::{diff_summary, info, success};
use crate::utils::colors::{RESET, color_for_change, colorize_optional};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

/// Handle the standalone `diff` command.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Diff {
        old,
        new,
        tag,
        wide,
        long,
        format,
    } = cmd
    {
        let old_snap = load(old)?;
        let new_snap = load(new)?;
        require_identity(&old_snap, cfg)?;
        require_identity(&new_snap, cfg)?;

        let out = diff(&old_snap, &new_snap, &cfg.fields, tag)?;
        diff_summary(tag, &out);

        if wide.is_none() && long.is_none() {
            print_table(&out);
            return Ok(());
        }

        if let Some(path) = wide {
            let path = expand_tilde(path);
            match format {
                DiffFormat::Csv => csv_io::write_wide(&path, &out.wide, &cfg.fields.wide_layout())?,
                DiffFormat::Json => csv_io::write_json(&path, &out.wide)?,
            }
            success(format!("Wide diff: {}", path.display()));
        }
        if let Some(path) = long {
            let path = expand_tilde(path);
            match format {
                DiffFormat::Csv => csv_io::write_long(&path, &out.long)?,
                DiffFormat::Json => csv_io::write_json(&path, &out.long)?,
            }
            success(format!("Long diff: {}", path.display()));
        }
    }

    Ok(())
}

fn load(path: &str) -> AppResult<Snapshot> {
    let path = expand_tilde(path);
    let raw = csv_io::read_snapshot(&path, path.display().to_string().as_str())?;
    let mut snapshot = normalize_headers(raw)?;
    snapshot.drop_blank_rows();
    Ok(snapshot)
}

/// Comparison columns may be missing on either side and are then skipped;
/// without the identity columns rows cannot be joined at all.
fn require_identity(snapshot: &Snapshot, cfg: &Config) -> AppResult<()> {
    let missing = snapshot.missing_columns(&cfg.fields.identity_fields);
    if !missing.is_empty() {
        return Err(AppError::schema(snapshot.label.clone(), missing));
    }
    Ok(())
}

fn print_table(out: &DiffOutput) {
    if out.wide.is_empty() {
        info("No differences.");
        return;
    }

    let mut table = Table::new(vec!["ROW_ID", "CHANGE", "FIELDS"]);
    for rec in &out.wide {
        table.add_row(vec![
            rec.row_id.clone(),
            format!(
                "{}{}{}",
                color_for_change(rec.change_type),
                rec.change_type.as_str(),
                RESET
            ),
            colorize_optional(&rec.changed_fields_display()),
        ]);
    }
    println!("\n{}", table.render());
}
