use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::layout::WIDE_PREFIX;
use crate::core::merge::{MergeOutcome, check_canonical_schema, merge_approvals};
use crate::core::review::{ReviewSummary, TerminalProvider, review};
use crate::errors::AppResult;
use crate::models::{ApprovalDecision, DiffRecord, Snapshot};
use crate::store::approval_log::{self, BACKUP_CREATED, ROW_ADDED, ROW_UPDATED};
use crate::store::{CanonicalStore, csv_io, discovery};
use crate::ui::messages::{dry_run, header, info, success};
use crate::utils::date::today_str;
use crate::utils::path::expand_tilde;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Approve { file, dry_run } = cmd {
        let layout = cfg.layout();
        let path = match file {
            Some(f) => expand_tilde(f),
            None => discovery::newest_by_name(&layout.wide, WIDE_PREFIX)?,
        };

        let (records, skipped): (Vec<DiffRecord>, Vec<DiffRecord>) = csv_io::read_wide(&path)?
            .into_iter()
            .partition(DiffRecord::is_live_change);
        if !skipped.is_empty() {
            info(format!(
                "Skipping {} rows that do not compare against the canonical dataset",
                skipped.len()
            ));
        }
        if records.is_empty() {
            info(format!("No change to review in {}", path.display()));
            return Ok(());
        }

        let store = CanonicalStore::from_config(cfg);
        let canonical = store.load()?;
        check_canonical_schema(&canonical, &cfg.fields)?;

        header(format!("Reviewing {} rows from {}", records.len(), path.display()));
        let stdin = io::stdin();
        let mut provider = TerminalProvider::new(stdin.lock(), io::stdout());
        let summary = review(&records, &mut provider)?;
        println!();
        print_summary(&summary);

        apply_decisions(cfg, &store, &canonical, &summary.approved_decisions(), *dry_run)?;
    }

    Ok(())
}

fn print_summary(summary: &ReviewSummary) {
    println!("📋 Review summary");
    println!("  approved  : {}", summary.approved);
    println!("  overrides : {}", summary.overridden);
    println!("  rejected  : {}", summary.rejected);
    println!("  deferred  : {}", summary.deferred);
}

/// Merge approved decisions into the canonical dataset and persist the
/// result: backup, replace, approved-changes file, approval log.
pub(crate) fn apply_decisions(
    cfg: &Config,
    store: &CanonicalStore,
    canonical: &Snapshot,
    decisions: &[ApprovalDecision],
    dry: bool,
) -> AppResult<MergeOutcome> {
    let outcome = merge_approvals(canonical, decisions, &cfg.fields)?;

    if outcome.is_noop() {
        info("No approved change to apply.");
        return Ok(outcome);
    }

    if dry {
        dry_run(format!(
            "{} rows would be updated and {} appended in {}",
            outcome.updated.len(),
            outcome.appended.len(),
            store.path.display()
        ));
        return Ok(outcome);
    }

    let layout = cfg.layout();
    let backup = store.commit(&outcome.canonical)?;
    info(format!("Backup created: {}", backup.display()));

    let approved: Vec<DiffRecord> = decisions
        .iter()
        .filter(|d| d.verdict.is_approved())
        .map(ApprovalDecision::resolved_record)
        .collect();
    let approved_file = layout.approved_file(&today_str());
    csv_io::write_wide(&approved_file, &approved, &cfg.fields.wide_layout())?;

    approval_log::append(&layout.log_file, BACKUP_CREATED, [backup.display().to_string()])?;
    approval_log::append(&layout.log_file, ROW_UPDATED, &outcome.updated)?;
    approval_log::append(&layout.log_file, ROW_ADDED, &outcome.appended)?;

    success(format!(
        "Canonical dataset updated: {} rows changed, {} appended",
        outcome.updated.len(),
        outcome.appended.len()
    ));
    Ok(outcome)
}
