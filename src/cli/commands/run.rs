use crate::cli::commands::approve::apply_decisions;
use crate::cli::commands::clean::{ingest, previous_snapshot};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::{RunOutcome, reconcile};
use crate::core::review::{AutoApprove, review};
use crate::errors::AppResult;
use crate::store::approval_log::{self, LIVE_SEEDED};
use crate::store::{CanonicalStore, csv_io};
use crate::ui::messages::{diff_summary, dry_run, info, success};
use crate::utils::date::today_str;

/// Handle the `run` command: clean, then bootstrap or compare.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Run {
        input,
        auto_update,
        dry_run: dry,
    } = cmd
    else {
        return Ok(());
    };

    let layout = cfg.layout();
    let ingested = ingest(cfg, input.as_deref(), *dry)?;

    let store = CanonicalStore::from_config(cfg);
    let canonical = store.load_optional()?;
    let previous = previous_snapshot(cfg, &ingested.archived)?;

    match reconcile(
        &ingested.snapshot,
        canonical.as_ref(),
        previous.as_ref(),
        &cfg.fields,
    )? {
        RunOutcome::Bootstrap(seeded) => {
            if *dry {
                dry_run(format!(
                    "canonical dataset would be created with {} rows at {}",
                    seeded.len(),
                    store.path.display()
                ));
                return Ok(());
            }
            store.bootstrap(&seeded)?;
            approval_log::append(
                &layout.log_file,
                LIVE_SEEDED,
                [store.path.display().to_string()],
            )?;
            success(format!(
                "No canonical dataset found: seeded {} with {} rows",
                store.path.display(),
                seeded.len()
            ));
        }
        RunOutcome::Compared(result) => {
            diff_summary("weekly_vs_live", &result.live);
            if let Some(week) = &result.week {
                diff_summary("week_to_week", week);
            }

            let combined = result.combined();
            let date = today_str();
            let wide_file = layout.wide_file(&date);
            let long_file = layout.long_file(&date);

            if *dry {
                dry_run(format!(
                    "{} wide rows would be written to {}",
                    combined.wide.len(),
                    wide_file.display()
                ));
                dry_run(format!(
                    "{} long rows would be written to {}",
                    combined.long.len(),
                    long_file.display()
                ));
            } else {
                csv_io::write_wide(&wide_file, &combined.wide, &cfg.fields.wide_layout())?;
                csv_io::write_long(&long_file, &combined.long)?;
                success(format!("Wide diff: {}", wide_file.display()));
                success(format!("Long diff: {}", long_file.display()));
            }

            if result.live.wide.is_empty() {
                info("Canonical dataset is up to date.");
                return Ok(());
            }

            if *auto_update {
                let Some(canonical) = canonical.as_ref() else {
                    return Ok(());
                };
                let summary = review(&result.live.wide, &mut AutoApprove)?;
                apply_decisions(cfg, &store, canonical, &summary.decisions, *dry)?;
            } else if !*dry {
                info("Run `stakesync approve` to review the changes.");
            }
        }
    }

    Ok(())
}
