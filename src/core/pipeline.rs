//! Sequencing of one weekly run: bootstrap or compare, nothing else.
//! File discovery and writes live in the CLI layer.

use crate::config::FieldProfile;
use crate::core::diff::diff;
use crate::core::identity::assert_unique_ids;
use crate::core::merge::apply_status_case;
use crate::errors::AppResult;
use crate::models::diff::{TAG_WEEK_TO_WEEK, TAG_WEEKLY_VS_LIVE};
use crate::models::snapshot::LIVE;
use crate::models::{DiffOutput, Snapshot};

#[derive(Debug, Clone)]
pub struct RunDiff {
    /// Canonical dataset against the new snapshot.
    pub live: DiffOutput,
    /// Previous weekly snapshot against the new one, when there was one.
    pub week: Option<DiffOutput>,
}

impl RunDiff {
    /// Both comparisons concatenated, live first.
    pub fn combined(&self) -> DiffOutput {
        let mut out = self.live.clone();
        if let Some(week) = &self.week {
            out.extend(week.clone());
        }
        out
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No canonical dataset existed: the new snapshot becomes it.
    Bootstrap(Snapshot),
    Compared(RunDiff),
}

/// Reconcile a freshly cleaned snapshot.
///
/// Without a canonical dataset the snapshot is adopted as-is (status
/// title-cased) and no diff is produced. Otherwise it is compared against
/// the canonical dataset and, if given, against the previous weekly snapshot.
pub fn reconcile(
    new: &Snapshot,
    canonical: Option<&Snapshot>,
    previous: Option<&Snapshot>,
    profile: &FieldProfile,
) -> AppResult<RunOutcome> {
    let Some(canonical) = canonical else {
        assert_unique_ids(new, &profile.identity_fields, &profile.separator)?;
        let mut seeded = new.clone().relabel(LIVE);
        apply_status_case(&mut seeded, &profile.status_field);
        return Ok(RunOutcome::Bootstrap(seeded));
    };

    let live = diff(canonical, new, profile, TAG_WEEKLY_VS_LIVE)?;
    let week = previous
        .map(|prev| diff(prev, new, profile, TAG_WEEK_TO_WEEK))
        .transpose()?;

    Ok(RunOutcome::Compared(RunDiff { live, week }))
}
