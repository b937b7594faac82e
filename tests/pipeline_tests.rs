mod common;

use common::snapshot;
use stakesync::config::FieldProfile;
use stakesync::core::pipeline::{RunOutcome, reconcile};
use stakesync::errors::AppError;
use stakesync::models::diff::{TAG_WEEK_TO_WEEK, TAG_WEEKLY_VS_LIVE};
use stakesync::models::snapshot::LIVE;
use stakesync::models::{ChangeType, Snapshot};

fn weekly() -> Snapshot {
    snapshot(
        "weekly",
        &[
            &[("name", "Alice"), ("company", "Acme"), ("status", "approved")],
            &[("name", "Bob"), ("company", "Globex"), ("status", "pending review")],
        ],
    )
}

#[test]
fn missing_canonical_bootstraps_from_the_new_snapshot() {
    let outcome = reconcile(&weekly(), None, None, &FieldProfile::legacy()).unwrap();

    let RunOutcome::Bootstrap(seeded) = outcome else {
        panic!("expected bootstrap");
    };
    assert_eq!(seeded.label, LIVE);
    assert_eq!(seeded.len(), 2);
    assert_eq!(seeded.records[1].value("status").to_cell(), "Pending Review");
}

#[test]
fn bootstrap_rejects_duplicate_identities() {
    let dup = snapshot(
        "weekly",
        &[
            &[("name", "Alice"), ("company", "Acme")],
            &[("name", "alice"), ("company", "acme")],
        ],
    );

    let err = reconcile(&dup, None, None, &FieldProfile::legacy()).unwrap_err();
    assert!(matches!(err, AppError::DuplicateIdentity { .. }));
}

#[test]
fn canonical_only_comparison_has_no_week_section() {
    let live = snapshot(
        "live",
        &[&[("name", "Alice"), ("company", "Acme"), ("status", "Pending")]],
    );

    let RunOutcome::Compared(result) =
        reconcile(&weekly(), Some(&live), None, &FieldProfile::legacy()).unwrap()
    else {
        panic!("expected a comparison");
    };

    assert!(result.week.is_none());
    assert_eq!(result.live.count(ChangeType::NewRecord), 1);
    assert_eq!(result.live.count(ChangeType::ValueChanged), 1);
    assert!(result.live.long.iter().all(|e| e.tag == TAG_WEEKLY_VS_LIVE));
}

#[test]
fn previous_snapshot_adds_a_week_to_week_section_after_live() {
    let live = weekly();
    let previous = snapshot(
        "previous-weekly",
        &[&[("name", "Alice"), ("company", "Acme"), ("status", "pending")]],
    );
    let mut new = weekly();
    new.records[0].set("status", "withdrawn".into());

    let RunOutcome::Compared(result) =
        reconcile(&new, Some(&live), Some(&previous), &FieldProfile::legacy()).unwrap()
    else {
        panic!("expected a comparison");
    };

    let week = result.week.as_ref().expect("week section");
    assert_eq!(week.count(ChangeType::NewRecord), 1);
    assert_eq!(week.count(ChangeType::ValueChanged), 1);

    let combined = result.combined();
    assert_eq!(combined.wide.len(), result.live.wide.len() + week.wide.len());
    let live_rows = combined.wide.iter().filter(|r| r.is_live_change()).count();
    assert_eq!(live_rows, result.live.wide.len());
    assert_eq!(combined.wide.last().map(|r| r.tag.as_str()), Some(TAG_WEEK_TO_WEEK));
    let tags: Vec<&str> = combined.long.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags.first(), Some(&TAG_WEEKLY_VS_LIVE));
    assert_eq!(tags.last(), Some(&TAG_WEEK_TO_WEEK));
}

#[test]
fn unchanged_week_produces_an_empty_live_diff() {
    let live = weekly();
    let RunOutcome::Compared(result) =
        reconcile(&weekly(), Some(&live), None, &FieldProfile::legacy()).unwrap()
    else {
        panic!("expected a comparison");
    };
    assert!(result.live.is_empty());
    assert!(result.combined().is_empty());
}
