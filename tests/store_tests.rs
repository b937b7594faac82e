mod common;

use common::{LEGACY_HEADER, legacy_row, snapshot, write_csv};
use stakesync::config::FieldProfile;
use stakesync::config::layout::{CLEANED_PREFIX, WIDE_PREFIX};
use stakesync::core::diff::diff;
use stakesync::errors::AppError;
use stakesync::models::ChangeType;
use stakesync::models::diff::{TAG_WEEK_TO_WEEK, TAG_WEEKLY_VS_LIVE};
use stakesync::store::approval_log::{self, LogEntry, ROW_ADDED, ROW_UPDATED};
use stakesync::store::{CanonicalStore, csv_io, discovery};
use std::fs;

fn store_in(dir: &std::path::Path) -> CanonicalStore {
    CanonicalStore::new(
        dir.join("live").join("live.csv"),
        dir.join("live").join("backups"),
        false,
    )
}

#[test]
fn read_snapshot_keeps_header_order_and_empty_cells() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_csv(
        &tmp.path().join("weekly.csv"),
        &[LEGACY_HEADER, &legacy_row("Alice", "Acme", "Pending", ""), ",,,,,,"],
    );

    let snap = csv_io::read_snapshot(&path, "weekly").unwrap();
    assert_eq!(snap.columns.len(), 7);
    assert_eq!(snap.columns[0], "name");
    assert_eq!(snap.len(), 2);
    assert!(snap.records[0].value("date_cleared").is_absent());
    assert!(snap.records[1].is_blank());
}

#[test]
fn wide_file_is_parsed_back_into_diff_records() {
    let tmp = tempfile::tempdir().unwrap();
    let old = snapshot(
        "live",
        &[&[("name", "Alice"), ("company", "Acme"), ("status", "pending")]],
    );
    let new = snapshot(
        "weekly",
        &[
            &[("name", "Alice"), ("company", "Acme"), ("status", "approved")],
            &[("name", "Bob"), ("company", "Globex"), ("status", "pending")],
        ],
    );
    let profile = FieldProfile::legacy();
    let out = diff(&old, &new, &profile, TAG_WEEKLY_VS_LIVE).unwrap();

    let path = tmp.path().join("Changes_2024-03-10.csv");
    csv_io::write_wide(&path, &out.wide, &profile.wide_layout()).unwrap();

    let header = fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("row_id,change_type,changed_fields,tag,name_old,name_new,"));

    let parsed = csv_io::read_wide(&path).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].change_type, ChangeType::NewRecord);
    assert_eq!(parsed[0].new_value("name").to_cell(), "Bob");
    assert_eq!(parsed[1].row_id, "alice_acme");
    assert_eq!(parsed[1].changed_fields, vec!["status"]);
    assert_eq!(parsed[1].old_value("status").to_cell(), "pending");
    assert!(parsed.iter().all(|r| r.tag == TAG_WEEKLY_VS_LIVE));
}

#[test]
fn wide_file_keeps_the_comparison_tag_of_each_row() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_csv(
        &tmp.path().join("Changes_2024-03-10.csv"),
        &[
            "row_id,change_type,changed_fields,tag,status_old,status_new",
            "a_1,value_changed,status,weekly_vs_live,pending,approved",
            "b_2,value_changed,status,week_to_week,pending,denied",
        ],
    );

    let parsed = csv_io::read_wide(&path).unwrap();
    assert!(parsed[0].is_live_change());
    assert_eq!(parsed[1].tag, TAG_WEEK_TO_WEEK);
    assert!(!parsed[1].is_live_change());
}

#[test]
fn wide_file_without_tag_column_holds_live_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_csv(
        &tmp.path().join("Changes_2024-03-10.csv"),
        &[
            "row_id,change_type,changed_fields,status_old,status_new",
            "a_1,value_changed,status,pending,approved",
        ],
    );

    let parsed = csv_io::read_wide(&path).unwrap();
    assert_eq!(parsed[0].tag, TAG_WEEKLY_VS_LIVE);
    assert_eq!(parsed[0].new_value("status").to_cell(), "approved");
}

#[test]
fn wide_file_without_required_columns_is_a_schema_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_csv(&tmp.path().join("bad.csv"), &["row_id,status_old,status_new"]);

    match csv_io::read_wide(&path) {
        Err(AppError::Schema { missing, .. }) => {
            assert_eq!(missing, vec!["change_type", "changed_fields"]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn wide_file_with_unknown_change_type_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_csv(
        &tmp.path().join("bad.csv"),
        &["row_id,change_type,changed_fields", "a_b,renamed,status"],
    );
    assert!(matches!(csv_io::read_wide(&path), Err(AppError::InvalidInput(_))));
}

#[test]
fn long_file_has_fixed_columns() {
    let tmp = tempfile::tempdir().unwrap();
    let old = snapshot("live", &[]);
    let new = snapshot("weekly", &[&[("name", "Bob"), ("company", "Globex")]]);
    let out = diff(&old, &new, &FieldProfile::legacy(), TAG_WEEKLY_VS_LIVE).unwrap();

    let path = tmp.path().join("long.csv");
    csv_io::write_long(&path, &out.long).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["row_id,field,old,new,tag", "bob_globex,_row,,present,weekly_vs_live"]);
}

#[test]
fn bootstrap_writes_once_and_refuses_to_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());
    let snap = snapshot("live", &[&[("name", "Alice"), ("company", "Acme")]]);

    assert!(!store.exists());
    store.bootstrap(&snap).unwrap();
    assert!(store.exists());
    assert_eq!(store.load().unwrap().len(), 1);

    assert!(matches!(store.bootstrap(&snap), Err(AppError::InvalidInput(_))));
}

#[test]
fn commit_backs_up_before_replacing() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());
    store
        .bootstrap(&snapshot("live", &[&[("name", "Alice"), ("company", "Acme")]]))
        .unwrap();
    let before = fs::read_to_string(&store.path).unwrap();

    let updated = snapshot(
        "live",
        &[
            &[("name", "Alice"), ("company", "Acme")],
            &[("name", "Bob"), ("company", "Globex")],
        ],
    );
    let backup = store.commit(&updated).unwrap();

    assert_eq!(fs::read_to_string(&backup).unwrap(), before);
    let name = backup.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("live_backup_"), "{name}");
    assert_eq!(store.load().unwrap().len(), 2);

    let leftovers: Vec<_> = fs::read_dir(store.path.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn back_to_back_commits_keep_every_backup() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());
    let version = |v: &str| snapshot("live", &[&[("name", "a"), ("company", "x"), ("status", v)]]);

    store.bootstrap(&version("V0")).unwrap();
    let first = store.commit(&version("V1")).unwrap();
    let second = store.commit(&version("V2")).unwrap();

    assert_ne!(first, second);
    assert_eq!(fs::read_dir(&store.backups).unwrap().count(), 2);
    assert!(fs::read_to_string(&first).unwrap().contains("V0"));
    assert!(fs::read_to_string(&second).unwrap().contains("V1"));
    assert!(fs::read_to_string(&store.path).unwrap().contains("V2"));
}

#[test]
fn commit_without_canonical_fails_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());

    let err = store.commit(&snapshot("live", &[])).unwrap_err();
    assert!(matches!(err, AppError::MissingSource(_)));
    assert!(!store.exists());
}

#[test]
fn compressed_backup_keeps_only_the_zip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(tmp.path());
    store
        .bootstrap(&snapshot("live", &[&[("name", "Alice"), ("company", "Acme")]]))
        .unwrap();

    let dest = tmp.path().join("manual").join("copy.csv");
    let kept = store.backup_to(&dest, true).unwrap();

    assert_eq!(kept, tmp.path().join("manual").join("copy.zip"));
    assert!(kept.exists());
    assert!(!dest.exists());
}

#[test]
fn discovery_by_name_and_previous_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    for date in ["2024-03-03", "2024-03-10", "2024-03-17"] {
        write_csv(&dir.join(format!("{CLEANED_PREFIX}{date}.csv")), &["name"]);
    }
    write_csv(&dir.join(format!("{WIDE_PREFIX}2024-03-17.csv")), &["row_id"]);

    let newest = discovery::newest_by_name(dir, CLEANED_PREFIX).unwrap();
    assert!(newest.ends_with("Weekly_Cleaned_2024-03-17.csv"));

    let prev = discovery::previous_by_name(dir, CLEANED_PREFIX, "Weekly_Cleaned_2024-03-17.csv")
        .unwrap()
        .unwrap();
    assert!(prev.ends_with("Weekly_Cleaned_2024-03-10.csv"));

    let none = discovery::previous_by_name(dir, CLEANED_PREFIX, "Weekly_Cleaned_2024-03-03.csv")
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn discovery_in_an_empty_directory_is_a_missing_source() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        discovery::newest_by_mtime(tmp.path()),
        Err(AppError::MissingSource(_))
    ));
    assert!(matches!(
        discovery::newest_by_name(tmp.path(), WIDE_PREFIX),
        Err(AppError::MissingSource(_))
    ));
}

#[test]
fn newest_by_mtime_ignores_non_csv_files() {
    let tmp = tempfile::tempdir().unwrap();
    write_csv(&tmp.path().join("export.csv"), &["name"]);
    fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

    let found = discovery::newest_by_mtime(tmp.path()).unwrap();
    assert!(found.ends_with("export.csv"));
}

#[test]
fn approval_log_appends_and_reads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let log = tmp.path().join("logs").join("manual_updates.log");

    assert!(approval_log::read(&log).unwrap().is_empty());

    approval_log::append(&log, ROW_UPDATED, ["alice_acme", "bob_globex"]).unwrap();
    approval_log::append(&log, ROW_ADDED, Vec::<String>::new()).unwrap();
    approval_log::append(&log, ROW_ADDED, ["carol_initech"]).unwrap();

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.lines().next().unwrap().ends_with("] Row updated: alice_acme"));

    let entries = approval_log::read(&log).unwrap();
    let seen: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.operation.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("Row updated", "alice_acme"),
            ("Row updated", "bob_globex"),
            ("Row added", "carol_initech"),
        ]
    );
}

#[test]
fn log_line_parsing() {
    let e = LogEntry::parse("[2024-03-10 09:15:00] Row updated: alice_acme").unwrap();
    assert_eq!(e.stamp, "2024-03-10 09:15:00");
    assert_eq!(e.operation, "Row updated");
    assert_eq!(e.target, "alice_acme");
    assert_eq!(e.render(), "[2024-03-10 09:15:00] Row updated: alice_acme");

    assert!(LogEntry::parse("garbage").is_none());
}
