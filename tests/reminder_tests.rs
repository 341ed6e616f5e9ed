// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use billfold::models::{MonthRef, Reminder, TxKind};
use billfold::reminders::{due_date, pending, toggle_completion, ReminderStatus};
use chrono::NaiveDate;

fn reminder(id: i64, day: u32, completed: &[&str]) -> Reminder {
    Reminder {
        id,
        name: format!("reminder {}", id),
        kind: TxKind::Expense,
        category: Some("Bills".into()),
        day_of_month: day,
        completed_months: completed.iter().map(|s| s.to_string()).collect(),
    }
}

fn month(year: i32, m: u32) -> MonthRef {
    MonthRef::new(year, m).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn completed_month_is_excluded_regardless_of_dates() {
    let r = reminder(1, 15, &["2025-01"]);
    // Way overdue in January, but marked complete: not surfaced.
    let out = pending(&[r.clone()], month(2025, 1), date(2025, 1, 31));
    assert!(out.is_empty());

    // Same reminder in February: surfaced with a fresh status.
    let out = pending(&[r], month(2025, 2), date(2025, 2, 1));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].due_date, date(2025, 2, 15));
}

#[test]
fn status_thresholds() {
    let r = reminder(1, 20, &[]);
    let m = month(2025, 3);

    // Due in exactly 5 days: warning.
    let out = pending(&[r.clone()], m, date(2025, 3, 15));
    assert_eq!(out[0].days_until_due, 5);
    assert_eq!(out[0].status, ReminderStatus::Warning);

    // Due in 6 days: still on track.
    let out = pending(&[r.clone()], m, date(2025, 3, 14));
    assert_eq!(out[0].days_until_due, 6);
    assert_eq!(out[0].status, ReminderStatus::Pending);

    // Due today: warning, not overdue.
    let out = pending(&[r.clone()], m, date(2025, 3, 20));
    assert_eq!(out[0].days_until_due, 0);
    assert_eq!(out[0].status, ReminderStatus::Warning);

    // One day past due: overdue.
    let out = pending(&[r], m, date(2025, 3, 21));
    assert_eq!(out[0].days_until_due, -1);
    assert_eq!(out[0].status, ReminderStatus::Overdue);
}

#[test]
fn day_of_month_clamps_to_month_length() {
    assert_eq!(due_date(month(2025, 2), 31), date(2025, 2, 28));
    assert_eq!(due_date(month(2024, 2), 31), date(2024, 2, 29)); // leap year
    assert_eq!(due_date(month(2025, 4), 31), date(2025, 4, 30));
    assert_eq!(due_date(month(2025, 1), 31), date(2025, 1, 31));
}

#[test]
fn output_preserves_snapshot_order() {
    let rs = vec![reminder(1, 28, &[]), reminder(2, 3, &[]), reminder(3, 15, &[])];
    let out = pending(&rs, month(2025, 5), date(2025, 5, 1));
    let ids: Vec<i64> = out.iter().map(|p| p.reminder.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn toggle_is_idempotent_both_ways() {
    let empty = BTreeSet::new();

    let once = toggle_completion(&empty, "2025-03", true);
    let twice = toggle_completion(&once, "2025-03", true);
    assert_eq!(once, twice);
    assert_eq!(twice.iter().filter(|m| m.as_str() == "2025-03").count(), 1);

    let removed = toggle_completion(&twice, "2025-03", false);
    assert!(removed.is_empty());
    let removed_again = toggle_completion(&removed, "2025-03", false);
    assert!(removed_again.is_empty());
}

#[test]
fn toggle_does_not_mutate_input() {
    let mut start = BTreeSet::new();
    start.insert("2025-01".to_string());
    let next = toggle_completion(&start, "2025-02", true);
    assert_eq!(start.len(), 1);
    assert_eq!(next.len(), 2);
}

#[test]
fn month_token_formatting() {
    assert_eq!(month(2025, 3).token(), "2025-03");
    assert_eq!(month(2025, 12).token(), "2025-12");
}
