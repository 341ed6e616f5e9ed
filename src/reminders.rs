// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pending-reminder computation. Like the ledger module this is pure:
//! `today` is always an explicit argument, never read from the clock here,
//! so month/day boundary behavior is fully testable.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MonthRef, Reminder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Overdue,
    Warning,
    Pending,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::Warning => "warning",
            ReminderStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingReminder {
    pub reminder: Reminder,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub status: ReminderStatus,
}

/// Due date of a reminder inside the given month. A day-of-month beyond the
/// month's length (day 31 in February, say) clamps to the last valid day,
/// so the obligation never silently skips a month.
pub fn due_date(month: MonthRef, day_of_month: u32) -> NaiveDate {
    let day = day_of_month.clamp(1, month.days_in_month());
    NaiveDate::from_ymd_opt(month.year, month.month, day)
        .expect("clamped day is valid for its month")
}

fn classify(days_until_due: i64) -> ReminderStatus {
    if days_until_due < 0 {
        ReminderStatus::Overdue
    } else if days_until_due <= 5 {
        ReminderStatus::Warning
    } else {
        ReminderStatus::Pending
    }
}

/// Reminders still open for the reference month, with a freshness status
/// relative to `today`. A reminder marked complete for the month never
/// appears, no matter how its due day compares to today.
///
/// Output preserves snapshot order; callers wanting a day-of-month sort
/// (the settings listing does) sort on their side.
pub fn pending(reminders: &[Reminder], month: MonthRef, today: NaiveDate) -> Vec<PendingReminder> {
    let token = month.token();
    reminders
        .iter()
        .filter(|r| !r.is_completed_for(&token))
        .map(|r| {
            let due = due_date(month, r.day_of_month);
            let days_until_due = (due - today).num_days();
            PendingReminder {
                reminder: r.clone(),
                due_date: due,
                days_until_due,
                status: classify(days_until_due),
            }
        })
        .collect()
}

/// Set-add or set-remove of a month token. Idempotent in both directions;
/// returns a fresh set and leaves the input untouched — the caller owns
/// persisting the result.
pub fn toggle_completion(
    completed_months: &BTreeSet<String>,
    month_token: &str,
    completed: bool,
) -> BTreeSet<String> {
    let mut next = completed_months.clone();
    if completed {
        next.insert(month_token.to_string());
    } else {
        next.remove(month_token);
    }
    next
}
