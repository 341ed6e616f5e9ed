// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::db;
use rusqlite::Connection;

#[test]
fn schema_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("billfold.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(name) VALUES ('Main')",
        [],
    )
    .unwrap();
    drop(conn);

    // Re-opening and re-initializing must not clobber existing data.
    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    let accounts = db::load_accounts(&conn).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Main");
}

#[test]
fn foreign_keys_enforced_on_transactions() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    // No account with id 99 exists.
    let res = conn.execute(
        "INSERT INTO transactions(account_id, description, amount, kind, category, date)
         VALUES (99, 'x', '10', 'income', NULL, '2025-01-01T00:00:00')",
        [],
    );
    assert!(res.is_err());
}

#[test]
fn load_reminders_folds_completions_per_reminder() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO reminders(name, kind, category, day_of_month) VALUES ('A','expense','Bills',5)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO reminders(name, kind, category, day_of_month) VALUES ('B','income',NULL,20)",
        [],
    )
    .unwrap();
    db::set_reminder_completion(&conn, 1, "2025-01", true).unwrap();
    db::set_reminder_completion(&conn, 1, "2025-02", true).unwrap();
    db::set_reminder_completion(&conn, 2, "2025-01", true).unwrap();

    let reminders = db::load_reminders(&conn).unwrap();
    assert_eq!(reminders.len(), 2);
    assert_eq!(reminders[0].completed_months.len(), 2);
    assert_eq!(reminders[1].completed_months.len(), 1);
    assert!(reminders[1].is_completed_for("2025-01"));
}
