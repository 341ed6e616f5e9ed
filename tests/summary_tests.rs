// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::models::MonthRef;
use billfold::{cli, commands, db, ledger};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn run(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["billfold"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(conn, sub),
        Some(("tx", sub)) => commands::transactions::handle(conn, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn snapshot_summary_end_to_end() {
    let mut conn = setup();
    run(&mut conn, &["account", "add", "Main"]).unwrap();
    run(
        &mut conn,
        &["tx", "add", "--account", "Main", "--amount", "50000", "--desc", "Pay",
          "--kind", "income", "--date", "2025-01-01"],
    )
    .unwrap();
    run(
        &mut conn,
        &["tx", "add", "--account", "Main", "--amount", "20000", "--desc", "Groceries",
          "--kind", "expense", "--category", "Food", "--date", "2025-02-05"],
    )
    .unwrap();

    let snapshot = db::load_transactions(&conn, None).unwrap();
    let s = ledger::summarize(&snapshot, MonthRef::new(2025, 2).unwrap());
    assert_eq!(s.balance, Decimal::from(30000));
    assert_eq!(s.monthly_income, Decimal::ZERO);
    assert_eq!(s.monthly_expenses, Decimal::from(20000));
}

#[test]
fn account_scoped_snapshot_only_sees_own_transactions() {
    let mut conn = setup();
    run(&mut conn, &["account", "add", "A", "--balance", "1000"]).unwrap();
    run(&mut conn, &["account", "add", "B", "--balance", "9000"]).unwrap();

    let accounts = db::load_accounts(&conn).unwrap();
    let a = accounts.iter().find(|x| x.name == "A").unwrap();

    let snapshot = db::load_transactions(&conn, Some(a.id)).unwrap();
    assert_eq!(snapshot.len(), 1);
    let month = MonthRef::of(snapshot[0].date.date());
    let s = ledger::summarize(&snapshot, month);
    assert_eq!(s.balance, Decimal::from(1000));
}
