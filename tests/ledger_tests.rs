// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::ledger::{self, CategoryFilter, SavingsTier};
use billfold::models::{MonthRef, Transaction, TxKind};
use rust_decimal::Decimal;

fn tx(id: i64, amount: i64, kind: TxKind, category: Option<&str>, date: &str) -> Transaction {
    Transaction {
        id,
        account_id: 1,
        description: format!("tx {}", id),
        amount: Decimal::from(amount),
        kind,
        category: category.map(|c| c.to_string()),
        date: chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").unwrap(),
    }
}

fn month(year: i32, m: u32) -> MonthRef {
    MonthRef::new(year, m).unwrap()
}

#[test]
fn empty_snapshot_yields_zeroes() {
    let s = ledger::summarize(&[], month(2025, 1));
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.monthly_income, Decimal::ZERO);
    assert_eq!(s.monthly_expenses, Decimal::ZERO);
    assert!(s.for_month.is_empty());
}

#[test]
fn single_income_in_month() {
    let txs = vec![tx(1, 50000, TxKind::Income, None, "2025-01-01T00:00:00")];
    let s = ledger::summarize(&txs, month(2025, 1));
    assert_eq!(s.balance, Decimal::from(50000));
    assert_eq!(s.monthly_income, Decimal::from(50000));
    assert_eq!(s.monthly_expenses, Decimal::ZERO);
    assert_eq!(s.for_month.len(), 1);
}

#[test]
fn balance_is_lifetime_but_totals_are_monthly() {
    let txs = vec![
        tx(1, 50000, TxKind::Income, None, "2025-01-01T00:00:00"),
        tx(2, 20000, TxKind::Expense, Some("Food"), "2025-02-05T12:00:00"),
    ];
    let s = ledger::summarize(&txs, month(2025, 2));
    assert_eq!(s.balance, Decimal::from(30000));
    assert_eq!(s.monthly_income, Decimal::ZERO);
    assert_eq!(s.monthly_expenses, Decimal::from(20000));
    // January's income is in the balance regardless of reference month.
    let january = ledger::summarize(&txs, month(2025, 1));
    assert_eq!(january.balance, Decimal::from(30000));
    assert_eq!(january.monthly_income, Decimal::from(50000));
}

#[test]
fn month_window_is_boundary_exact() {
    let txs = vec![
        // Last second of January: out.
        tx(1, 100, TxKind::Income, None, "2025-01-31T23:59:59"),
        // First instant of February: in.
        tx(2, 200, TxKind::Income, None, "2025-02-01T00:00:00"),
    ];
    let s = ledger::summarize(&txs, month(2025, 2));
    assert_eq!(s.monthly_income, Decimal::from(200));
    assert_eq!(s.for_month.len(), 1);
    assert_eq!(s.for_month[0].id, 2);
}

#[test]
fn same_month_different_year_excluded() {
    let txs = vec![
        tx(1, 100, TxKind::Income, None, "2024-02-10T00:00:00"),
        tx(2, 200, TxKind::Income, None, "2025-02-10T00:00:00"),
    ];
    let s = ledger::summarize(&txs, month(2025, 2));
    assert_eq!(s.monthly_income, Decimal::from(200));
}

#[test]
fn category_filter_narrows_unless_all() {
    let txs = vec![
        tx(1, 100, TxKind::Expense, Some("Food"), "2025-03-01T00:00:00"),
        tx(2, 200, TxKind::Expense, Some("Rent"), "2025-03-02T00:00:00"),
        tx(3, 300, TxKind::Income, None, "2025-03-03T00:00:00"),
    ];
    let s = ledger::summarize(&txs, month(2025, 3));

    let all = ledger::filter_by_category(&s.for_month, &CategoryFilter::All);
    assert_eq!(all.len(), 3);

    let food = ledger::filter_by_category(&s.for_month, &CategoryFilter::Category("Food".into()));
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].id, 1);

    let none = ledger::filter_by_category(&s.for_month, &CategoryFilter::Category("Travel".into()));
    assert!(none.is_empty());
}

#[test]
fn expense_breakdown_sorts_descending_with_shares() {
    let txs = vec![
        tx(1, 25000, TxKind::Expense, Some("Food"), "2025-03-01T00:00:00"),
        tx(2, 60000, TxKind::Expense, Some("Rent"), "2025-03-02T00:00:00"),
        tx(3, 15000, TxKind::Expense, Some("Food"), "2025-03-03T00:00:00"),
        tx(4, 10000, TxKind::Expense, Some("Transport"), "2025-03-04T00:00:00"),
        // Income never enters the breakdown.
        tx(5, 500000, TxKind::Income, None, "2025-03-05T00:00:00"),
    ];
    let shares = ledger::expenses_by_category(&txs);

    assert_eq!(shares.len(), 3);
    assert_eq!(shares[0].category, "Rent");
    assert_eq!(shares[0].total, Decimal::from(60000));
    assert_eq!(shares[1].category, "Food");
    assert_eq!(shares[1].total, Decimal::from(40000));
    assert_eq!(shares[2].category, "Transport");
    assert_eq!(shares[2].total, Decimal::from(10000));

    // 60000/110000, 40000/110000, 10000/110000 of the total spend.
    let percent_sum: Decimal = shares.iter().map(|s| s.percent).sum();
    assert_eq!(percent_sum, Decimal::ONE_HUNDRED);
    assert!(shares[0].percent > shares[1].percent);
    assert!(shares[1].percent > shares[2].percent);
}

#[test]
fn expense_breakdown_empty_without_categorized_expenses() {
    assert!(ledger::expenses_by_category(&[]).is_empty());

    // Income alone yields no breakdown.
    let income_only = vec![tx(1, 1000, TxKind::Income, None, "2025-03-01T00:00:00")];
    assert!(ledger::expenses_by_category(&income_only).is_empty());
}

#[test]
fn savings_disabled_without_goal() {
    assert!(ledger::savings_progress(Decimal::from(1000), Decimal::ZERO, None).is_none());
    assert!(ledger::savings_progress(Decimal::from(1000), Decimal::ZERO, Some(Decimal::ZERO)).is_none());
}

#[test]
fn savings_tier_boundaries_are_exact() {
    let goal = Some(Decimal::from(100000));
    let pct = |saved: &str| {
        ledger::savings_progress(saved.parse().unwrap(), Decimal::ZERO, goal).unwrap()
    };

    assert_eq!(pct("100000").tier, SavingsTier::GoalMet); // exactly 100%
    assert_eq!(pct("99999").tier, SavingsTier::OnTrack); // 99.999%
    assert_eq!(pct("60000").tier, SavingsTier::OnTrack); // exactly 60%
    assert_eq!(pct("59999").tier, SavingsTier::Behind); // 59.999%
}

#[test]
fn savings_percent_floors_at_zero_when_overspending() {
    let p = ledger::savings_progress(
        Decimal::from(1000),
        Decimal::from(5000),
        Some(Decimal::from(10000)),
    )
    .unwrap();
    assert_eq!(p.saved, Decimal::from(-4000));
    assert_eq!(p.percent, Decimal::ZERO);
    assert_eq!(p.tier, SavingsTier::Behind);
}
