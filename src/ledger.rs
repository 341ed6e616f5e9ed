// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a transaction snapshot. Nothing here touches the
//! database; callers load a consistent snapshot and pass it in, and every
//! output is recomputed from scratch on each call.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{MonthRef, Transaction, TxKind};

/// Lifetime balance plus income/expense totals for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    /// Signed sum over ALL transactions, independent of the reference month.
    pub balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    /// Transactions whose date falls inside the reference month.
    pub for_month: Vec<Transaction>,
}

pub fn summarize(transactions: &[Transaction], month: MonthRef) -> MonthlySummary {
    let balance = transactions
        .iter()
        .fold(Decimal::ZERO, |acc, t| acc + t.signed_amount());

    let for_month: Vec<Transaction> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect();

    let mut monthly_income = Decimal::ZERO;
    let mut monthly_expenses = Decimal::ZERO;
    for t in &for_month {
        match t.kind {
            TxKind::Income => monthly_income += t.amount,
            TxKind::Expense => monthly_expenses += t.amount,
        }
    }

    MonthlySummary {
        balance,
        monthly_income,
        monthly_expenses,
        for_month,
    }
}

/// Category narrowing applied on top of the month view. The "show
/// everything" case is a typed variant rather than a magic string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn from_arg(arg: Option<&str>) -> CategoryFilter {
        match arg {
            Some(c) => CategoryFilter::Category(c.to_string()),
            None => CategoryFilter::All,
        }
    }
}

pub fn filter_by_category(transactions: &[Transaction], filter: &CategoryFilter) -> Vec<Transaction> {
    match filter {
        CategoryFilter::All => transactions.to_vec(),
        CategoryFilter::Category(name) => transactions
            .iter()
            .filter(|t| t.category.as_deref() == Some(name.as_str()))
            .cloned()
            .collect(),
    }
}

/// One category's slice of a month's spending.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Share of total expenses, 0-100.
    pub percent: Decimal,
}

/// Per-category expense totals, largest first, each with its share of the
/// overall spend. Income entries and uncategorized records contribute
/// nothing. Ties keep alphabetical order.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.kind != TxKind::Expense {
            continue;
        }
        if let Some(cat) = &t.category {
            *totals.entry(cat.clone()).or_insert(Decimal::ZERO) += t.amount;
        }
    }

    let grand_total: Decimal = totals.values().copied().sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| {
            let percent = if grand_total > Decimal::ZERO {
                total / grand_total * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            CategoryShare {
                category,
                total,
                percent,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsTier {
    GoalMet,
    OnTrack,
    Behind,
}

impl SavingsTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsTier::GoalMet => "goal met",
            SavingsTier::OnTrack => "on track",
            SavingsTier::Behind => "behind",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsProgress {
    pub saved: Decimal,
    pub goal: Decimal,
    pub percent: Decimal,
    pub tier: SavingsTier,
}

/// Progress toward a monthly savings goal. Returns `None` when no goal is
/// set (absent or non-positive), which disables the feature entirely.
///
/// Tier thresholds are fixed display constants: >= 100% met, >= 60% on
/// track, anything lower behind.
pub fn savings_progress(
    monthly_income: Decimal,
    monthly_expenses: Decimal,
    savings_goal: Option<Decimal>,
) -> Option<SavingsProgress> {
    let goal = savings_goal.filter(|g| *g > Decimal::ZERO)?;
    let saved = monthly_income - monthly_expenses;
    let percent = (saved / goal * Decimal::ONE_HUNDRED).max(Decimal::ZERO);

    let tier = if percent >= Decimal::ONE_HUNDRED {
        SavingsTier::GoalMet
    } else if percent >= Decimal::from(60) {
        SavingsTier::OnTrack
    } else {
        SavingsTier::Behind
    };

    Some(SavingsProgress {
        saved,
        goal,
        percent,
        tier,
    })
}
