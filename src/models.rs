// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a ledger entry. Amounts are stored as positive magnitudes;
/// the kind decides the sign when balances are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<TxKind> {
        match s {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category: Option<String>,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Amount with its sign applied: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Card,
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Cash => "cash",
            AccountKind::Card => "card",
            AccountKind::Savings => "savings",
        }
    }

    pub fn parse(s: &str) -> Option<AccountKind> {
        match s {
            "cash" => Some(AccountKind::Cash),
            "card" => Some(AccountKind::Card),
            "savings" => Some(AccountKind::Savings),
            _ => None,
        }
    }
}

/// A named balance bucket. The balance itself is never stored; it is derived
/// from the account's transactions at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: Option<AccountKind>,
    pub color: Option<String>,
    pub savings_goal: Option<Decimal>,
    pub goal_enabled: bool,
}

impl Account {
    /// The goal threshold in effect, if the feature is switched on.
    pub fn active_goal(&self) -> Option<Decimal> {
        if !self.goal_enabled {
            return None;
        }
        self.savings_goal.filter(|g| *g > Decimal::ZERO)
    }
}

/// A recurring monthly obligation with a due day and a per-month
/// completion record keyed by "YYYY-MM" tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub name: String,
    pub kind: TxKind,
    pub category: Option<String>,
    pub day_of_month: u32,
    pub completed_months: BTreeSet<String>,
}

impl Reminder {
    pub fn is_completed_for(&self, month_token: &str) -> bool {
        self.completed_months.contains(month_token)
    }
}

/// A (year, month) pair selecting a calendar reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<MonthRef> {
        if (1..=12).contains(&month) {
            Some(MonthRef { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> MonthRef {
        MonthRef {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "YYYY-MM" token used as the completion key for reminders.
    pub fn token(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Rejections raised at the form-submission boundary, before anything is
/// written. The aggregation core assumes records that passed these checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("name must not be empty")]
    EmptyName,
    #[error("an expense requires a category")]
    ExpenseWithoutCategory,
    #[error("an income must not carry a category")]
    IncomeWithCategory,
    #[error("day of month must be between 1 and 31, got {0}")]
    DayOfMonthOutOfRange(u32),
}

pub fn check_transaction(
    description: &str,
    amount: Decimal,
    kind: TxKind,
    category: Option<&str>,
) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    check_kind_category(kind, category)
}

pub fn check_reminder(
    name: &str,
    kind: TxKind,
    category: Option<&str>,
    day_of_month: u32,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(1..=31).contains(&day_of_month) {
        return Err(ValidationError::DayOfMonthOutOfRange(day_of_month));
    }
    check_kind_category(kind, category)
}

fn check_kind_category(kind: TxKind, category: Option<&str>) -> Result<(), ValidationError> {
    match (kind, category) {
        (TxKind::Expense, None) => Err(ValidationError::ExpenseWithoutCategory),
        (TxKind::Expense, Some(c)) if c.trim().is_empty() => {
            Err(ValidationError::ExpenseWithoutCategory)
        }
        (TxKind::Income, Some(_)) => Err(ValidationError::IncomeWithCategory),
        _ => Ok(()),
    }
}
