// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::ledger::{self, CategoryFilter};
use crate::utils::{current_month, fmt_money, id_for_account, maybe_print_json, parse_month, pretty_table};

#[derive(Serialize)]
struct SummaryOut {
    month: String,
    balance: String,
    monthly_income: String,
    monthly_expenses: String,
    transactions: usize,
    expenses_by_category: Vec<ShareOut>,
    savings: Option<SavingsOut>,
}

#[derive(Serialize)]
struct ShareOut {
    category: String,
    total: String,
    percent: String,
}

#[derive(Serialize)]
struct SavingsOut {
    saved: String,
    goal: String,
    percent: String,
    tier: String,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    // Snapshot first, then everything below is pure computation on it.
    let account = match sub.get_one::<String>("account") {
        Some(name) => {
            let id = id_for_account(conn, name)?;
            db::load_accounts(conn)?.into_iter().find(|a| a.id == id)
        }
        None => None,
    };
    let transactions = db::load_transactions(conn, account.as_ref().map(|a| a.id))?;

    let summary = ledger::summarize(&transactions, month);
    let filter = CategoryFilter::from_arg(sub.get_one::<String>("category").map(|s| s.as_str()));
    let shown = ledger::filter_by_category(&summary.for_month, &filter);

    let breakdown = ledger::expenses_by_category(&summary.for_month);

    let savings = account.as_ref().and_then(|a| {
        ledger::savings_progress(summary.monthly_income, summary.monthly_expenses, a.active_goal())
    });

    let out = SummaryOut {
        month: month.token(),
        balance: fmt_money(&summary.balance),
        monthly_income: fmt_money(&summary.monthly_income),
        monthly_expenses: fmt_money(&summary.monthly_expenses),
        transactions: shown.len(),
        expenses_by_category: breakdown
            .iter()
            .map(|s| ShareOut {
                category: s.category.clone(),
                total: fmt_money(&s.total),
                percent: format!("{:.1}", s.percent),
            })
            .collect(),
        savings: savings.as_ref().map(|p| SavingsOut {
            saved: fmt_money(&p.saved),
            goal: fmt_money(&p.goal),
            percent: format!("{:.1}", p.percent),
            tier: p.tier.as_str().to_string(),
        }),
    };
    if maybe_print_json(json_flag, jsonl_flag, &out)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Month", "Balance", "Income", "Expenses"],
            vec![vec![
                out.month.clone(),
                out.balance.clone(),
                out.monthly_income.clone(),
                out.monthly_expenses.clone(),
            ]],
        )
    );

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|t| {
            vec![
                t.date.format("%Y-%m-%d").to_string(),
                t.description.clone(),
                fmt_money(&t.amount),
                t.kind.to_string(),
                t.category.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if !rows.is_empty() {
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Kind", "Category"], rows)
        );
    }

    if !breakdown.is_empty() {
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_money(&s.total),
                    format!("{:.1}%", s.percent),
                ]
            })
            .collect();
        println!("Expenses by category");
        println!("{}", pretty_table(&["Category", "Total", "Share"], rows));
    }

    if let Some(p) = savings {
        println!(
            "Savings goal: {} of {} ({:.1}%) - {}",
            fmt_money(&p.saved),
            fmt_money(&p.goal),
            p.percent,
            p.tier.as_str()
        );
    }
    Ok(())
}
