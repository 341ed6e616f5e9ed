// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db;
use crate::models::AccountKind;
use crate::utils::{encode_now, fmt_money, id_for_account, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind_arg(sub: &clap::ArgMatches) -> Result<Option<AccountKind>> {
    match sub.get_one::<String>("kind") {
        None => Ok(None),
        Some(s) => match AccountKind::parse(s) {
            Some(k) => Ok(Some(k)),
            None => bail!("Invalid account kind '{}', expected cash, card or savings", s),
        },
    }
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    if name.trim().is_empty() {
        bail!("Account name must not be empty");
    }
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    if balance < Decimal::ZERO {
        bail!("Initial balance must not be negative");
    }
    let kind = parse_kind_arg(sub)?;
    let color = sub.get_one::<String>("color").map(|s| s.to_string());
    let goal = sub
        .get_one::<String>("goal")
        .map(|s| parse_decimal(s))
        .transpose()?;

    // Account row and its opening entry land together or not at all.
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO accounts(name, kind, color, savings_goal, goal_enabled)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            kind.map(|k| k.as_str()),
            color,
            goal.map(|g| g.to_string()),
            goal.is_some() as i64
        ],
    )?;
    let account_id = tx.last_insert_rowid();
    if balance > Decimal::ZERO {
        tx.execute(
            "INSERT INTO transactions(account_id, description, amount, kind, category, date)
             VALUES (?1, 'Initial balance', ?2, 'income', NULL, ?3)",
            params![account_id, balance.to_string(), encode_now()],
        )?;
    }
    tx.commit()?;
    println!("Added account '{}' with initial balance {}", name, fmt_money(&balance));
    Ok(())
}

#[derive(Serialize)]
pub struct AccountRow {
    pub name: String,
    pub kind: String,
    pub color: String,
    pub balance: String,
    pub savings_goal: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let accounts = db::load_accounts(conn)?;
    let transactions = db::load_transactions(conn, None)?;
    let mut balances: HashMap<i64, Decimal> = HashMap::new();
    for t in &transactions {
        *balances.entry(t.account_id).or_insert(Decimal::ZERO) += t.signed_amount();
    }

    let data: Vec<AccountRow> = accounts
        .iter()
        .map(|a| AccountRow {
            name: a.name.clone(),
            kind: a.kind.map(|k| k.as_str().to_string()).unwrap_or_default(),
            color: a.color.clone().unwrap_or_default(),
            balance: fmt_money(balances.get(&a.id).unwrap_or(&Decimal::ZERO)),
            savings_goal: a
                .active_goal()
                .map(|g| fmt_money(&g))
                .unwrap_or_else(|| "-".into()),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.kind.clone(),
                    r.color.clone(),
                    r.balance.clone(),
                    r.savings_goal.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Kind", "Color", "Balance", "Goal"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let account_id = id_for_account(conn, name)?;

    if let Some(new_name) = sub.get_one::<String>("new-name") {
        if new_name.trim().is_empty() {
            bail!("Account name must not be empty");
        }
        conn.execute(
            "UPDATE accounts SET name=?1 WHERE id=?2",
            params![new_name, account_id],
        )?;
    }
    if let Some(kind) = parse_kind_arg(sub)? {
        conn.execute(
            "UPDATE accounts SET kind=?1 WHERE id=?2",
            params![kind.as_str(), account_id],
        )?;
    }
    if let Some(color) = sub.get_one::<String>("color") {
        conn.execute(
            "UPDATE accounts SET color=?1 WHERE id=?2",
            params![color, account_id],
        )?;
    }
    if let Some(goal) = sub.get_one::<String>("goal") {
        let goal = parse_decimal(goal)?;
        if goal <= Decimal::ZERO {
            bail!("Savings goal must be greater than zero");
        }
        conn.execute(
            "UPDATE accounts SET savings_goal=?1, goal_enabled=1 WHERE id=?2",
            params![goal.to_string(), account_id],
        )?;
    }
    if sub.get_flag("enable-goal") {
        conn.execute(
            "UPDATE accounts SET goal_enabled=1 WHERE id=?1",
            params![account_id],
        )?;
    }
    if sub.get_flag("disable-goal") {
        conn.execute(
            "UPDATE accounts SET goal_enabled=0 WHERE id=?1",
            params![account_id],
        )?;
    }
    println!("Updated account '{}'", name);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let account_id = id_for_account(conn, name)?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |r| r.get(0))?;
    if count <= 1 {
        bail!("Cannot delete the only remaining account");
    }

    // ON DELETE CASCADE takes the account's transactions with it.
    conn.execute("DELETE FROM accounts WHERE id=?1", params![account_id])?;
    println!("Removed account '{}' and its transactions", name);
    Ok(())
}
