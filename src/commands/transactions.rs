// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::encode_date;
use crate::models::{check_transaction, TxKind};
use crate::utils::{
    encode_now, ensure_category, id_for_account, maybe_print_json, parse_datetime, parse_decimal,
    parse_month, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TxKind> {
    TxKind::parse(s).with_context(|| format!("Invalid kind '{}', expected income or expense", s))
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let desc = sub.get_one::<String>("desc").unwrap();
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let date = match sub.get_one::<String>("date") {
        Some(s) => encode_date(parse_datetime(s)?),
        None => encode_now(),
    };

    check_transaction(desc, amount, kind, category.as_deref())?;
    let account_id = id_for_account(conn, account_name)?;

    // An unseen expense category joins the registry on first use.
    if let Some(cat) = &category {
        if ensure_category(conn, cat)? {
            println!("Registered new category '{}'", cat);
        }
    }

    conn.execute(
        "INSERT INTO transactions(account_id, description, amount, kind, category, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account_id,
            desc,
            amount.to_string(),
            kind.as_str(),
            category,
            date
        ],
    )?;
    println!(
        "Recorded {} {} '{}' (acct: {})",
        kind, amount, desc, account_name
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.description, t.amount, t.kind, t.category
         FROM transactions t LEFT JOIN accounts a ON t.account_id=a.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        // Normalize through MonthRef so "2025-3" matches stored dates.
        params_vec.push(parse_month(month)?.token());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND a.name=?");
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND t.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let category: Option<String> = r.get(6)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            account: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            description: r.get(3)?,
            amount: r.get(4)?,
            kind: r.get(5)?,
            category: category.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Account", "Description", "Amount", "Kind", "Category"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let txs = crate::db::load_transactions(conn, None)?;
    let Some(existing) = txs.into_iter().find(|t| t.id == id) else {
        bail!("Transaction {} not found", id);
    };

    let account_id = match sub.get_one::<String>("account") {
        Some(name) => id_for_account(conn, name)?,
        None => existing.account_id,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => existing.amount,
    };
    let desc = sub
        .get_one::<String>("desc")
        .cloned()
        .unwrap_or(existing.description);
    let kind = match sub.get_one::<String>("kind") {
        Some(s) => parse_kind(s)?,
        None => existing.kind,
    };
    // Switching to income drops the category unless one was passed explicitly.
    let category = match (sub.get_one::<String>("category"), kind) {
        (Some(c), _) => Some(c.clone()),
        (None, TxKind::Income) => None,
        (None, TxKind::Expense) => existing.category,
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => existing.date,
    };

    check_transaction(&desc, amount, kind, category.as_deref())?;
    if let Some(cat) = &category {
        ensure_category(conn, cat)?;
    }

    conn.execute(
        "UPDATE transactions SET account_id=?1, description=?2, amount=?3, kind=?4, category=?5, date=?6
         WHERE id=?7",
        params![
            account_id,
            desc,
            amount.to_string(),
            kind.as_str(),
            category,
            encode_date(date),
            id
        ],
    )?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    println!("Deleted transaction {}", id);
    Ok(())
}
