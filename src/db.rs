// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::models::{Account, AccountKind, Reminder, Transaction, TxKind};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Billfold", "billfold"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("billfold.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        kind TEXT CHECK(kind IN ('cash','card','savings')),
        color TEXT,
        savings_goal TEXT,
        goal_enabled INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        category TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS reminders(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        category TEXT,
        day_of_month INTEGER NOT NULL CHECK(day_of_month BETWEEN 1 AND 31)
    );

    -- One row per (reminder, month) completion. INSERT OR IGNORE / DELETE
    -- give the same idempotent set-add/set-remove semantics as a
    -- field-level array-union/array-remove, without rewriting the reminder.
    CREATE TABLE IF NOT EXISTS reminder_completions(
        reminder_id INTEGER NOT NULL,
        month TEXT NOT NULL,
        UNIQUE(reminder_id, month),
        FOREIGN KEY(reminder_id) REFERENCES reminders(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn encode_date(ts: NaiveDateTime) -> String {
    ts.format(DATE_FMT).to_string()
}

fn decode_date(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_FMT)
        .with_context(|| format!("Invalid stored timestamp '{}'", s))
}

fn decode_amount(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored amount '{}'", s))
}

fn decode_kind(s: &str) -> Result<TxKind> {
    TxKind::parse(s).with_context(|| format!("Invalid stored kind '{}'", s))
}

/// Full transaction snapshot, newest first, optionally scoped to one account.
pub fn load_transactions(conn: &Connection, account_id: Option<i64>) -> Result<Vec<Transaction>> {
    let sql = "SELECT id, account_id, description, amount, kind, category, date
               FROM transactions WHERE (?1 IS NULL OR account_id = ?1)
               ORDER BY date DESC, id DESC";
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params![account_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(3)?;
        let kind: String = r.get(4)?;
        let date: String = r.get(6)?;
        out.push(Transaction {
            id: r.get(0)?,
            account_id: r.get(1)?,
            description: r.get(2)?,
            amount: decode_amount(&amount)?,
            kind: decode_kind(&kind)?,
            category: r.get(5)?,
            date: decode_date(&date)?,
        });
    }
    Ok(out)
}

/// Reminder snapshot in creation order, completion months folded in.
pub fn load_reminders(conn: &Connection) -> Result<Vec<Reminder>> {
    let mut stmt =
        conn.prepare("SELECT id, name, kind, category, day_of_month FROM reminders ORDER BY id")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(2)?;
        out.push(Reminder {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: decode_kind(&kind)?,
            category: r.get(3)?,
            day_of_month: r.get(4)?,
            completed_months: BTreeSet::new(),
        });
    }

    let by_id: HashMap<i64, usize> = out
        .iter()
        .enumerate()
        .map(|(idx, rem)| (rem.id, idx))
        .collect();

    let mut cstmt =
        conn.prepare("SELECT reminder_id, month FROM reminder_completions ORDER BY month")?;
    let mut crows = cstmt.query([])?;
    while let Some(r) = crows.next()? {
        let rid: i64 = r.get(0)?;
        let month: String = r.get(1)?;
        if let Some(&idx) = by_id.get(&rid) {
            out[idx].completed_months.insert(month);
        }
    }
    Ok(out)
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn
        .prepare("SELECT id, name, kind, color, savings_goal, goal_enabled FROM accounts ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: Option<String> = r.get(2)?;
        let goal: Option<String> = r.get(4)?;
        out.push(Account {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: kind.as_deref().and_then(AccountKind::parse),
            color: r.get(3)?,
            savings_goal: goal.as_deref().map(decode_amount).transpose()?,
            goal_enabled: r.get::<_, i64>(5)? != 0,
        });
    }
    Ok(out)
}

/// Mark or unmark one month as completed for a reminder. Expressed as a
/// single-row write so concurrent toggles on different months never clobber
/// each other.
pub fn set_reminder_completion(
    conn: &Connection,
    reminder_id: i64,
    month_token: &str,
    completed: bool,
) -> Result<()> {
    if completed {
        conn.execute(
            "INSERT OR IGNORE INTO reminder_completions(reminder_id, month) VALUES (?1, ?2)",
            params![reminder_id, month_token],
        )?;
    } else {
        conn.execute(
            "DELETE FROM reminder_completions WHERE reminder_id=?1 AND month=?2",
            params![reminder_id, month_token],
        )?;
    }
    Ok(())
}
