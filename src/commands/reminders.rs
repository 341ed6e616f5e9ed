// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db;
use crate::models::{check_reminder, Reminder, TxKind};
use crate::reminders as sched;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table, today};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("pending", sub)) => pending(conn, sub)?,
        Some(("done", sub)) => toggle(conn, sub, true)?,
        Some(("undo", sub)) => toggle(conn, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> Result<TxKind> {
    TxKind::parse(s).with_context(|| format!("Invalid kind '{}', expected income or expense", s))
}

fn reminder_by_name(conn: &Connection, name: &str) -> Result<Reminder> {
    db::load_reminders(conn)?
        .into_iter()
        .find(|r| r.name == name)
        .with_context(|| format!("Reminder '{}' not found", name))
}

fn month_arg(sub: &clap::ArgMatches) -> Result<crate::models::MonthRef> {
    match sub.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => Ok(current_month()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());
    let day = *sub.get_one::<u32>("day").unwrap();

    check_reminder(name, kind, category.as_deref(), day)?;
    conn.execute(
        "INSERT INTO reminders(name, kind, category, day_of_month) VALUES (?1, ?2, ?3, ?4)",
        params![name, kind.as_str(), category, day],
    )?;
    println!("Added reminder '{}' (day {} of each month)", name, day);
    Ok(())
}

#[derive(Serialize)]
struct ReminderRow {
    name: String,
    kind: String,
    category: String,
    day_of_month: u32,
    completed_this_month: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut reminders = db::load_reminders(conn)?;
    // Settings-style listing: ascending due day.
    reminders.sort_by_key(|r| r.day_of_month);

    let token = current_month().token();
    let data: Vec<ReminderRow> = reminders
        .iter()
        .map(|r| ReminderRow {
            name: r.name.clone(),
            kind: r.kind.to_string(),
            category: r.category.clone().unwrap_or_default(),
            day_of_month: r.day_of_month,
            completed_this_month: r.is_completed_for(&token),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.day_of_month.to_string(),
                    if r.completed_this_month { "yes" } else { "no" }.into(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Kind", "Category", "Day", "Done this month"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let existing = reminder_by_name(conn, name)?;

    let new_name = sub
        .get_one::<String>("new-name")
        .cloned()
        .unwrap_or(existing.name);
    let kind = match sub.get_one::<String>("kind") {
        Some(s) => parse_kind(s)?,
        None => existing.kind,
    };
    let category = match (sub.get_one::<String>("category"), kind) {
        (Some(c), _) => Some(c.clone()),
        (None, TxKind::Income) => None,
        (None, TxKind::Expense) => existing.category,
    };
    let day = sub
        .get_one::<u32>("day")
        .copied()
        .unwrap_or(existing.day_of_month);

    check_reminder(&new_name, kind, category.as_deref(), day)?;
    conn.execute(
        "UPDATE reminders SET name=?1, kind=?2, category=?3, day_of_month=?4 WHERE id=?5",
        params![new_name, kind.as_str(), category, day, existing.id],
    )?;
    println!("Updated reminder '{}'", new_name);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let existing = reminder_by_name(conn, name)?;
    // Completion history goes with it; none is kept.
    conn.execute("DELETE FROM reminders WHERE id=?1", params![existing.id])?;
    println!("Removed reminder '{}'", name);
    Ok(())
}

#[derive(Serialize)]
struct PendingRow {
    name: String,
    due: String,
    days_until_due: i64,
    status: String,
}

fn pending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;

    let reminders = db::load_reminders(conn)?;
    // Dashboard view: snapshot order, no resorting.
    let pending = sched::pending(&reminders, month, today());

    if pending.is_empty() {
        println!("No pending reminders for {}", month);
        return Ok(());
    }

    let data: Vec<PendingRow> = pending
        .iter()
        .map(|p| PendingRow {
            name: p.reminder.name.clone(),
            due: p.due_date.to_string(),
            days_until_due: p.days_until_due,
            status: p.status.as_str().to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.due.clone(),
                    r.days_until_due.to_string(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Due", "In days", "Status"], rows));
    }
    Ok(())
}

fn toggle(conn: &Connection, sub: &clap::ArgMatches, completed: bool) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let month = month_arg(sub)?;
    let existing = reminder_by_name(conn, name)?;
    let token = month.token();

    db::set_reminder_completion(conn, existing.id, &token, completed)?;
    if completed {
        println!("Marked '{}' complete for {}", name, token);
    } else {
        println!("Reopened '{}' for {}", name, token);
    }
    Ok(())
}
