// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::{format_plain, format_signed, parse_amount, split_evenly};
use crate::models::{Person, Transaction, TxType};
use crate::store;
use crate::utils::{
    maybe_print_json, now_millis, parse_date, parse_money, parse_time, pretty_table,
    today_display,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn parse_split(raw: &str, idx: usize) -> Result<Person> {
    let (name, amount) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid split '{}', expected NAME=AMOUNT", raw))?;
    let amount = parse_money(amount)?;
    Ok(Person {
        id: format!("{}-{}", now_millis(), idx),
        name: name.trim().to_string(),
        amount: format_plain(amount),
    })
}

/// Applies the arguments of `tx add` / `tx edit` on top of `base`.
pub fn apply_args(sub: &clap::ArgMatches, mut tx: Transaction) -> Result<Transaction> {
    if let Some(d) = arg(sub, "description") {
        tx.description = d.to_string();
    }

    let new_kind = arg(sub, "type").and_then(TxType::parse);
    let new_amount = arg(sub, "amount").map(parse_money).transpose()?;
    if let Some(kind) = new_kind {
        tx.kind = kind;
    }
    if new_amount.is_some() || new_kind.is_some() {
        let amount = match new_amount {
            Some(a) => a,
            None => parse_amount(&tx.value)
                .with_context(|| format!("Stored value '{}' is unreadable, pass --amount", tx.value))?,
        };
        tx.value = format_signed(amount, tx.kind);
    }

    if let Some(c) = arg(sub, "category") {
        tx.category = Some(c.to_lowercase());
    }
    if let Some(d) = arg(sub, "date") {
        tx.date = parse_date(d)?;
    }
    if let Some(t) = arg(sub, "time") {
        tx.time = Some(parse_time(t)?);
    }
    if let Some(p) = arg(sub, "payment") {
        tx.payment_method = Some(p.to_string());
    }
    if let Some(n) = arg(sub, "notes") {
        tx.notes = Some(n.to_string());
    }

    if let Some(&count) = sub.get_one::<u32>("installments") {
        if count > 1 {
            let per = match arg(sub, "installment-value") {
                Some(v) => parse_money(v)?,
                None => {
                    let total = parse_amount(&tx.value).unwrap_or_default().abs();
                    split_evenly(total, count).unwrap_or_default()
                }
            };
            tx.installments = Some(count);
            tx.installment_value = Some(format_plain(per));
        } else {
            tx.installments = None;
            tx.installment_value = None;
        }
    } else if let Some(v) = arg(sub, "installment-value") {
        tx.installment_value = Some(format_plain(parse_money(v)?));
    }

    if let Some(splits) = sub.get_many::<String>("split") {
        let people = splits
            .enumerate()
            .map(|(i, s)| parse_split(s, i))
            .collect::<Result<Vec<_>>>()?;
        tx.is_collective = !people.is_empty();
        tx.people = people;
    }

    if tx.kind == TxType::Income {
        tx.installments = None;
        tx.installment_value = None;
    }
    Ok(tx)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = Transaction::new("", "", &today_display(), TxType::Expense);
    let tx = apply_args(sub, draft)?;
    tx.validate()?;
    let saved = store::save_transaction(conn, tx)?;
    println!(
        "Recorded {} on {} for '{}' (id: {})",
        saved.value, saved.date, saved.description, saved.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").context("--id is required")?;
    let current = store::get_transaction(conn, id)?;
    let updated = apply_args(sub, current)?;
    updated.validate()?;
    store::update_transaction(conn, &updated)?;
    println!("Updated transaction {}", updated.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").context("--id is required")?;
    store::delete_transaction(conn, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn installment_label(tx: &Transaction) -> String {
    match (tx.installments, tx.installment_value.as_deref()) {
        (Some(n), Some(v)) if n > 1 => format!("{}x R$ {}", n, v),
        _ => String::new(),
    }
}

/// Stored order (newest first) with the `tx list` filters applied.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let kind = arg(sub, "type").and_then(TxType::parse);
    let category = arg(sub, "category").map(|c| c.to_lowercase());
    let limit = sub.get_one::<usize>("limit").copied();

    let rows = store::load_transactions(conn)?
        .into_iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none() || t.category == category)
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.clone(),
                    t.description.clone(),
                    t.category.clone().unwrap_or_default(),
                    t.value.clone(),
                    installment_label(t),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Value", "Installments"],
                rows,
            )
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").context("--id is required")?;
    let tx = store::get_transaction(conn, id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tx)? {
        return Ok(());
    }
    let mut rows = vec![
        vec!["Description".to_string(), tx.description.clone()],
        vec!["Value".into(), tx.value.clone()],
        vec!["Type".into(), tx.kind.as_str().into()],
        vec!["Date".into(), tx.date.clone()],
        vec!["Time".into(), tx.time.clone().unwrap_or_default()],
        vec!["Category".into(), tx.category.clone().unwrap_or_default()],
        vec!["Payment".into(), tx.payment_method.clone().unwrap_or_default()],
        vec!["Installments".into(), installment_label(&tx)],
        vec!["Notes".into(), tx.notes.clone().unwrap_or_default()],
    ];
    for p in &tx.people {
        rows.push(vec![format!("Split: {}", p.name), format!("R$ {}", p.amount)]);
    }
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
