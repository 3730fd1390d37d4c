// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{aggregate_by_category, compute_financial_summary, compute_report};
use crate::presenter::{
    CategoryRow, SummaryRow, insights, present_categories, present_report, present_summary,
    render_bar,
};
use crate::session::Session;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use tracing::warn;

const BAR_WIDTH: usize = 20;
const DASHBOARD_TOP: usize = 5;

pub fn handle(conn: &Connection, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dashboard", sub)) => dashboard(conn, session, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("stats", sub)) => stats(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary_table(rows: &[SummaryRow]) -> comfy_table::Table {
    let data = rows
        .iter()
        .map(|r| vec![r.title.to_string(), r.amount.clone(), r.tone.as_str().to_string()])
        .collect();
    pretty_table(&["", "Amount", "Tone"], data)
}

fn category_table(rows: &[CategoryRow]) -> comfy_table::Table {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.label.clone(),
                r.amount.clone(),
                r.percentage.clone(),
                render_bar(r.bar, BAR_WIDTH),
                r.icon.to_string(),
            ]
        })
        .collect();
    pretty_table(&["Category", "Spent", "%", "", "Icon"], data)
}

fn warn_skipped(skipped: usize) {
    if skipped > 0 {
        warn!(
            skipped,
            "records with unreadable amounts were left out (see `saldo doctor`)"
        );
    }
}

#[derive(Serialize)]
struct Dashboard {
    user: Option<String>,
    summary: Vec<SummaryRow>,
    categories: Vec<CategoryRow>,
    skipped: usize,
}

fn dashboard(conn: &Connection, session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::load_transactions(conn)?;
    let settings = store::get_settings(conn)?;
    let fin = compute_financial_summary(&txs, settings.salary);
    let mut cats = present_categories(&aggregate_by_category(&txs));
    cats.truncate(DASHBOARD_TOP);

    let view = Dashboard {
        user: session.user().map(|u| u.name.clone()),
        summary: present_summary(&fin),
        categories: cats,
        skipped: fin.skipped,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    if let Some(name) = &view.user {
        println!("Hello, {}", name);
    }
    println!("{}", summary_table(&view.summary));
    if view.categories.is_empty() {
        println!("No categorized expenses yet.");
    } else {
        println!("{}", category_table(&view.categories));
    }
    warn_skipped(view.skipped);
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::load_transactions(conn)?;
    let mut totals = aggregate_by_category(&txs);
    if let Some(&top) = sub.get_one::<usize>("top") {
        totals.truncate(top);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    println!("{}", category_table(&present_categories(&totals)));
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::load_transactions(conn)?;
    let settings = store::get_settings(conn)?;
    let fin = compute_financial_summary(&txs, settings.salary);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &fin)? {
        return Ok(());
    }
    println!("{}", summary_table(&present_summary(&fin)));
    warn_skipped(fin.skipped);
    Ok(())
}

fn stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txs = store::load_transactions(conn)?;
    let settings = store::get_settings(conn)?;
    let report = compute_report(&txs, settings.salary);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    println!("{}", summary_table(&present_report(&report)));
    for line in insights(&report) {
        println!("- {}", line);
    }
    warn_skipped(report.skipped);
    Ok(())
}
