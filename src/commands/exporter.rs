// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let txs = store::load_transactions(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "time",
                "type",
                "description",
                "category",
                "value",
                "installments",
                "installment_value",
                "payment_method",
                "collective",
                "notes",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.clone(),
                    t.date.clone(),
                    t.time.clone().unwrap_or_default(),
                    t.kind.as_str().to_string(),
                    t.description.clone(),
                    t.category.clone().unwrap_or_default(),
                    t.value.clone(),
                    t.installments.map(|n| n.to_string()).unwrap_or_default(),
                    t.installment_value.clone().unwrap_or_default(),
                    t.payment_method.clone().unwrap_or_default(),
                    t.people
                        .iter()
                        .map(|p| format!("{}={}", p.name, p.amount))
                        .collect::<Vec<_>>()
                        .join(";"),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)
                .with_context(|| format!("Cannot write {}", out))?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
