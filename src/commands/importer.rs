// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::count_unparseable;
use crate::models::Transaction;
use crate::store;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let file = sub.get_one::<String>("file").unwrap();
            let (added, unreadable) = import_file(conn, Path::new(file), sub.get_flag("replace"))?;
            println!("Imported {} transactions from {}", added, file);
            if unreadable > 0 {
                println!(
                    "{} imported record(s) have amounts the reports cannot read; run `saldo doctor`",
                    unreadable
                );
            }
        }
        _ => {}
    }
    Ok(())
}

/// Reads a JSON array of transactions in the stored shape (legacy
/// `positive`/`negative` types included) and appends it.
pub fn import_file(conn: &Connection, path: &Path, replace: bool) -> Result<(usize, usize)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let incoming: Vec<Transaction> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of transactions", path.display()))?;
    let unreadable = count_unparseable(&incoming);
    if replace {
        store::clear_transactions(conn)?;
    }
    let added = store::import_transactions(conn, incoming)?;
    Ok((added, unreadable))
}
