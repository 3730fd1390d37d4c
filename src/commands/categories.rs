// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::category_detail;
use crate::categories::{CategoryKey, capitalize, category_options, resolve_category};
use crate::currency::format_currency;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let opts = category_options();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &opts)? {
                let data = opts
                    .into_iter()
                    .map(|o| {
                        let meta = resolve_category(o.value);
                        vec![
                            o.value.to_string(),
                            o.label,
                            meta.color.to_string(),
                            meta.icon.name().to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Key", "Label", "Color", "Icon"], data));
            }
        }
        Some(("show", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_lowercase();
            let txs = store::load_transactions(conn)?;
            let detail = category_detail(&txs, &name);
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &detail)? {
                return Ok(());
            }
            if CategoryKey::from_key(&name).is_none() {
                println!("Note: '{}' is not one of the built-in categories", name);
            }
            let data = detail
                .transactions
                .iter()
                .map(|t| {
                    vec![
                        t.date.clone(),
                        t.time.clone().unwrap_or_default(),
                        t.description.clone(),
                        t.payment_method.clone().unwrap_or_default(),
                        t.value.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Date", "Time", "Description", "Payment", "Value"], data)
            );
            println!(
                "{}: {} in {} transaction(s), average {}",
                capitalize(&detail.name),
                format_currency(detail.total),
                detail.count,
                format_currency(detail.average)
            );
        }
        _ => {}
    }
    Ok(())
}
