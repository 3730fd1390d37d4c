// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::format_currency;
use crate::models::{AppSettings, SettingsPatch, Theme};
use crate::store;
use crate::utils::{maybe_print_json, parse_money, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let settings = store::get_settings(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                print_settings(&settings);
            }
        }
        Some(("salary", sub)) => {
            let amount = parse_money(sub.get_one::<String>("amount").unwrap())?;
            let settings = store::update_salary(conn, amount)?;
            if settings.salary.is_zero() {
                println!("Salary unset; income transactions will be used instead");
            } else {
                println!("Salary set to {}", format_currency(settings.salary));
            }
        }
        Some(("set", sub)) => {
            let salary = sub
                .get_one::<String>("salary")
                .map(|s| parse_money(s))
                .transpose()?;
            let patch = SettingsPatch {
                salary,
                currency: sub
                    .get_one::<String>("currency")
                    .map(|s| s.trim().to_uppercase()),
                theme: sub
                    .get_one::<String>("theme")
                    .map(|t| if t == "light" { Theme::Light } else { Theme::Dark }),
            };
            let settings = store::save_settings(conn, patch)?;
            print_settings(&settings);
        }
        Some(("clear", _)) => {
            store::clear_settings(conn)?;
            println!("Settings reset to defaults");
        }
        _ => {}
    }
    Ok(())
}

fn print_settings(s: &AppSettings) {
    let salary = if s.salary.is_zero() {
        "(unset)".to_string()
    } else {
        format_currency(s.salary)
    };
    let rows = vec![
        vec!["Salary".to_string(), salary],
        vec!["Currency".into(), s.currency.clone()],
        vec!["Theme".into(), s.theme.as_str().into()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}
