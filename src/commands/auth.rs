// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::{self, ProfileUpdate};
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::DateTime;
use rusqlite::Connection;

pub fn handle(conn: &Connection, session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let profile = auth::register(conn, session, name, email, password)?;
            println!("Welcome, {}! You are signed in as {}", profile.name, profile.email);
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let profile = auth::login(conn, session, email, password)?;
            println!("Signed in as {}", profile.email);
        }
        Some(("logout", _)) => {
            auth::logout(conn, session)?;
            println!("Signed out");
        }
        Some(("whoami", sub)) => {
            let profile = session.require()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), profile)? {
                let rows = vec![
                    vec!["Name".to_string(), profile.name.clone()],
                    vec!["Email".into(), profile.email.clone()],
                    vec!["Image".into(), profile.profile_image.clone().unwrap_or_default()],
                    vec!["Member since".into(), fmt_millis(profile.created_at)],
                    vec!["Updated".into(), fmt_millis(profile.updated_at)],
                ];
                println!("{}", pretty_table(&["Profile", ""], rows));
            }
        }
        Some(("update", sub)) => {
            let update = ProfileUpdate {
                name: sub.get_one::<String>("name").cloned(),
                email: sub.get_one::<String>("email").cloned(),
                profile_image: sub.get_one::<String>("image").cloned(),
            };
            let profile = auth::update_profile(conn, session, update)?;
            println!("Profile updated: {} <{}>", profile.name, profile.email);
        }
        Some(("passwd", sub)) => {
            let current = sub.get_one::<String>("current").unwrap();
            let new_password = sub.get_one::<String>("new").unwrap();
            auth::change_password(conn, session, current, new_password)?;
            println!("Password changed");
        }
        _ => {}
    }
    Ok(())
}

fn fmt_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}
