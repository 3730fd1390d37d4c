// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use saldo::commands::{doctor, importer};
use saldo::models::{Transaction, TxType};
use saldo::{db, store};
use std::fs;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

const DUMP: &str = r#"[
    {"id":"100","description":"Salário","value":"+ R$ 4.000,00","date":"01/03/2025","type":"positive","timestamp":1},
    {"id":"101","description":"Aluguel","value":"- R$ 1.500,00","date":"02/03/2025","type":"negative","category":"moradia","timestamp":2},
    {"id":"102","description":"Presente","value":"R$ ???","date":"03/03/2025","type":"expense","category":"lazer","timestamp":3}
]"#;

#[test]
fn import_appends_and_reports_unreadable_amounts() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.json");
    fs::write(&path, DUMP).unwrap();

    let (added, unreadable) = importer::import_file(&conn, &path, false).unwrap();
    assert_eq!(added, 3);
    assert_eq!(unreadable, 1);

    let again = importer::import_file(&conn, &path, false).unwrap();
    assert_eq!(again, (0, 1));
    assert_eq!(store::load_transactions(&conn).unwrap().len(), 3);
}

#[test]
fn import_with_replace_drops_existing_records() {
    let conn = setup();
    store::save_transaction(
        &conn,
        Transaction::new("Velho", "- R$ 1,00", "01/01/2024", TxType::Expense).with_category("outros"),
    )
    .unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.json");
    fs::write(&path, DUMP).unwrap();

    importer::import_file(&conn, &path, true).unwrap();
    let txs = store::load_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 3);
    assert!(txs.iter().all(|t| t.description != "Velho"));
}

#[test]
fn import_rejects_non_array_files() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let path = dir.path().join("dump.json");
    fs::write(&path, r#"{"transactions":[]}"#).unwrap();
    assert!(importer::import_file(&conn, &path, false).is_err());
    assert!(importer::import_file(&conn, &dir.path().join("missing.json"), false).is_err());
}

#[test]
fn doctor_flags_what_the_reports_skip() {
    let conn = setup();
    let raw = r#"[
        {"id":"1","description":"ok","value":"- R$ 10,00","date":"01/01/2025","type":"expense","category":"lazer"},
        {"id":"2","description":"bad","value":"abc","date":"01/01/2025","type":"expense","category":"lazer"},
        {"id":"3","description":"bad parcel","value":"- R$ 30,00","date":"01/01/2025","type":"expense",
         "category":"lazer","installments":3,"installmentValue":"x"},
        {"id":"4","description":"loose","value":"- R$ 5,00","date":"01/01/2025","type":"expense"},
        {"id":"1","description":"dup","value":"- R$ 1,00","date":"01/01/2025","type":"expense","category":"lazer"}
    ]"#;
    db::set_item(&conn, db::TRANSACTIONS_KEY, raw).unwrap();

    let rows = doctor::diagnose(&conn).unwrap();
    let issues: Vec<(String, String)> = rows
        .into_iter()
        .map(|r| (r[0].clone(), r[1].clone()))
        .collect();
    assert_eq!(
        issues,
        vec![
            ("2".to_string(), "unreadable_value 'abc'".to_string()),
            ("3".to_string(), "unreadable_installment_value 'x'".to_string()),
            ("4".to_string(), "expense_without_category".to_string()),
            ("1".to_string(), "duplicate_id".to_string()),
        ]
    );
}

#[test]
fn doctor_is_quiet_on_clean_data() {
    let conn = setup();
    store::save_transaction(
        &conn,
        Transaction::new("Café", "- R$ 6,50", "01/01/2025", TxType::Expense).with_category("alimentacao"),
    )
    .unwrap();
    assert!(doctor::diagnose(&conn).unwrap().is_empty());
}

#[test]
fn doctor_flags_amounts_too_large_to_total() {
    let conn = setup();
    let raw = r#"[
        {"id":"1","description":"a","value":"- R$ 50000000000000000000000000000,00","date":"01/01/2025","type":"expense","category":"moradia"},
        {"id":"2","description":"b","value":"- R$ 50000000000000000000000000000,00","date":"01/01/2025","type":"expense","category":"moradia"},
        {"id":"3","description":"c","value":"- R$ 10,00","date":"01/01/2025","type":"expense",
         "category":"veiculo","installments":4294967295,"installmentValue":"100000000000000000000,00"}
    ]"#;
    db::set_item(&conn, db::TRANSACTIONS_KEY, raw).unwrap();

    let rows = doctor::diagnose(&conn).unwrap();
    let flagged: Vec<&str> = rows
        .iter()
        .filter(|r| r[1] == "amount_overflow")
        .map(|r| r[0].as_str())
        .collect();
    assert_eq!(flagged, vec!["2", "3"]);
    assert_eq!(rows.len(), 2);
}
