// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use saldo::models::{Person, Transaction, TxType};
use saldo::{cli, commands::exporter, db, store};
use serde_json::Value;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut pizza = Transaction::new("Pizza", "- R$ 90,00", "14/02/2025", TxType::Expense)
        .with_category("alimentacao");
    pizza.is_collective = true;
    pizza.people = vec![
        Person {
            id: "p1".into(),
            name: "Ana".into(),
            amount: "45,00".into(),
        },
        Person {
            id: "p2".into(),
            name: "Bia".into(),
            amount: "45,00".into(),
        },
    ];
    store::save_transaction(&conn, pizza).unwrap();
    store::save_transaction(
        &conn,
        Transaction::new("TV", "- R$ 2.400,00", "15/02/2025", TxType::Expense)
            .with_category("moradia")
            .with_installments(12, "200,00"),
    )
    .unwrap();
    conn
}

#[test]
fn export_transactions_writes_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "saldo",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(&conn, sub).unwrap();

    let raw = std::fs::read_to_string(&out_path).unwrap();
    assert!(raw.contains('\n'));
    let parsed: Value = serde_json::from_str(&raw).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "TV");
    assert_eq!(items[0]["type"], "expense");
    assert_eq!(items[0]["installmentValue"], "200,00");
    assert_eq!(items[1]["isCollective"], true);
    assert_eq!(items[1]["people"][1]["name"], "Bia");
}

#[test]
fn export_transactions_writes_csv() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "saldo",
        "export",
        "transactions",
        "--out",
        &out_str,
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(&conn, sub).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[3], "type");
    assert_eq!(headers.len(), 12);

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][4], "TV");
    assert_eq!(&records[0][6], "- R$ 2.400,00");
    assert_eq!(&records[0][7], "12");
    assert_eq!(&records[1][10], "Ana=45,00;Bia=45,00");
}
