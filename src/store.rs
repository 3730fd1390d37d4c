// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON documents on top of the `kv` table: the transaction collection and
//! the application settings. Every write replaces the full document.

use crate::db::{self, SETTINGS_KEY, TRANSACTIONS_KEY};
use crate::error::{SaldoError, SaldoResult};
use crate::models::{AppSettings, SettingsPatch, Transaction};
use crate::utils::now_millis;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

pub(crate) fn read_doc<T: DeserializeOwned>(conn: &Connection, key: &str) -> SaldoResult<Option<T>> {
    match db::get_item(conn, key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub(crate) fn write_doc<T: Serialize + ?Sized>(conn: &Connection, key: &str, v: &T) -> SaldoResult<()> {
    let raw = serde_json::to_string(v)?;
    db::set_item(conn, key, &raw)?;
    Ok(())
}

pub fn load_transactions(conn: &Connection) -> SaldoResult<Vec<Transaction>> {
    Ok(read_doc(conn, TRANSACTIONS_KEY)?.unwrap_or_default())
}

fn write_transactions(conn: &Connection, txs: &[Transaction]) -> SaldoResult<()> {
    write_doc(conn, TRANSACTIONS_KEY, txs)
}

/// Epoch-millis id, bumped until it is unused in `existing`.
fn next_id(existing: &[Transaction], now: i64) -> String {
    let mut candidate = now;
    while existing.iter().any(|t| t.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Stores a new transaction at the head of the collection and returns it
/// with its assigned id and timestamp.
pub fn save_transaction(conn: &Connection, mut tx: Transaction) -> SaldoResult<Transaction> {
    let mut txs = load_transactions(conn)?;
    let now = now_millis();
    tx.id = next_id(&txs, now);
    tx.timestamp = now;
    txs.insert(0, tx.clone());
    write_transactions(conn, &txs)?;
    info!(id = %tx.id, kind = tx.kind.as_str(), "transaction saved");
    Ok(tx)
}

pub fn get_transaction(conn: &Connection, id: &str) -> SaldoResult<Transaction> {
    load_transactions(conn)?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| SaldoError::TransactionNotFound(id.to_string()))
}

/// Full replace of the record with the same id.
pub fn update_transaction(conn: &Connection, updated: &Transaction) -> SaldoResult<()> {
    let mut txs = load_transactions(conn)?;
    let slot = txs
        .iter_mut()
        .find(|t| t.id == updated.id)
        .ok_or_else(|| SaldoError::TransactionNotFound(updated.id.clone()))?;
    *slot = updated.clone();
    write_transactions(conn, &txs)?;
    info!(id = %updated.id, "transaction updated");
    Ok(())
}

pub fn delete_transaction(conn: &Connection, id: &str) -> SaldoResult<()> {
    let mut txs = load_transactions(conn)?;
    let before = txs.len();
    txs.retain(|t| t.id != id);
    if txs.len() == before {
        return Err(SaldoError::TransactionNotFound(id.to_string()));
    }
    write_transactions(conn, &txs)?;
    info!(id, "transaction deleted");
    Ok(())
}

/// Appends records from an external dump. Records whose id is already
/// stored are left alone; records without an id get a fresh one.
/// Returns how many were added.
pub fn import_transactions(conn: &Connection, incoming: Vec<Transaction>) -> SaldoResult<usize> {
    let mut txs = load_transactions(conn)?;
    let now = now_millis();
    let mut added = 0usize;
    for mut tx in incoming {
        if !tx.id.is_empty() && txs.iter().any(|t| t.id == tx.id) {
            continue;
        }
        if tx.id.is_empty() {
            tx.id = next_id(&txs, now);
        }
        if tx.timestamp == 0 {
            tx.timestamp = now;
        }
        txs.push(tx);
        added += 1;
    }
    write_transactions(conn, &txs)?;
    info!(added, "transactions imported");
    Ok(added)
}

pub fn clear_transactions(conn: &Connection) -> SaldoResult<()> {
    db::remove_item(conn, TRANSACTIONS_KEY)?;
    Ok(())
}

/// Stored settings with defaults filled in for any missing field.
pub fn get_settings(conn: &Connection) -> SaldoResult<AppSettings> {
    Ok(read_doc(conn, SETTINGS_KEY)?.unwrap_or_default())
}

pub fn save_settings(conn: &Connection, patch: SettingsPatch) -> SaldoResult<AppSettings> {
    if patch.salary.is_some_and(|s| s < Decimal::ZERO) {
        return Err(SaldoError::Validation(
            "Salary must be zero (unset) or positive".into(),
        ));
    }
    let mut settings = get_settings(conn)?;
    if let Some(salary) = patch.salary {
        settings.salary = salary;
    }
    if let Some(currency) = patch.currency {
        settings.currency = currency;
    }
    if let Some(theme) = patch.theme {
        settings.theme = theme;
    }
    write_doc(conn, SETTINGS_KEY, &settings)?;
    info!("settings saved");
    Ok(settings)
}

pub fn update_salary(conn: &Connection, salary: Decimal) -> SaldoResult<AppSettings> {
    save_settings(
        conn,
        SettingsPatch {
            salary: Some(salary),
            ..Default::default()
        },
    )
}

pub fn clear_settings(conn: &Connection) -> SaldoResult<()> {
    db::remove_item(conn, SETTINGS_KEY)?;
    Ok(())
}
