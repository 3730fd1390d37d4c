// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaldoError {
    #[error("Not logged in (run `saldo auth login` first)")]
    NotLoggedIn,

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Split amounts add up to {sum} but the transaction total is {total}")]
    CollectiveMismatch { total: Decimal, sum: Decimal },

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage error: {source}")]
    Storage {
        #[from]
        source: rusqlite::Error,
    },

    #[error("Corrupt stored document: {source}")]
    Document {
        #[from]
        source: serde_json::Error,
    },
}

pub type SaldoResult<T> = std::result::Result<T, SaldoError>;
