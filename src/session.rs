// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{self, CURRENT_USER_KEY};
use crate::error::{SaldoError, SaldoResult};
use crate::models::UserProfile;
use crate::store::{read_doc, write_doc};
use rusqlite::Connection;

/// Who is signed in. Loaded once per invocation and handed to the commands
/// that need an identity; changes are persisted through `sign_in` /
/// `sign_out`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    pub fn load(conn: &Connection) -> SaldoResult<Self> {
        let user: Option<UserProfile> = read_doc(conn, CURRENT_USER_KEY)?;
        Ok(Self { user })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn require(&self) -> SaldoResult<&UserProfile> {
        self.user.as_ref().ok_or(SaldoError::NotLoggedIn)
    }

    pub fn sign_in(&mut self, conn: &Connection, profile: UserProfile) -> SaldoResult<()> {
        write_doc(conn, CURRENT_USER_KEY, &profile)?;
        self.user = Some(profile);
        Ok(())
    }

    pub fn sign_out(&mut self, conn: &Connection) -> SaldoResult<()> {
        db::remove_item(conn, CURRENT_USER_KEY)?;
        self.user = None;
        Ok(())
    }
}
