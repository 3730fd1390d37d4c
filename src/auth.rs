// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local accounts. Users live under the `users` key with Argon2id password
//! hashes; only `UserProfile` ever leaves this module.

use crate::db::USERS_KEY;
use crate::error::{SaldoError, SaldoResult};
use crate::models::{User, UserProfile};
use crate::session::Session;
use crate::store::{read_doc, write_doc};
use crate::utils::now_millis;
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use tracing::{info, warn};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

fn hash_password(password: &str) -> SaldoResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| SaldoError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("stored password hash is malformed: {}", e);
            false
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> SaldoResult<()> {
    if email.is_empty() {
        return Err(SaldoError::Validation("Email is required".into()));
    }
    if !EMAIL.is_match(email) {
        return Err(SaldoError::Validation(format!("Invalid email '{}'", email)));
    }
    Ok(())
}

fn validate_password(password: &str) -> SaldoResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SaldoError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub(crate) fn all_users(conn: &Connection) -> SaldoResult<Vec<User>> {
    Ok(read_doc(conn, USERS_KEY)?.unwrap_or_default())
}

fn write_users(conn: &Connection, users: &[User]) -> SaldoResult<()> {
    write_doc(conn, USERS_KEY, users)
}

/// Creates an account and signs it in.
pub fn register(
    conn: &Connection,
    session: &mut Session,
    name: &str,
    email: &str,
    password: &str,
) -> SaldoResult<UserProfile> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SaldoError::Validation("Name is required".into()));
    }
    let email = normalize_email(email);
    validate_email(&email)?;
    validate_password(password)?;

    let mut users = all_users(conn)?;
    if users.iter().any(|u| u.email == email) {
        return Err(SaldoError::EmailTaken(email));
    }

    let now = now_millis();
    let mut id = now;
    while users.iter().any(|u| u.id == id.to_string()) {
        id += 1;
    }
    let user = User {
        id: id.to_string(),
        name: name.to_string(),
        email,
        password_hash: hash_password(password)?,
        profile_image: None,
        created_at: now,
        updated_at: now,
    };
    let profile = UserProfile::from(&user);
    users.push(user);
    write_users(conn, &users)?;
    session.sign_in(conn, profile.clone())?;
    info!(user = %profile.id, "user registered");
    Ok(profile)
}

pub fn login(
    conn: &Connection,
    session: &mut Session,
    email: &str,
    password: &str,
) -> SaldoResult<UserProfile> {
    let email = normalize_email(email);
    let users = all_users(conn)?;
    let user = users
        .iter()
        .find(|u| u.email == email && verify_password(password, &u.password_hash))
        .ok_or(SaldoError::InvalidCredentials)?;
    let profile = UserProfile::from(user);
    session.sign_in(conn, profile.clone())?;
    info!(user = %profile.id, "user logged in");
    Ok(profile)
}

pub fn logout(conn: &Connection, session: &mut Session) -> SaldoResult<()> {
    session.sign_out(conn)
}

/// Applies `update` to the signed-in user and refreshes the session.
pub fn update_profile(
    conn: &Connection,
    session: &mut Session,
    update: ProfileUpdate,
) -> SaldoResult<UserProfile> {
    let user_id = session.require()?.id.clone();
    let mut users = all_users(conn)?;
    let idx = users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| SaldoError::UserNotFound(user_id.clone()))?;

    if let Some(email) = update.email.as_deref().map(normalize_email) {
        validate_email(&email)?;
        if users.iter().any(|u| u.id != user_id && u.email == email) {
            return Err(SaldoError::EmailTaken(email));
        }
        users[idx].email = email;
    }
    if let Some(name) = update.name.as_deref().map(str::trim) {
        if name.is_empty() {
            return Err(SaldoError::Validation("Name is required".into()));
        }
        users[idx].name = name.to_string();
    }
    if let Some(image) = update.profile_image {
        users[idx].profile_image = Some(image).filter(|s| !s.trim().is_empty());
    }
    users[idx].updated_at = now_millis();

    let profile = UserProfile::from(&users[idx]);
    write_users(conn, &users)?;
    session.sign_in(conn, profile.clone())?;
    info!(user = %profile.id, "profile updated");
    Ok(profile)
}

pub fn change_password(
    conn: &Connection,
    session: &Session,
    current: &str,
    new_password: &str,
) -> SaldoResult<()> {
    let user_id = &session.require()?.id;
    let mut users = all_users(conn)?;
    let user = users
        .iter_mut()
        .find(|u| &u.id == user_id)
        .ok_or_else(|| SaldoError::UserNotFound(user_id.clone()))?;
    if !verify_password(current, &user.password_hash) {
        return Err(SaldoError::WrongPassword);
    }
    validate_password(new_password)?;
    user.password_hash = hash_password(new_password)?;
    user.updated_at = now_millis();
    write_users(conn, &users)?;
    info!(user = %user_id, "password changed");
    Ok(())
}
