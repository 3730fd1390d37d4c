// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::Icon;
use crate::currency::parse_amount;
use crate::error::{SaldoError, SaldoResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    #[serde(alias = "positive")]
    Income,
    #[serde(alias = "negative")]
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "positive" | "in" => Some(TxType::Income),
            "expense" | "negative" | "out" => Some(TxType::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    pub description: String,
    pub value: String, // "- R$ 320,00"
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_value: Option<String>, // "50,00"
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_collective: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub people: Vec<Person>,
}

impl Transaction {
    /// Bare record with no optional attributes; id and timestamp are
    /// assigned by the store on save.
    pub fn new(description: &str, value: &str, date: &str, kind: TxType) -> Self {
        Self {
            id: String::new(),
            description: description.to_string(),
            value: value.to_string(),
            date: date.to_string(),
            kind,
            category: None,
            timestamp: 0,
            time: None,
            payment_method: None,
            notes: None,
            installments: None,
            installment_value: None,
            is_collective: false,
            people: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_installments(mut self, count: u32, per_installment: &str) -> Self {
        self.installments = Some(count);
        self.installment_value = Some(per_installment.to_string());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxType::Expense
    }

    pub fn is_installment(&self) -> bool {
        self.installments.unwrap_or(0) > 1
    }

    /// Input-time checks. Stored records are never re-validated; the
    /// aggregation layer tolerates whatever is on disk.
    pub fn validate(&self) -> SaldoResult<()> {
        if self.description.trim().is_empty() {
            return Err(SaldoError::Validation("Description is required".into()));
        }
        let total = parse_amount(&self.value)
            .ok_or_else(|| SaldoError::Validation(format!("Invalid value '{}'", self.value)))?
            .abs();
        if self.is_expense() && self.category.as_deref().is_none_or(|c| c.trim().is_empty()) {
            return Err(SaldoError::Validation("Expenses need a category".into()));
        }
        if self.is_installment() {
            let per = self.installment_value.as_deref().unwrap_or_default();
            if parse_amount(per).is_none() {
                return Err(SaldoError::Validation(format!(
                    "Invalid installment value '{}'",
                    per
                )));
            }
        }
        if self.is_collective {
            if self.people.is_empty() {
                return Err(SaldoError::Validation(
                    "Collective transactions need at least one participant".into(),
                ));
            }
            let mut sum = Decimal::ZERO;
            for p in &self.people {
                if p.name.trim().is_empty() {
                    return Err(SaldoError::Validation("Participant name is required".into()));
                }
                sum += parse_amount(&p.amount).ok_or_else(|| {
                    SaldoError::Validation(format!("Invalid amount '{}' for {}", p.amount, p.name))
                })?;
            }
            if (total - sum).abs() > Decimal::new(1, 2) {
                return Err(SaldoError::CollectiveMismatch { total, sum });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub id: String,
    pub name: String,
    pub total: Decimal,
    pub formatted_total: String,
    pub percentage: u32,
    pub color: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub salary: Decimal,
    pub currency: String,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            salary: Decimal::ZERO,
            currency: "BRL".to_string(),
            theme: Theme::Dark,
        }
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub salary: Option<Decimal>,
    pub currency: Option<String>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&User> for UserProfile {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            profile_image: u.profile_image.clone(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
