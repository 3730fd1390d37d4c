// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Supermercado,
    Veiculo,
    Farmacia,
    Lazer,
    Alimentacao,
    Moradia,
    Saude,
    Educacao,
    Transporte,
    Vestuario,
    Receita,
    Outros,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ShoppingCart,
    Car,
    Pill,
    Gamepad,
    Utensils,
    Home,
    Heart,
    GraduationCap,
    Bus,
    Shirt,
    CircleDollarSign,
    HelpCircle,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::ShoppingCart => "shopping-cart",
            Icon::Car => "car",
            Icon::Pill => "pill",
            Icon::Gamepad => "gamepad",
            Icon::Utensils => "utensils",
            Icon::Home => "home",
            Icon::Heart => "heart",
            Icon::GraduationCap => "graduation-cap",
            Icon::Bus => "bus",
            Icon::Shirt => "shirt",
            Icon::CircleDollarSign => "circle-dollar-sign",
            Icon::HelpCircle => "help-circle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub color: &'static str,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub label: String,
    pub value: &'static str,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 12] = [
        CategoryKey::Supermercado,
        CategoryKey::Veiculo,
        CategoryKey::Farmacia,
        CategoryKey::Lazer,
        CategoryKey::Alimentacao,
        CategoryKey::Moradia,
        CategoryKey::Saude,
        CategoryKey::Educacao,
        CategoryKey::Transporte,
        CategoryKey::Vestuario,
        CategoryKey::Receita,
        CategoryKey::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Supermercado => "supermercado",
            CategoryKey::Veiculo => "veiculo",
            CategoryKey::Farmacia => "farmacia",
            CategoryKey::Lazer => "lazer",
            CategoryKey::Alimentacao => "alimentacao",
            CategoryKey::Moradia => "moradia",
            CategoryKey::Saude => "saude",
            CategoryKey::Educacao => "educacao",
            CategoryKey::Transporte => "transporte",
            CategoryKey::Vestuario => "vestuario",
            CategoryKey::Receita => "receita",
            CategoryKey::Outros => "outros",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn meta(&self) -> CategoryMeta {
        let (color, icon) = match self {
            CategoryKey::Supermercado => ("#ff9800", Icon::ShoppingCart),
            CategoryKey::Veiculo => ("#2196f3", Icon::Car),
            CategoryKey::Farmacia => ("#f44336", Icon::Pill),
            CategoryKey::Lazer => ("#e91e63", Icon::Gamepad),
            CategoryKey::Alimentacao => ("#4caf50", Icon::Utensils),
            CategoryKey::Moradia => ("#9c27b0", Icon::Home),
            CategoryKey::Saude => ("#f44336", Icon::Heart),
            CategoryKey::Educacao => ("#3f51b5", Icon::GraduationCap),
            CategoryKey::Transporte => ("#607d8b", Icon::Bus),
            CategoryKey::Vestuario => ("#795548", Icon::Shirt),
            CategoryKey::Receita => ("#4caf50", Icon::CircleDollarSign),
            CategoryKey::Outros => ("#9e9e9e", Icon::HelpCircle),
        };
        CategoryMeta { color, icon }
    }
}

/// Color and icon for a stored category key. Unknown keys get the
/// `outros` entry.
pub fn resolve_category(key: &str) -> CategoryMeta {
    CategoryKey::from_key(key)
        .unwrap_or(CategoryKey::Outros)
        .meta()
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn category_options() -> Vec<CategoryOption> {
    CategoryKey::ALL
        .iter()
        .map(|k| CategoryOption {
            label: capitalize(k.as_str()),
            value: k.as_str(),
        })
        .collect()
}
