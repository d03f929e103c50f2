// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::store::TransactionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Income => f.write_str("income"),
            Kind::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(format!("Unknown kind '{}', expected income|expense", other)),
        }
    }
}

/// A single ledger entry.
///
/// Amounts are written as exact JSON numbers. `amount` is `None` when the
/// stored value was not numeric and `date` is
/// kept verbatim so that entries with a malformed date survive a round trip;
/// both cases are skipped by the aggregates that need them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::arbitrary_precision_option::serialize",
        deserialize_with = "lenient_amount"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn income(amount: Decimal, date: NaiveDate, notes: impl Into<String>) -> Self {
        Self {
            kind: Kind::Income,
            amount: Some(amount),
            category: None,
            date: date.to_string(),
            notes: notes.into(),
        }
    }

    pub fn expense(
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            kind: Kind::Expense,
            amount: Some(amount),
            category: Some(category.into()),
            date: date.to_string(),
            notes: notes.into(),
        }
    }

    /// Category label, treating an empty string the same as no category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
    }

    pub fn month(&self) -> Option<MonthKey> {
        self.day().map(MonthKey::of)
    }
}

fn lenient_amount<'de, D>(d: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(d)?;
    Ok(match raw {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    })
}

/// Calendar month used as the grouping key for monthly aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: TransactionStore,
    #[serde(
        default,
        serialize_with = "limits_as_numbers",
        deserialize_with = "null_as_default"
    )]
    pub budgets: BTreeMap<String, Decimal>, // category -> monthly limit
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: BTreeMap<String, Value>,
}

// Limits are written as exact JSON numbers, like transaction amounts.
fn limits_as_numbers<S: Serializer>(
    limits: &BTreeMap<String, Decimal>,
    s: S,
) -> Result<S::Ok, S::Error> {
    struct Number<'a>(&'a Decimal);

    impl Serialize for Number<'_> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            rust_decimal::serde::arbitrary_precision::serialize(self.0, s)
        }
    }

    s.collect_map(limits.iter().map(|(cat, limit)| (cat, Number(limit))))
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
