// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Kind, MonthKey, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overrun {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetCheck {
    Ok,
    Overrun(Overrun),
}

impl BudgetCheck {
    pub fn is_overrun(&self) -> bool {
        matches!(self, BudgetCheck::Overrun(_))
    }
}

/// One row of the per-category budget status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub ratio: Decimal,
    pub overrun: bool,
}

/// Expense total for `category` within the calendar month of `reference`.
pub fn monthly_spent(transactions: &[Transaction], category: &str, reference: NaiveDate) -> Decimal {
    let month = MonthKey::of(reference);
    transactions
        .iter()
        .filter(|t| t.kind == Kind::Expense && t.category() == Some(category))
        .filter(|t| t.month() == Some(month))
        .filter_map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Checks the month of `reference` (normally today) against the category limit.
/// Categories without a limit always pass.
pub fn evaluate(
    category: &str,
    budgets: &BTreeMap<String, Decimal>,
    transactions: &[Transaction],
    reference: NaiveDate,
) -> BudgetCheck {
    let Some(limit) = budgets.get(category).copied() else {
        return BudgetCheck::Ok;
    };
    let spent = monthly_spent(transactions, category, reference);
    if spent > limit {
        tracing::warn!(category, %spent, %limit, "budget overrun");
        BudgetCheck::Overrun(Overrun {
            category: category.to_string(),
            spent,
            limit,
        })
    } else {
        BudgetCheck::Ok
    }
}

/// `spent / limit`, or zero when there is no usable limit. A quotient too
/// large to represent saturates at `Decimal::MAX`.
pub fn progress_ratio(
    category: &str,
    budgets: &BTreeMap<String, Decimal>,
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Decimal {
    match budgets.get(category) {
        Some(limit) if !limit.is_zero() => {
            let spent = monthly_spent(transactions, category, reference);
            match spent.checked_div(*limit) {
                Some(ratio) => ratio.max(Decimal::ZERO),
                None if spent.is_sign_negative() != limit.is_sign_negative() => Decimal::ZERO,
                None => Decimal::MAX,
            }
        }
        _ => Decimal::ZERO,
    }
}

pub fn status_report(
    budgets: &BTreeMap<String, Decimal>,
    transactions: &[Transaction],
    reference: NaiveDate,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|(category, limit)| {
            let spent = monthly_spent(transactions, category, reference);
            BudgetStatus {
                category: category.clone(),
                limit: *limit,
                spent,
                ratio: progress_ratio(category, budgets, transactions, reference),
                overrun: spent > *limit,
            }
        })
        .collect()
}
