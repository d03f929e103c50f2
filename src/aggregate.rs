// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived totals over a slice of transactions. Every function here is pure.
//! Sums saturate at the `Decimal` bounds instead of overflowing.

use crate::models::{Kind, MonthKey, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: MonthKey,
    #[serde(flatten)]
    pub totals: MonthTotals,
}

/// Income minus expense. Entries without a numeric amount contribute nothing.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter_map(|t| t.amount.map(|a| (t.kind, a)))
        .fold(Decimal::ZERO, |acc, (kind, amt)| match kind {
            Kind::Income => acc.saturating_add(amt),
            Kind::Expense => acc.saturating_sub(amt),
        })
}

pub fn total(transactions: &[Transaction], kind: Kind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .filter_map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Income and expense per calendar month, buckets in order of first appearance.
pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = Vec::new();
    let mut index: HashMap<MonthKey, usize> = HashMap::new();
    for t in transactions {
        let (Some(month), Some(amt)) = (t.month(), t.amount) else {
            continue;
        };
        let slot = *index.entry(month).or_insert_with(|| {
            buckets.push(MonthBucket {
                month,
                totals: MonthTotals::default(),
            });
            buckets.len() - 1
        });
        let totals = &mut buckets[slot].totals;
        match t.kind {
            Kind::Income => totals.income = totals.income.saturating_add(amt),
            Kind::Expense => totals.expense = totals.expense.saturating_add(amt),
        }
    }
    buckets
}

/// Sum per category for one kind; uncategorized entries are dropped.
pub fn category_breakdown(transactions: &[Transaction], kind: Kind) -> BTreeMap<String, Decimal> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == kind) {
        if let (Some(cat), Some(amt)) = (t.category(), t.amount) {
            let sum = agg.entry(cat.to_string()).or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(amt);
        }
    }
    agg
}
