// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pursebook::{Kind, Transaction, TransactionStore};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sample() -> TransactionStore {
    let mut store = TransactionStore::default();
    store.append(Transaction::income(d("1000"), day("2024-03-01"), "Salary"));
    store.append(Transaction::expense(d("42.10"), "Groceries", day("2024-01-20"), "weekly shop"));
    store.append(Transaction::expense(d("9.99"), "Streaming", day("2024-02-02"), ""));
    store.append(Transaction::expense(d("30"), "Dining", day("2024-02-14"), "Valentine GROCERIES run"));
    store
}

#[test]
fn append_keeps_insertion_order_and_marks_dirty() {
    let mut store = TransactionStore::default();
    assert!(!store.is_dirty());
    store.append(Transaction::expense(d("5"), "Coffee", day("2024-05-02"), ""));
    store.append(Transaction::expense(d("7"), "Coffee", day("2024-05-01"), ""));
    assert!(store.is_dirty());

    let dates: Vec<&str> = store.list().iter().map(|t| t.date.as_str()).collect();
    assert_eq!(dates, ["2024-05-02", "2024-05-01"]);

    store.mark_clean();
    assert!(!store.is_dirty());
}

#[test]
fn search_matches_notes_or_category_ignoring_case() {
    let store = sample();
    let hits = store.search("groceries");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].category(), Some("Groceries"));
    assert_eq!(hits[1].category(), Some("Dining"));
}

#[test]
fn empty_search_returns_everything_in_order() {
    let store = sample();
    let hits = store.search("");
    assert_eq!(hits.len(), store.len());
    assert_eq!(hits[0].kind, Kind::Income);
}

#[test]
fn income_without_category_only_matches_on_notes() {
    let store = sample();
    assert_eq!(store.search("sal").len(), 1);
    assert!(store.search("income").is_empty());
}

#[test]
fn recent_returns_tail_in_insertion_order() {
    let store = sample();
    let last = store.recent(2);
    assert_eq!(last.len(), 2);
    assert_eq!(last[0].category(), Some("Streaming"));
    assert_eq!(last[1].category(), Some("Dining"));

    assert_eq!(store.recent(50).len(), 4);
    assert!(store.recent(0).is_empty());
}
