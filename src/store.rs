// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use serde::{Deserialize, Serialize};

/// Insertion-ordered transactions for one user.
///
/// The order entries were appended in is the only order the store knows;
/// nothing here sorts by date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionStore {
    entries: Vec<Transaction>,
    #[serde(skip)]
    dirty: bool,
}

impl TransactionStore {
    pub fn new(entries: Vec<Transaction>) -> Self {
        Self {
            entries,
            dirty: false,
        }
    }

    pub fn append(&mut self, tx: Transaction) {
        self.entries.push(tx);
        self.dirty = true;
    }

    pub fn list(&self) -> &[Transaction] {
        &self.entries
    }

    /// Case-insensitive substring match on notes or category.
    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|t| {
                t.notes.to_lowercase().contains(&needle)
                    || t.category()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn recent(&self, n: usize) -> &[Transaction] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl PartialEq for TransactionStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<Vec<Transaction>> for TransactionStore {
    fn from(entries: Vec<Transaction>) -> Self {
        Self::new(entries)
    }
}
