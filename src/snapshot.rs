// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-state backup and restore as a JSON document with exactly three
//! top-level fields: `transactions`, `budgets` and `goals`.

use crate::error::{LedgerError, Result};
use crate::models::LedgerState;
use serde_json::Value;

pub fn export(state: &LedgerState) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(state).map_err(LedgerError::Encode)?;
    tracing::debug!(
        transactions = state.transactions.len(),
        budgets = state.budgets.len(),
        goals = state.goals.len(),
        "snapshot encoded"
    );
    Ok(bytes)
}

/// Parses a snapshot into a fresh state. Absent or `null` collections come
/// back empty; a document that is not a JSON object is rejected.
pub fn import(bytes: &[u8]) -> Result<LedgerState> {
    let doc: Value = serde_json::from_slice(bytes).map_err(LedgerError::Decode)?;
    if !doc.is_object() {
        return Err(LedgerError::Decode(serde::de::Error::custom(
            "expected a JSON object with transactions, budgets and goals",
        )));
    }
    let state: LedgerState = serde_json::from_value(doc).map_err(LedgerError::Decode)?;
    tracing::debug!(transactions = state.transactions.len(), "snapshot decoded");
    Ok(state)
}
